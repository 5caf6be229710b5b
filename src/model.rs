//! JSON payloads exchanged with the courier API.
//!
//! Field names follow the API's camelCase wire format. Optional request fields are
//! omitted when empty; response structs tolerate missing fields by falling back to
//! their defaults.

pub mod address;
pub mod order;
pub mod service;
pub mod user;

pub use address::*;
pub use order::*;
pub use service::*;
pub use user::*;

/// Deserializes `""` and `null` as `None`.
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
	D: serde::Deserializer<'de>,
	T: serde::de::DeserializeOwned,
{
	use serde::Deserialize;

	match Option::<serde_json::Value>::deserialize(deserializer)? {
		None => Ok(None),
		Some(serde_json::Value::String(s)) if s.is_empty() => Ok(None),
		Some(value) => serde_json::from_value(value).map(Some).map_err(serde::de::Error::custom),
	}
}
