//! Courier services available to the account.

// self
use crate::_prelude::*;

/// Optional service supported by a courier service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceExtraOption {
	/// Identifier used as [`ExtraOption::id`](crate::model::ExtraOption::id).
	pub id: i64,
	/// Display name.
	pub name: String,
	/// Parameters that must accompany the option.
	pub required_fields: Vec<String>,
	/// Parameters that may accompany the option.
	pub optional_fields: Vec<String>,
}

/// Entry of `GET /service`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceResponse {
	/// Identifier usable in [`ServiceSelection::direct`](crate::model::ServiceSelection::direct).
	pub id: i64,
	/// Courier operating the service.
	pub courier_name: String,
	/// Service name.
	pub name: String,
	/// Supported optional services.
	pub extra_options: Vec<ServiceExtraOption>,
}
