//! Expiry extraction from JWT access tokens.
//!
//! Only the `exp` claim of the payload segment is read. Neither the signature nor any other
//! claim is checked: the issuing server remains the trust boundary and rejects tokens it does
//! not accept with HTTP 401.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::{_prelude::*, error::MalformedTokenError};

#[derive(Deserialize)]
struct ExpiryClaims {
	exp: i64,
}

/// Returns the instant encoded in the token's `exp` claim.
pub fn expires_at(token: &str) -> Result<OffsetDateTime, MalformedTokenError> {
	let segments = token.split('.').collect::<Vec<_>>();
	let [_, payload, _] = segments.as_slice() else {
		return Err(MalformedTokenError::SegmentCount { found: segments.len() });
	};
	let raw = URL_SAFE_NO_PAD
		.decode(payload)
		.map_err(|source| MalformedTokenError::PayloadEncoding { source })?;
	let mut de = serde_json::Deserializer::from_slice(&raw);
	let claims: ExpiryClaims = serde_path_to_error::deserialize(&mut de)
		.map_err(|source| MalformedTokenError::PayloadClaims { source })?;

	OffsetDateTime::from_unix_timestamp(claims.exp)
		.map_err(|_| MalformedTokenError::ExpiryOutOfRange { exp: claims.exp })
}
