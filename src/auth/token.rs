//! Cached bearer value and the instant it stops being usable.

// self
use crate::{
	_prelude::*,
	auth::{TokenSecret, jwt},
	error::MalformedTokenError,
};

/// Bearer header value plus the expiry derived from the access token's `exp` claim.
#[derive(Clone, PartialEq, Eq)]
pub struct CachedToken {
	/// Full `Authorization` header value (`Bearer <access_token>`).
	pub bearer: TokenSecret,
	/// Instant after which the token must be refreshed.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Prefix prepended to the raw access token.
	pub const BEARER_PREFIX: &'static str = "Bearer ";

	/// Builds a cache entry from a raw JWT access token.
	pub fn from_access_token(access_token: &str) -> Result<Self, MalformedTokenError> {
		let expires_at = jwt::expires_at(access_token)?;

		Ok(Self {
			bearer: TokenSecret::new(format!("{}{access_token}", Self::BEARER_PREFIX)),
			expires_at,
		})
	}

	/// Returns `true` while `now` is strictly before the expiry.
	///
	/// A zero (Unix epoch) expiry counts as unset and is never valid.
	pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at != OffsetDateTime::UNIX_EPOCH && now < self.expires_at
	}
}
impl Debug for CachedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedToken")
			.field("bearer", &"<redacted>")
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
