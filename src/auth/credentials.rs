//! Client credentials and the HTTP Basic value used for token exchanges.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Client identifier plus the precomputed `Basic base64(id:secret)` header value.
///
/// The raw secret is not retained once the header value has been derived.
#[derive(Clone)]
pub struct Credentials {
	client_id: String,
	basic: TokenSecret,
}
impl Credentials {
	/// Derives the Basic authorization value for `client_id:client_secret`.
	pub fn new(client_id: impl Into<String>, client_secret: &str) -> Self {
		let client_id = client_id.into();
		let encoded = STANDARD.encode(format!("{client_id}:{client_secret}"));

		Self { client_id, basic: TokenSecret::new(format!("Basic {encoded}")) }
	}

	/// Returns the client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Returns the full `Authorization` header value for token exchanges.
	pub fn basic_authorization(&self) -> &TokenSecret {
		&self.basic
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("basic", &self.basic)
			.finish()
	}
}
