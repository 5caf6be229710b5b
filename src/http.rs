//! Transport primitives shared by token exchanges and API calls.
//!
//! The module exposes [`ApiHttpClient`] so downstream crates can bring their own HTTP
//! stack. Requests and responses travel as [`http`](::http) types with in-memory bodies;
//! implementations should stop reading a response body after [`MAX_RESPONSE_BODY_BYTES`]
//! and hand back the truncated prefix. [`CappedBody`] implements that bookkeeping, and
//! every decode applies [`capped`] again so the limit holds for any transport.

// std
#[cfg(feature = "reqwest")] use std::{ops::Deref, time::Duration as StdDuration};
// crates.io
pub use ::http::{Method, StatusCode, header};
// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Upper bound on the number of response body bytes read from the wire (1 MiB).
pub const MAX_RESPONSE_BODY_BYTES: usize = 1 << 20;

/// Outbound request with a fully buffered body.
pub type HttpRequest = ::http::Request<Vec<u8>>;
/// Inbound response with a body capped at [`MAX_RESPONSE_BODY_BYTES`].
pub type HttpResponse = ::http::Response<Vec<u8>>;
/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Request extension naming the response statuses whose body the caller decodes.
///
/// For any other status the transport may return without reading the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedStatuses(pub &'static [u16]);
impl DecodedStatuses {
	/// Returns `true` when a `status` response body will be decoded.
	pub fn contains(&self, status: u16) -> bool {
		self.0.contains(&status)
	}
}

/// Returns at most the first [`MAX_RESPONSE_BODY_BYTES`] of `body`.
pub fn capped(body: &[u8]) -> &[u8] {
	&body[..body.len().min(MAX_RESPONSE_BODY_BYTES)]
}

/// Abstraction over HTTP transports used for every outbound call.
///
/// The trait is the client's only dependency on an HTTP stack. Connection handling, TLS,
/// and timeout enforcement all belong to the implementation; a timeout must surface as a
/// [`TransportError`] for which [`TransportError::is_timeout`] returns `true`.
///
/// # Body Contract
///
/// - Read at most [`MAX_RESPONSE_BODY_BYTES`] of the response body and silently drop the rest.
/// - When the request carries [`DecodedStatuses`], skip the body of any status it omits.
/// - Never follow redirects; the token and API endpoints answer directly.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and returns the status, headers, and capped body.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_>;
}

/// Accumulates response chunks until a byte limit is reached.
#[derive(Debug)]
pub struct CappedBody {
	buf: Vec<u8>,
	limit: usize,
	truncated: bool,
}
impl CappedBody {
	/// Creates an empty accumulator that keeps at most `limit` bytes.
	pub fn new(limit: usize) -> Self {
		Self { buf: Vec::new(), limit, truncated: false }
	}

	/// Appends as much of `chunk` as fits; returns `false` once the limit is reached.
	pub fn push(&mut self, chunk: &[u8]) -> bool {
		let room = self.limit - self.buf.len();

		if chunk.len() > room {
			self.buf.extend_from_slice(&chunk[..room]);
			self.truncated = true;

			return false;
		}

		self.buf.extend_from_slice(chunk);

		self.buf.len() < self.limit
	}

	/// Returns `true` when bytes were dropped.
	pub fn is_truncated(&self) -> bool {
		self.truncated
	}

	/// Returns the collected bytes.
	pub fn into_inner(self) -> Vec<u8> {
		self.buf
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Clients built through [`ReqwestHttpClient::with_timeout`] disable redirect following.
/// Configure any custom [`ReqwestClient`] passed to [`ReqwestHttpClient::with_client`] the
/// same way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose calls fail once `timeout` elapses.
	pub fn with_timeout(timeout: StdDuration) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.redirect(reqwest::redirect::Policy::none())
			.build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let decoded = request.extensions().get::<DecodedStatuses>().copied();
			let request = reqwest::Request::try_from(request)?;
			let mut response = client.execute(request).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut body = CappedBody::new(MAX_RESPONSE_BODY_BYTES);

			if reads_body(decoded, status.as_u16()) {
				while let Some(chunk) = response.chunk().await? {
					if !body.push(&chunk) {
						break;
					}
				}
			}

			#[cfg(feature = "tracing")]
			{
				if body.is_truncated() {
					tracing::debug!(
						%status,
						limit = MAX_RESPONSE_BODY_BYTES,
						"response body truncated"
					);
				}
			}

			let mut response_new = HttpResponse::new(body.into_inner());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

fn reads_body(decoded: Option<DecodedStatuses>, status: u16) -> bool {
	decoded.is_none_or(|statuses| statuses.contains(status))
}
