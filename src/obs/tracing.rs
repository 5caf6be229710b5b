//! Request spans tagged with the HTTP method, target path, and response status.

// self
use crate::{_prelude::*, http::Method, obs::CallKind};

/// Span around one logical call; the status of each response is recorded as it arrives.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Opens a span for a credentials exchange against `auth_url`.
	pub fn token_exchange(auth_url: &Url) -> Self {
		Self::open(CallKind::TokenExchange, &Method::POST, auth_url.path())
	}

	/// Opens a span for `method` on the API-relative `path`.
	pub fn api_request(method: &Method, path: &str) -> Self {
		Self::open(CallKind::ApiRequest, method, path)
	}

	fn open(kind: CallKind, method: &Method, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"colete_online.request",
				call = kind.as_str(),
				method = %method,
				path,
				status = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, method, path);

			Self {}
		}
	}

	/// Records `status` on the span, replacing any status recorded by an earlier attempt.
	pub fn record_status(&self, status: u16) {
		#[cfg(feature = "tracing")]
		self.span.record("status", status);
		#[cfg(not(feature = "tracing"))]
		let _ = status;
	}

	/// Awaits `fut` inside the span.
	pub async fn run<F>(&self, fut: F) -> F::Output
	where
		F: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone()).await
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut.await
		}
	}
}
