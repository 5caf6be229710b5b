//! Optional observability helpers for token exchanges and API calls.
//!
//! # Feature Flags
//!
//! - `tracing` opens a `colete_online.request` span per call with `call`, `method`, and
//!   `path` fields. The `status` field is filled in as responses arrive.
//! - `metrics` counts call outcomes in `colete_online_call_total{call, outcome}` and raw
//!   responses in `colete_online_response_total{call, status}`.
//!
//! Secrets never reach either sink.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Kinds of outbound calls issued by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// `grant_type=client_credentials` exchange against the auth endpoint.
	TokenExchange,
	/// Authenticated call against the API base URL.
	ApiRequest,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::TokenExchange => "token_exchange",
			CallKind::ApiRequest => "api_request",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// Bearer rejected with HTTP 401; the call is repeated with a fresh token.
	Retry,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
			CallOutcome::Retry => "retry",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the final outcome of `result` for `kind`.
pub(crate) fn record_result<T, E>(kind: CallKind, result: &Result<T, E>) {
	match result {
		Ok(_) => record_call_outcome(kind, CallOutcome::Success),
		Err(_) => record_call_outcome(kind, CallOutcome::Failure),
	}
}
