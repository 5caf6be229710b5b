//! Counters for call outcomes and per-response HTTP statuses.

// self
use crate::obs::{CallKind, CallOutcome};

/// Increments `colete_online_call_total{call, outcome}`.
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"colete_online_call_total",
		"call" => kind.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

/// Increments `colete_online_response_total{call, status}` once per HTTP response.
///
/// A call repeated after a 401 records both responses.
pub fn record_response_status(kind: CallKind, status: u16) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"colete_online_response_total",
		"call" => kind.as_str(),
		"status" => status.to_string()
	)
	.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (kind, status);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn counters_accept_every_label_without_a_recorder() {
		for outcome in
			[CallOutcome::Attempt, CallOutcome::Success, CallOutcome::Failure, CallOutcome::Retry]
		{
			record_call_outcome(CallKind::ApiRequest, outcome);
		}

		record_response_status(CallKind::TokenExchange, 200);
		record_response_status(CallKind::ApiRequest, 503);
	}
}
