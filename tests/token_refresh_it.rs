mod common;

// std
use std::{sync::Arc, time::Duration as StdDuration};
// self
use colete_online::{
	client::Client,
	error::Error,
	http::MAX_RESPONSE_BODY_BYTES,
	model::UserBalance,
};
use common::*;

const BALANCE_BODY: &str = r#"{"amount":10.0,"bonus":1.0}"#;

#[tokio::test]
async fn concurrent_callers_share_one_exchange() {
	let transport = Arc::new(
		ScriptedTransport::healthy(BALANCE_BODY).with_exchange_delay(StdDuration::from_millis(50)),
	);
	let client: Arc<Client<ScriptedTransport>> =
		Arc::new(Client::with_http_client(scripted_config(), transport.clone()));
	let handles = (0..8)
		.map(|_| {
			let client = client.clone();

			tokio::spawn(async move { client.bearer_token().await })
		})
		.collect::<Vec<_>>();
	let mut tokens = Vec::new();

	for handle in handles {
		let token = handle
			.await
			.expect("Caller task should not panic.")
			.expect("Every caller should receive a token.");

		tokens.push(token.expose().to_owned());
	}

	assert_eq!(transport.exchanges(), 1);
	assert_eq!(tokens.len(), 8);
	assert!(tokens.iter().all(|token| token == &tokens[0]));
}

#[tokio::test]
async fn unauthorized_call_is_repeated_with_a_fresh_token() {
	let transport = Arc::new(ScriptedTransport::new([401], BALANCE_BODY));
	let client: Client<ScriptedTransport> =
		Client::with_http_client(scripted_config(), transport.clone());
	let balance = client.user_balance().await.expect("Retried call should succeed.");
	let bearers = transport.api_bearers();

	assert_eq!(balance, UserBalance { amount: 10.0, bonus: 1.0 });
	assert_eq!(transport.exchanges(), 2);
	assert_eq!(bearers.len(), 2);
	assert_ne!(bearers[0], bearers[1]);
	assert!(bearers.iter().all(|bearer| bearer.starts_with("Bearer ")));
}

#[tokio::test]
async fn second_unauthorized_is_not_retried_again() {
	let transport = Arc::new(ScriptedTransport::new([401, 401, 401], BALANCE_BODY));
	let client: Client<ScriptedTransport> =
		Client::with_http_client(scripted_config(), transport.clone());
	let err = client.user_balance().await.expect_err("Second 401 should fail.");

	assert!(matches!(err, Error::UnexpectedStatus { status: 401 }));
	assert_eq!(transport.api_bearers().len(), 2);
	assert_eq!(transport.exchanges(), 2);
}

#[tokio::test]
async fn cached_token_is_reused_until_invalidated() {
	let transport = Arc::new(ScriptedTransport::healthy(BALANCE_BODY));
	let client: Client<ScriptedTransport> =
		Client::with_http_client(scripted_config(), transport.clone());

	client.user_balance().await.expect("First call should succeed.");
	client.user_balance().await.expect("Second call should succeed.");

	assert_eq!(transport.exchanges(), 1);

	client.invalidate_token().await;
	client.user_balance().await.expect("Call after invalidation should succeed.");

	let bearers = transport.api_bearers();

	assert_eq!(transport.exchanges(), 2);
	assert_eq!(bearers[0], bearers[1]);
	assert_ne!(bearers[1], bearers[2]);
}

#[tokio::test]
async fn independent_clients_keep_separate_caches() {
	let transport = Arc::new(ScriptedTransport::healthy(BALANCE_BODY));
	let first: Client<ScriptedTransport> =
		Client::with_http_client(scripted_config(), transport.clone());
	let second: Client<ScriptedTransport> =
		Client::with_http_client(scripted_config(), transport.clone());

	first.bearer_token().await.expect("First client should authenticate.");
	second.bearer_token().await.expect("Second client should authenticate.");

	assert_eq!(transport.exchanges(), 2);
}

#[tokio::test]
async fn bodies_past_the_limit_are_cut_before_decoding() {
	let pad = "x".repeat(MAX_RESPONSE_BODY_BYTES);
	let transport =
		Arc::new(ScriptedTransport::healthy(format!(r#"{{"note":"{pad}","amount":1.0}}"#)));
	let client: Client<ScriptedTransport> =
		Client::with_http_client(scripted_config(), transport.clone());
	let err = client.user_balance().await.expect_err("A cut body should not decode.");

	assert!(matches!(err, Error::Decode(_)));
	assert_eq!(transport.api_bearers().len(), 1);
}
