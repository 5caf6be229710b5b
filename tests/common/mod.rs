//! Helpers shared by the integration tests.

#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	sync::{
		Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration as StdDuration,
};
// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use httpmock::{Mock, prelude::*};
use time::{Duration, OffsetDateTime};
use url::Url;
// self
use colete_online::{
	client::{Client, ReqwestApiClient},
	config::{ClientConfig, Endpoints},
	http::{
		ApiHttpClient, HttpFuture, HttpRequest, HttpResponse, ReqwestHttpClient, StatusCode,
		header,
	},
	reqwest,
};

pub const CLIENT_ID: &str = "client_id";
pub const CLIENT_SECRET: &str = "client_secret";
/// `Basic base64("client_id:client_secret")`.
pub const BASIC_AUTHORIZATION: &str = "Basic Y2xpZW50X2lkOmNsaWVudF9zZWNyZXQ=";
pub const AUTH_PATH: &str = "/auth/token";
pub const API_PREFIX: &str = "/v1";

/// Builds an unsigned JWT whose payload only carries `exp`.
pub fn test_jwt(exp: i64) -> String {
	format!("header.{}.signature", URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#)))
}

/// JWT expiring two hours from now.
pub fn fresh_jwt() -> String {
	test_jwt((OffsetDateTime::now_utc() + Duration::hours(2)).unix_timestamp())
}

pub fn mock_endpoints(server: &MockServer) -> Endpoints {
	Endpoints::new(
		Url::parse(&server.url(AUTH_PATH)).expect("Mock auth URL should parse."),
		Url::parse(&server.url(API_PREFIX)).expect("Mock API URL should parse."),
	)
}

/// Reqwest-backed client pointed at `server`.
pub fn build_reqwest_test_client(server: &MockServer, timeout: StdDuration) -> ReqwestApiClient {
	build_reqwest_client_for(mock_endpoints(server), timeout)
}

/// Reqwest-backed client pointed at `endpoints`.
///
/// The mock server speaks TLS with a self-signed certificate, so certificate and hostname
/// checks are off. Timeout and redirect handling match [`ReqwestHttpClient::with_timeout`].
pub fn build_reqwest_client_for(endpoints: Endpoints, timeout: StdDuration) -> ReqwestApiClient {
	let config = ClientConfig::builder(CLIENT_ID, CLIENT_SECRET)
		.endpoints(endpoints)
		.timeout(timeout)
		.build()
		.expect("Test config should build.");
	let client = reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.timeout(config.timeout)
		.redirect(reqwest::redirect::Policy::none())
		.build()
		.expect("Insecure reqwest client should build.");

	Client::with_http_client(config, ReqwestHttpClient::with_client(client))
}

/// Registers a token endpoint that checks the exchange request and issues `access_token`.
pub async fn mock_token_exchange<'a>(server: &'a MockServer, access_token: &str) -> Mock<'a> {
	let body = format!(r#"{{"access_token":"{access_token}"}}"#);

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(AUTH_PATH)
				.header("authorization", BASIC_AUTHORIZATION)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("grant_type=client_credentials");
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}

/// In-process transport with scripted API statuses and per-call bookkeeping.
///
/// Every token exchange issues a distinct token so retries can be told apart.
pub struct ScriptedTransport {
	exchange_delay: StdDuration,
	api_statuses: Mutex<VecDeque<u16>>,
	api_body: String,
	exchanges: AtomicUsize,
	api_bearers: Mutex<Vec<String>>,
}
impl ScriptedTransport {
	/// Answers API calls with `statuses` in order, then with 200.
	pub fn new(statuses: impl IntoIterator<Item = u16>, api_body: impl Into<String>) -> Self {
		Self {
			exchange_delay: StdDuration::ZERO,
			api_statuses: Mutex::new(statuses.into_iter().collect()),
			api_body: api_body.into(),
			exchanges: AtomicUsize::new(0),
			api_bearers: Mutex::new(Vec::new()),
		}
	}

	/// Answers every API call with 200.
	pub fn healthy(api_body: impl Into<String>) -> Self {
		Self::new(Vec::<u16>::new(), api_body)
	}

	/// Makes each token exchange take `delay`.
	pub fn with_exchange_delay(mut self, delay: StdDuration) -> Self {
		self.exchange_delay = delay;

		self
	}

	pub fn exchanges(&self) -> usize {
		self.exchanges.load(Ordering::SeqCst)
	}

	/// Bearer values presented on API calls, in order.
	pub fn api_bearers(&self) -> Vec<String> {
		self.api_bearers.lock().expect("Bearer log should not be poisoned.").clone()
	}

	fn exchange_response(&self) -> HttpResponse {
		let n = self.exchanges.fetch_add(1, Ordering::SeqCst) as i64;
		let exp = (OffsetDateTime::now_utc() + Duration::hours(2)).unix_timestamp() + n;

		respond(200, format!(r#"{{"access_token":"{}"}}"#, test_jwt(exp)))
	}

	fn api_response(&self, request: &HttpRequest) -> HttpResponse {
		let bearer = request
			.headers()
			.get(header::AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.unwrap_or_default()
			.to_owned();

		self.api_bearers.lock().expect("Bearer log should not be poisoned.").push(bearer);

		let status = self
			.api_statuses
			.lock()
			.expect("Status script should not be poisoned.")
			.pop_front()
			.unwrap_or(200);

		respond(status, self.api_body.clone())
	}
}
impl ApiHttpClient for ScriptedTransport {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		Box::pin(async move {
			if request.uri().path() == AUTH_PATH {
				tokio::time::sleep(self.exchange_delay).await;

				Ok(self.exchange_response())
			} else {
				Ok(self.api_response(&request))
			}
		})
	}
}

/// Config for clients running on a [`ScriptedTransport`].
pub fn scripted_config() -> ClientConfig {
	let endpoints = Endpoints::new(
		Url::parse("https://auth.test/auth/token").expect("Scripted auth URL should parse."),
		Url::parse("https://api.test/v1").expect("Scripted API URL should parse."),
	);

	ClientConfig::builder(CLIENT_ID, CLIENT_SECRET)
		.endpoints(endpoints)
		.build()
		.expect("Test config should build.")
}

fn respond(status: u16, body: String) -> HttpResponse {
	let mut response = HttpResponse::new(body.into_bytes());

	*response.status_mut() = StatusCode::from_u16(status).expect("Scripted status must be valid.");

	response
}
