//! Client configuration: credentials, target environment, endpoints, and timeout.
//!
//! The environment selects the auth and API base URLs once at construction. Custom
//! [`Endpoints`] can replace them (mock servers, proxies), but neither changes for the
//! lifetime of a [`Client`](crate::client::Client).

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

const PRODUCTION_AUTH_URL: &str = "https://auth.colete-online.ro/token";
const PRODUCTION_API_URL: &str = "https://api.colete-online.ro/v1";
const STAGING_AUTH_URL: &str = "https://auth.colete-online.ro/token";
const STAGING_API_URL: &str = "https://api.colete-online.ro/v1/staging";

/// Remote environment the client talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	/// Live API; orders are real.
	Production,
	#[default]
	/// Sandbox API.
	Staging,
}

/// Auth and API base URLs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
	/// Token exchange endpoint.
	pub auth: Url,
	/// Base URL every API path is appended to.
	pub api: Url,
}
impl Endpoints {
	/// Creates a custom endpoint pair.
	pub fn new(auth: Url, api: Url) -> Self {
		Self { auth, api }
	}

	/// Returns the stock endpoints for `environment`.
	pub fn for_environment(environment: Environment) -> Self {
		let (auth, api) = match environment {
			Environment::Production => (PRODUCTION_AUTH_URL, PRODUCTION_API_URL),
			Environment::Staging => (STAGING_AUTH_URL, STAGING_API_URL),
		};

		Self { auth: builtin_url(auth), api: builtin_url(api) }
	}

	/// Appends `path` (which may carry a query string) to the API base URL.
	///
	/// The base path is kept as-is, so `https://host/v1/staging` + `/order` yields
	/// `https://host/v1/staging/order`.
	pub fn api_url(&self, path: &str) -> Result<Url, ConfigError> {
		let raw = format!("{}{path}", self.api.as_str().trim_end_matches('/'));

		Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { url: raw, source })
	}
}

fn builtin_url(raw: &'static str) -> Url {
	match Url::parse(raw) {
		Ok(url) => url,
		Err(e) => unreachable!("built-in endpoint `{raw}` must parse: {e}"),
	}
}

/// Errors raised while validating a [`ClientConfig`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ClientConfigError {
	/// Client identifier is empty.
	#[error("Client identifier cannot be empty.")]
	MissingClientId,
	/// Client secret is empty.
	#[error("Client secret cannot be empty.")]
	MissingClientSecret,
	/// A zero timeout would fail every call.
	#[error("Request timeout must be greater than zero.")]
	ZeroTimeout,
}

/// Immutable configuration consumed by [`Client`](crate::client::Client).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret; redacted in debug output.
	pub client_secret: TokenSecret,
	/// Selected environment.
	pub environment: Environment,
	/// Per-request timeout applied by the transport.
	#[serde(with = "duration_secs")]
	pub timeout: StdDuration,
	/// Resolved auth and API URLs.
	pub endpoints: Endpoints,
}
impl ClientConfig {
	/// Default per-request timeout.
	pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

	/// Creates a new builder for the provided credentials.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> ClientConfigBuilder {
		ClientConfigBuilder::new(client_id, client_secret)
	}

	fn validate(&self) -> Result<(), ClientConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ClientConfigError::MissingClientId);
		}
		if self.client_secret.expose().is_empty() {
			return Err(ClientConfigError::MissingClientSecret);
		}
		if self.timeout.is_zero() {
			return Err(ClientConfigError::ZeroTimeout);
		}

		Ok(())
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	client_id: String,
	client_secret: TokenSecret,
	environment: Environment,
	timeout: StdDuration,
	endpoints: Option<Endpoints>,
}
impl ClientConfigBuilder {
	/// Creates a new builder targeting staging with the default timeout.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			environment: Environment::default(),
			timeout: ClientConfig::DEFAULT_TIMEOUT,
			endpoints: None,
		}
	}

	/// Selects the environment, which fixes the stock endpoints.
	pub fn environment(mut self, environment: Environment) -> Self {
		self.environment = environment;

		self
	}

	/// Shorthand for `environment(Environment::Production)` when `yes` is true.
	pub fn production(self, yes: bool) -> Self {
		self.environment(if yes { Environment::Production } else { Environment::Staging })
	}

	/// Overrides the per-request timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Replaces the environment's endpoints.
	pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = Some(endpoints);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let endpoints =
			self.endpoints.unwrap_or_else(|| Endpoints::for_environment(self.environment));
		let config = ClientConfig {
			client_id: self.client_id,
			client_secret: self.client_secret,
			environment: self.environment,
			timeout: self.timeout,
			endpoints,
		};

		config.validate()?;

		Ok(config)
	}
}

mod duration_secs {
	// std
	use std::time::Duration;
	// crates.io
	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_f64(value.as_secs_f64())
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
	where
		D: Deserializer<'de>,
	{
		let secs = f64::deserialize(deserializer)?;

		Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn environment_selects_stock_endpoints() {
		let production = ClientConfig::builder("id", "secret")
			.production(true)
			.build()
			.expect("Production config should build.");
		let staging =
			ClientConfig::builder("id", "secret").build().expect("Staging config should build.");

		assert_eq!(production.endpoints.api.as_str(), "https://api.colete-online.ro/v1");
		assert_eq!(staging.endpoints.api.as_str(), "https://api.colete-online.ro/v1/staging");
		assert_eq!(production.endpoints.auth, staging.endpoints.auth);
		assert_eq!(staging.timeout, ClientConfig::DEFAULT_TIMEOUT);
	}

	#[test]
	fn api_url_keeps_base_path_and_query() {
		let endpoints = Endpoints::for_environment(Environment::Staging);

		assert_eq!(
			endpoints.api_url("/order").expect("Order URL should parse.").as_str(),
			"https://api.colete-online.ro/v1/staging/order"
		);
		assert_eq!(
			endpoints.api_url("/address?page=2").expect("Address URL should parse.").as_str(),
			"https://api.colete-online.ro/v1/staging/address?page=2"
		);
	}

	#[test]
	fn builder_rejects_incomplete_configs() {
		assert_eq!(
			ClientConfig::builder("", "secret").build(),
			Err(ClientConfigError::MissingClientId)
		);
		assert_eq!(
			ClientConfig::builder("id", "").build(),
			Err(ClientConfigError::MissingClientSecret)
		);
		assert_eq!(
			ClientConfig::builder("id", "secret").timeout(StdDuration::ZERO).build(),
			Err(ClientConfigError::ZeroTimeout)
		);
	}

	#[test]
	fn config_round_trips_through_json_without_leaking_in_debug() {
		let config = ClientConfig::builder("id", "very-secret")
			.timeout(StdDuration::from_millis(1500))
			.build()
			.expect("Config should build.");
		let json = serde_json::to_value(&config).expect("Config should serialize.");

		assert_eq!(json["timeout"], 1.5);
		assert_eq!(json["environment"], "staging");
		assert!(!format!("{config:?}").contains("very-secret"));

		let back: ClientConfig = serde_json::from_value(json).expect("Config should deserialize.");

		assert_eq!(back, config);
	}
}
