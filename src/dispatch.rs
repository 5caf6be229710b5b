//! Authenticated request dispatch with a single refresh-and-retry on HTTP 401.
//!
//! Every API operation funnels through [`Dispatcher::execute`]: it borrows a bearer value
//! from the [`TokenManager`], sends the call, and maps the response status.
//!
//! | Status | Result |
//! |---|---|
//! | 200 | body decoded into the caller's type |
//! | 400 | body decoded into [`ValidationError`] |
//! | 401 | rejected token invalidated, call repeated once |
//! | other | [`Error::UnexpectedStatus`], body left unread |

// self
use crate::{
	_prelude::*,
	auth::{TokenManager, TokenSecret},
	config::Endpoints,
	error::{self, ConfigError, DecodeError, ValidationError},
	http::{ApiHttpClient, DecodedStatuses, HttpRequest, Method, header},
	obs::{self, CallKind, CallOutcome, RequestSpan},
};

/// Number of times a call is repeated after the API rejects its bearer token.
pub const MAX_UNAUTHORIZED_RETRIES: u8 = 1;
/// Response statuses whose body the dispatcher decodes.
pub const DECODED_STATUSES: DecodedStatuses = DecodedStatuses(&[200, 400]);

/// Sends authenticated JSON requests against the API base URL.
pub struct Dispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	tokens: Arc<TokenManager<C>>,
	endpoints: Endpoints,
}
impl<C> Dispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a dispatcher sharing `http_client` and `tokens`.
	pub fn new(http_client: Arc<C>, tokens: Arc<TokenManager<C>>, endpoints: Endpoints) -> Self {
		Self { http_client, tokens, endpoints }
	}

	/// Returns the token manager consulted before each call.
	pub fn tokens(&self) -> &TokenManager<C> {
		&self.tokens
	}

	/// Returns the endpoints requests are sent to.
	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	/// Sends a bodiless `GET` to `path`.
	pub async fn get<T>(&self, path: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.execute::<(), T>(Method::GET, path, None).await
	}

	/// Sends `body` as JSON with `POST` to `path`.
	pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		self.execute(Method::POST, path, Some(body)).await
	}

	/// Sends `method` to `path` with an optional JSON body and decodes the response.
	///
	/// `Content-Type: application/json` is attached only when `body` is present.
	pub async fn execute<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		let span = RequestSpan::api_request(&method, path);

		obs::record_call_outcome(CallKind::ApiRequest, CallOutcome::Attempt);

		let result = span.run(self.execute_with_retry(&span, method, path, body)).await;

		obs::record_result(CallKind::ApiRequest, &result);

		result
	}

	async fn execute_with_retry<B, T>(
		&self,
		span: &RequestSpan,
		method: Method,
		path: &str,
		body: Option<&B>,
	) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		let url = self.endpoints.api_url(path)?;
		let payload = body
			.map(serde_json::to_vec)
			.transpose()
			.map_err(|source| DecodeError::Request { source })?;
		let mut unauthorized_retries = 0;

		loop {
			let bearer = self.tokens.valid_token().await?;
			let request = build_request(&method, &url, &bearer, payload.as_deref())?;
			let response = self.http_client.execute(request).await?;
			let status = response.status().as_u16();

			span.record_status(status);
			obs::record_response_status(CallKind::ApiRequest, status);

			match status {
				200 => return Ok(error::decode_json(status, response.body())?),
				400 => {
					let rejection: ValidationError = error::decode_json(status, response.body())?;

					return Err(rejection.into());
				},
				401 if unauthorized_retries < MAX_UNAUTHORIZED_RETRIES => {
					unauthorized_retries += 1;

					#[cfg(feature = "tracing")]
					tracing::debug!(%method, path, "bearer token rejected; refreshing once");

					obs::record_call_outcome(CallKind::ApiRequest, CallOutcome::Retry);
					self.tokens.invalidate_if_current(&bearer).await;
				},
				_ => return Err(Error::UnexpectedStatus { status }),
			}
		}
	}
}
impl<C> Debug for Dispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Dispatcher")
			.field("endpoints", &self.endpoints)
			.field("tokens", &self.tokens)
			.finish()
	}
}

fn build_request(
	method: &Method,
	url: &Url,
	bearer: &TokenSecret,
	payload: Option<&[u8]>,
) -> Result<HttpRequest> {
	let mut builder = ::http::Request::builder()
		.method(method.clone())
		.uri(url.as_str())
		.header(header::AUTHORIZATION, bearer.expose())
		.extension(DECODED_STATUSES);

	if payload.is_some() {
		builder = builder.header(header::CONTENT_TYPE, "application/json");
	}

	Ok(builder.body(payload.map(<[u8]>::to_vec).unwrap_or_default()).map_err(ConfigError::from)?)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url() -> Url {
		Url::parse("https://api.example.com/v1/order").expect("Test URL should parse.")
	}

	#[test]
	fn json_requests_carry_bearer_and_content_type() {
		let bearer = TokenSecret::new("Bearer abc");
		let request = build_request(&Method::POST, &url(), &bearer, Some(br#"{"a":1}"#.as_slice()))
			.expect("Request should build.");

		assert_eq!(request.method(), &Method::POST);
		assert_eq!(request.uri(), "https://api.example.com/v1/order");
		assert_eq!(request.headers()[header::AUTHORIZATION], "Bearer abc");
		assert_eq!(request.headers()[header::CONTENT_TYPE], "application/json");
		assert_eq!(request.body().as_slice(), br#"{"a":1}"#);
		assert_eq!(request.extensions().get::<DecodedStatuses>(), Some(&DECODED_STATUSES));
	}

	#[test]
	fn bodiless_requests_omit_content_type() {
		let bearer = TokenSecret::new("Bearer abc");
		let request =
			build_request(&Method::GET, &url(), &bearer, None).expect("Request should build.");

		assert!(request.headers().get(header::CONTENT_TYPE).is_none());
		assert!(request.body().is_empty());
	}

	#[test]
	fn invalid_bearer_bytes_are_a_config_error() {
		let bearer = TokenSecret::new("Bearer bad\nvalue");
		let err = build_request(&Method::GET, &url(), &bearer, None)
			.expect_err("Newlines are not valid in header values.");

		assert!(matches!(err, Error::Config(ConfigError::HttpRequest(_))));
	}
}
