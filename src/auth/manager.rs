//! Bearer token cache with single-flight refresh.
//!
//! [`TokenManager::valid_token`] holds one async lock for the whole check → exchange →
//! store sequence. Concurrent callers that find the cache stale queue behind the first
//! one and reuse the token it fetched instead of stampeding the auth endpoint. Each
//! manager owns its cache; independently configured clients never share one.

// self
use crate::{
	_prelude::*,
	auth::{CachedToken, Credentials, TokenSecret},
	error::{self, ConfigError},
	http::{ApiHttpClient, Method, header},
	obs::{self, CallKind, CallOutcome, RequestSpan},
};

/// Form body sent to the auth endpoint.
pub const TOKEN_EXCHANGE_BODY: &str = "grant_type=client_credentials";

type Clock = Arc<dyn Fn() -> OffsetDateTime + Send + Sync>;

#[derive(Deserialize)]
struct AccessTokenBody {
	access_token: String,
}

#[derive(Deserialize)]
struct AuthErrorBody {
	#[serde(default)]
	error: String,
	#[serde(default)]
	error_description: String,
}

/// Owns the client credentials and the cached bearer token.
pub struct TokenManager<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	credentials: Credentials,
	auth_url: Url,
	cache: AsyncMutex<Option<CachedToken>>,
	clock: Clock,
}
impl<C> TokenManager<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a manager with an empty cache; the first call performs an exchange.
	pub fn new(http_client: impl Into<Arc<C>>, credentials: Credentials, auth_url: Url) -> Self {
		Self {
			http_client: http_client.into(),
			credentials,
			auth_url,
			cache: AsyncMutex::new(None),
			clock: Arc::new(OffsetDateTime::now_utc),
		}
	}

	/// Replaces the wall clock used for freshness checks.
	pub fn with_clock(
		mut self,
		clock: impl 'static + Fn() -> OffsetDateTime + Send + Sync,
	) -> Self {
		self.clock = Arc::new(clock);

		self
	}

	/// Returns the credentials this manager exchanges.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Returns a usable `Bearer …` header value, exchanging credentials when the cache is
	/// empty or expired.
	pub async fn valid_token(&self) -> Result<TokenSecret> {
		let mut slot = self.cache.lock().await;
		let now = (self.clock)();

		if let Some(cached) = slot.as_ref().filter(|token| token.is_valid_at(now)) {
			return Ok(cached.bearer.clone());
		}

		let fresh = self.exchange().await?;
		let bearer = fresh.bearer.clone();

		*slot = Some(fresh);

		Ok(bearer)
	}

	/// Returns a copy of the cache entry, if any.
	pub async fn cached(&self) -> Option<CachedToken> {
		self.cache.lock().await.clone()
	}

	/// Clears the cache so the next [`valid_token`](Self::valid_token) call refreshes.
	pub async fn invalidate(&self) {
		*self.cache.lock().await = None;
	}

	/// Clears the cache only if it still holds `rejected`.
	///
	/// Returns `true` when the entry was dropped. A caller whose token was already replaced
	/// by a concurrent refresh leaves the newer token in place.
	pub async fn invalidate_if_current(&self, rejected: &TokenSecret) -> bool {
		let mut slot = self.cache.lock().await;

		if slot.as_ref().is_some_and(|token| &token.bearer == rejected) {
			*slot = None;

			return true;
		}

		false
	}

	async fn exchange(&self) -> Result<CachedToken> {
		const KIND: CallKind = CallKind::TokenExchange;

		let span = RequestSpan::token_exchange(&self.auth_url);

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.run(async {
				#[cfg(feature = "tracing")]
				tracing::debug!(
					client_id = self.credentials.client_id(),
					"exchanging client credentials"
				);

				let request = ::http::Request::builder()
					.method(Method::POST)
					.uri(self.auth_url.as_str())
					.header(header::AUTHORIZATION, self.credentials.basic_authorization().expose())
					.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
					.body(TOKEN_EXCHANGE_BODY.as_bytes().to_vec())
					.map_err(ConfigError::from)?;
				let response = self.http_client.execute(request).await?;
				let status = response.status().as_u16();

				span.record_status(status);
				obs::record_response_status(KIND, status);

				if status != 200 {
					let body: AuthErrorBody = error::decode_json(status, response.body())?;

					return Err(Error::Authentication {
						name: body.error,
						description: body.error_description,
						status,
					});
				}

				let body: AccessTokenBody = error::decode_json(status, response.body())?;

				Ok(CachedToken::from_access_token(&body.access_token)?)
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}
}
impl<C> Debug for TokenManager<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("credentials", &self.credentials)
			.field("auth_url", &self.auth_url.as_str())
			.finish()
	}
}
