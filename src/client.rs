//! Typed facade over the courier API.

// self
use crate::{
	_prelude::*,
	auth::{Credentials, TokenManager, TokenSecret},
	config::{ClientConfig, Endpoints, Environment},
	dispatch::Dispatcher,
	http::ApiHttpClient,
	model::{
		AddressListResponse, Order, OrderPriceResponse, OrderResponse, OrderStatusResponse,
		ServiceResponse, UserBalance,
	},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = Client<ReqwestHttpClient>;

/// Courier API client bound to one set of credentials and one environment.
///
/// Every operation goes through the shared [`Dispatcher`], which attaches a bearer token
/// from the client's own [`TokenManager`] and repeats the call once when the API rejects
/// that token. The client is `Send + Sync`; wrap it in an [`Arc`] to share it between
/// tasks so they also share the token cache.
pub struct Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	environment: Environment,
	dispatcher: Dispatcher<C>,
}
impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client on top of a caller-provided transport.
	///
	/// `config.timeout` is not applied here; the transport must enforce its own deadline.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		let http_client = http_client.into();
		let credentials =
			Credentials::new(config.client_id.as_str(), config.client_secret.expose());
		let tokens =
			TokenManager::new(http_client.clone(), credentials, config.endpoints.auth.clone());
		let dispatcher = Dispatcher::new(http_client, Arc::new(tokens), config.endpoints);

		Self { environment: config.environment, dispatcher }
	}

	/// Returns the environment selected at construction.
	pub fn environment(&self) -> Environment {
		self.environment
	}

	/// Returns the auth and API URLs in use.
	pub fn endpoints(&self) -> &Endpoints {
		self.dispatcher.endpoints()
	}

	/// Returns the dispatcher, for endpoints not covered by a typed operation.
	pub fn dispatcher(&self) -> &Dispatcher<C> {
		&self.dispatcher
	}

	/// Returns a usable `Bearer …` value, exchanging credentials if the cache is stale.
	pub async fn bearer_token(&self) -> Result<TokenSecret> {
		self.dispatcher.tokens().valid_token().await
	}

	/// Drops the cached token; the next call performs a fresh exchange.
	pub async fn invalidate_token(&self) {
		self.dispatcher.tokens().invalidate().await;
	}

	/// Books a shipment.
	pub async fn create_order(&self, order: &Order) -> Result<OrderResponse> {
		self.dispatcher.post("/order", order).await
	}

	/// Quotes a shipment without booking it.
	pub async fn order_price(&self, order: &Order) -> Result<OrderPriceResponse> {
		self.dispatcher.post("/order/price", order).await
	}

	/// Fetches the tracking history of the order with `unique_id`.
	///
	/// The identifier is inserted into the path as-is.
	pub async fn order_status(&self, unique_id: &str) -> Result<OrderStatusResponse> {
		self.dispatcher.get(&format!("/order/status/{unique_id}")).await
	}

	/// Lists one page of the saved address book; pages start at 1.
	pub async fn address_list(&self, page: u64) -> Result<AddressListResponse> {
		self.dispatcher.get(&format!("/address?page={page}")).await
	}

	/// Lists the courier services available to the account.
	pub async fn service_list(&self) -> Result<Vec<ServiceResponse>> {
		self.dispatcher.get("/service").await
	}

	/// Fetches the account balance.
	pub async fn user_balance(&self) -> Result<UserBalance> {
		self.dispatcher.get("/user/balance").await
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Creates a client with its own reqwest transport bounded by `config.timeout`.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_timeout(config.timeout)?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("environment", &self.environment)
			.field("dispatcher", &self.dispatcher)
			.finish()
	}
}
