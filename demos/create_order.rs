//! Books a shipment between two saved addresses against a local mock of the courier API.
//!
//! Production code would call `Client::new(config)`; the demo swaps in a transport that
//! trusts the mock server's self-signed certificate.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use time::{Duration, OffsetDateTime};
use url::Url;
// self
use colete_online::{
	client::Client,
	config::{ClientConfig, Endpoints},
	http::ReqwestHttpClient,
	model::{
		ExtraOption, ExtraOptionId, Order, Package, PackageType, Packages, Party, ServiceSelection,
	},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let exp = (OffsetDateTime::now_utc() + Duration::hours(2)).unix_timestamp();
	let access_token =
		format!("header.{}.signature", URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#)));
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).json_body(json!({ "access_token": access_token }));
		})
		.await;
	let order_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/order");
			then.status(200).json_body(json!({
				"service": {
					"price": { "total": 24.99, "noVat": 21.0 },
					"service": { "id": 1, "courierName": "Demo Courier", "name": "Standard" }
				},
				"awb": "DEMO123456",
				"uniqueId": "demo-order-1",
				"estimatedPickupDate": "2026-10-17"
			}));
		})
		.await;
	let config = ClientConfig::builder("demo-client", "super-secret")
		.endpoints(Endpoints::new(
			Url::parse(&server.url("/token"))?,
			Url::parse(&server.url("/v1"))?,
		))
		.build()?;
	// The local mock serves a self-signed certificate.
	let transport = colete_online::reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.timeout(config.timeout)
		.redirect(colete_online::reqwest::redirect::Policy::none())
		.build()?;
	let client: Client<ReqwestHttpClient> =
		Client::with_http_client(config, ReqwestHttpClient::with_client(transport));
	let order = Order {
		sender: Party::saved(1),
		recipient: Party::saved(2),
		packages: Packages {
			kind: PackageType::PACKAGE,
			content: "Books".into(),
			list: vec![Package { weight: 1.5, width: 20.0, height: 10.0, length: 30.0 }],
		},
		service: ServiceSelection::best_price(),
		extra_options: vec![ExtraOption::new(ExtraOptionId::OPEN_AT_DELIVERY)],
	};
	let booked = client.create_order(&order).await?;

	println!(
		"Booked {} with {} for {:.2} (AWB {}).",
		booked.unique_id, booked.service.service.courier_name, booked.service.price.total, booked.awb
	);

	token_mock.assert_async().await;
	order_mock.assert_async().await;

	Ok(())
}
