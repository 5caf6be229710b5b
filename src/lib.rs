//! Typed async client for the Colete Online courier API.
//!
//! [`Client`](client::Client) exchanges the account's client credentials for a JWT bearer
//! token, caches it until the token's own `exp` claim passes, and refreshes it once when the
//! API answers HTTP 401. Orders, quotes, tracking, the address book, services, and the
//! account balance are exposed as typed operations over the payloads in [`model`].
//!
//! ```no_run
//! use colete_online::{client::Client, config::ClientConfig};
//!
//! # async fn run() -> colete_online::error::Result<()> {
//! let config = ClientConfig::builder("client-id", "client-secret").build()?;
//! let client = Client::new(config)?;
//! let balance = client.user_balance().await?;
//!
//! println!("{} + {} bonus", balance.amount, balance.bonus);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
