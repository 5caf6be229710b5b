//! Credentials, cached bearer tokens, and the token manager that keeps them fresh.

pub mod credentials;
pub mod jwt;
pub mod manager;
pub mod secret;
pub mod token;

pub use credentials::*;
pub use manager::*;
pub use secret::*;
pub use token::*;
