//! Account information.

// self
use crate::_prelude::*;

/// Response of `GET /user/balance`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserBalance {
	/// Prepaid balance.
	pub amount: f64,
	/// Promotional credit.
	pub bonus: f64,
}
