//! Contacts, postal addresses, and the saved address book.

// self
use crate::_prelude::*;

/// Person or company reachable for a shipment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
	/// Full name.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub name: String,
	/// Primary phone number.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub phone: String,
	/// Secondary phone number.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub phone2: String,
	/// Company name.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub company: String,
	/// Email address.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub email: String,
}

/// Postal address. The first seven fields are always sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
	/// ISO 3166-1 alpha-2 country code.
	pub country_code: String,
	/// Postal code.
	pub postal_code: String,
	/// City or locality.
	pub city: String,
	/// County name.
	pub county: String,
	/// County code (`B` for Bucharest).
	pub county_code: String,
	/// Street name.
	pub street: String,
	/// Street number.
	pub number: String,
	/// Building name or number.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub building: String,
	/// Entrance or staircase.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub entrance: String,
	/// Intercom code.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub intercom: String,
	/// Floor.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub floor: String,
	/// Apartment number.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub apartment: String,
	/// Nearby point of interest for the courier.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub landmark: String,
	/// Free-form delivery notes.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub additional_info: String,
}

/// How strictly the API validates an inline address.
///
/// Strategy names the client does not know are kept verbatim in [`Other`](Self::Other)
/// and sent back unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationStrategy {
	/// Minimal validation for orders.
	Minimal,
	/// Minimal validation sufficient for pricing only.
	PriceMinimal,
	/// Any other strategy name accepted by the API.
	#[serde(untagged)]
	Other(String),
}

/// Saved address book entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderAddress {
	/// Identifier usable as `addressId` in an order.
	pub address_id: i64,
	/// Contact stored with the address.
	pub contact: Contact,
	/// Stored address.
	pub address: Address,
	/// Validation strategy stored with the address, if any.
	#[serde(deserialize_with = "super::empty_as_none", skip_serializing_if = "Option::is_none")]
	pub validation_strategy: Option<ValidationStrategy>,
}

/// Page position reported by list endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
	/// Total number of entries across all pages.
	pub total_items: i64,
	/// One-based index of the returned page.
	pub current_page: i64,
	/// Total number of pages.
	pub total_pages: i64,
}

/// Response of `GET /address?page={n}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressListResponse {
	/// Entries on this page.
	pub data: Vec<OrderAddress>,
	/// Position of this page.
	pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn optional_address_fields_are_omitted() {
		let address = Address {
			country_code: "RO".into(),
			city: "City".into(),
			floor: "2".into(),
			..Default::default()
		};
		let json = serde_json::to_value(&address).expect("Address should serialize.");

		assert_eq!(json["countryCode"], "RO");
		assert_eq!(json["postalCode"], "");
		assert_eq!(json["floor"], "2");
		assert!(json.get("building").is_none());
		assert!(json.get("additionalInfo").is_none());
		assert_eq!(
			serde_json::to_string(&Contact::default()).expect("Contact should serialize."),
			"{}"
		);
	}

	#[test]
	fn empty_validation_strategy_reads_as_none() {
		let entry: OrderAddress =
			serde_json::from_str(r#"{"addressId":7,"validationStrategy":""}"#)
				.expect("Entry should decode.");
		let priced: OrderAddress =
			serde_json::from_str(r#"{"addressId":8,"validationStrategy":"priceMinimal"}"#)
				.expect("Entry should decode.");

		assert_eq!(entry.address_id, 7);
		assert_eq!(entry.validation_strategy, None);
		assert_eq!(priced.validation_strategy, Some(ValidationStrategy::PriceMinimal));
	}

	#[test]
	fn unknown_validation_strategy_is_kept_verbatim() {
		let entry: OrderAddress =
			serde_json::from_str(r#"{"addressId":9,"validationStrategy":"full"}"#)
				.expect("Unknown strategies should not fail the entry.");
		let strategy = ValidationStrategy::Other("full".into());

		assert_eq!(entry.validation_strategy, Some(strategy.clone()));
		assert_eq!(serde_json::to_value(&strategy).expect("Strategy should serialize."), "full");
		assert_eq!(
			serde_json::to_value(ValidationStrategy::PriceMinimal)
				.expect("Strategy should serialize."),
			"priceMinimal"
		);
	}
}
