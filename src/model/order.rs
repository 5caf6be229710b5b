//! Order requests, quotes, and tracking history.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	model::{Address, Contact, ValidationStrategy},
};

/// Sending party of an [`Order`].
pub type Sender = Party;
/// Receiving party of an [`Order`].
pub type Recipient = Party;

/// Either a saved address book entry or an inline contact and address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Party {
	/// Saved address identifier; takes precedence over the inline fields.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub address_id: Option<i64>,
	/// Inline contact.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub contact: Option<Contact>,
	/// Inline address.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub address: Option<Address>,
	/// Validation applied to the inline address.
	#[serde(deserialize_with = "super::empty_as_none", skip_serializing_if = "Option::is_none")]
	pub validation_strategy: Option<ValidationStrategy>,
}
impl Party {
	/// References an entry from the address book.
	pub fn saved(address_id: i64) -> Self {
		Self { address_id: Some(address_id), ..Default::default() }
	}

	/// Describes the party inline.
	pub fn inline(contact: Contact, address: Address) -> Self {
		Self { contact: Some(contact), address: Some(address), ..Default::default() }
	}

	/// Sets the validation strategy for the inline address.
	pub fn with_validation(mut self, strategy: ValidationStrategy) -> Self {
		self.validation_strategy = Some(strategy);

		self
	}
}

/// Numeric parcel kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageType(pub u8);
impl PackageType {
	/// Document envelope.
	pub const ENVELOPE: Self = Self(1);
	/// Regular parcel.
	pub const PACKAGE: Self = Self(2);
}
impl Default for PackageType {
	fn default() -> Self {
		Self::PACKAGE
	}
}

/// Dimensions of a single parcel, in kilograms and centimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
	/// Weight in kilograms.
	pub weight: f64,
	/// Width in centimeters.
	pub width: f64,
	/// Height in centimeters.
	pub height: f64,
	/// Length in centimeters.
	pub length: f64,
}

/// Parcels shipped by one order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Packages {
	/// Parcel kind shared by every entry.
	#[serde(rename = "type")]
	pub kind: PackageType,
	/// Declared contents.
	pub content: String,
	/// Individual parcels.
	pub list: Vec<Package>,
}

/// How the courier service is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceSelectionType {
	/// Use one of the listed service identifiers.
	#[default]
	DirectId,
	/// Cheapest available service.
	BestPrice,
	/// Best service by the listed grades.
	Grade,
}

/// Criterion used with [`ServiceSelectionType::Grade`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceGrade {
	/// Delivery performance.
	Delivery,
	/// Pickup performance.
	PickUp,
	/// Cash-on-delivery settlement speed.
	Repayment,
}

/// Courier service selection for an [`Order`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceSelection {
	/// Selection mode.
	pub selection_type: ServiceSelectionType,
	/// Candidate service identifiers.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub service_ids: Vec<i64>,
	/// Ranking criteria.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub grades: Vec<ServiceGrade>,
}
impl ServiceSelection {
	/// Selects among `service_ids`.
	pub fn direct(service_ids: impl IntoIterator<Item = i64>) -> Self {
		Self {
			selection_type: ServiceSelectionType::DirectId,
			service_ids: service_ids.into_iter().collect(),
			grades: Vec::new(),
		}
	}

	/// Selects the cheapest service.
	pub fn best_price() -> Self {
		Self { selection_type: ServiceSelectionType::BestPrice, ..Default::default() }
	}

	/// Selects the best service ranked by `grades`.
	pub fn grade(grades: impl IntoIterator<Item = ServiceGrade>) -> Self {
		Self {
			selection_type: ServiceSelectionType::Grade,
			service_ids: Vec::new(),
			grades: grades.into_iter().collect(),
		}
	}
}

/// Identifier of an optional order service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraOptionId(pub u8);
impl ExtraOptionId {
	/// Status change notifications.
	pub const STATUS_CHANGE: Self = Self(1);
	/// Recipient may open the parcel on delivery.
	pub const OPEN_AT_DELIVERY: Self = Self(2);
	/// Saturday delivery.
	pub const SATURDAY_DELIVERY: Self = Self(3);
	/// Shipment insurance.
	pub const INSURANCE: Self = Self(4);
	/// Cash on delivery settled to a bank account.
	pub const ACCOUNT_REPAYMENT: Self = Self(5);
	/// Cash on delivery settled in cash.
	pub const CASH_REPAYMENT: Self = Self(6);
	/// Declared value.
	pub const DECLARED_VALUE: Self = Self(7);
	/// Pickup at a scheduled time.
	pub const SCHEDULED_PICKUP: Self = Self(8);
	/// Caller-defined reference printed on the AWB.
	pub const CLIENT_REFERENCE: Self = Self(9);
	/// Currency used for amounts in the order.
	pub const BASE_CURRENCY: Self = Self(10);
}

/// Optional service attached to an order; parameters sit beside `id`.
///
/// Parameter names depend on the option and are listed by
/// [`ServiceExtraOption`](crate::model::ServiceExtraOption).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtraOption {
	/// Option identifier.
	pub id: ExtraOptionId,
	/// Option parameters.
	#[serde(flatten)]
	pub fields: Map<String, Value>,
}
impl ExtraOption {
	/// Creates an option without parameters.
	pub fn new(id: ExtraOptionId) -> Self {
		Self { id, fields: Map::new() }
	}

	/// Adds one parameter.
	pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.fields.insert(name.into(), value.into());

		self
	}
}

/// Request body for creating or pricing a shipment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Order {
	/// Sending party.
	pub sender: Sender,
	/// Receiving party.
	pub recipient: Recipient,
	/// Parcels.
	pub packages: Packages,
	/// Service selection.
	pub service: ServiceSelection,
	/// Optional services.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub extra_options: Vec<ExtraOption>,
}

/// Price of a service, in the account currency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicePrice {
	/// Total including VAT.
	pub total: f64,
	/// Total excluding VAT.
	pub no_vat: f64,
}

/// Identity of a courier service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceDetails {
	/// Service identifier.
	pub id: i64,
	/// Courier operating the service.
	pub courier_name: String,
	/// Service name.
	pub name: String,
}

/// Service quoted or booked for an order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderResponseService {
	/// Quoted price.
	pub price: ServicePrice,
	/// Service identity.
	pub service: ServiceDetails,
}

/// Response of `POST /order`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderResponse {
	/// Booked service.
	pub service: OrderResponseService,
	/// Air waybill number assigned by the courier.
	pub awb: String,
	/// Order identifier used for tracking.
	pub unique_id: String,
	/// Pickup date as sent by the API.
	pub estimated_pickup_date: String,
}

/// Response of `POST /order/price`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderPriceResponse {
	/// Service the selection strategy settled on.
	pub selected: OrderResponseService,
	/// Every eligible service.
	pub list: Vec<OrderResponseService>,
}

/// Identifiers of a tracked order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusSummary {
	/// Order identifier.
	pub unique_id: String,
	/// Air waybill number.
	pub awb: String,
}

/// Status headline and reason in one language.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusTextPart {
	/// Status headline.
	pub name: String,
	/// Why the order is in this status.
	pub reason: String,
}

/// Localized status text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusTextParts {
	/// Romanian text.
	pub ro: StatusTextPart,
}

/// Localized courier comment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusComment {
	/// Romanian text.
	pub ro: String,
}

/// One tracking event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusHistory {
	/// Event time, RFC 3339.
	#[serde(with = "time::serde::rfc3339::option")]
	pub date_time: Option<OffsetDateTime>,
	/// Event time in Unix seconds.
	pub unix_date_time: i64,
	/// Status text.
	pub status_text_parts: StatusTextParts,
	/// Courier comment.
	#[serde(rename = "comment")]
	pub status_comment: StatusComment,
	/// Numeric status code.
	pub code: i64,
}

/// Response of `GET /order/status/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderStatusResponse {
	/// Order identifiers.
	pub summary: StatusSummary,
	/// Tracking events, oldest first.
	pub history: Vec<StatusHistory>,
}
