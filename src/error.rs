//! Client-level error types shared by the token manager, dispatcher, and transports.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Access token issued by the auth endpoint has an unexpected shape.
	#[error(transparent)]
	MalformedToken(#[from] MalformedTokenError),
	/// JSON encoding or decoding failure on a request or response body.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// API rejected the request with HTTP 400.
	#[error(transparent)]
	Validation(#[from] ValidationError),

	/// Token exchange was rejected by the auth endpoint.
	#[error("Token exchange was rejected with `{name}`: {description}.")]
	Authentication {
		/// Short error name (`error` field).
		name: String,
		/// Human-readable description (`error_description` field).
		description: String,
		/// HTTP status returned by the auth endpoint.
		status: u16,
	},
	/// API answered with a status other than 200, 400, or a first 401.
	#[error("Courier API returned an unexpected response status: {status}.")]
	UnexpectedStatus {
		/// HTTP status code.
		status: u16,
	},
}
impl Error {
	/// Returns `true` when the failure is an application-level validation rejection.
	pub fn is_validation(&self) -> bool {
		matches!(self, Self::Validation(_))
	}

	/// Returns `true` when the transport gave up because the configured timeout elapsed.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Transport(e) if e.is_timeout())
	}
}
impl From<crate::config::ClientConfigError> for Error {
	fn from(e: crate::config::ClientConfigError) -> Self {
		Self::Config(e.into())
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client configuration failed validation.
	#[error(transparent)]
	Client(#[from] crate::config::ClientConfigError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] ::http::Error),
	/// Request URL cannot be parsed.
	#[error("Request URL `{url}` is invalid.")]
	InvalidUrl {
		/// Offending URL string.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the courier API: {source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the courier API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Returns `true` when the failure was caused by an elapsed timeout.
	pub fn is_timeout(&self) -> bool {
		match self {
			Self::Network { source } => {
				#[cfg(feature = "reqwest")]
				{
					if let Some(e) = source.downcast_ref::<ReqwestError>() {
						return e.is_timeout();
					}
				}

				let mut current: Option<&(dyn StdError + 'static)> = Some(source.as_ref());

				while let Some(e) = current {
					if let Some(io) = e.downcast_ref::<std::io::Error>() {
						return io.kind() == std::io::ErrorKind::TimedOut;
					}

					current = e.source();
				}

				false
			},
			Self::Io(e) => e.kind() == std::io::ErrorKind::TimedOut,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Access token could not be parsed as a three-segment JWT with an `exp` claim.
#[derive(Debug, ThisError)]
pub enum MalformedTokenError {
	/// Token did not split into header, payload, and signature.
	#[error("Access token must have 3 dot-separated segments, found {found}.")]
	SegmentCount {
		/// Number of segments observed.
		found: usize,
	},
	/// Payload segment is not unpadded base64url.
	#[error("Access token payload is not valid base64url.")]
	PayloadEncoding {
		/// Underlying decoding failure.
		#[source]
		source: base64::DecodeError,
	},
	/// Payload segment is not a JSON object with an integer `exp`.
	#[error("Access token payload is not a valid claims object.")]
	PayloadClaims {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The `exp` claim cannot be represented as an instant.
	#[error("Access token expiry {exp} is outside the supported range.")]
	ExpiryOutOfRange {
		/// Raw `exp` claim in Unix seconds.
		exp: i64,
	},
}

/// JSON encoding or decoding failure on a request or response body.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Request payload could not be serialized.
	#[error("Request body could not be encoded as JSON.")]
	Request {
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// Response payload did not match the expected shape.
	#[error("Response body for HTTP {status} could not be decoded.")]
	Response {
		/// HTTP status of the response being decoded.
		status: u16,
		/// Structured parsing failure, including the failing JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Per-parameter entry inside a [`ValidationError`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
	/// Request parameter the entry refers to.
	#[serde(default)]
	pub parameter: String,
	/// Human-readable reason.
	#[serde(default)]
	pub message: String,
}

/// Structured HTTP 400 body returned by the courier API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[error("{code}: \"{message}\"")]
pub struct ValidationError {
	/// Summary message.
	#[serde(default)]
	pub message: String,
	/// Numeric application error code.
	#[serde(default)]
	pub code: i64,
	/// Per-parameter failures.
	#[serde(default)]
	pub errors: Vec<FieldError>,
}

/// Decodes the capped prefix of `body` as JSON, recording the failing path on error.
pub(crate) fn decode_json<T>(status: u16, body: &[u8]) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(crate::http::capped(body));

	serde_path_to_error::deserialize(&mut de)
		.map_err(|source| DecodeError::Response { status, source })
}
