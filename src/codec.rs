//! Secret codec contract used to seal PKCE cookie payloads, plus the built-in JWE codec.

pub mod jwe;

pub use jwe::JweCodec;

// self
use crate::{_prelude::*, error::GenerationError};

/// JSON object carried inside a sealed payload.
pub type Claims = serde_json::Map<String, serde_json::Value>;

/// Boxed future returned by [`SecretCodec`] operations.
pub type CodecFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CodecError>> + 'a + Send>>;

/// Parameters shared by the encode and decode side of a sealed payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecParams {
	/// Maximum age of a sealed payload; decoding must fail once it has elapsed.
	pub max_age: Duration,
}
impl CodecParams {
	/// Creates parameters with the provided maximum age.
	pub const fn new(max_age: Duration) -> Self {
		Self { max_age }
	}
}

/// Confidential, tamper-evident, expiring encoding for small claim sets.
///
/// `decode` must reject expired, tampered, or foreign-key payloads with an error; returning
/// partially trusted claims is never acceptable.
pub trait SecretCodec
where
	Self: Send + Sync,
{
	/// Seals `claims` into an opaque, cookie-safe string valid for `params.max_age`.
	fn encode<'a>(&'a self, params: &'a CodecParams, claims: Claims) -> CodecFuture<'a, String>;

	/// Opens a value produced by [`SecretCodec::encode`] under the same parameters.
	fn decode<'a>(&'a self, params: &'a CodecParams, token: &'a str) -> CodecFuture<'a, Claims>;
}

/// Error type produced by [`SecretCodec`] implementations and claim extraction.
#[derive(Debug, ThisError)]
pub enum CodecError {
	/// Random material for the IV or token identifier could not be drawn.
	#[error(transparent)]
	Entropy(#[from] GenerationError),
	/// The AEAD cipher refused to seal the payload.
	#[error("Payload encryption failed.")]
	Encrypt,
	/// Claims could not be serialized to JSON.
	#[error("Claims could not be serialized.")]
	Serialize(#[source] serde_json::Error),

	/// The sealed value is structurally invalid.
	#[error("Sealed value is malformed: {reason}.")]
	Malformed {
		/// Which structural check failed.
		reason: &'static str,
	},
	/// The protected header names an algorithm this codec does not implement.
	#[error("Unsupported protected header: alg `{alg}`, enc `{enc}`.")]
	UnsupportedHeader {
		/// Key management algorithm found in the header.
		alg: String,
		/// Content encryption algorithm found in the header.
		enc: String,
	},
	/// Authentication failed; the value was altered or sealed under a different key.
	#[error("Sealed value failed authentication.")]
	Integrity,
	/// The payload carries no `exp` claim.
	#[error("Sealed value has no expiry claim.")]
	MissingExpiry,
	/// The payload outlived its maximum age.
	#[error("Sealed value expired at {expired_at}.")]
	Expired {
		/// Instant the payload stopped being valid.
		expired_at: OffsetDateTime,
	},
	/// Decoded claims do not match the expected shape.
	#[error("Decoded claims are invalid.")]
	Payload {
		/// Structured deserialization failure, including the offending claim path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
