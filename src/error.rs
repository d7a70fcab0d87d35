//! Crate-level error types shared by the PKCE flows and the secret codec.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// A provider or authorization server that does not use PKCE is never reported through this
/// type; the flows return `Ok(None)` instead. Every variant here means the attempt must abort.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Secret codec failed to seal or open the PKCE cookie.
	#[error(transparent)]
	Codec(#[from] crate::codec::CodecError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Random source failure while generating PKCE material.
	#[error(transparent)]
	Generation(#[from] GenerationError),

	/// PKCE was applicable but the decoded cookie carried no verifier.
	#[error("PKCE cookie did not contain a code verifier.")]
	MissingVerifier,
}

/// Configuration and validation failures raised while wiring the handler.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Codec secret was empty.
	#[error("Codec secret cannot be empty.")]
	EmptySecret,
	/// Encryption key could not be derived from the secret.
	#[error("Encryption key could not be derived from the secret.")]
	KeyDerivation,
}

/// Failures raised while drawing entropy for verifiers, nonces, or token identifiers.
#[derive(Debug, ThisError)]
pub enum GenerationError {
	/// Operating-system random source reported a failure.
	#[error("Operating system random source failed.")]
	RandomSource {
		/// Underlying random source failure.
		#[source]
		source: BoxError,
	},
}
impl GenerationError {
	/// Wraps a random source failure inside [`GenerationError`].
	pub fn random_source(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::RandomSource { source: Box::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug, ThisError)]
	#[error("entropy pool drained")]
	struct Drained;

	#[test]
	fn generation_error_keeps_source() {
		let error: Error = GenerationError::random_source(Drained).into();

		assert!(matches!(error, Error::Generation(_)));
		assert_eq!(error.to_string(), "Operating system random source failed.");

		let source = StdError::source(&error)
			.expect("Generation error should expose the random source failure.");

		assert_eq!(source.to_string(), "entropy pool drained");
	}
}
