//! PKCE primitives: code verifiers, `S256` challenges, and the wire constants shared with the
//! authorization server.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;
// self
use crate::{_prelude::*, error::GenerationError};

/// Lifetime of a PKCE cookie and of the sealed payload inside it (15 minutes).
pub const PKCE_MAX_AGE: Duration = Duration::seconds(60 * 15);

const VERIFIER_ENTROPY_BYTES: usize = 32;
const VERIFIER_MIN_LEN: usize = 43;
const VERIFIER_MAX_LEN: usize = 128;

/// Supported PKCE challenge methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PkceCodeChallengeMethod {
	/// SHA-256 based PKCE (RFC 7636 S256).
	#[default]
	S256,
}
impl PkceCodeChallengeMethod {
	/// Returns the RFC 7636 identifier for the challenge method.
	pub const fn as_str(self) -> &'static str {
		match self {
			PkceCodeChallengeMethod::S256 => "S256",
		}
	}

	/// Derives the challenge for `verifier` using this method.
	pub fn challenge(self, verifier: &CodeVerifier) -> CodeChallenge {
		match self {
			PkceCodeChallengeMethod::S256 => CodeChallenge(compute_s256(verifier.expose())),
		}
	}
}
impl Display for PkceCodeChallengeMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Error returned when a foreign string cannot be used as a code verifier.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CodeVerifierError {
	/// The verifier length falls outside `43..=128`.
	#[error("Code verifier must be between 43 and 128 characters, got {len}.")]
	Length {
		/// Observed character count.
		len: usize,
	},
	/// The verifier contains characters outside the unreserved URL set.
	#[error("Code verifier contains characters outside `[A-Za-z0-9-._~]`.")]
	Charset,
}

/// High-entropy PKCE secret that must never reach logs unredacted.
///
/// The backing buffer is wiped when the verifier is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodeVerifier(Zeroizing<String>);
impl CodeVerifier {
	/// Draws 256 bits from the operating system and encodes them as a 43-character verifier.
	pub fn generate() -> Result<Self, GenerationError> {
		let mut entropy = Zeroizing::new([0_u8; VERIFIER_ENTROPY_BYTES]);

		fill_random(entropy.as_mut_slice())?;

		Ok(Self(Zeroizing::new(URL_SAFE_NO_PAD.encode(entropy.as_slice()))))
	}

	/// Wraps an existing verifier after RFC 7636 length and charset validation.
	pub fn new(value: impl Into<String>) -> Result<Self, CodeVerifierError> {
		let value = value.into();

		validate_verifier(&value)?;

		Ok(Self(Zeroizing::new(value)))
	}

	/// Returns the raw verifier. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl TryFrom<String> for CodeVerifier {
	type Error = CodeVerifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl From<CodeVerifier> for String {
	fn from(value: CodeVerifier) -> Self {
		value.expose().to_owned()
	}
}
impl Debug for CodeVerifier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("CodeVerifier").field(&"<redacted>").finish()
	}
}
impl Display for CodeVerifier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Public value derived from a [`CodeVerifier`] and sent in the authorization request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeChallenge(String);
impl CodeChallenge {
	/// Returns the encoded challenge.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for CodeChallenge {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for CodeChallenge {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Fills `buf` from the operating-system CSPRNG, surfacing failures instead of panicking.
pub(crate) fn fill_random(buf: &mut [u8]) -> Result<(), GenerationError> {
	OsRng.try_fill_bytes(buf).map_err(GenerationError::random_source)
}

fn compute_s256(verifier: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(verifier.as_bytes());
	let digest = hasher.finalize();
	URL_SAFE_NO_PAD.encode(digest)
}

fn validate_verifier(value: &str) -> Result<(), CodeVerifierError> {
	let len = value.len();

	if !(VERIFIER_MIN_LEN..=VERIFIER_MAX_LEN).contains(&len) {
		return Err(CodeVerifierError::Length { len });
	}
	if !value.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~'))
	{
		return Err(CodeVerifierError::Charset);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn s256_matches_rfc7636_appendix_b() {
		let verifier = CodeVerifier::new("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk")
			.expect("RFC 7636 verifier should be valid.");
		let challenge = PkceCodeChallengeMethod::S256.challenge(&verifier);

		assert_eq!(challenge.as_str(), "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
	}

	#[test]
	fn generated_verifiers_are_url_safe_and_unique() {
		let a = CodeVerifier::generate().expect("OS random source should be available.");
		let b = CodeVerifier::generate().expect("OS random source should be available.");

		assert_eq!(a.expose().len(), 43);
		assert!(validate_verifier(a.expose()).is_ok());
		assert_ne!(a, b);
		assert_eq!(PkceCodeChallengeMethod::S256.challenge(&a).as_str().len(), 43);
	}

	#[test]
	fn verifier_validation_rejects_bad_input() {
		assert_eq!(CodeVerifier::new("short"), Err(CodeVerifierError::Length { len: 5 }));
		assert_eq!(
			CodeVerifier::new("a".repeat(VERIFIER_MAX_LEN + 1)),
			Err(CodeVerifierError::Length { len: VERIFIER_MAX_LEN + 1 })
		);
		assert_eq!(
			CodeVerifier::new(format!("{}+", "a".repeat(42))),
			Err(CodeVerifierError::Charset)
		);
		assert!(CodeVerifier::new("a".repeat(VERIFIER_MAX_LEN)).is_ok());
		assert!(serde_json::from_str::<CodeVerifier>("\"nope\"").is_err());
	}

	#[test]
	fn verifier_formatters_redact() {
		let verifier = CodeVerifier::new("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk")
			.expect("RFC 7636 verifier should be valid.");

		assert_eq!(format!("{verifier:?}"), "CodeVerifier(\"<redacted>\")");
		assert_eq!(format!("{verifier}"), "<redacted>");
	}

	#[test]
	fn zeroizing_storage_keeps_the_raw_value_reachable() {
		let raw = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
		let verifier = CodeVerifier::new(raw).expect("RFC 7636 verifier should be valid.");
		let json = serde_json::to_string(&verifier).expect("Verifier should serialize.");

		assert_eq!(json, format!("\"{raw}\""));
		assert_eq!(
			serde_json::from_str::<CodeVerifier>(&json).expect("Verifier should deserialize."),
			verifier
		);
		assert_eq!(verifier.clone(), verifier);
		assert_eq!(String::from(verifier), raw);
	}

	#[test]
	fn method_serializes_to_wire_identifier() {
		assert_eq!(PkceCodeChallengeMethod::S256.to_string(), "S256");
		assert_eq!(
			serde_json::to_string(&PkceCodeChallengeMethod::S256)
				.expect("Challenge method should serialize."),
			"\"S256\""
		);
	}
}
