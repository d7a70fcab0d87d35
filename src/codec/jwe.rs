//! Direct-key JWE codec (`alg: dir`, `enc: A256GCM`) in compact serialization.
//!
//! The content key is derived from the configured secret with HKDF-SHA256. Each value carries
//! `iat`, `exp`, and `jti` claims; `exp` is checked on every decode.

// crates.io
use aes_gcm::{
	Aes256Gcm, Nonce,
	aead::{Aead, KeyInit, Payload},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hkdf::Hkdf;
use serde_json::Value;
use sha2::Sha256;
use zeroize::Zeroizing;
// self
use crate::{
	_prelude::*,
	codec::{Claims, CodecError, CodecFuture, CodecParams, SecretCodec},
	error::ConfigError,
	pkce,
};

const ALG: &str = "dir";
const ENC: &str = "A256GCM";
const PROTECTED_HEADER: &str = r#"{"alg":"dir","enc":"A256GCM"}"#;
const KEY_INFO: &[u8] = b"oauth2-pkce-cookie generated encryption key";
const KEY_LEN: usize = 32;
const IV_LEN: usize = 12;
const TAG_LEN: usize = 16;
const JTI_LEN: usize = 16;

/// Source of the current instant.
pub type Clock = fn() -> OffsetDateTime;

#[derive(Deserialize)]
struct ProtectedHeader {
	alg: String,
	enc: String,
}

/// [`SecretCodec`] sealing claims as compact JWE with AES-256-GCM.
#[derive(Clone)]
pub struct JweCodec {
	cipher: Aes256Gcm,
	clock: Clock,
	clock_tolerance: Duration,
}
impl JweCodec {
	/// Derives the content key from `secret`.
	pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
		let secret = secret.as_ref();

		if secret.is_empty() {
			return Err(ConfigError::EmptySecret);
		}

		let mut key = Zeroizing::new([0_u8; KEY_LEN]);

		Hkdf::<Sha256>::new(None, secret)
			.expand(KEY_INFO, &mut key[..])
			.map_err(|_| ConfigError::KeyDerivation)?;

		let cipher =
			Aes256Gcm::new_from_slice(&key[..]).map_err(|_| ConfigError::KeyDerivation)?;

		Ok(Self { cipher, clock: OffsetDateTime::now_utc, clock_tolerance: Duration::ZERO })
	}

	/// Replaces the clock used for `iat`/`exp` and expiry checks.
	pub fn with_clock(mut self, clock: Clock) -> Self {
		self.clock = clock;

		self
	}

	/// Accepts values up to `tolerance` past their expiry (defaults to zero).
	pub fn with_clock_tolerance(mut self, tolerance: Duration) -> Self {
		self.clock_tolerance = if tolerance.is_negative() { Duration::ZERO } else { tolerance };

		self
	}

	/// Seals `claims`, adding `iat`, `exp`, and `jti`.
	pub fn seal(&self, params: &CodecParams, mut claims: Claims) -> Result<String, CodecError> {
		let now = (self.clock)();
		let mut jti = [0_u8; JTI_LEN];

		pkce::fill_random(&mut jti)?;

		claims.insert("iat".into(), now.unix_timestamp().into());
		claims.insert("exp".into(), (now + params.max_age).unix_timestamp().into());
		claims.insert("jti".into(), URL_SAFE_NO_PAD.encode(jti).into());

		let plaintext = Zeroizing::new(serde_json::to_vec(&claims).map_err(CodecError::Serialize)?);
		let header = URL_SAFE_NO_PAD.encode(PROTECTED_HEADER);
		let mut iv = [0_u8; IV_LEN];

		pkce::fill_random(&mut iv)?;

		let sealed = self
			.cipher
			.encrypt(Nonce::from_slice(&iv), Payload { msg: &plaintext, aad: header.as_bytes() })
			.map_err(|_| CodecError::Encrypt)?;
		let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);

		Ok(format!(
			"{header}..{}.{}.{}",
			URL_SAFE_NO_PAD.encode(iv),
			URL_SAFE_NO_PAD.encode(ciphertext),
			URL_SAFE_NO_PAD.encode(tag)
		))
	}

	/// Opens a compact JWE value and enforces its expiry.
	pub fn open(&self, params: &CodecParams, token: &str) -> Result<Claims, CodecError> {
		let mut segments = token.split('.');
		let (Some(header), Some(encrypted_key), Some(iv), Some(ciphertext), Some(tag), None) = (
			segments.next(),
			segments.next(),
			segments.next(),
			segments.next(),
			segments.next(),
			segments.next(),
		) else {
			return Err(CodecError::Malformed { reason: "expected five compact segments" });
		};

		if !encrypted_key.is_empty() {
			return Err(CodecError::Malformed { reason: "direct encryption carries no key" });
		}

		let protected: ProtectedHeader = serde_json::from_slice(&decode_segment(header)?)
			.map_err(|_| CodecError::Malformed { reason: "protected header is not valid JSON" })?;

		if protected.alg != ALG || protected.enc != ENC {
			return Err(CodecError::UnsupportedHeader { alg: protected.alg, enc: protected.enc });
		}

		let iv = decode_segment(iv)?;
		let tag = decode_segment(tag)?;

		if iv.len() != IV_LEN {
			return Err(CodecError::Malformed { reason: "initialization vector has wrong length" });
		}
		if tag.len() != TAG_LEN {
			return Err(CodecError::Malformed { reason: "authentication tag has wrong length" });
		}

		let mut sealed = decode_segment(ciphertext)?;

		sealed.extend_from_slice(&tag);

		let plaintext = Zeroizing::new(
			self.cipher
				.decrypt(Nonce::from_slice(&iv), Payload { msg: &sealed, aad: header.as_bytes() })
				.map_err(|_| CodecError::Integrity)?,
		);
		let claims: Claims = serde_json::from_slice(&plaintext)
			.map_err(|_| CodecError::Malformed { reason: "payload is not a JSON object" })?;

		self.ensure_fresh(params, &claims)?;

		Ok(claims)
	}

	fn ensure_fresh(&self, params: &CodecParams, claims: &Claims) -> Result<(), CodecError> {
		let exp = claims.get("exp").and_then(Value::as_i64).ok_or(CodecError::MissingExpiry)?;
		// A payload never outlives the max age it is opened with, whatever its own `exp` says.
		let deadline = match claims.get("iat").and_then(Value::as_i64) {
			Some(iat) => exp.min(iat.saturating_add(params.max_age.whole_seconds())),
			None => exp,
		};
		let expired_at = OffsetDateTime::from_unix_timestamp(deadline)
			.map_err(|_| CodecError::Malformed { reason: "expiry is out of range" })?;

		if (self.clock)() >= expired_at + self.clock_tolerance {
			return Err(CodecError::Expired { expired_at });
		}

		Ok(())
	}
}
impl Debug for JweCodec {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("JweCodec")
			.field("alg", &ALG)
			.field("enc", &ENC)
			.field("clock_tolerance", &self.clock_tolerance)
			.finish_non_exhaustive()
	}
}
impl SecretCodec for JweCodec {
	fn encode<'a>(&'a self, params: &'a CodecParams, claims: Claims) -> CodecFuture<'a, String> {
		Box::pin(async move { self.seal(params, claims) })
	}

	fn decode<'a>(&'a self, params: &'a CodecParams, token: &'a str) -> CodecFuture<'a, Claims> {
		Box::pin(async move { self.open(params, token) })
	}
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, CodecError> {
	URL_SAFE_NO_PAD
		.decode(segment)
		.map_err(|_| CodecError::Malformed { reason: "segment is not base64url" })
}
