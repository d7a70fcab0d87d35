//! PKCE flow orchestrators hosted by the [`PkceHandler`] facade.

pub mod issue;
pub mod recover;

pub use issue::*;
pub use recover::*;

// self
use crate::{
	_prelude::*,
	codec::{CodecParams, SecretCodec},
	cookie::PkceCookieConfig,
	pkce::PKCE_MAX_AGE,
};

/// Parameters every PKCE cookie is sealed and opened with.
pub const PKCE_CODEC_PARAMS: CodecParams = CodecParams::new(PKCE_MAX_AGE);

/// Issues PKCE challenges and recovers their verifiers across the authorization redirect.
///
/// The handler holds no per-request state: the verifier lives only inside the sealed cookie it
/// hands out, so one instance can serve any number of concurrent authorization attempts. The
/// codec's key material is the only shared resource and is never mutated.
#[derive(Clone)]
pub struct PkceHandler {
	/// Codec sealing the verifier into the cookie value.
	pub codec: Arc<dyn SecretCodec>,
	/// Name and base attributes of the PKCE cookie.
	pub cookie: PkceCookieConfig,
	/// Prints the raw verifier in the issuance debug event.
	pub log_verifier: bool,
}
impl PkceHandler {
	/// Creates a handler that seals cookies with `codec`.
	pub fn new(codec: Arc<dyn SecretCodec>, cookie: PkceCookieConfig) -> Self {
		Self { codec, cookie, log_verifier: false }
	}

	/// Toggles printing the raw verifier in debug events.
	///
	/// Leave this off outside local debugging: the verifier is the proof of possession.
	pub fn with_verifier_logging(mut self, enabled: bool) -> Self {
		self.log_verifier = enabled;

		self
	}
}
impl Debug for PkceHandler {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PkceHandler")
			.field("cookie", &self.cookie)
			.field("log_verifier", &self.log_verifier)
			.finish_non_exhaustive()
	}
}
