//! Challenge issuance for the authorization request.
//!
//! [`PkceHandler::create_pkce`] draws a fresh verifier, derives its `S256` challenge, and seals
//! the verifier into a cookie that expires together with the sealed payload. Nothing is kept
//! server-side.

// self
use crate::{
	_prelude::*,
	codec::Claims,
	cookie::Cookie,
	flows::{PKCE_CODEC_PARAMS, PkceHandler},
	obs::{self, ChallengeCreated, FlowKind, FlowOutcome, FlowSpan},
	pkce::{CodeChallenge, CodeVerifier, PKCE_MAX_AGE, PkceCodeChallengeMethod},
	provider::{self, AuthorizationServer, ProviderConfig},
};

/// Challenge material returned by [`PkceHandler::create_pkce`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PkceChallenge {
	/// Challenge to send as `code_challenge`.
	pub code_challenge: CodeChallenge,
	/// Method to send as `code_challenge_method`.
	pub code_challenge_method: PkceCodeChallengeMethod,
	/// Cookie carrying the sealed verifier; attach it to the redirect response.
	pub cookie: Cookie,
}
impl PkceChallenge {
	/// Appends `code_challenge` and `code_challenge_method` to an authorize URL.
	pub fn append_to(&self, authorize_url: &mut Url) {
		authorize_url
			.query_pairs_mut()
			.append_pair("code_challenge", self.code_challenge.as_str())
			.append_pair("code_challenge_method", self.code_challenge_method.as_str());
	}
}

impl PkceHandler {
	/// Issues a PKCE challenge and the cookie that carries its verifier.
	///
	/// Returns `Ok(None)` when the provider does not check PKCE or the authorization server's
	/// advertised methods exclude `S256`; callers proceed without PKCE in that case. Random source
	/// and codec failures abort issuance.
	pub async fn create_pkce(
		&self,
		server: &AuthorizationServer,
		provider: &ProviderConfig,
	) -> Result<Option<PkceChallenge>> {
		const KIND: FlowKind = FlowKind::Issue;

		let span = FlowSpan::new(KIND, "create_pkce", &provider.id);

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result: Result<Option<PkceChallenge>> = span
			.instrument(async move {
				let method = PkceCodeChallengeMethod::S256;

				if !provider::pkce_applicable(provider, server, method) {
					return Ok(None);
				}

				let code_verifier = CodeVerifier::generate()?;
				let code_challenge = method.challenge(&code_verifier);
				let expires = OffsetDateTime::now_utc() + PKCE_MAX_AGE;
				let mut claims = Claims::new();

				claims.insert("code_verifier".into(), code_verifier.expose().into());

				let sealed = self.codec.encode(&PKCE_CODEC_PARAMS, claims).await?;

				obs::record_challenge_created(ChallengeCreated {
					code_challenge: &code_challenge,
					code_challenge_method: method,
					code_verifier: &code_verifier,
					max_age: PKCE_MAX_AGE,
					expose_verifier: self.log_verifier,
				});

				Ok(Some(PkceChallenge {
					code_challenge,
					code_challenge_method: method,
					cookie: self.cookie.issue(sealed, expires),
				}))
			})
			.await;

		let outcome = match &result {
			Ok(Some(_)) => FlowOutcome::Success,
			Ok(None) => FlowOutcome::Skipped,
			Err(_) => FlowOutcome::Failure,
		};

		obs::record_flow_outcome(KIND, outcome);

		result
	}
}
