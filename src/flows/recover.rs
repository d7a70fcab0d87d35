//! Verifier recovery for the authorization-server callback.
//!
//! [`PkceHandler::use_code_verifier`] opens the PKCE cookie, hands back the verifier, and always
//! pairs it with an instruction that clears the cookie so it cannot be replayed.

// self
use crate::{
	_prelude::*,
	codec::CodecError,
	cookie::Cookie,
	flows::{PKCE_CODEC_PARAMS, PkceHandler},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	pkce::{CodeVerifier, PkceCodeChallengeMethod},
	provider::{self, AuthorizationServer, ProviderConfig},
};

#[derive(Deserialize)]
struct VerifierClaims {
	#[serde(default)]
	code_verifier: Option<CodeVerifier>,
}

/// Verifier material returned by [`PkceHandler::use_code_verifier`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoveredVerifier {
	/// Verifier to send as `code_verifier`; `None` when the sealed payload carried none.
	pub code_verifier: Option<CodeVerifier>,
	/// Instruction clearing the PKCE cookie; attach it to the callback response.
	pub cookie: Cookie,
}
impl RecoveredVerifier {
	/// Returns the verifier, failing when the payload carried none.
	///
	/// Use this when the token exchange must not proceed without a verifier.
	pub fn into_verifier(self) -> Result<CodeVerifier> {
		self.code_verifier.ok_or(Error::MissingVerifier)
	}
}

impl PkceHandler {
	/// Recovers the verifier sealed by [`PkceHandler::create_pkce`].
	///
	/// Returns `Ok(None)` when the provider does not check PKCE, no cookie value was supplied,
	/// or the authorization server's advertised methods exclude `S256`. Once PKCE applies, any
	/// failure to open the cookie (tampering, foreign key, expiry) is an error and never
	/// downgrades to `Ok(None)`.
	pub async fn use_code_verifier(
		&self,
		cookie_value: Option<&str>,
		server: &AuthorizationServer,
		provider: &ProviderConfig,
	) -> Result<Option<RecoveredVerifier>> {
		const KIND: FlowKind = FlowKind::Recover;

		let span = FlowSpan::new(KIND, "use_code_verifier", &provider.id);

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result: Result<Option<RecoveredVerifier>> = span
			.instrument(async move {
				let Some(cookie_value) = cookie_value.filter(|value| !value.is_empty()) else {
					return Ok(None);
				};

				if !provider::pkce_applicable(provider, server, PkceCodeChallengeMethod::S256) {
					return Ok(None);
				}

				let claims = self.codec.decode(&PKCE_CODEC_PARAMS, cookie_value).await?;
				let VerifierClaims { code_verifier } =
					serde_path_to_error::deserialize(serde_json::Value::Object(claims))
						.map_err(|source| CodecError::Payload { source })?;

				Ok(Some(RecoveredVerifier { code_verifier, cookie: self.cookie.clear() }))
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

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::cookie::PkceCookieConfig;

	#[test]
	fn into_verifier_requires_a_verifier() {
		let missing =
			RecoveredVerifier { code_verifier: None, cookie: PkceCookieConfig::default().clear() };

		assert!(matches!(missing.into_verifier(), Err(Error::MissingVerifier)));

		let verifier = CodeVerifier::new("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk")
			.expect("RFC 7636 verifier should be valid.");
		let present = RecoveredVerifier {
			code_verifier: Some(verifier.clone()),
			cookie: PkceCookieConfig::default().clear(),
		};

		assert_eq!(present.into_verifier().expect("Verifier should be present."), verifier);
	}
}
