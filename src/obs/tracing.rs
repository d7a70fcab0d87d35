// self
use crate::{
	_prelude::*,
	obs::FlowKind,
	pkce::{CodeChallenge, CodeVerifier, PkceCodeChallengeMethod},
	provider::ProviderId,
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by the PKCE flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind, stage, and provider.
	pub fn new(kind: FlowKind, stage: &'static str, provider: &ProviderId) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oauth2_pkce.flow",
				flow = kind.as_str(),
				stage,
				provider = %provider
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage, provider);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Fields carried by the `CREATE_PKCE_CHALLENGE_VERIFIER` debug event.
#[derive(Clone, Copy, Debug)]
pub struct ChallengeCreated<'a> {
	/// Challenge sent to the authorization server.
	pub code_challenge: &'a CodeChallenge,
	/// Method used to derive the challenge.
	pub code_challenge_method: PkceCodeChallengeMethod,
	/// Secret verifier; printed only when `expose_verifier` is set.
	pub code_verifier: &'a CodeVerifier,
	/// Lifetime of the cookie and sealed payload.
	pub max_age: Duration,
	/// Prints the raw verifier instead of `<redacted>`. Diagnostic use only.
	pub expose_verifier: bool,
}

/// Emits the debug-level issuance event (when tracing is enabled).
pub fn record_challenge_created(event: ChallengeCreated<'_>) {
	#[cfg(feature = "tracing")]
	{
		let code_verifier = if event.expose_verifier {
			event.code_verifier.expose().to_owned()
		} else {
			event.code_verifier.to_string()
		};

		tracing::debug!(
			code = "CREATE_PKCE_CHALLENGE_VERIFIER",
			code_challenge = event.code_challenge.as_str(),
			code_challenge_method = event.code_challenge_method.as_str(),
			code_verifier = code_verifier.as_str(),
			max_age = event.max_age.whole_seconds(),
			"Created PKCE challenge and verifier."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = event;
	}
}
