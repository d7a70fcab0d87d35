//! Provider capability descriptors consumed by the PKCE flows.
//!
//! `config` carries per-provider settings (`ProviderConfig`, the `checks` set that must include
//! `pkce`). `server` mirrors the authorization-server metadata the flows inspect, chiefly the
//! advertised `code_challenge_methods_supported` list.

/// Per-provider settings and identifiers.
pub mod config;
/// Authorization-server metadata.
pub mod server;

pub use config::*;
pub use server::*;

// self
use crate::pkce::PkceCodeChallengeMethod;

/// Returns true when both the provider and its authorization server allow PKCE with `method`.
///
/// The provider must list the `pkce` check. A server that omits the supported-methods field is
/// treated as accepting the method; an advertised list must contain it, so an empty list always
/// disables PKCE.
pub fn pkce_applicable(
	provider: &ProviderConfig,
	server: &AuthorizationServer,
	method: PkceCodeChallengeMethod,
) -> bool {
	provider.uses_pkce() && server.accepts_challenge_method(method)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_prelude::Url;

	fn provider(checks: &[Check]) -> ProviderConfig {
		ProviderConfig::new(ProviderId::new("demo").expect("Provider fixture should be valid."))
			.with_checks(checks.iter().copied())
	}

	fn server(methods: Option<&[&str]>) -> AuthorizationServer {
		let server = AuthorizationServer::new(
			Url::parse("https://issuer.example.com").expect("Issuer fixture should parse."),
		);

		match methods {
			Some(methods) => server.with_code_challenge_methods(methods.iter().copied()),
			None => server,
		}
	}

	#[test]
	fn requires_pkce_check_and_advertised_method() {
		let s256 = PkceCodeChallengeMethod::S256;

		assert!(pkce_applicable(&provider(&[Check::Pkce]), &server(Some(&["S256"][..])), s256));
		assert!(pkce_applicable(&provider(&[Check::Pkce, Check::State]), &server(None), s256));
		assert!(!pkce_applicable(&provider(&[Check::State]), &server(Some(&["S256"][..])), s256));
		assert!(!pkce_applicable(&provider(&[]), &server(None), s256));
		assert!(!pkce_applicable(&provider(&[Check::Pkce]), &server(Some(&[] as &[&str])), s256));
		assert!(!pkce_applicable(&provider(&[Check::Pkce]), &server(Some(&["plain"][..])), s256));
	}
}
