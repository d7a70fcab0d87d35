//! Fixtures shared by the PKCE integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use time::{Duration, OffsetDateTime};
use url::Url;
// self
use oauth2_pkce_cookie::{
	codec::{JweCodec, SecretCodec},
	cookie::PkceCookieConfig,
	flows::PkceHandler,
	provider::{AuthorizationServer, Check, ProviderConfig, ProviderId},
};

pub const TEST_SECRET: &str = "integration-test-secret-do-not-use-in-production";

pub fn test_codec() -> JweCodec {
	JweCodec::new(TEST_SECRET).expect("Test secret should produce a codec.")
}

pub fn build_handler_with(codec: impl SecretCodec + 'static) -> PkceHandler {
	PkceHandler::new(Arc::new(codec), PkceCookieConfig::default())
}

pub fn build_handler() -> PkceHandler {
	build_handler_with(test_codec())
}

/// Handler whose codec believes the cookie has outlived its 900-second window.
pub fn build_late_handler() -> PkceHandler {
	build_handler_with(test_codec().with_clock(past_max_age))
}

pub fn pkce_provider() -> ProviderConfig {
	ProviderConfig::new(ProviderId::new("mock-pkce").expect("Provider fixture should be valid."))
		.with_checks([Check::Pkce, Check::State])
}

pub fn state_only_provider() -> ProviderConfig {
	ProviderConfig::new(ProviderId::new("mock-state").expect("Provider fixture should be valid."))
		.with_check(Check::State)
}

pub fn server_with_methods(methods: &[&str]) -> AuthorizationServer {
	AuthorizationServer::new(
		Url::parse("https://issuer.example.com").expect("Issuer fixture should parse."),
	)
	.with_code_challenge_methods(methods.iter().copied())
}

pub fn server_without_methods() -> AuthorizationServer {
	AuthorizationServer::new(
		Url::parse("https://issuer.example.com").expect("Issuer fixture should parse."),
	)
}

fn past_max_age() -> OffsetDateTime {
	OffsetDateTime::now_utc() + Duration::seconds(901)
}
