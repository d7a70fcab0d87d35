//! Walks through issuing a PKCE challenge for the authorization redirect and recovering the
//! verifier when the authorization server calls back.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauth2_pkce_cookie::{
	codec::JweCodec,
	cookie::PkceCookieConfig,
	flows::PkceHandler,
	provider::{AuthorizationServer, Check, ProviderConfig, ProviderId},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let codec = JweCodec::new("demo-secret-rotate-me")?;
	let handler = PkceHandler::new(Arc::new(codec), PkceCookieConfig::secure());
	let provider = ProviderConfig::new(ProviderId::new("demo-provider")?)
		.with_checks([Check::Pkce, Check::State]);
	let server = AuthorizationServer::new(Url::parse("https://provider.example.com")?)
		.with_code_challenge_methods(["S256"]);
	let Some(pkce) = handler.create_pkce(&server, &provider).await? else {
		println!("Provider does not use PKCE; redirect without a challenge.");

		return Ok(());
	};
	let mut authorize_url = Url::parse("https://provider.example.com/authorize")?;

	authorize_url
		.query_pairs_mut()
		.append_pair("response_type", "code")
		.append_pair("client_id", "demo-client");
	pkce.append_to(&mut authorize_url);

	println!("Redirect the user agent to: {authorize_url}");
	println!("Set cookie `{}` ({} bytes sealed).", pkce.cookie.name, pkce.cookie.value.len());

	// The user agent returns the cookie on the callback request.
	let recovered = handler
		.use_code_verifier(Some(pkce.cookie.value.as_str()), &server, &provider)
		.await?
		.ok_or_else(|| color_eyre::eyre::eyre!("PKCE unexpectedly skipped on callback."))?;

	println!("Clear cookie `{}` with max-age 0.", recovered.cookie.name);

	let verifier = recovered.into_verifier()?;

	println!("Send `code_verifier` ({} chars) with the token request.", verifier.expose().len());

	Ok(())
}
