// self
use crate::{_prelude::*, pkce::PkceCodeChallengeMethod};

/// Authorization-server metadata relevant to PKCE (RFC 8414 field names).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationServer {
	/// Issuer identifier.
	pub issuer: Url,
	/// Challenge methods the server advertises; `None` when the field is absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub code_challenge_methods_supported: Option<Vec<String>>,
}
impl AuthorizationServer {
	/// Creates metadata for `issuer` without an advertised method list.
	pub fn new(issuer: Url) -> Self {
		Self { issuer, code_challenge_methods_supported: None }
	}

	/// Sets the advertised challenge methods.
	pub fn with_code_challenge_methods<I, S>(mut self, methods: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.code_challenge_methods_supported = Some(methods.into_iter().map(Into::into).collect());

		self
	}

	/// Returns true unless the server advertises a list that lacks `method`.
	pub fn accepts_challenge_method(&self, method: PkceCodeChallengeMethod) -> bool {
		match self.code_challenge_methods_supported.as_deref() {
			Some(methods) => methods.iter().any(|m| m == method.as_str()),
			None => true,
		}
	}
}
