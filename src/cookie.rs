//! Structured cookie records exchanged with the HTTP layer.
//!
//! The crate never parses or serializes `Cookie`/`Set-Cookie` headers; it only builds and reads
//! these records. Transport code owns the wire format.

// self
use crate::{_prelude::*, pkce::PKCE_MAX_AGE};

const DEFAULT_PKCE_COOKIE_NAME: &str = "pkce.code_verifier";
const SECURE_PREFIX: &str = "__Secure-";

/// `SameSite` attribute values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
	/// Sent on top-level navigations, which covers the authorization-server redirect.
	#[default]
	Lax,
	/// Never sent cross-site.
	Strict,
	/// Always sent; requires `Secure`.
	None,
}

/// Attributes attached to a cookie record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieOptions {
	/// Hides the cookie from client-side scripts.
	pub http_only: bool,
	/// Cross-site delivery policy.
	pub same_site: SameSite,
	/// Path scope.
	pub path: String,
	/// Restricts the cookie to HTTPS.
	pub secure: bool,
	/// Optional domain scope.
	pub domain: Option<String>,
	/// Absolute expiry instant.
	pub expires: Option<OffsetDateTime>,
	/// Relative lifetime; zero instructs the user agent to drop the cookie immediately.
	pub max_age: Option<Duration>,
}
impl Default for CookieOptions {
	fn default() -> Self {
		Self {
			http_only: true,
			same_site: SameSite::Lax,
			path: "/".into(),
			secure: false,
			domain: None,
			expires: None,
			max_age: None,
		}
	}
}

/// Cookie record handed to (or received from) the HTTP layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
	/// Cookie name.
	pub name: String,
	/// Cookie value; opaque to everything but the secret codec.
	pub value: String,
	/// Cookie attributes.
	pub options: CookieOptions,
}
impl Cookie {
	/// Returns true when the record instructs the user agent to delete the cookie.
	pub fn is_removal(&self) -> bool {
		self.value.is_empty() && self.options.max_age.is_some_and(|age| !age.is_positive())
	}
}

/// Name and base attributes of the PKCE cookie.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PkceCookieConfig {
	/// Cookie name used for both issuance and clearing.
	pub name: String,
	/// Base attributes; the flows override `expires` or `max_age` per operation.
	pub options: CookieOptions,
}
impl PkceCookieConfig {
	/// Config for HTTPS deployments: `Secure` set and the name carries the `__Secure-` prefix.
	pub fn secure() -> Self {
		let base = Self::default();

		Self {
			name: format!("{SECURE_PREFIX}{}", base.name),
			options: CookieOptions { secure: true, ..base.options },
		}
	}

	/// Overrides the cookie name.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();

		self
	}

	/// Overrides the domain attribute.
	pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
		self.options.domain = Some(domain.into());

		self
	}

	/// Builds the issuance cookie carrying `value` until `expires`.
	pub(crate) fn issue(&self, value: String, expires: OffsetDateTime) -> Cookie {
		let mut options = self.options.clone();

		options.expires = Some(expires);

		Cookie { name: self.name.clone(), value, options }
	}

	/// Builds the instruction that clears the PKCE cookie.
	pub(crate) fn clear(&self) -> Cookie {
		let mut options = self.options.clone();

		options.max_age = Some(Duration::ZERO);

		Cookie { name: self.name.clone(), value: String::new(), options }
	}
}
impl Default for PkceCookieConfig {
	fn default() -> Self {
		Self {
			name: DEFAULT_PKCE_COOKIE_NAME.into(),
			options: CookieOptions { max_age: Some(PKCE_MAX_AGE), ..Default::default() },
		}
	}
}
