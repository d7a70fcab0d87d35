// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when provider identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum ProviderIdError {
	/// The identifier was empty.
	#[error("Provider identifier cannot be empty.")]
	Empty,
	/// The identifier contains whitespace characters.
	#[error("Provider identifier contains whitespace.")]
	ContainsWhitespace,
	/// The identifier exceeded the allowed character count.
	#[error("Provider identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Identifier for an OAuth provider, used to label spans and diagnostics.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);
impl ProviderId {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, ProviderIdError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for ProviderId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for ProviderId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for ProviderId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<ProviderId> for String {
	fn from(value: ProviderId) -> Self {
		value.0
	}
}
impl TryFrom<String> for ProviderId {
	type Error = ProviderIdError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for ProviderId {
	type Err = ProviderIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for ProviderId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Provider({})", self.0)
	}
}
impl Display for ProviderId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Callback checks a provider can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Check {
	/// Proof Key for Code Exchange.
	Pkce,
	/// Opaque `state` round trip.
	State,
	/// OpenID Connect `nonce` binding.
	Nonce,
	/// Explicitly no checks.
	None,
}
impl Check {
	/// Returns the configuration label for the check.
	pub const fn as_str(self) -> &'static str {
		match self {
			Check::Pkce => "pkce",
			Check::State => "state",
			Check::Nonce => "nonce",
			Check::None => "none",
		}
	}
}
impl Display for Check {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Per-provider settings that decide whether PKCE runs at all.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
	/// Provider identifier.
	pub id: ProviderId,
	/// Checks performed around the authorization redirect.
	#[serde(default)]
	pub checks: BTreeSet<Check>,
}
impl ProviderConfig {
	/// Creates a config with no checks enabled.
	pub fn new(id: ProviderId) -> Self {
		Self { id, checks: BTreeSet::new() }
	}

	/// Enables a single check.
	pub fn with_check(mut self, check: Check) -> Self {
		self.checks.insert(check);

		self
	}

	/// Enables multiple checks.
	pub fn with_checks<I>(mut self, checks: I) -> Self
	where
		I: IntoIterator<Item = Check>,
	{
		self.checks.extend(checks);

		self
	}

	/// Returns true when the provider's checks include PKCE.
	pub fn uses_pkce(&self) -> bool {
		self.checks.contains(&Check::Pkce)
	}
}

fn validate_view(view: &str) -> Result<(), ProviderIdError> {
	if view.is_empty() {
		return Err(ProviderIdError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(ProviderIdError::ContainsWhitespace);
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(ProviderIdError::TooLong { max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_validate() {
		assert_eq!(ProviderId::new(""), Err(ProviderIdError::Empty));
		assert_eq!(ProviderId::new("with space"), Err(ProviderIdError::ContainsWhitespace));
		assert!(ProviderId::new("a".repeat(IDENTIFIER_MAX_LEN + 1)).is_err());

		let id = ProviderId::new("github").expect("Provider fixture should be valid.");

		assert_eq!(id.as_ref(), "github");
		assert_eq!(format!("{id:?}"), "Provider(github)");
	}

	#[test]
	fn config_deserializes_check_labels() {
		let config: ProviderConfig =
			serde_json::from_str(r#"{"id":"auth0","checks":["state","pkce"]}"#)
				.expect("Provider config should deserialize.");

		assert!(config.uses_pkce());
		assert!(config.checks.contains(&Check::State));

		let bare: ProviderConfig = serde_json::from_str(r#"{"id":"legacy"}"#)
			.expect("Checks should default to an empty set.");

		assert!(!bare.uses_pkce());
		assert!(
			serde_json::from_str::<ProviderConfig>(r#"{"id":"x","checks":["bogus"]}"#).is_err()
		);
	}
}
