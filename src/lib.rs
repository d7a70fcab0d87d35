//! Stateless OAuth 2.0 PKCE helpers: issue `S256` challenges, park the verifier in an encrypted,
//! time-boxed cookie, and recover it exactly once when the authorization server calls back.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod codec;
pub mod cookie;
pub mod error;
pub mod flows;
pub mod obs;
pub mod pkce;
pub mod provider;

mod _prelude {
	pub use std::{
		collections::BTreeSet,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use {color_eyre as _, tracing_subscriber as _};
