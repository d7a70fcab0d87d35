//! Optional observability helpers for the PKCE flows.
//!
//! # Feature Flags
//!
//! - `tracing` (default) emits spans named `oauth2_pkce.flow` with the `flow`, `stage`, and
//!   `provider` fields, plus one debug event per issued challenge.
//! - `metrics` increments the `oauth2_pkce_flow_total` counter for every
//!   attempt/success/skip/failure, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// PKCE flow kinds observed by the handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Challenge issuance at authorization-request time.
	Issue,
	/// Verifier recovery at callback time.
	Recover,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Issue => "issue",
			FlowKind::Recover => "recover",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a handler operation.
	Attempt,
	/// Successful completion.
	Success,
	/// PKCE did not apply to the provider or server.
	Skipped,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Skipped => "skipped",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
