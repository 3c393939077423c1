//! SmartFix triage core.
//!
//! Everything needed to run an appliance-fault triage session against a
//! reasoning oracle: the case domain model, the verdict parser, the oracle
//! seam, and the session progression state machine. Transport lives in
//! `smartfix-oracle`; presentation lives in the calling shell.

pub mod case;
pub mod error;
pub mod oracle;
pub mod session;
pub mod verdict;

// Re-export common error type
pub use error::{Result, SmartfixError};
