//! Session domain module.
//!
//! Contains the session state value object, the termination limits, the
//! per-round and terminal outcome types, and the progression controller.
//!
//! # Module Structure
//!
//! - `model`: Session state value object (`SessionState`, `Phase`)
//! - `limits`: Tunable termination bounds (`SessionLimits`)
//! - `outcome`: Round and terminal outcomes (`RoundOutcome`, `TerminalOutcome`)
//! - `controller`: The progression state machine (`SessionController`)

mod controller;
mod limits;
mod model;
mod outcome;

// Re-export public API
pub use controller::SessionController;
pub use limits::SessionLimits;
pub use model::{Phase, SessionState};
pub use outcome::{RoundOutcome, TerminalOutcome, UnableReason};
