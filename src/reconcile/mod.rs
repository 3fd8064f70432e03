//! Installation state reconciliation.
//!
//! A reconciliation cycle runs every probe, then derives the phase, the
//! primary action, and the set of legal actions from the results alone.

pub mod reconciler;
pub mod state;

pub use reconciler::{reconcile, ProbeSnapshot, Reconciler, Tracked};
pub use state::{Action, InstallPhase, InstallationState, PrimaryAction};
