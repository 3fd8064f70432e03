//! Install, uninstall and update.

pub mod executor;
pub mod report;

pub use executor::ActionExecutor;
pub use report::{ActionReport, Notice};
