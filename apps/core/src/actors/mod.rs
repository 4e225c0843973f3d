//! Actor system: a single scanner task that owns the scan controller, and a
//! supervisor that keeps it in sync with the mode store.

pub mod messages;
pub mod scanner;
pub mod supervisor;
pub mod traits;
