//! Type-safe wrappers for FPL identifiers used on the command line.

pub mod ids;

pub use ids::ManagerId;
