//! Weighted rule pruning.
//!
//! A rule file is read whole, every group of the partition is decided, and
//! only then is the filtered copy written.

mod emit;
mod heuristic;
mod layout;
mod run;
mod weight;

pub use run::run;
