//! Run reporting
//!
//! This module holds the counters accumulated over a harvest run and the
//! stdout presentation used by the command-line interface.

mod summary;

pub use summary::{print_summary, RunSummary};
