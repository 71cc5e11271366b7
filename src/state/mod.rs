//! State module for tracking harvest progress
//!
//! # Components
//!
//! - `DocumentState`: the lifecycle of one stored document (absent,
//!   unvalidated, valid, invalid, removed)

mod document;

pub use document::DocumentState;
