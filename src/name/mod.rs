//! Canonical naming for stored documents
//!
//! This module derives the deterministic, filesystem-safe local filename
//! for every remote document URL. The naming scheme is what deduplicates
//! downloads: URLs that differ only in casing, percent-encoding, or
//! repeated extension suffixes land on the same stored document.

mod canonical;

pub use canonical::{canonical_name, CanonicalName};
