//! Title search entry points.
//!
//! # Responsibility
//! - Filter lists and tasks by a case-insensitive title substring.
//! - Stay pure: inputs are borrowed and never reordered or mutated.

pub mod filter;
