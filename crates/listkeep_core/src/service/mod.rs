//! Core use-case services.
//!
//! # Responsibility
//! - Seed the store on first run.
//! - Run read-modify-write cycles: load, reconcile, save.
//! - Keep UI/FFI callers decoupled from storage details.

pub mod init;
pub mod list_service;
