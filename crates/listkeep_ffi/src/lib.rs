//! Flutter bridge surface for listkeep.

pub mod api;
