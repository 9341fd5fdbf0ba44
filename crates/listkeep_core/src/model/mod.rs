//! Domain model for to-do lists and their tasks.
//!
//! # Responsibility
//! - Define the persisted list/task records and the collection aggregate.
//! - Own title normalization rules shared by every write path.
//! - Provide the fixed list colour palette.
//!
//! # Invariants
//! - List ids are unique within a collection.
//! - Task ids are unique among siblings of the same list.
//! - Tasks are owned by exactly one list; there is no sharing.

pub mod palette;
pub mod todo_list;
