//! Hyperlink derivation and payload assembly
//!
//! Both halves are agnostic to record types: they work on a resource's shape
//! and the JSON encoding of its records.

pub mod manager;
pub mod payload;

pub use manager::{LinkManager, Links, qualify};
pub use payload::{marshal_many, marshal_one, marshal_root};
