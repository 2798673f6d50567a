//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage-slot contract for the persisted to-do document.
//! - Isolate file and serialization details from service orchestration.
//!
//! # Invariants
//! - Read paths reject malformed persisted state instead of masking it; the
//!   service layer decides the fallback policy.
//! - Writes replace the whole document, never a partial range.

pub mod todo_repo;
