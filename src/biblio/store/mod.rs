//! # Storage Layer
//!
//! This module defines the storage abstraction for biblio. The [`DataStore`]
//! trait allows the aggregate to work with different storage backends.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Allow **future backends** (database, etc.) without changing core logic
//! - Keep business logic **decoupled** from persistence details
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - Books in one JSON document (`library_books.json` by default)
//!   - Borrowers in a second (`library_borrowers.json` by default)
//!   - Writes are atomic (write a temp file, then rename over the target),
//!     so a crash mid-save never truncates existing data
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures to exercise rollback paths
//!
//! ## Storage Format
//!
//! Each document is a single JSON object keyed by entity id:
//!
//! ```text
//! <data-dir>/
//! ├── library_books.json      # { "BOOK_0001": {...}, ... }
//! ├── library_borrowers.json  # { "BORROWER_0001": {...}, ... }
//! └── config.json             # Optional file-name overrides
//! ```
//!
//! An absent file is the normal empty state, not an error. Malformed JSON (or
//! a record with an invalid genre) surfaces as a serialization error, distinct
//! from both absence and plain I/O failures.

use crate::error::Result;
use crate::model::{Book, Borrower};
use std::collections::BTreeMap;

pub mod fs;
pub mod memory;

pub type BookMap = BTreeMap<String, Book>;
pub type BorrowerMap = BTreeMap<String, Borrower>;

/// Abstract interface for library persistence.
///
/// All methods take `&self`; implementations handle interior mutability where
/// they need it (biblio is single-threaded throughout).
pub trait DataStore {
    /// Load the full books document. Absent document → empty map.
    fn load_books(&self) -> Result<BookMap>;

    /// Replace the full books document.
    fn save_books(&self, books: &BookMap) -> Result<()>;

    /// Load the full borrowers document. Absent document → empty map.
    fn load_borrowers(&self) -> Result<BorrowerMap>;

    /// Replace the full borrowers document.
    fn save_borrowers(&self, borrowers: &BorrowerMap) -> Result<()>;
}
