//! # Biblio Architecture
//!
//! Biblio is a **UI-agnostic library-management library**. This is not a CLI
//! application that happens to have some library code—it's a library that happens
//! to have a CLI client.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Aggregate (library.rs)                                     │
//! │  - Owns the book and borrower maps                          │
//! │  - Validates every transition before mutating               │
//! │  - Persists on every successful mutation, all-or-nothing    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `library.rs` inward, code takes regular Rust arguments, returns regular
//! Rust types (`Result<T>`), never writes to stdout/stderr, and never calls
//! `std::process::exit`. The same core could serve a REST API or any other UI.
//!
//! ## Module Overview
//!
//! - [`library`]: The `Library` aggregate—entry point for all operations
//! - [`model`]: Core data types (`Book`, `Borrower`, `Genre`)
//! - [`store`]: Storage abstraction and implementations
//! - [`ident`]: Sequential, prefix-scoped identifier generation
//! - [`search`]: Field/value criteria matching
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod ident;
pub mod library;
pub mod model;
pub mod search;
pub mod store;
