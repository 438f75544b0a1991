//! The `Library` aggregate.
//!
//! `Library` owns the book and borrower maps and is the only way to mutate
//! them. Every mutating operation validates fully before touching state,
//! persists the whole state on success, and rolls the in-memory change back if
//! persistence fails—so callers either see the operation applied and durable,
//! or not applied at all.

use crate::error::{BiblioError, Result};
use crate::ident;
use crate::model::{Book, Borrower, Genre, MAX_BOOKS};
use crate::search::{self, Criterion};
use crate::store::{BookMap, BorrowerMap, DataStore};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

const BOOK_PREFIX: &str = "BOOK";
const BORROWER_PREFIX: &str = "BORROWER";

pub struct Library<S: DataStore> {
    name: String,
    books: BookMap,
    borrowers: BorrowerMap,
    store: S,
}

/// Aggregate counts over the whole library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_books: usize,
    pub available_books: usize,
    pub checked_out: usize,
    pub total_borrowers: usize,
    pub books_by_genre: BTreeMap<Genre, usize>,
}

/// Outcome of a referential-integrity check. Empty means consistent.
#[derive(Debug, Default)]
pub struct IntegrityReport {
    pub issues: Vec<String>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl<S: DataStore> Library<S> {
    /// Open a library backed by `store`, loading any persisted state.
    pub fn open(name: impl Into<String>, store: S) -> Result<Self> {
        let books = store.load_books()?;
        let borrowers = store.load_borrowers()?;
        Ok(Self {
            name: name.into(),
            books,
            borrowers,
            store,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn book(&self, book_id: &str) -> Option<&Book> {
        self.books.get(book_id)
    }

    pub fn borrower(&self, borrower_id: &str) -> Option<&Borrower> {
        self.borrowers.get(borrower_id)
    }

    /// All books, ordered by id.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// All borrowers, ordered by id.
    pub fn borrowers(&self) -> impl Iterator<Item = &Borrower> {
        self.borrowers.values()
    }

    /// Add a new book, defaulted available. The genre string must name one of
    /// the fixed genres; anything else fails before any state changes.
    pub fn add_book(&mut self, title: &str, author: &str, genre: &str) -> Result<Book> {
        let genre: Genre = genre.parse()?;
        let book_id = ident::next_id(BOOK_PREFIX, self.books.keys().map(String::as_str));
        let book = Book::new(book_id.clone(), title.to_string(), author.to_string(), genre);

        self.books.insert(book_id.clone(), book.clone());
        if let Err(e) = self.persist() {
            self.books.remove(&book_id);
            return Err(e);
        }
        Ok(book)
    }

    /// Register a new borrower with an empty borrowed list.
    pub fn add_borrower(&mut self, name: &str, email: &str) -> Result<Borrower> {
        let borrower_id =
            ident::next_id(BORROWER_PREFIX, self.borrowers.keys().map(String::as_str));
        let borrower = Borrower::new(borrower_id.clone(), name.to_string(), email.to_string());

        self.borrowers.insert(borrower_id.clone(), borrower.clone());
        if let Err(e) = self.persist() {
            self.borrowers.remove(&borrower_id);
            return Err(e);
        }
        Ok(borrower)
    }

    /// Check a book out to a borrower.
    ///
    /// Valid only when the book exists and is available, and the borrower
    /// exists with spare capacity. Any failure leaves all state unchanged.
    pub fn checkout(&mut self, book_id: &str, borrower_id: &str) -> Result<()> {
        let mut book = self
            .books
            .get(book_id)
            .cloned()
            .ok_or_else(|| BiblioError::BookNotFound(book_id.to_string()))?;
        if !book.available {
            return Err(BiblioError::BookUnavailable(book_id.to_string()));
        }
        let mut borrower = self
            .borrowers
            .get(borrower_id)
            .cloned()
            .ok_or_else(|| BiblioError::BorrowerNotFound(borrower_id.to_string()))?;
        if !borrower.borrow(book_id) {
            return Err(BiblioError::AtCapacity {
                borrower_id: borrower_id.to_string(),
                max: MAX_BOOKS,
            });
        }
        book.available = false;

        let prev_book = self.books.insert(book_id.to_string(), book);
        let prev_borrower = self.borrowers.insert(borrower_id.to_string(), borrower);
        if let Err(e) = self.persist() {
            self.restore(book_id, prev_book, borrower_id, prev_borrower);
            return Err(e);
        }
        Ok(())
    }

    /// Return a book on behalf of a borrower.
    ///
    /// Valid only when the book is currently checked out to that exact
    /// borrower; returning someone else's book fails without mutating.
    pub fn return_book(&mut self, book_id: &str, borrower_id: &str) -> Result<()> {
        let mut book = self
            .books
            .get(book_id)
            .cloned()
            .ok_or_else(|| BiblioError::BookNotFound(book_id.to_string()))?;
        let mut borrower = self
            .borrowers
            .get(borrower_id)
            .cloned()
            .ok_or_else(|| BiblioError::BorrowerNotFound(borrower_id.to_string()))?;
        if book.available || !borrower.unborrow(book_id) {
            return Err(BiblioError::NotHeldBy {
                book_id: book_id.to_string(),
                borrower_id: borrower_id.to_string(),
            });
        }
        book.available = true;

        let prev_book = self.books.insert(book_id.to_string(), book);
        let prev_borrower = self.borrowers.insert(borrower_id.to_string(), borrower);
        if let Err(e) = self.persist() {
            self.restore(book_id, prev_book, borrower_id, prev_borrower);
            return Err(e);
        }
        Ok(())
    }

    /// Search books by field criteria (see [`crate::search`]). Results keep
    /// the catalog's id order.
    pub fn search_books(&self, criteria: &[Criterion]) -> Result<Vec<Book>> {
        let mut found = Vec::new();
        for book in self.books.values() {
            if let Value::Object(record) = serde_json::to_value(book)? {
                if search::matches(&record, criteria) {
                    found.push(book.clone());
                }
            }
        }
        Ok(found)
    }

    pub fn available_books(&self) -> Vec<&Book> {
        self.books.values().filter(|b| b.available).collect()
    }

    /// Resolve a borrower's borrowed ids to books.
    pub fn borrower_books(&self, borrower_id: &str) -> Result<Vec<&Book>> {
        let borrower = self
            .borrowers
            .get(borrower_id)
            .ok_or_else(|| BiblioError::BorrowerNotFound(borrower_id.to_string()))?;
        borrower
            .borrowed_books
            .iter()
            .map(|id| {
                self.books
                    .get(id)
                    .ok_or_else(|| BiblioError::BookNotFound(id.clone()))
            })
            .collect()
    }

    pub fn statistics(&self) -> Statistics {
        let mut books_by_genre: BTreeMap<Genre, usize> = BTreeMap::new();
        for genre in Genre::ALL {
            books_by_genre.insert(genre, 0);
        }
        for book in self.books.values() {
            *books_by_genre.entry(book.genre).or_insert(0) += 1;
        }
        let available = self.books.values().filter(|b| b.available).count();
        Statistics {
            total_books: self.books.len(),
            available_books: available,
            checked_out: self.books.len() - available,
            total_borrowers: self.borrowers.len(),
            books_by_genre,
        }
    }

    /// Check referential integrity between the two maps: every unavailable
    /// book is held by exactly one borrower, every borrowed id points at an
    /// unavailable book, and no borrower exceeds capacity or holds duplicates.
    pub fn verify(&self) -> IntegrityReport {
        let mut report = IntegrityReport::default();

        for book in self.books.values() {
            let holders: Vec<&str> = self
                .borrowers
                .values()
                .filter(|b| b.borrowed_books.iter().any(|id| id == &book.book_id))
                .map(|b| b.borrower_id.as_str())
                .collect();
            match (book.available, holders.len()) {
                (true, 0) | (false, 1) => {}
                (true, _) => report.issues.push(format!(
                    "{} is marked available but held by {}",
                    book.book_id,
                    holders.join(", ")
                )),
                (false, 0) => report.issues.push(format!(
                    "{} is marked checked out but no borrower holds it",
                    book.book_id
                )),
                (false, _) => report.issues.push(format!(
                    "{} is held by multiple borrowers: {}",
                    book.book_id,
                    holders.join(", ")
                )),
            }
        }

        for borrower in self.borrowers.values() {
            if borrower.borrowed_books.len() > MAX_BOOKS {
                report.issues.push(format!(
                    "{} holds {} books (max {})",
                    borrower.borrower_id,
                    borrower.borrowed_books.len(),
                    MAX_BOOKS
                ));
            }
            let mut seen = std::collections::BTreeSet::new();
            for id in &borrower.borrowed_books {
                if !seen.insert(id) {
                    report.issues.push(format!(
                        "{} lists {} more than once",
                        borrower.borrower_id, id
                    ));
                }
                if !self.books.contains_key(id) {
                    report.issues.push(format!(
                        "{} holds unknown book {}",
                        borrower.borrower_id, id
                    ));
                }
            }
        }

        report
    }

    /// Persist the full state. Each mutating operation calls this after its
    /// in-memory change and undoes the change if it fails.
    pub fn save(&self) -> Result<()> {
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.store.save_books(&self.books)?;
        self.store.save_borrowers(&self.borrowers)?;
        Ok(())
    }

    fn restore(
        &mut self,
        book_id: &str,
        prev_book: Option<Book>,
        borrower_id: &str,
        prev_borrower: Option<Borrower>,
    ) {
        if let Some(book) = prev_book {
            self.books.insert(book_id.to_string(), book);
        }
        if let Some(borrower) = prev_borrower {
            self.borrowers.insert(borrower_id.to_string(), borrower);
        }
    }
}
