use super::{BookMap, BorrowerMap, DataStore};
use crate::error::{BiblioError, Result};
use std::cell::RefCell;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since biblio is single-threaded.
/// This keeps the `DataStore` trait at `&self` without dragging in locks.
#[derive(Default)]
pub struct InMemoryStore {
    books: RefCell<BookMap>,
    borrowers: RefCell<BorrowerMap>,
    simulate_write_error: RefCell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing rollback behavior.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    fn check_write(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(BiblioError::Store("simulated write error".to_string()));
        }
        Ok(())
    }
}

impl DataStore for InMemoryStore {
    fn load_books(&self) -> Result<BookMap> {
        Ok(self.books.borrow().clone())
    }

    fn save_books(&self, books: &BookMap) -> Result<()> {
        self.check_write()?;
        *self.books.borrow_mut() = books.clone();
        Ok(())
    }

    fn load_borrowers(&self) -> Result<BorrowerMap> {
        Ok(self.borrowers.borrow().clone())
    }

    fn save_borrowers(&self, borrowers: &BorrowerMap) -> Result<()> {
        self.check_write()?;
        *self.borrowers.borrow_mut() = borrowers.clone();
        Ok(())
    }
}
