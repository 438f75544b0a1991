use thiserror::Error;

#[derive(Error, Debug)]
pub enum BiblioError {
    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Borrower not found: {0}")]
    BorrowerNotFound(String),

    #[error("Invalid genre: {0:?} (expected one of Fiction, Non-Fiction, Science, History, Technology)")]
    InvalidGenre(String),

    #[error("Book {0} is already checked out")]
    BookUnavailable(String),

    #[error("Borrower {borrower_id} already has {max} books checked out")]
    AtCapacity { borrower_id: String, max: usize },

    #[error("Book {book_id} is not checked out to borrower {borrower_id}")]
    NotHeldBy {
        book_id: String,
        borrower_id: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, BiblioError>;
