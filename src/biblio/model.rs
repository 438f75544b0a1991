use crate::error::BiblioError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of shelving genres. Anything outside this set is rejected at
/// the parse boundary, so an in-memory `Book` can never carry an invalid genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Science,
    History,
    Technology,
}

impl Genre {
    pub const ALL: [Genre; 5] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Science,
        Genre::History,
        Genre::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Science => "Science",
            Genre::History => "History",
            Genre::Technology => "Technology",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = BiblioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fiction" => Ok(Genre::Fiction),
            "non-fiction" => Ok(Genre::NonFiction),
            "science" => Ok(Genre::Science),
            "history" => Ok(Genre::History),
            "technology" => Ok(Genre::Technology),
            _ => Err(BiblioError::InvalidGenre(s.to_string())),
        }
    }
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    #[serde(default = "default_available")]
    pub available: bool,
}

impl Book {
    pub fn new(book_id: String, title: String, author: String, genre: Genre) -> Self {
        Self {
            book_id,
            title,
            author,
            genre,
            available: true,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.available {
            "Available"
        } else {
            "Checked out"
        };
        write!(
            f,
            "[{}] {} by {} ({}) - {}",
            self.book_id, self.title, self.author, self.genre, state
        )
    }
}

/// How many books a borrower may hold at once.
pub const MAX_BOOKS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrower {
    pub borrower_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub borrowed_books: Vec<String>,
}

impl Borrower {
    pub fn new(borrower_id: String, name: String, email: String) -> Self {
        Self {
            borrower_id,
            name,
            email,
            borrowed_books: Vec::new(),
        }
    }

    pub fn can_borrow(&self) -> bool {
        self.borrowed_books.len() < MAX_BOOKS
    }

    /// Record a checkout. Returns false (without mutating) when at capacity or
    /// when the book is already on the list.
    pub fn borrow(&mut self, book_id: &str) -> bool {
        if !self.can_borrow() || self.borrowed_books.iter().any(|b| b == book_id) {
            return false;
        }
        self.borrowed_books.push(book_id.to_string());
        true
    }

    /// Record a return. Returns false when the book is not on the list.
    pub fn unborrow(&mut self, book_id: &str) -> bool {
        match self.borrowed_books.iter().position(|b| b == book_id) {
            Some(pos) => {
                self.borrowed_books.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Borrower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} <{}> - {}/{} borrowed",
            self.borrower_id,
            self.name,
            self.email,
            self.borrowed_books.len(),
            MAX_BOOKS
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_listed_genres_parse() {
        for genre in Genre::ALL {
            assert_eq!(genre.as_str().parse::<Genre>().unwrap(), genre);
        }
    }

    #[test]
    fn genre_parse_is_case_insensitive() {
        assert_eq!("fiction".parse::<Genre>().unwrap(), Genre::Fiction);
        assert_eq!("NON-FICTION".parse::<Genre>().unwrap(), Genre::NonFiction);
    }

    #[test]
    fn unknown_genre_is_rejected() {
        let err = "Poetry".parse::<Genre>().unwrap_err();
        assert!(matches!(err, BiblioError::InvalidGenre(g) if g == "Poetry"));
    }

    #[test]
    fn non_fiction_serializes_with_hyphen() {
        let json = serde_json::to_string(&Genre::NonFiction).unwrap();
        assert_eq!(json, "\"Non-Fiction\"");
    }

    #[test]
    fn book_roundtrip() {
        let book = Book::new(
            "BOOK_0007".into(),
            "Dune".into(),
            "Herbert".into(),
            Genre::Fiction,
        );
        let json = serde_json::to_string(&book).unwrap();
        let parsed: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, book);
    }

    #[test]
    fn book_with_invalid_genre_fails_to_deserialize() {
        let json = r#"{"book_id":"BOOK_0001","title":"X","author":"Y","genre":"Romance","available":true}"#;
        assert!(serde_json::from_str::<Book>(json).is_err());
    }

    #[test]
    fn book_available_defaults_to_true() {
        let json = r#"{"book_id":"BOOK_0001","title":"X","author":"Y","genre":"Science"}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert!(book.available);
    }

    #[test]
    fn book_display_summary() {
        let mut book = Book::new(
            "BOOK_0001".into(),
            "Python 101".into(),
            "Smith".into(),
            Genre::Technology,
        );
        assert_eq!(
            book.to_string(),
            "[BOOK_0001] Python 101 by Smith (Technology) - Available"
        );
        book.available = false;
        assert_eq!(
            book.to_string(),
            "[BOOK_0001] Python 101 by Smith (Technology) - Checked out"
        );
    }

    #[test]
    fn borrower_starts_with_own_empty_list() {
        let a = Borrower::new("BORROWER_0001".into(), "Ann".into(), "a@x.io".into());
        let mut b = Borrower::new("BORROWER_0002".into(), "Bob".into(), "b@x.io".into());
        b.borrow("BOOK_0001");
        assert!(a.borrowed_books.is_empty());
        assert_eq!(b.borrowed_books, vec!["BOOK_0001"]);
    }

    #[test]
    fn borrow_stops_at_capacity() {
        let mut b = Borrower::new("BORROWER_0001".into(), "Ann".into(), "a@x.io".into());
        assert!(b.borrow("BOOK_0001"));
        assert!(b.borrow("BOOK_0002"));
        assert!(b.borrow("BOOK_0003"));
        assert!(!b.can_borrow());
        assert!(!b.borrow("BOOK_0004"));
        assert_eq!(b.borrowed_books.len(), MAX_BOOKS);
    }

    #[test]
    fn borrow_rejects_duplicates() {
        let mut b = Borrower::new("BORROWER_0001".into(), "Ann".into(), "a@x.io".into());
        assert!(b.borrow("BOOK_0001"));
        assert!(!b.borrow("BOOK_0001"));
        assert_eq!(b.borrowed_books.len(), 1);
    }

    #[test]
    fn unborrow_removes_only_present_books() {
        let mut b = Borrower::new("BORROWER_0001".into(), "Ann".into(), "a@x.io".into());
        b.borrow("BOOK_0001");
        b.borrow("BOOK_0002");
        assert!(b.unborrow("BOOK_0001"));
        assert!(!b.unborrow("BOOK_0001"));
        assert_eq!(b.borrowed_books, vec!["BOOK_0002"]);
    }

    #[test]
    fn borrower_roundtrip_preserves_borrowed_list() {
        let mut b = Borrower::new("BORROWER_0001".into(), "Ann".into(), "a@x.io".into());
        b.borrow("BOOK_0002");
        b.borrow("BOOK_0001");
        let json = serde_json::to_string(&b).unwrap();
        let parsed: Borrower = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, b);
        assert_eq!(parsed.borrowed_books, vec!["BOOK_0002", "BOOK_0001"]);
    }
}
