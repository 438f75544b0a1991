use super::{BookMap, BorrowerMap, DataStore};
use crate::config::BiblioConfig;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FileStore {
    data_dir: PathBuf,
    books_file: String,
    borrowers_file: String,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        let config = BiblioConfig::default();
        Self {
            data_dir,
            books_file: config.books_file,
            borrowers_file: config.borrowers_file,
        }
    }

    pub fn with_config(mut self, config: &BiblioConfig) -> Self {
        self.books_file = config.books_file.clone();
        self.borrowers_file = config.borrowers_file.clone();
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(&self.books_file)
    }

    pub fn borrowers_path(&self) -> PathBuf {
        self.data_dir.join(&self.borrowers_file)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }

    fn load_document<T: DeserializeOwned>(&self, path: &Path) -> Result<BTreeMap<String, T>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)?;
        let map: BTreeMap<String, T> = serde_json::from_str(&content)?;
        Ok(map)
    }

    fn save_document<T: Serialize>(&self, path: &Path, map: &BTreeMap<String, T>) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(map)?;

        // Atomic write: never leave a half-written document behind
        let tmp_file = self.data_dir.join(format!(".doc-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content)?;
        fs::rename(&tmp_file, path)?;

        Ok(())
    }
}

impl DataStore for FileStore {
    fn load_books(&self) -> Result<BookMap> {
        self.load_document(&self.books_path())
    }

    fn save_books(&self, books: &BookMap) -> Result<()> {
        self.save_document(&self.books_path(), books)
    }

    fn load_borrowers(&self) -> Result<BorrowerMap> {
        self.load_document(&self.borrowers_path())
    }

    fn save_borrowers(&self, borrowers: &BorrowerMap) -> Result<()> {
        self.save_document(&self.borrowers_path(), borrowers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BiblioError;
    use crate::model::{Book, Borrower, Genre};
    use tempfile::tempdir;

    #[test]
    fn absent_files_mean_empty_state() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        assert!(store.load_books().unwrap().is_empty());
        assert!(store.load_borrowers().unwrap().is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        let mut books = BookMap::new();
        books.insert(
            "BOOK_0001".to_string(),
            Book::new(
                "BOOK_0001".into(),
                "Dune".into(),
                "Herbert".into(),
                Genre::Fiction,
            ),
        );
        let mut borrowers = BorrowerMap::new();
        let mut ann = Borrower::new("BORROWER_0001".into(), "Ann".into(), "a@x.io".into());
        ann.borrow("BOOK_0001");
        borrowers.insert("BORROWER_0001".to_string(), ann);

        store.save_books(&books).unwrap();
        store.save_borrowers(&borrowers).unwrap();

        assert_eq!(store.load_books().unwrap(), books);
        assert_eq!(store.load_borrowers().unwrap(), borrowers);
    }

    #[test]
    fn no_tmp_files_left_behind() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        store.save_books(&BookMap::new()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        fs::write(store.books_path(), "{ not json").unwrap();

        let err = store.load_books().unwrap_err();
        assert!(matches!(err, BiblioError::Serialization(_)));
    }

    #[test]
    fn invalid_genre_in_document_is_a_serialization_error() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        fs::write(
            store.books_path(),
            r#"{"BOOK_0001": {"book_id":"BOOK_0001","title":"X","author":"Y","genre":"Romance","available":true}}"#,
        )
        .unwrap();

        let err = store.load_books().unwrap_err();
        assert!(matches!(err, BiblioError::Serialization(_)));
    }

    #[test]
    fn config_overrides_file_names() {
        let dir = tempdir().unwrap();
        let config = BiblioConfig {
            books_file: "books.json".to_string(),
            borrowers_file: "members.json".to_string(),
        };
        let store = FileStore::new(dir.path().to_path_buf()).with_config(&config);
        store.save_books(&BookMap::new()).unwrap();

        assert!(dir.path().join("books.json").exists());
        assert!(!dir.path().join("library_books.json").exists());
    }
}
