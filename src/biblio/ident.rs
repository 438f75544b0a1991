//! Sequential, prefix-scoped identifier generation.
//!
//! Identifiers look like `BOOK_0001` / `BORROWER_0042`. The next id is derived
//! purely from the ids already in use, so a library reloaded from disk keeps
//! counting where it left off—no global counter, no randomness.

/// Return the next identifier for `prefix`, strictly greater than every
/// existing id with that prefix. Ids with a foreign prefix or a non-numeric
/// suffix are ignored.
pub fn next_id<'a, I>(prefix: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let highest = existing
        .into_iter()
        .filter_map(|id| suffix_number(prefix, id))
        .max()
        .unwrap_or(0);
    format!("{}_{:04}", prefix, highest + 1)
}

fn suffix_number(prefix: &str, id: &str) -> Option<u32> {
    id.strip_prefix(prefix)?
        .strip_prefix('_')?
        .parse::<u32>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_id_starts_at_one() {
        assert_eq!(next_id("BOOK", []), "BOOK_0001");
    }

    #[test]
    fn increments_past_the_highest() {
        let existing = ["BOOK_0001", "BOOK_0003", "BOOK_0002"];
        assert_eq!(next_id("BOOK", existing), "BOOK_0004");
    }

    #[test]
    fn ignores_foreign_prefixes() {
        let existing = ["BORROWER_0009", "BOOK_0001"];
        assert_eq!(next_id("BOOK", existing), "BOOK_0002");
    }

    #[test]
    fn ignores_malformed_ids() {
        let existing = ["BOOK_abcd", "BOOKMARK_0005", "BOOK-0003", "BOOK_0002"];
        assert_eq!(next_id("BOOK", existing), "BOOK_0003");
    }

    #[test]
    fn grows_past_four_digits() {
        assert_eq!(next_id("BOOK", ["BOOK_9999"]), "BOOK_10000");
    }
}
