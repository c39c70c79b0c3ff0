//! Domain model for rows of the hosted `Books` table. The viewer never edits
//! these records: every fetch hands back a fresh snapshot that replaces the
//! previous one wholesale, so the type stays a plain data holder.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// One row of the `Books` collection.
///
/// Text columns decode leniently. A missing or `null` column turns into an
/// empty string (or `None` for the optional lending columns) so a malformed
/// row shows up as blank cells rather than failing the whole fetch.
pub struct Book {
    /// Primary key from the store. Selection state is keyed by this value.
    pub id: i64,
    /// Creation timestamp exactly as the store reports it.
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    /// Lending status. Display-only.
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: String,
    #[serde(default)]
    pub issued_to: Option<String>,
    #[serde(default)]
    pub issued_on: Option<String>,
}

impl Book {
    /// True when the lower-cased title or author contains `needle`. The caller
    /// lower-cases the needle once per filter pass.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_row() {
        let book: Book = serde_json::from_str(
            r#"{
                "id": 7,
                "created_at": "2024-03-01T10:00:00+00:00",
                "title": "Dune",
                "author": "Frank Herbert",
                "category": "Fiction",
                "status": "Issued",
                "issued_to": "Maya",
                "issued_on": "2024-03-02"
            }"#,
        )
        .unwrap();

        assert_eq!(book.id, 7);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.issued_to.as_deref(), Some("Maya"));
    }

    #[test]
    fn null_and_missing_columns_render_blank() {
        let book: Book =
            serde_json::from_str(r#"{"id": 1, "title": null, "issued_to": null}"#).unwrap();

        assert_eq!(book.title, "");
        assert_eq!(book.author, "");
        assert_eq!(book.issued_to, None);
        assert_eq!(book.issued_on, None);
    }

    #[test]
    fn matching_is_against_title_or_author() {
        let book = Book {
            id: 1,
            created_at: String::new(),
            title: "The Hobbit".into(),
            author: "J.R.R. Tolkien".into(),
            category: String::new(),
            status: "Available".into(),
            issued_to: None,
            issued_on: None,
        };

        assert!(book.matches_lowercase("hob"));
        assert!(book.matches_lowercase("tolk"));
        assert!(!book.matches_lowercase("available"));
    }
}
