use serde::{Deserialize, Serialize};

pub type Isbn = String;
pub type PatronId = String;

/// A catalog entry. Everything except `n_copies` is fixed once the ISBN is
/// first added; `n_copies` is the number of copies currently on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub isbn: Isbn,
    pub title: String,
    pub authors: Vec<String>,
    pub pages: u64,
    pub year: u64,
    pub publisher: String,
    pub n_copies: u64,
}

impl Book {
    /// Name of the first immutable field that differs from `other`, if any.
    pub fn first_mismatch(&self, other: &Book) -> Option<&'static str> {
        if self.title != other.title {
            Some("title")
        } else if self.authors != other.authors {
            Some("authors")
        } else if self.pages != other.pages {
            Some("pages")
        } else if self.year != other.year {
            Some("year")
        } else if self.publisher != other.publisher {
            Some("publisher")
        } else {
            None
        }
    }

    /// Text the search index is built from: the title, then each author.
    pub fn indexed_text(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str()).chain(self.authors.iter().map(String::as_str))
    }
}
