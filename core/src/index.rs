use crate::book::{Book, Isbn};
use crate::tokenizer::distinct_words;
use std::collections::{BTreeSet, HashMap};

/// Inverted index from normalized word to the ISBNs whose title or authors
/// contain it. Entries are only ever added.
#[derive(Debug, Default)]
pub struct SearchIndex {
    postings: HashMap<String, BTreeSet<Isbn>>,
}

impl SearchIndex {
    pub fn new() -> Self { Self::default() }

    /// Index the title and author words of a newly cataloged book.
    pub fn index_book(&mut self, book: &Book) {
        for text in book.indexed_text() {
            for word in distinct_words(text) {
                self.postings.entry(word).or_default().insert(book.isbn.clone());
            }
        }
    }

    /// ISBNs indexed under every one of `words`.
    pub fn lookup(&self, words: &[String]) -> BTreeSet<Isbn> {
        let mut iter = words.iter();
        let Some(first) = iter.next() else { return BTreeSet::new() };
        let mut hits = match self.postings.get(first) {
            Some(isbns) => isbns.clone(),
            None => return BTreeSet::new(),
        };
        for word in iter {
            if hits.is_empty() { break; }
            match self.postings.get(word) {
                Some(isbns) => hits.retain(|isbn| isbns.contains(isbn)),
                None => return BTreeSet::new(),
            }
        }
        hits
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(isbn: &str, title: &str, authors: &[&str]) -> Book {
        Book {
            isbn: isbn.into(),
            title: title.into(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            pages: 1,
            year: 1,
            publisher: "P".into(),
            n_copies: 1,
        }
    }

    fn words(ws: &[&str]) -> Vec<String> { ws.iter().map(|w| w.to_string()).collect() }

    #[test]
    fn indexes_title_and_authors() {
        let mut index = SearchIndex::new();
        index.index_book(&book("1", "Go Programming", &["Pike, Rob"]));
        assert!(index.lookup(&words(&["go"])).contains("1"));
        assert!(index.lookup(&words(&["rob"])).contains("1"));
        assert_eq!(index.num_terms(), 4);
    }

    #[test]
    fn lookup_intersects() {
        let mut index = SearchIndex::new();
        index.index_book(&book("1", "Ruby: The Definitive Guide", &["Owens"]));
        index.index_book(&book("2", "JavaScript: The Definitive Guide", &["Flanagan"]));
        assert_eq!(index.lookup(&words(&["definitive"])).len(), 2);
        let both = index.lookup(&words(&["definitive", "javascript"]));
        assert_eq!(both.into_iter().collect::<Vec<_>>(), vec!["2".to_string()]);
        assert!(index.lookup(&words(&["definitive", "cobol"])).is_empty());
        assert!(index.lookup(&[]).is_empty());
    }
}
