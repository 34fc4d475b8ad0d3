use crate::book::{Book, Isbn};
use crate::error::{LibraryError, Result};
use crate::index::SearchIndex;
use crate::ledger::CheckoutLedger;
use crate::tokenizer::tokenize;
use crate::validate::{validate_add_book, validate_find_request, validate_id_request, Request};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// In-memory lending library: catalog, search index and checkout ledger.
///
/// All four operations validate the raw request and check every business
/// rule before touching state, so a failed call leaves the library unchanged.
#[derive(Debug, Default)]
pub struct LendingLibrary {
    catalog: HashMap<Isbn, Book>,
    index: SearchIndex,
    ledger: CheckoutLedger,
}

impl LendingLibrary {
    pub fn new() -> Self { Self::default() }

    /// Add one or more copies of a book.
    ///
    /// A repeated ISBN must describe the same edition; its copies are added to
    /// the stored count.
    pub fn add_book(&mut self, req: &Request) -> Result<Book> {
        let book = validate_add_book(req).inspect_err(log_rejected)?;

        if let Some(stored) = self.catalog.get_mut(&book.isbn) {
            if let Some(field) = stored.first_mismatch(&book) {
                let err = LibraryError::bad_req(
                    Some(field),
                    format!("book {} is inconsistent with the catalog: {field} differs", book.isbn),
                );
                log_rejected(&err);
                return Err(err);
            }
            let Some(total) = stored.n_copies.checked_add(book.n_copies) else {
                let err = LibraryError::bad_req(
                    Some("nCopies"),
                    format!("adding {} copies of book {} exceeds the copy limit", book.n_copies, book.isbn),
                );
                log_rejected(&err);
                return Err(err);
            };
            stored.n_copies = total;
            debug!(isbn = %stored.isbn, added = book.n_copies, n_copies = stored.n_copies, "added copies");
            return Ok(stored.clone());
        }

        self.index.index_book(&book);
        debug!(isbn = %book.isbn, n_copies = book.n_copies, terms = self.index.num_terms(), "cataloged book");
        self.catalog.insert(book.isbn.clone(), book.clone());
        Ok(book)
    }

    /// Books whose title or authors contain every word of `search`, sorted by title.
    pub fn find_books(&self, req: &Request) -> Result<Vec<Book>> {
        let search = validate_find_request(req).inspect_err(log_rejected)?;
        let words = tokenize(&search);
        if words.is_empty() {
            let err = LibraryError::bad_req(Some("search"), format!("no words in search \"{search}\""));
            log_rejected(&err);
            return Err(err);
        }

        let mut books: Vec<Book> = self
            .index
            .lookup(&words)
            .iter()
            .map(|isbn| match self.catalog.get(isbn) {
                Some(book) => book.clone(),
                None => panic!("search index references uncataloged isbn {isbn}"),
            })
            .collect();
        books.sort_by(compare_titles);
        debug!(?words, hits = books.len(), "search");
        Ok(books)
    }

    /// Check out one copy of a book to a patron.
    pub fn checkout_book(&mut self, req: &Request) -> Result<()> {
        let id = validate_id_request(req).inspect_err(log_rejected)?;
        let book = match self.catalog.get_mut(&id.isbn) {
            Some(book) => book,
            None => return Err(book_not_found(&id.isbn)),
        };
        if book.n_copies == 0 {
            let err = LibraryError::bad_req(Some("isbn"), format!("no copies of book {} are available", id.isbn));
            log_rejected(&err);
            return Err(err);
        }
        if self.ledger.holds(&id.patron_id, &id.isbn) {
            let err = LibraryError::bad_req(
                Some("isbn"),
                format!("patron {} already has book {} checked out", id.patron_id, id.isbn),
            );
            log_rejected(&err);
            return Err(err);
        }

        book.n_copies -= 1;
        self.ledger.check_out(&id.patron_id, &id.isbn);
        debug!(patron = %id.patron_id, isbn = %id.isbn, available = book.n_copies, "checked out");
        Ok(())
    }

    /// Return a copy of a book previously checked out by the patron.
    pub fn return_book(&mut self, req: &Request) -> Result<()> {
        let id = validate_id_request(req).inspect_err(log_rejected)?;
        let book = match self.catalog.get_mut(&id.isbn) {
            Some(book) => book,
            None => return Err(book_not_found(&id.isbn)),
        };
        if !self.ledger.give_back(&id.patron_id, &id.isbn) {
            let err = LibraryError::bad_req(
                Some("isbn"),
                format!("book {} is not checked out by patron {}", id.isbn, id.patron_id),
            );
            log_rejected(&err);
            return Err(err);
        }

        book.n_copies += 1;
        debug!(patron = %id.patron_id, isbn = %id.isbn, available = book.n_copies, "returned");
        Ok(())
    }

    /// Current catalog record for `isbn`.
    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.catalog.get(isbn)
    }

    /// Copies of `isbn` currently checked out across all patrons.
    pub fn checked_out(&self, isbn: &str) -> usize {
        self.ledger.outstanding(isbn)
    }

    /// Number of distinct ISBNs in the catalog.
    pub fn len(&self) -> usize { self.catalog.len() }

    pub fn is_empty(&self) -> bool { self.catalog.is_empty() }
}

fn book_not_found(isbn: &str) -> LibraryError {
    let err = LibraryError::bad_req(Some("isbn"), format!("unknown book {isbn}"));
    log_rejected(&err);
    err
}

fn log_rejected(err: &LibraryError) {
    debug!(code = %err.code, widget = ?err.widget, "rejected: {}", err.message);
}

/// Primary sort key: accents stripped, lowercased.
fn title_key(title: &str) -> String {
    title.nfd().filter(|c| !is_combining_mark(*c)).collect::<String>().to_lowercase()
}

/// Dictionary-style title order: accent- and case-insensitive, then the raw
/// title with lowercase first, then ISBN.
fn compare_titles(a: &Book, b: &Book) -> Ordering {
    title_key(&a.title)
        .cmp(&title_key(&b.title))
        .then_with(|| b.title.cmp(&a.title))
        .then_with(|| a.isbn.cmp(&b.isbn))
}
