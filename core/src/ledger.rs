use crate::book::{Isbn, PatronId};
use std::collections::{BTreeSet, HashMap};

/// Books currently held by each patron. A patron with nothing checked out
/// has no entry.
#[derive(Debug, Default)]
pub struct CheckoutLedger {
    holdings: HashMap<PatronId, BTreeSet<Isbn>>,
}

impl CheckoutLedger {
    pub fn new() -> Self { Self::default() }

    pub fn holds(&self, patron: &str, isbn: &str) -> bool {
        self.holdings.get(patron).is_some_and(|isbns| isbns.contains(isbn))
    }

    /// Record a checkout. Returns false if the patron already held the book.
    pub fn check_out(&mut self, patron: &str, isbn: &str) -> bool {
        self.holdings.entry(patron.to_string()).or_default().insert(isbn.to_string())
    }

    /// Record a return. Returns false if the patron did not hold the book.
    pub fn give_back(&mut self, patron: &str, isbn: &str) -> bool {
        let Some(isbns) = self.holdings.get_mut(patron) else { return false };
        let removed = isbns.remove(isbn);
        if isbns.is_empty() {
            self.holdings.remove(patron);
        }
        removed
    }

    /// Number of patrons currently holding `isbn`.
    pub fn outstanding(&self, isbn: &str) -> usize {
        self.holdings.values().filter(|isbns| isbns.contains(isbn)).count()
    }

    pub fn books_of(&self, patron: &str) -> Option<&BTreeSet<Isbn>> {
        self.holdings.get(patron)
    }

    pub fn num_patrons(&self) -> usize { self.holdings.len() }
}
