//! In-memory lending library: a catalog of books keyed by ISBN, a word index
//! over titles and authors, and per-patron checkout tracking.

pub mod book;
pub mod error;
pub mod index;
pub mod ledger;
pub mod library;
pub mod tokenizer;
pub mod validate;

pub use book::{Book, Isbn, PatronId};
pub use error::{ErrOptions, ErrorCode, LibraryError, Result};
pub use library::LendingLibrary;
pub use validate::Request;
