//! Line-oriented shell over [`lending_core::LendingLibrary`] plus the JSON
//! catalog loader used at startup.

pub mod command;
pub mod load;

pub use command::{render, run_line, Outcome};
pub use load::{load_catalog, read_books, LoadSummary};
