//! Gatekeeping for untrusted requests.
//!
//! Every check stops at the first violation. The order is fixed: presence of
//! each required field, then types, then ranges, so a malformed request always
//! yields the same single error.

use crate::book::{Book, Isbn, PatronId};
use crate::error::{LibraryError, Result};
use serde_json::{Map, Number, Value};

/// A raw key/value request as it arrives from parsed text or JSON.
pub type Request = Map<String, Value>;

/// Required `addBook` fields in the order their presence is checked.
pub const ADD_BOOK_REQUIRED: [&str; 6] = ["title", "isbn", "authors", "publisher", "pages", "year"];

/// A validated checkout/return request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdRequest {
    pub patron_id: PatronId,
    pub isbn: Isbn,
}

/// Absent, `null`, `false` and the empty string all count as missing.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

fn require_present(req: &Request, field: &str) -> Result<()> {
    if is_missing(req.get(field)) {
        return Err(LibraryError::missing(field));
    }
    Ok(())
}

fn string_field(req: &Request, field: &str) -> Result<String> {
    match req.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(LibraryError::bad_type(field, format!("{field} must be a string"))),
    }
}

fn number_field<'a>(req: &'a Request, field: &str) -> Result<&'a Number> {
    match req.get(field) {
        Some(Value::Number(n)) => Ok(n),
        _ => Err(LibraryError::bad_type(field, format!("{field} must be a number"))),
    }
}

fn authors_field(req: &Request) -> Result<Vec<String>> {
    let items = match req.get("authors") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            return Err(LibraryError::bad_type(
                "authors",
                "authors must be a non-empty list of strings",
            ))
        }
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) if !s.is_empty() => Ok(s.clone()),
            _ => Err(LibraryError::bad_type("authors", "every author must be a non-empty string")),
        })
        .collect()
}

/// A number `> 0` with no fractional part. `100.0` counts as `100`.
fn positive_integer(n: &Number, field: &str) -> Result<u64> {
    if let Some(v) = n.as_u64() {
        if v == 0 {
            return Err(LibraryError::bad_req(Some(field), format!("{field} must be greater than 0")));
        }
        return Ok(v);
    }
    let f = n.as_f64().unwrap_or(0.0);
    if f <= 0.0 || !f.is_finite() {
        return Err(LibraryError::bad_req(Some(field), format!("{field} must be greater than 0")));
    }
    if f.fract() != 0.0 || f > u64::MAX as f64 {
        return Err(LibraryError::bad_req(Some(field), format!("{field} must be an integer")));
    }
    Ok(f as u64)
}

/// Validate an `addBook` request into the book record it describes.
/// `nCopies` defaults to 1.
pub fn validate_add_book(req: &Request) -> Result<Book> {
    for field in ADD_BOOK_REQUIRED {
        require_present(req, field)?;
    }

    let isbn = string_field(req, "isbn")?;
    let title = string_field(req, "title")?;
    let publisher = string_field(req, "publisher")?;
    let pages = number_field(req, "pages")?;
    let year = number_field(req, "year")?;
    let authors = authors_field(req)?;
    let n_copies = match req.get("nCopies") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(n),
        Some(_) => return Err(LibraryError::bad_type("nCopies", "nCopies must be a number")),
    };

    let pages = positive_integer(pages, "pages")?;
    let year = positive_integer(year, "year")?;
    let n_copies = match n_copies {
        Some(n) => positive_integer(n, "nCopies")?,
        None => 1,
    };

    Ok(Book { isbn, title, authors, pages, year, publisher, n_copies })
}

/// Validate a `checkoutBook`/`returnBook` request.
pub fn validate_id_request(req: &Request) -> Result<IdRequest> {
    require_present(req, "patronId")?;
    require_present(req, "isbn")?;
    let patron_id = string_field(req, "patronId")?;
    let isbn = string_field(req, "isbn")?;
    Ok(IdRequest { patron_id, isbn })
}

/// Validate a `findBooks` request, returning the raw search text. A numeric
/// zero search is falsy and so counts as missing.
pub fn validate_find_request(req: &Request) -> Result<String> {
    if let Some(Value::Number(n)) = req.get("search") {
        if n.as_f64() == Some(0.0) {
            return Err(LibraryError::missing("search"));
        }
    }
    require_present(req, "search")?;
    string_field(req, "search")
}
