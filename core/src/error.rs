use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Machine-readable classification of a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// A required field is absent.
    #[serde(rename = "MISSING")]
    Missing,
    /// A field is present but has the wrong shape.
    #[serde(rename = "BAD_TYPE")]
    BadType,
    /// A well-typed field violates a business rule.
    #[serde(rename = "BAD_REQ")]
    BadReq,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Missing => "MISSING",
            ErrorCode::BadType => "BAD_TYPE",
            ErrorCode::BadReq => "BAD_REQ",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options attached to an error: the required code plus the optional widget
/// (the request field) responsible for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrOptions {
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
}

impl ErrOptions {
    pub fn code(code: ErrorCode) -> Self {
        Self { code, widget: None }
    }

    pub fn widget(mut self, widget: impl Into<String>) -> Self {
        self.widget = Some(widget.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct LibraryError {
    pub message: String,
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
}

impl LibraryError {
    pub fn new(message: impl Into<String>, options: ErrOptions) -> Self {
        Self { message: message.into(), code: options.code, widget: options.widget }
    }

    pub fn missing(widget: &str) -> Self {
        Self::new(format!("{widget} is missing"), ErrOptions::code(ErrorCode::Missing).widget(widget))
    }

    pub fn bad_type(widget: &str, message: impl Into<String>) -> Self {
        Self::new(message, ErrOptions::code(ErrorCode::BadType).widget(widget))
    }

    pub fn bad_req(widget: Option<&str>, message: impl Into<String>) -> Self {
        let mut options = ErrOptions::code(ErrorCode::BadReq);
        options.widget = widget.map(str::to_string);
        Self::new(message, options)
    }

    /// Errors carried by this failure. Validation stops at the first
    /// violation, so this is always a single error.
    pub fn errors(&self) -> &[LibraryError] {
        std::slice::from_ref(self)
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
