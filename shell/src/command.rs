use lazy_static::lazy_static;
use lending_core::{LendingLibrary, LibraryError, Request};
use regex::Regex;
use serde_json::{Number, Value};
use std::io::{self, Write};

lazy_static! {
    static ref ARGS_RE: Regex = Regex::new(r#"(\w+)\s*=\s*(?:"([^"]+)"|'([^']+)'|(\S+))"#).expect("valid regex");
    static ref DIGITS_RE: Regex = Regex::new(r"^\d+$").expect("valid regex");
    static ref LIST_RE: Regex = Regex::new(r"^\[([^\]]+)\]").expect("valid regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    AddBook,
    FindBooks,
    CheckoutBook,
    ReturnBook,
}

impl Command {
    pub const ALL: [Command; 5] =
        [Command::Help, Command::AddBook, Command::FindBooks, Command::CheckoutBook, Command::ReturnBook];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::AddBook => "addBook",
            Command::FindBooks => "findBooks",
            Command::CheckoutBook => "checkoutBook",
            Command::ReturnBook => "returnBook",
        }
    }

    /// The command a line starts with, if any.
    pub fn parse(line: &str) -> Option<Command> {
        Self::ALL.into_iter().find(|c| line.starts_with(c.name()))
    }
}

/// Result of running one shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Empty,
    Help(String),
    /// Success payload; `null` for operations that return nothing.
    Value(Value),
    Failed(Vec<LibraryError>),
}

pub fn help_text() -> String {
    Command::ALL
        .iter()
        .map(|c| match c {
            Command::Help => format!("  {}", c.name()),
            _ => format!("  {} PARAM=VALUE...", c.name()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collect `KEY=VALUE` pairs into a request. Unquoted all-digit values become
/// numbers and `[a, b]` values become lists of strings.
pub fn parse_args(line: &str) -> Request {
    let mut req = Request::new();
    for caps in ARGS_RE.captures_iter(line) {
        let key = caps[1].to_string();
        let value = match (caps.get(2).or_else(|| caps.get(3)), caps.get(4)) {
            (Some(quoted), _) => convert_value(quoted.as_str().trim(), true),
            (None, Some(bare)) => convert_value(bare.as_str(), false),
            (None, None) => Value::Null,
        };
        req.insert(key, value);
    }
    req
}

fn convert_value(raw: &str, quoted: bool) -> Value {
    if !quoted && DIGITS_RE.is_match(raw) {
        if let Ok(n) = raw.parse::<u64>() {
            return Value::Number(n.into());
        }
        if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }
    if let Some(caps) = LIST_RE.captures(raw) {
        return Value::Array(caps[1].trim().split(',').map(|e| Value::String(e.trim().to_string())).collect());
    }
    Value::String(raw.to_string())
}

/// Parse and run one line against `library`.
pub fn run_line(library: &mut LendingLibrary, line: &str) -> Outcome {
    let line = line.trim();
    if line.is_empty() {
        return Outcome::Empty;
    }
    let Some(command) = Command::parse(line) else {
        let word = line.split_whitespace().next().unwrap_or(line);
        return Outcome::Failed(vec![LibraryError::bad_req(None, format!("bad command {word}"))]);
    };
    let args = parse_args(line);
    tracing::debug!(command = command.name(), ?args, "dispatch");

    let result = match command {
        Command::Help => return Outcome::Help(help_text()),
        Command::AddBook => library.add_book(&args).map(to_json),
        Command::FindBooks => library.find_books(&args).map(to_json),
        Command::CheckoutBook => library.checkout_book(&args).map(|()| Value::Null),
        Command::ReturnBook => library.return_book(&args).map(|()| Value::Null),
    };
    match result {
        Ok(value) => Outcome::Value(value),
        Err(err) => Outcome::Failed(err.errors().to_vec()),
    }
}

fn to_json<T: serde::Serialize>(value: T) -> Value {
    serde_json::to_value(value).expect("book serializes")
}

/// `CODE: message; widget=NAME`
pub fn format_error(err: &LibraryError) -> String {
    let mut msg = format!("{}: {}", err.code, err.message);
    if let Some(widget) = &err.widget {
        msg.push_str(&format!("; widget={widget}"));
    }
    msg
}

/// Write an outcome: payloads as pretty JSON on `out`, errors on `err_out`.
pub fn render(outcome: &Outcome, out: &mut impl Write, err_out: &mut impl Write) -> io::Result<()> {
    match outcome {
        Outcome::Empty => Ok(()),
        Outcome::Help(text) => writeln!(out, "{text}"),
        Outcome::Value(value) => {
            let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
            writeln!(out, "{text}")
        }
        Outcome::Failed(errors) => {
            for err in errors {
                writeln!(err_out, "{}", format_error(err))?;
            }
            Ok(())
        }
    }
}
