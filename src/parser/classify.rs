// Line classifier: decides what a definition line is from its first token.

use super::{ENUM_KEYWORD, RECORD_KEYWORD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// `struct <Name> {`
    Record,
    /// `enum <Name> {`
    Enum,
    /// `<ordinal>: [required|optional] <type> <name>:`
    Field,
    /// `}`
    Close,
    /// Blank lines, comments, namespaces and anything else.
    None,
}

// Classify a tokenized line. Only the first token is inspected.
pub fn classify(tokens: &[&str]) -> Classification {
    let Some(first) = tokens.first() else {
        return Classification::None;
    };

    if *first == RECORD_KEYWORD {
        return Classification::Record;
    }
    if *first == ENUM_KEYWORD {
        return Classification::Enum;
    }

    match first.chars().next() {
        Some(c) if c.is_ascii_digit() => Classification::Field,
        Some('}') => Classification::Close,
        _ => Classification::None,
    }
}
