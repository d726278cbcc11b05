// Field lines: positional tokenization, column naming and type mapping.

use super::{Line, REQUIRED_KEYWORD};
use crate::error::{Result, ScriptError};

// Column type emitted when a source type has no known mapping.
pub const SENTINEL_TYPE: &str = "NULL_VALUE";

// A parsed `<ordinal>: <requiredness> <type> <name>:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor<'a> {
    pub ordinal: &'a str,
    pub required: bool,
    pub source_type: &'a str,
    pub name: &'a str,
}

impl<'a> FieldDescriptor<'a> {
    // Validate token count before any positional access.
    pub fn parse(tokens: &[&'a str], line: &Line) -> Result<Self> {
        let &[ordinal, requiredness, source_type, raw_name, ..] = tokens else {
            return Err(ScriptError::malformed(
                line.number,
                line.trimmed(),
                format!("field needs at least 4 tokens, found {}", tokens.len()),
            ));
        };

        let name = strip_name(raw_name);
        if name.is_empty() {
            return Err(ScriptError::malformed(
                line.number,
                line.trimmed(),
                "field has no name",
            ));
        }
        if source_type.is_empty() {
            return Err(ScriptError::malformed(
                line.number,
                line.trimmed(),
                "field has no type",
            ));
        }

        Ok(Self {
            ordinal,
            required: requiredness == REQUIRED_KEYWORD,
            source_type,
            name,
        })
    }

    pub fn column_name(&self) -> String {
        to_upper_snake(self.name)
    }

    pub fn column_type(&self) -> ColumnType {
        ColumnType::from_source(self.source_type)
    }
}

// Drop the list separator and then the single trailing colon.
fn strip_name(raw: &str) -> &str {
    let name = raw.trim_end_matches([',', ';']);
    name.strip_suffix(':').unwrap_or(name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Mapped(&'static str),
    Unmapped,
}

impl ColumnType {
    pub fn from_source(source_type: &str) -> Self {
        match source_type {
            "string" => ColumnType::Mapped("VARCHAR(255)"),
            "i16" => ColumnType::Mapped("SMALLINT"),
            "i32" => ColumnType::Mapped("INT"),
            "i64" => ColumnType::Mapped("BIGINT"),
            "double" => ColumnType::Mapped("DOUBLE"),
            "bool" => ColumnType::Mapped("BIT"),
            _ => ColumnType::Unmapped,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Mapped(sql) => *sql,
            ColumnType::Unmapped => SENTINEL_TYPE,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, ColumnType::Mapped(_))
    }
}

// lowerCamelCase -> UPPER_SNAKE_CASE. Every uppercase letter after the first
// character starts a new segment. Names without lowercase letters are
// already in column shape and pass through unchanged.
pub fn to_upper_snake(name: &str) -> String {
    if !name.chars().any(char::is_lowercase) {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push('_');
        }
        out.extend(c.to_uppercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> Line {
        Line {
            number: 3,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_parse_required_field() {
        let l = line("  1: required string userName:,");
        let field = FieldDescriptor::parse(&l.tokens(), &l).unwrap();
        assert_eq!(field.ordinal, "1:");
        assert!(field.required);
        assert_eq!(field.source_type, "string");
        assert_eq!(field.name, "userName");
        assert_eq!(field.column_name(), "USER_NAME");
    }

    #[test]
    fn test_parse_optional_field_without_separator() {
        let l = line("2: optional i32 age:");
        let field = FieldDescriptor::parse(&l.tokens(), &l).unwrap();
        assert!(!field.required);
        assert_eq!(field.name, "age");
    }

    #[test]
    fn test_any_non_required_literal_is_nullable() {
        let l = line("3: default i64 createdAt:,");
        let field = FieldDescriptor::parse(&l.tokens(), &l).unwrap();
        assert!(!field.required);
        assert_eq!(field.column_name(), "CREATED_AT");
    }

    #[test]
    fn test_name_without_colon() {
        let l = line("4: required bool isActive,");
        let field = FieldDescriptor::parse(&l.tokens(), &l).unwrap();
        assert_eq!(field.name, "isActive");
    }

    #[test]
    fn test_short_field_is_malformed() {
        let l = line("1: required string");
        let err = FieldDescriptor::parse(&l.tokens(), &l).unwrap_err();
        match err {
            ScriptError::MalformedLine { line, content, .. } => {
                assert_eq!(line, 3);
                assert_eq!(content, "1: required string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_name_is_malformed() {
        let l = line("1: required string :,");
        assert!(FieldDescriptor::parse(&l.tokens(), &l).is_err());
    }

    #[test]
    fn test_known_types() {
        assert_eq!(ColumnType::from_source("string").as_sql(), "VARCHAR(255)");
        assert_eq!(ColumnType::from_source("i16").as_sql(), "SMALLINT");
        assert_eq!(ColumnType::from_source("i32").as_sql(), "INT");
        assert_eq!(ColumnType::from_source("i64").as_sql(), "BIGINT");
        assert_eq!(ColumnType::from_source("double").as_sql(), "DOUBLE");
        assert_eq!(ColumnType::from_source("bool").as_sql(), "BIT");
    }

    #[test]
    fn test_unknown_types_map_to_sentinel() {
        for source in ["list", "String", "I32", "binary", "map<string,i32>", ""] {
            let ty = ColumnType::from_source(source);
            assert!(!ty.is_mapped(), "{source} should be unmapped");
            assert_eq!(ty.as_sql(), SENTINEL_TYPE);
        }
    }

    #[test]
    fn test_upper_snake() {
        assert_eq!(to_upper_snake("orderId"), "ORDER_ID");
        assert_eq!(to_upper_snake("age"), "AGE");
        assert_eq!(to_upper_snake("shippingAddressLine"), "SHIPPING_ADDRESS_LINE");
        assert_eq!(to_upper_snake("address2Line"), "ADDRESS2_LINE");
        assert_eq!(to_upper_snake("orderID"), "ORDER_I_D");
        assert_eq!(to_upper_snake("Id"), "ID");
    }

    #[test]
    fn test_upper_snake_is_idempotent() {
        for name in ["orderId", "userName", "a", "x1y2Z3", "ORDER_ID", "fooBarBaz"] {
            let once = to_upper_snake(name);
            assert_eq!(to_upper_snake(&once), once);
            assert!(once
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
        }
    }
}
