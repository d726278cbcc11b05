// Error types for a translation run.
// Every variant is fatal; unmapped types are diagnostics, not errors (see translator.rs).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    /// The definition file could not be opened.
    #[error("cannot open definition file {}", path.display())]
    SourceNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The output file could not be removed or created.
    #[error("cannot create output file {}", path.display())]
    SinkCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A classified line is missing the tokens its category requires.
    #[error("malformed line {line}: {reason}\n  Line: {content}")]
    MalformedLine {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("line {line}: closing brace without an open struct or enum")]
    UnbalancedClose { line: usize },

    #[error("line {line}: cannot open a block while `{open}` is still open")]
    NestedBlock { line: usize, open: String },

    #[error("line {line}: field outside of a struct\n  Line: {content}")]
    FieldOutsideRecord { line: usize, content: String },

    /// End of input reached while a struct or enum body was still open.
    #[error("`{name}` opened on line {line} is never closed")]
    UnclosedBlock { name: String, line: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report error: {0}")]
    Report(#[from] serde_json::Error),
}

impl ScriptError {
    pub fn malformed(line: usize, content: &str, reason: impl Into<String>) -> Self {
        ScriptError::MalformedLine {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }

    // The process contract is binary: any failure exits with 1.
    pub fn exit_code(&self) -> u8 {
        1
    }

    // Format error with its cause chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

pub type Result<T> = std::result::Result<T, ScriptError>;
