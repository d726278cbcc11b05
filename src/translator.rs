// Translation pipeline: walk the definition file through a two-line window,
// classify each line and dispatch it to the emitter.

use crate::emitter::Emitter;
use crate::error::{Result, ScriptError};
use crate::logger;
use crate::parser::classify::{classify, Classification};
use crate::parser::field::FieldDescriptor;
use crate::parser::{header_name, Line, LineWindow};
use indicatif::ProgressBar;
use serde::Serialize;
use std::io::{BufRead, Write};

// Non-fatal finding: a field whose type has no SQL mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub field: String,
    pub type_name: String,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct Summary {
    pub lines: usize,
    pub tables: usize,
    pub lookups: usize,
    pub columns: usize,
    pub inserts: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Default)]
pub struct Translator;

impl Translator {
    pub fn new() -> Self {
        Self
    }

    // Translate a whole document. On error the sink holds whatever was
    // written so far and must not be treated as usable.
    pub fn translate<R, W>(&self, reader: R, out: W, bar: Option<ProgressBar>) -> Result<Summary>
    where
        R: BufRead,
        W: Write,
    {
        let mut window = LineWindow::new(reader, bar)?;
        let mut emitter = Emitter::new(out);
        let mut summary = Summary::default();

        while let Some(current) = window.advance()? {
            if current.is_blank() {
                continue;
            }

            let tokens = current.tokens();
            match classify(&tokens) {
                Classification::Record => {
                    let name = header_name(&tokens, &current)?;
                    emitter.open_record(name, current.number)?;
                    summary.tables += 1;
                }
                Classification::Close => {
                    emitter.close_record(current.number)?;
                }
                Classification::Enum => {
                    let name = header_name(&tokens, &current)?;
                    emitter.open_lookup(name, current.number)?;
                    summary.lookups += 1;
                    summary.inserts +=
                        self.emit_lookup_values(name, &current, &mut window, &mut emitter)?;
                }
                Classification::Field => {
                    let field = FieldDescriptor::parse(&tokens, &current)?;
                    logger::debug(&format!(
                        "Translate: field {} `{}` on line {}",
                        field.ordinal, field.name, current.number
                    ));
                    let is_last = window.peek().is_some_and(Line::is_close);
                    let column_type = emitter.emit_field(&field, is_last, &current)?;
                    summary.columns += 1;

                    if !column_type.is_mapped() {
                        logger::warn(&format!(
                            "line {}: unmapped type `{}` for field `{}`, emitted {}",
                            current.number,
                            field.source_type,
                            field.name,
                            column_type.as_sql()
                        ));
                        summary.diagnostics.push(Diagnostic {
                            line: current.number,
                            field: field.name.to_string(),
                            type_name: field.source_type.to_string(),
                        });
                    }
                }
                Classification::None => {
                    logger::debug(&format!("Translate: skipping line {}", current.number));
                }
            }
        }

        emitter.finish()?;
        summary.lines = window.lines_read();

        logger::debug(&format!(
            "Translate: {} tables, {} lookups, {} columns, {} inserts",
            summary.tables, summary.lookups, summary.columns, summary.inserts
        ));
        Ok(summary)
    }

    // Consume enum body lines up to and including the closing brace,
    // emitting one INSERT per value. Returns the number of rows written.
    fn emit_lookup_values<R, W>(
        &self,
        table: &str,
        header: &Line,
        window: &mut LineWindow<R>,
        emitter: &mut Emitter<W>,
    ) -> Result<usize>
    where
        R: BufRead,
        W: Write,
    {
        let mut rows = 0usize;
        while let Some(line) = window.advance()? {
            if line.is_close() {
                return Ok(rows);
            }
            if line.is_blank() {
                continue;
            }

            let value = line.trimmed();
            let value = value.strip_suffix(',').unwrap_or(value);
            emitter.emit_lookup_value(table, value)?;
            rows += 1;
        }

        Err(ScriptError::UnclosedBlock {
            name: table.to_string(),
            line: header.number,
        })
    }
}
