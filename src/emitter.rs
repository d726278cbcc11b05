// SQL emitter: writes CREATE TABLE / INSERT text and owns the block state.
// Every state transition is checked; unbalanced input fails instead of
// producing unmatched punctuation.

use crate::error::{Result, ScriptError};
use crate::logger;
use crate::parser::field::{ColumnType, FieldDescriptor};
use crate::parser::Line;
use std::io::Write;

const LINE_SEPARATOR: &str = "\n";
const TAB: &str = "\t";

const LOOKUP_ID_COLUMN: &str = "ID";
const LOOKUP_VALUE_COLUMN: &str = "VALUE";

#[derive(Debug, Clone, PartialEq, Eq)]
enum BlockState {
    Outside,
    InRecord { name: String, line: usize },
}

pub struct Emitter<W: Write> {
    out: W,
    state: BlockState,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            state: BlockState::Outside,
        }
    }

    pub fn is_inside(&self) -> bool {
        matches!(self.state, BlockState::InRecord { .. })
    }

    // CREATE TABLE header for a struct.
    pub fn open_record(&mut self, name: &str, line: usize) -> Result<()> {
        if let BlockState::InRecord { name: open, .. } = &self.state {
            return Err(ScriptError::NestedBlock {
                line,
                open: open.clone(),
            });
        }

        logger::debug(&format!("Emitter: creating table {}", name));
        write!(self.out, "CREATE TABLE `{}` ({}", name, LINE_SEPARATOR)?;
        self.state = BlockState::InRecord {
            name: name.to_string(),
            line,
        };
        Ok(())
    }

    pub fn close_record(&mut self, line: usize) -> Result<()> {
        if !self.is_inside() {
            return Err(ScriptError::UnbalancedClose { line });
        }

        write!(self.out, ");{}{}", LINE_SEPARATOR, LINE_SEPARATOR)?;
        self.state = BlockState::Outside;
        Ok(())
    }

    // One column line. Returns the column type so callers can report unmapped types.
    pub fn emit_field(
        &mut self,
        field: &FieldDescriptor<'_>,
        is_last: bool,
        line: &Line,
    ) -> Result<ColumnType> {
        if !self.is_inside() {
            return Err(ScriptError::FieldOutsideRecord {
                line: line.number,
                content: line.trimmed().to_string(),
            });
        }

        let column_type = field.column_type();
        let not_null = if field.required { "NOT NULL" } else { "" };
        let comma = if is_last { "" } else { "," };

        write!(
            self.out,
            "{}`{}` {} {}{}{}",
            TAB,
            field.column_name(),
            column_type.as_sql(),
            not_null,
            comma,
            LINE_SEPARATOR
        )?;
        Ok(column_type)
    }

    // Complete two-column lookup table for an enum, opened and closed in one go.
    pub fn open_lookup(&mut self, name: &str, line: usize) -> Result<()> {
        logger::debug(&format!("Emitter: creating lookup table {}", name));
        self.open_record(name, line)?;

        write!(
            self.out,
            "{tab}{id} INT NOT NULL AUTO_INCREMENT PRIMARY KEY,{nl}{tab}{value} VARCHAR(255) NOT NULL{nl}",
            tab = TAB,
            id = LOOKUP_ID_COLUMN,
            value = LOOKUP_VALUE_COLUMN,
            nl = LINE_SEPARATOR
        )?;

        self.close_record(line)
    }

    // Seed row for one enum value. The value is spliced in verbatim.
    pub fn emit_lookup_value(&mut self, table: &str, value: &str) -> Result<()> {
        write!(
            self.out,
            "INSERT INTO {} (`{}`) VALUES ('{}');{}",
            table, LOOKUP_VALUE_COLUMN, value, LINE_SEPARATOR
        )?;
        Ok(())
    }

    // End of input: every block must be closed. Flushes the sink.
    pub fn finish(mut self) -> Result<W> {
        if let BlockState::InRecord { name, line } = self.state {
            return Err(ScriptError::UnclosedBlock { name, line });
        }
        self.out.flush()?;
        Ok(self.out)
    }
}
