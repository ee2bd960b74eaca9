//! Notebook parser
//!
//! Deserializes notebook JSON into a loosely-typed raw form and then
//! validates it into the [`Notebook`] model, reporting missing fields
//! with the index of the offending cell.

use crate::ast::{Cell, Fragments, Notebook, Output};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Parse error types
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input is not JSON, or a field has the wrong JSON type
    #[error("Invalid notebook JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field of a rendered cell has the wrong JSON type
    #[error("cell {cell}: invalid field `{field}`: {source}")]
    InvalidField {
        cell: usize,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A field required for rendering is absent
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ParseError {
    /// Whether this is a missing-field error rather than malformed input
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// A required field is missing from the notebook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Index of the cell, or `None` for a notebook-level field
    pub cell: Option<usize>,
    /// Index of the output within the cell, for output fields
    pub output: Option<usize>,
    pub field: &'static str,
}

impl SchemaError {
    fn notebook(field: &'static str) -> Self {
        Self {
            cell: None,
            output: None,
            field,
        }
    }

    fn cell(cell: usize, field: &'static str) -> Self {
        Self {
            cell: Some(cell),
            output: None,
            field,
        }
    }

    fn output(cell: usize, output: usize, field: &'static str) -> Self {
        Self {
            cell: Some(cell),
            output: Some(output),
            field,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.cell, self.output) {
            (Some(cell), Some(output)) => write!(f, "cell {cell}, output {output}: ")?,
            (Some(cell), None) => write!(f, "cell {cell}: ")?,
            _ => f.write_str("notebook: ")?,
        }
        write!(f, "missing required field `{}`", self.field)
    }
}

impl std::error::Error for SchemaError {}

/// What to do when an optional-in-practice field is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Fail with a [`SchemaError`]
    Error,
    /// Treat the field as an empty sequence
    Empty,
    /// Drop the enclosing item (for `outputs`, same as `Empty`)
    Skip,
}

impl FromStr for MissingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "empty" => Ok(Self::Empty),
            "skip" => Ok(Self::Skip),
            _ => Err(format!(
                "Unknown missing-field policy '{s}'. Expected: error, empty, skip"
            )),
        }
    }
}

/// Options controlling how strictly the notebook is validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Code cell without an `outputs` list
    pub missing_outputs: MissingPolicy,
    /// Output without a `text` field (e.g. `display_data` with only rich data)
    pub missing_output_text: MissingPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            missing_outputs: MissingPolicy::Empty,
            missing_output_text: MissingPolicy::Error,
        }
    }
}

#[derive(Deserialize)]
struct RawNotebook {
    cells: Option<Vec<RawCell>>,
}

/// Fields other than `cell_type` stay untyped until the cell is known
/// to be rendered, so skipped cells may hold anything.
#[derive(Deserialize)]
struct RawCell {
    cell_type: Option<String>,
    source: Option<Value>,
    outputs: Option<Value>,
}

#[derive(Deserialize)]
struct RawOutput {
    text: Option<Fragments>,
}

/// Parse a notebook with default options
pub fn parse(source: &str) -> ParseResult<Notebook> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parse a notebook
pub fn parse_with_options(source: &str, options: &ParseOptions) -> ParseResult<Notebook> {
    let raw: RawNotebook = serde_json::from_str(source)?;
    Parser::new(options).build_notebook(raw)
}

/// Validates raw cells into the notebook model
struct Parser<'a> {
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    fn new(options: &'a ParseOptions) -> Self {
        Self { options }
    }

    fn build_notebook(&self, raw: RawNotebook) -> ParseResult<Notebook> {
        let raw_cells = raw.cells.ok_or(SchemaError::notebook("cells"))?;

        let cells = raw_cells
            .into_iter()
            .enumerate()
            .map(|(index, cell)| self.build_cell(index, cell))
            .collect::<ParseResult<Vec<_>>>()?;

        Ok(Notebook::new(cells))
    }

    fn build_cell(&self, index: usize, raw: RawCell) -> ParseResult<Cell> {
        let cell_type = raw
            .cell_type
            .ok_or(SchemaError::cell(index, "cell_type"))?;

        match cell_type.as_str() {
            "markdown" => {
                let source = required(index, "source", raw.source)?;
                Ok(Cell::Markdown { source })
            }
            "code" => {
                let source = required(index, "source", raw.source)?;
                let outputs: Option<Vec<RawOutput>> = match raw.outputs {
                    Some(value) => Some(typed(index, "outputs", value)?),
                    None => None,
                };
                let outputs = self.build_outputs(index, outputs)?;
                Ok(Cell::Code { source, outputs })
            }
            // Rendered as nothing
            _ => Ok(Cell::Other { cell_type }),
        }
    }

    fn build_outputs(
        &self,
        cell: usize,
        raw: Option<Vec<RawOutput>>,
    ) -> ParseResult<Vec<Output>> {
        let raw_outputs = match raw {
            Some(outputs) => outputs,
            None => match self.options.missing_outputs {
                MissingPolicy::Error => return Err(SchemaError::cell(cell, "outputs").into()),
                MissingPolicy::Empty | MissingPolicy::Skip => return Ok(Vec::new()),
            },
        };

        let mut outputs = Vec::with_capacity(raw_outputs.len());
        for (index, output) in raw_outputs.into_iter().enumerate() {
            let text = match output.text {
                Some(text) => text,
                None => match self.options.missing_output_text {
                    MissingPolicy::Error => {
                        return Err(SchemaError::output(cell, index, "text").into());
                    }
                    MissingPolicy::Empty => Fragments::default(),
                    MissingPolicy::Skip => continue,
                },
            };
            outputs.push(Output { text });
        }

        Ok(outputs)
    }
}

/// Type a required cell field, naming the cell when it is absent or malformed
fn required<T: DeserializeOwned>(
    cell: usize,
    field: &'static str,
    value: Option<Value>,
) -> ParseResult<T> {
    let value = value.ok_or(SchemaError::cell(cell, field))?;
    typed(cell, field, value)
}

fn typed<T: DeserializeOwned>(cell: usize, field: &'static str, value: Value) -> ParseResult<T> {
    serde_json::from_value(value).map_err(|source| ParseError::InvalidField {
        cell,
        field,
        source,
    })
}
