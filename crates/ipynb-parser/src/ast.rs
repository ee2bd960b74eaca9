//! Notebook model types
//!
//! This module defines the read-only tree a notebook is parsed into.
//! Reference: https://nbformat.readthedocs.io/en/latest/format_description.html

use serde::Deserialize;

/// A complete notebook document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    /// Cells in authored order
    pub cells: Vec<Cell>,
}

/// A single notebook cell, keyed on its `cell_type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Prose cell (`cell_type: "markdown"`)
    Markdown { source: Fragments },
    /// Executable cell (`cell_type: "code"`) with its captured outputs
    Code {
        source: Fragments,
        outputs: Vec<Output>,
    },
    /// Any other cell type (`raw`, or something unknown); never rendered
    Other { cell_type: String },
}

/// A captured result of executing a code cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    /// Text fragments of the output
    pub text: Fragments,
}

/// Ordered text fragments of a multi-line field
///
/// nbformat stores multi-line strings either as a list of lines or as a
/// single string; both deserialize into this type. Fragments are joined
/// without a separator, since each line already carries its own newline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "MultilineText")]
pub struct Fragments(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum MultilineText {
    Lines(Vec<String>),
    Single(String),
}

impl From<MultilineText> for Fragments {
    fn from(value: MultilineText) -> Self {
        match value {
            MultilineText::Lines(lines) => Self(lines),
            MultilineText::Single(text) => Self(vec![text]),
        }
    }
}

impl Fragments {
    /// Create fragments from individual lines
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(lines.into_iter().map(Into::into).collect())
    }

    /// The individual fragments, in order
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    /// Concatenate all fragments into one string
    pub fn text(&self) -> String {
        self.0.concat()
    }

    /// Append the concatenated fragments to `buf` without an intermediate allocation
    pub fn write_to(&self, buf: &mut String) {
        for line in &self.0 {
            buf.push_str(line);
        }
    }
}

impl Cell {
    /// Create a markdown cell
    pub fn markdown(source: Fragments) -> Self {
        Self::Markdown { source }
    }

    /// Create a code cell
    pub fn code(source: Fragments, outputs: Vec<Output>) -> Self {
        Self::Code { source, outputs }
    }

    /// The `cell_type` tag this cell was parsed from
    pub fn cell_type(&self) -> &str {
        match self {
            Self::Markdown { .. } => "markdown",
            Self::Code { .. } => "code",
            Self::Other { cell_type } => cell_type,
        }
    }
}

impl Output {
    /// Create an output from its text fragments
    pub fn from_text(text: Fragments) -> Self {
        Self { text }
    }
}

/// Number of cells of each rendered kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellCounts {
    pub markdown: usize,
    pub code: usize,
    pub outputs: usize,
    /// Cells of any other type
    pub skipped: usize,
}

impl Notebook {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Count cells by kind
    pub fn cell_counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for cell in &self.cells {
            match cell {
                Cell::Markdown { .. } => counts.markdown += 1,
                Cell::Code { outputs, .. } => {
                    counts.code += 1;
                    counts.outputs += outputs.len();
                }
                Cell::Other { .. } => counts.skipped += 1,
            }
        }
        counts
    }
}
