//! ipynb-parser: Parser for Jupyter notebook (ipynb) documents
//!
//! This crate provides:
//! - A read-only notebook model (cells, sources, outputs)
//! - JSON parsing with typed schema errors for missing fields
//!
//! Only the fields nb2md consumes are read; everything else in the
//! notebook is ignored.
//!
//! # Example
//!
//! ```
//! use ipynb_parser::{parse, Cell};
//!
//! let source = r##"{"cells": [{"cell_type": "markdown", "source": ["# Title"]}]}"##;
//!
//! let notebook = parse(source).unwrap();
//! assert!(matches!(&notebook.cells[0], Cell::Markdown { source } if source.text() == "# Title"));
//! ```

pub mod ast;
pub mod parser;

pub use ast::{Cell, CellCounts, Fragments, Notebook, Output};
pub use parser::{
    MissingPolicy, ParseError, ParseOptions, ParseResult, SchemaError, parse, parse_with_options,
};
