//! nb2md-core: Core library for converting Jupyter notebooks to Markdown
//!
//! This crate provides:
//! - Notebook to Markdown rendering (Jekyll `{% highlight %}` code blocks)
//! - File-level conversion with typed input and schema errors
//!
//! ## Example
//!
//! ```rust
//! use nb2md_core::{ConvertOptions, convert_str};
//!
//! let json = r##"{"cells": [{"cell_type": "markdown", "source": ["# Hello"]}]}"##;
//! let markdown = convert_str(json, &ConvertOptions::default()).unwrap();
//! assert_eq!(markdown, "# Hello\n");
//! ```

pub mod convert;
pub mod writer;

pub use convert::{
    ConvertOptions, DocumentError, ErrorKind, convert, convert_str, convert_with_options,
    read_notebook,
};
pub use ipynb_parser::{
    Cell, CellCounts, Fragments, MissingPolicy, Notebook, Output, ParseError, ParseOptions,
    SchemaError, parse, parse_with_options,
};
pub use writer::{DEFAULT_HIGHLIGHT_LANGUAGE, WriterOptions, notebook_to_markdown};
