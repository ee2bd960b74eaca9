//! Notebook file to Markdown conversion
//!
//! Reads a notebook from disk, validates it and renders it in one pass.
//! Any failure aborts the conversion before output is produced.

use crate::writer::{WriterOptions, notebook_to_markdown};
use ipynb_parser::{Notebook, ParseError, ParseOptions, ParseResult, parse_with_options};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Options for notebook conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Validation of optional-in-practice fields
    pub parse: ParseOptions,
    /// Markdown rendering
    pub writer: WriterOptions,
}

/// Error converting a notebook file
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse: {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Broad class of a [`DocumentError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File missing, unreadable, or not a notebook-shaped JSON document
    Input,
    /// A field required for rendering is absent
    Schema,
}

impl DocumentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { source, .. } if source.is_schema() => ErrorKind::Schema,
            Self::Read { .. } | Self::Parse { .. } => ErrorKind::Input,
        }
    }

    /// Path of the notebook that failed
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// Read and parse a notebook file
pub fn read_notebook(path: &Path, options: &ParseOptions) -> Result<Notebook, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_with_options(&content, options).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert a notebook file to Markdown with default options
pub fn convert(path: impl AsRef<Path>) -> Result<String, DocumentError> {
    convert_with_options(path, &ConvertOptions::default())
}

/// Convert a notebook file to Markdown
pub fn convert_with_options(
    path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<String, DocumentError> {
    let notebook = read_notebook(path.as_ref(), &options.parse)?;
    Ok(notebook_to_markdown(&notebook, &options.writer))
}

/// Convert notebook JSON text to Markdown
pub fn convert_str(content: &str, options: &ConvertOptions) -> ParseResult<String> {
    let notebook = parse_with_options(content, &options.parse)?;
    Ok(notebook_to_markdown(&notebook, &options.writer))
}
