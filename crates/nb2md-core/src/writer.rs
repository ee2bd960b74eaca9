//! Notebook to Markdown writer
//!
//! Renders a parsed notebook into a single Markdown string:
//! markdown cells verbatim, code cells as Jekyll `{% highlight %}` blocks,
//! and each captured output as a plain fenced block.

use ipynb_parser::{Cell, Fragments, Notebook, Output};

/// Language tag used in `{% highlight %}` when none is configured
pub const DEFAULT_HIGHLIGHT_LANGUAGE: &str = "python";

/// Options for the Markdown writer
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Language written into every `{% highlight <lang> %}` tag.
    /// The notebook's own language metadata is not consulted.
    pub highlight_language: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            highlight_language: DEFAULT_HIGHLIGHT_LANGUAGE.to_string(),
        }
    }
}

/// Convert a notebook to Markdown
pub fn notebook_to_markdown(notebook: &Notebook, options: &WriterOptions) -> String {
    let mut writer = Writer::new(options);
    writer.write_notebook(notebook);
    writer.output
}

/// Writer state
struct Writer<'a> {
    options: &'a WriterOptions,
    output: String,
}

impl<'a> Writer<'a> {
    fn new(options: &'a WriterOptions) -> Self {
        Self {
            options,
            output: String::new(),
        }
    }

    fn write_notebook(&mut self, notebook: &Notebook) {
        for cell in &notebook.cells {
            self.write_cell(cell);
        }
    }

    fn write_cell(&mut self, cell: &Cell) {
        match cell {
            Cell::Markdown { source } => self.write_markdown(source),
            Cell::Code { source, outputs } => {
                self.write_code(source);
                for output in outputs {
                    self.write_output(output);
                }
            }
            Cell::Other { .. } => {}
        }
    }

    fn write_markdown(&mut self, source: &Fragments) {
        source.write_to(&mut self.output);
        self.output.push('\n');
    }

    fn write_code(&mut self, source: &Fragments) {
        self.output.push_str("\n{% highlight ");
        self.output.push_str(&self.options.highlight_language);
        self.output.push_str(" %}\n");
        source.write_to(&mut self.output);
        self.output.push_str("\n{% endhighlight %}\n");
    }

    fn write_output(&mut self, output: &Output) {
        self.output.push_str("\n```\n");
        output.text.write_to(&mut self.output);
        self.output.push_str("\n```\n");
    }
}
