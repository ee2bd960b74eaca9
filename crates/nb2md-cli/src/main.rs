//! nb2md: CLI tool to convert Jupyter notebooks to Markdown

mod config;

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use config::Config;
use nb2md_core::{ConvertOptions, notebook_to_markdown, read_notebook};

#[derive(Parser, Debug)]
#[command(name = "nb2md")]
#[command(about = "Convert a Jupyter notebook to Jekyll Markdown on stdout")]
#[command(version)]
#[command(after_help = "Examples:
  nb2md post.ipynb                  # Print Markdown to stdout
  nb2md post.ipynb > post.md        # Save to a file
  nb2md post.ipynb -c site.toml     # Use a specific config file")]
struct Cli {
    /// Input notebook (.ipynb)
    #[arg(required_unless_present = "config_schema")]
    input: Option<PathBuf>,

    /// Configuration file (defaults to _nb2md.toml next to the input)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the JSON schema of the configuration file and exit
    #[arg(long)]
    config_schema: bool,

    /// Verbose output on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.config_schema {
        println!("{}", Config::json_schema_string()?);
        return Ok(());
    }

    let Some(input) = cli.input.as_deref() else {
        anyhow::bail!("No input notebook given");
    };

    let config = load_config(input, cli.config.as_deref(), cli.verbose)?;
    let options = config.convert_options()?;

    // Rendered in full before anything reaches stdout
    let markdown = convert_notebook(input, &options, cli.verbose)?;
    println!("{}", markdown);

    Ok(())
}

/// Load the explicit config file, or `_nb2md.toml` from the input's directory
fn load_config(input: &Path, explicit: Option<&Path>, verbose: bool) -> Result<Config> {
    if let Some(path) = explicit {
        let config = Config::load(path)?;
        if verbose {
            eprintln!("Loaded config: {}", path.display());
        }
        return Ok(config);
    }

    let dir = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    match Config::load_from_dir(dir)? {
        Some(config) => {
            if verbose {
                eprintln!(
                    "Loaded config: {}",
                    dir.join(config::CONFIG_FILE_NAME).display()
                );
            }
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Read, validate and render a single notebook
fn convert_notebook(input: &Path, options: &ConvertOptions, verbose: bool) -> Result<String> {
    if verbose {
        eprintln!("Converting: {}", input.display());
    }

    let notebook = read_notebook(input, &options.parse)?;

    if verbose {
        let counts = notebook.cell_counts();
        eprintln!(
            "Cells: {} markdown, {} code ({} outputs), {} skipped",
            counts.markdown, counts.code, counts.outputs, counts.skipped
        );
    }

    Ok(notebook_to_markdown(&notebook, &options.writer))
}
