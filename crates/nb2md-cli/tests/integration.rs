//! Integration tests for the nb2md binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn nb2md(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nb2md"))
        .args(args)
        .output()
        .expect("Failed to run nb2md")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("Invalid UTF-8")
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("Invalid UTF-8")
}

/// Copy a fixture into a fresh directory so no stray config is picked up
fn isolated_fixture(name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    fs::copy(fixtures_dir().join(name), &path).expect("Failed to copy fixture");
    (dir, path)
}

#[test]
fn test_room_prices() {
    let output = nb2md(&[fixtures_dir().join("room_prices.ipynb").as_path()]);
    assert!(output.status.success(), "nb2md failed: {}", stderr(&output));

    insta::assert_snapshot!(stdout(&output), @r#"
    Room listings were scraped from Craigslist and plotted by neighbourhood.

    ## Loading the data

    {% highlight python %}
    import pandas as pd
    rooms = pd.read_csv('rooms.csv')
    print(rooms.shape)
    {% endhighlight %}

    ```
    (1523, 4)

    ```

    {% highlight python %}
    medians = rooms.groupby('area').price.median()
    print(medians.head(2))
    {% endhighlight %}

    ```
    Kitsilano     950.0
    Mount Pleasant 820.0
    ```

    ```
    warning: 12 rows dropped
    ```
    Kitsilano is the most expensive area.
    "#);
}

#[test]
fn test_print_adds_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("code.ipynb");
    fs::write(
        &input,
        r#"{"cells": [{"cell_type": "code", "source": ["print(1)"], "outputs": []}]}"#,
    )
    .unwrap();

    let output = nb2md(&[input.as_path()]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "\n{% highlight python %}\nprint(1)\n{% endhighlight %}\n\n"
    );
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = nb2md(&[dir.path().join("missing.ipynb").as_path()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Failed to read"));
}

#[test]
fn test_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.ipynb");
    fs::write(&input, "{\"cells\": [").unwrap();

    let output = nb2md(&[input.as_path()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Invalid notebook JSON"));
}

#[test]
fn test_output_without_text_fails() {
    let (_dir, input) = isolated_fixture("display_data.ipynb");
    let output = nb2md(&[input.as_path()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("cell 1, output 0: missing required field `text`"));
}

#[test]
fn test_config_next_to_input() {
    let (dir, input) = isolated_fixture("display_data.ipynb");
    fs::write(
        dir.path().join("_nb2md.toml"),
        "[code]\nlanguage = \"py\"\n\n[outputs]\nmissing_text = \"skip\"\n",
    )
    .unwrap();

    let output = nb2md(&[input.as_path()]);
    assert!(output.status.success(), "nb2md failed: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "# Prices by area\n\n{% highlight py %}\nrooms.boxplot(column='price', by='area')\n{% endhighlight %}\n\n"
    );
}

#[test]
fn test_explicit_config() {
    let (dir, input) = isolated_fixture("display_data.ipynb");
    let config = dir.path().join("site.toml");
    fs::write(&config, "[outputs]\nmissing_text = \"empty\"\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_nb2md"))
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--verbose")
        .output()
        .expect("Failed to run nb2md");

    assert!(output.status.success(), "nb2md failed: {}", stderr(&output));
    assert!(stdout(&output).ends_with("{% endhighlight %}\n\n```\n\n```\n\n"));

    // Diagnostics go to stderr only
    let log = stderr(&output);
    assert!(log.contains("Loaded config"));
    assert!(log.contains("Cells: 1 markdown, 1 code (1 outputs), 0 skipped"));
    assert!(!stdout(&output).contains("Cells:"));
}

#[test]
fn test_invalid_config_value() {
    let (dir, input) = isolated_fixture("room_prices.ipynb");
    fs::write(
        dir.path().join("_nb2md.toml"),
        "[outputs]\nmissing = \"sometimes\"\n",
    )
    .unwrap();

    let output = nb2md(&[input.as_path()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("outputs.missing"));
}

#[test]
fn test_no_arguments() {
    let output = nb2md(&[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_config_schema() {
    let output = Command::new(env!("CARGO_BIN_EXE_nb2md"))
        .arg("--config-schema")
        .output()
        .expect("Failed to run nb2md --config-schema");

    assert!(output.status.success(), "nb2md --config-schema failed");

    let schema: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("Schema is not JSON");
    assert_eq!(schema["title"], "Config");
}
