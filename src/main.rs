//! foldmark CLI - Markdown to an HTML fragment with a table of contents

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;

use foldmark::{Options, Rendered};

#[derive(Parser)]
#[command(name = "foldmark")]
#[command(version, about = "Markdown to HTML fragment compiler", long_about = None)]
#[command(after_help = "EXAMPLES:
    foldmark notes.md > notes.html     Render a file
    cat notes.md | foldmark --toc      Print the heading outline
    foldmark notes.md --toc-json       Print HTML and TOC as JSON")]
struct Cli {
    /// Markdown file to read; stdin when absent or `-`
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Print the table of contents as an indented outline instead of HTML
    #[arg(long, conflicts_with = "toc_json")]
    toc: bool,

    /// Print `{"html": ..., "toc": [...]}` as JSON
    #[arg(long)]
    toc_json: bool,

    /// Suffix repeated heading ids with -1, -2, ...
    #[arg(long)]
    unique_ids: bool,

    /// Escape code blocks without syntax highlighting
    #[arg(long)]
    no_highlight: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let input = read_input(cli.input.as_deref()).map_err(|e| e.to_string())?;
    let options = Options {
        highlight: !cli.no_highlight,
        unique_heading_ids: cli.unique_ids,
        ..Options::default()
    };
    let rendered = foldmark::convert_with_options(&input, &options);

    let output = if cli.toc_json {
        let mut json = serde_json::to_string_pretty(&rendered).map_err(|e| e.to_string())?;
        json.push('\n');
        json
    } else if cli.toc {
        outline(&rendered)
    } else {
        rendered.html
    };

    io::stdout()
        .write_all(output.as_bytes())
        .map_err(|e| e.to_string())
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) if path != "-" => std::fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// One line per heading, indented two spaces per level below 1.
fn outline(rendered: &Rendered) -> String {
    let mut out = String::new();
    for entry in &rendered.toc {
        let indent = usize::from(entry.level.saturating_sub(1)) * 2;
        out.push_str(&" ".repeat(indent));
        out.push_str(&entry.text);
        out.push_str(" (#");
        out.push_str(&entry.id);
        out.push_str(")\n");
    }
    out
}
