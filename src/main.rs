//! postrender CLI - render a post payload or plain text to HTML or JSON

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use postrender::{Document, Error, OffsetUnit, Options, PostContent, StyleMode};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// HTML fragment
    Html,
    /// Rendering instructions as JSON
    Json,
}

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Input file, `-` for stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Treat input as raw text instead of a JSON post
    #[arg(long)]
    text: bool,

    /// Layout mode for raw text
    #[arg(long, default_value_t = StyleMode::Tweet)]
    mode: StyleMode,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Range offsets count Unicode scalar values instead of UTF-16 units
    #[arg(long)]
    char_offsets: bool,

    /// Do not link bare URLs, mentions or hashtags
    #[arg(long)]
    no_linkify: bool,

    /// Do not detect headings in article text
    #[arg(long)]
    no_headings: bool,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            offset_unit: if self.char_offsets {
                OffsetUnit::Char
            } else {
                OffsetUnit::Utf16
            },
            linkify: !self.no_linkify,
            detect_headings: !self.no_headings,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("postrender: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let input = read_input(&cli.input)?;

    let post = if cli.text {
        PostContent::from_text(input, cli.mode)
    } else {
        postrender::parse_post(&input)?
    };
    log::debug!(
        "rendering {} post ({} blocks)",
        if post.is_structured() { "structured" } else { "plain" },
        post.blocks.len()
    );

    let document = postrender::render_post(&post, &cli.options());
    let output = format_document(&document, cli.format)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .map_err(|source| io_error("stdout", source))
}

fn read_input(path: &Path) -> Result<String, Error> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| io_error("stdin", source))?;
        Ok(buf)
    } else {
        fs::read_to_string(path).map_err(|source| io_error(path, source))
    }
}

fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Error {
    Error::Io {
        path: path.into(),
        source,
    }
}

fn format_document(document: &Document, format: Format) -> Result<String, Error> {
    match format {
        Format::Html => Ok(document.to_html()),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(document)?;
            json.push('\n');
            Ok(json)
        }
    }
}
