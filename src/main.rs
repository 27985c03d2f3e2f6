use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use xmlbox::{CdataStrategy, Encoder, FormatConfig, Indentation, DEFAULT_HEADER};

#[derive(Debug, Parser)]
#[command(
    name = "xmlbox",
    version,
    about = "Render a JSON document as canonical XML"
)]
struct Args {
    /// Input JSON file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Name of the root element
    #[arg(short, long, default_value = "root")]
    root: String,
    /// Indent nested elements
    #[arg(short, long)]
    pretty: bool,
    /// Sort elements and attributes by key
    #[arg(short, long)]
    sort: bool,
    /// Indent with tabs instead of spaces
    #[arg(long)]
    tabs: bool,
    /// Indentation units per nesting level
    #[arg(long, default_value_t = 4)]
    indent: usize,
    /// Write string values under this key as CDATA (repeatable)
    #[arg(long, value_name = "KEY")]
    cdata: Vec<String>,
    /// Write every string value as CDATA
    #[arg(long, conflicts_with = "cdata")]
    cdata_all: bool,
    /// Literal text written before the document
    #[arg(long, conflicts_with = "xml_declaration")]
    header: Option<String>,
    /// Start the document with a UTF-8 XML declaration
    #[arg(long)]
    xml_declaration: bool,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let input = read_input(&args.input)?;
    let value = xmlbox::json::from_str(&input).context("failed to read input as a box tree")?;

    let encoder = encoder(&args);
    let mut output = encoder.encode(&args.root, &value);
    if args.pretty {
        output.push('\n');
    }

    info!(bytes = output.len(), "document rendered");
    write_output(&args.output, output.as_bytes())
}

fn encoder(args: &Args) -> Encoder {
    let indentation = if args.tabs {
        Indentation::Tabs(args.indent)
    } else {
        Indentation::Spaces(args.indent)
    };
    let format = FormatConfig::default()
        .pretty_print(args.pretty)
        .sort_keys(args.sort)
        .indentation(indentation);

    let cdata = if args.cdata_all {
        CdataStrategy::Always
    } else if args.cdata.is_empty() {
        CdataStrategy::Never
    } else {
        CdataStrategy::Keys(args.cdata.clone())
    };

    let encoder = Encoder::new().format(format).cdata(cdata);
    match (&args.header, args.xml_declaration) {
        (Some(header), _) => encoder.header(header.clone()),
        (None, true) => encoder.header(DEFAULT_HEADER),
        (None, false) => encoder,
    }
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
