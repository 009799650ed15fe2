//! Sorrel CLI
//!
//! Parse HTML from a file, a string or stdin, optionally narrow it down with
//! a selector, and print the result as markup, text, a tree or JSON.

mod output;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use owo_colors::OwoColorize;
use sorrel_dom::{Document, NodeRef};
use sorrel_html::Parser as HtmlParser;
use sorrel_select::{Select, Selector};

use output::{JsonNode, tree_lines};

/// Output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented markup, one node per line
    Html,
    /// Markup without added whitespace
    Raw,
    /// Text content only
    Text,
    /// JSON document
    Json,
    /// Debug tree with visible whitespace
    Tree,
}

/// Indentation for `--format html`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Indent {
    /// One tab per level
    Tab,
    /// One space per level
    Space,
}

impl Indent {
    const fn as_char(self) -> char {
        match self {
            Self::Tab => '\t',
            Self::Space => ' ',
        }
    }
}

/// Sorrel: tolerant HTML parser and selector engine
#[derive(Parser, Debug)]
#[command(name = "sorrel")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Pretty-print a file
    sorrel page.html

    # Extract link targets from stdin as JSON
    curl -s https://example.com | sorrel -s 'a[href]' --format json

    # Text of the second list item
    sorrel --html '<ul><li>a</li><li>b</li></ul>' -s 'li:eq(1)' --format text

    # Report elements that were never closed
    sorrel --check page.html
"#)]
struct Cli {
    /// HTML file to read; stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Only output nodes matching this selector
    #[arg(short = 's', long, value_name = "SELECTOR")]
    select: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Indentation character for the html format
    #[arg(long, value_enum, default_value_t = Indent::Tab)]
    indent: Indent,

    /// Join lines into one for the text format
    #[arg(long)]
    collapse: bool,

    /// Also return matches nested inside other matches
    #[arg(long, action = ArgAction::Set, default_value_t = true, value_name = "BOOL")]
    nested: bool,

    /// Report elements closed implicitly by an ancestor's end tag
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (document, unclosed) = load_document(&cli)?;

    if cli.check {
        report_unclosed(&unclosed);
        return Ok(());
    }

    let targets: Vec<NodeRef<'_>> = match cli.select {
        Some(ref source) => {
            let selector = Selector::try_parse(source)
                .with_context(|| format!("invalid selector {source:?}"))?;
            document.select(&selector, cli.nested)
        }
        None => vec![document.root_ref()],
    };
    log::debug!("{} node(s) to print", targets.len());

    print_nodes(&targets, &cli)
}

/// Parse the input named on the command line, recording the path of every
/// implicitly closed element.
fn load_document(cli: &Cli) -> Result<(Document, Vec<String>)> {
    let mut unclosed = Vec::new();
    let document = {
        let mut parser = HtmlParser::new();
        if cli.check {
            parser.set_error_callback(|kind, node| {
                unclosed.push(format!("{kind}: <{}> in {}", node.name, node.path()));
            });
        }
        match (&cli.html, &cli.path) {
            (Some(html), _) => parser.parse(html),
            (None, Some(path)) if path.as_os_str() != "-" => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                parser
                    .parse_reader(BufReader::new(file))
                    .with_context(|| format!("failed to read {}", path.display()))?
            }
            (None, _) => parser
                .parse_reader(io::stdin().lock())
                .context("failed to read stdin")?,
        }
    };
    Ok((document, unclosed))
}

fn report_unclosed(unclosed: &[String]) {
    if unclosed.is_empty() {
        println!("{}", "no unclosed tags".green());
        return;
    }
    for entry in unclosed {
        println!("{} {entry}", "warning:".yellow().bold());
    }
    println!(
        "{}",
        format!("{} unclosed tag(s)", unclosed.len()).red().bold()
    );
}

fn print_nodes(nodes: &[NodeRef<'_>], cli: &Cli) -> Result<()> {
    match cli.format {
        Format::Html => {
            for node in nodes {
                println!("{}", node.to_html(cli.indent.as_char(), true, true));
            }
        }
        Format::Raw => {
            for node in nodes {
                println!("{}", node.to_raw_html(true, true));
            }
        }
        Format::Text => {
            for node in nodes {
                println!("{}", node.to_text(cli.collapse));
            }
        }
        Format::Tree => {
            for node in nodes {
                let mut lines = Vec::new();
                tree_lines(*node, 0, &mut lines);
                println!("{}", lines.join("\n"));
            }
        }
        Format::Json => {
            // A selection prints as an array even with a single match.
            let rendered = match (&cli.select, nodes) {
                (None, [root]) => serde_json::to_string_pretty(&JsonNode::from(*root)),
                _ => {
                    let json: Vec<JsonNode> = nodes.iter().copied().map(JsonNode::from).collect();
                    serde_json::to_string_pretty(&json)
                }
            }
            .context("failed to serialize JSON")?;
            println!("{rendered}");
        }
    }
    Ok(())
}
