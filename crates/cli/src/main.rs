//! DoxyDoc CLI — Doxygen comment skeletons from the terminal.
//!
//! Acts as the host for `doxydoc-core`: reads documents from disk, turns line
//! and column numbers into byte offsets, and prints or applies snippets.

mod fill;

use clap::{CommandFactory, Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;

use doxydoc_core::snippet::{placeholder_indices, render_plain};
use doxydoc_core::source::TextBuffer;
use doxydoc_core::types::{DocConfig, TagPrefix};
use doxydoc_core::{analyze, classify, load_doxydoc_config};

/// DoxyDoc CLI — generate Doxygen comment skeletons for C++ declarations.
#[derive(Parser)]
#[command(name = "dxd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Use `\` field tags (Qt style) instead of `@`
    #[arg(long, global = true)]
    backslash: bool,

    /// Continuation lines to read for multi-line declarations
    #[arg(long, global = true, value_name = "N")]
    max_lookahead: Option<usize>,

    /// Directory holding `.doxydoc.toml` (default: current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the snippet for a cursor placed on a `/**` line
    Snippet {
        /// Source file
        file: PathBuf,

        /// Line of the cursor (1-indexed)
        #[arg(long)]
        line: usize,

        /// Column of the cursor (1-indexed, default: end of line)
        #[arg(long)]
        column: Option<usize>,

        /// Replace tab-stops with their hint text
        #[arg(long)]
        plain: bool,
    },
    /// Classify declaration lines as if they followed a `/**` opener
    Classify {
        /// Declaration lines
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Expand every bare `/**` opener in the given files
    Fill {
        /// Source files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Rewrite files instead of printing to stdout
        #[arg(long)]
        in_place: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn resolve_root(root: Option<PathBuf>) -> PathBuf {
    root.or_else(|| std::env::current_dir().ok()).unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration file values, overridden by command-line flags.
fn resolve_config(cli: &Cli) -> DocConfig {
    let mut config = load_doxydoc_config(&resolve_root(cli.root.clone()));
    if cli.backslash {
        config.tag_prefix = TagPrefix::Backslash;
    }
    if let Some(n) = cli.max_lookahead {
        config.max_lookahead_lines = n;
    }
    config
}

fn read_document(path: &Path) -> TextBuffer {
    match std::fs::read_to_string(path) {
        Ok(text) => TextBuffer::new(text),
        Err(e) => {
            eprintln!("Could not read {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

/// Byte offset for a 1-based line and optional 1-based column (default: end of line).
/// Line 0 is out of range like any line past the end.
fn cursor_offset(doc: &TextBuffer, line: usize, column: Option<usize>) -> Option<usize> {
    let column = column.map(|c| c.saturating_sub(1)).unwrap_or(usize::MAX);
    doc.offset_of(line.checked_sub(1)?, column)
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Could not format output: {e}");
            std::process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli);
    debug!(?config, "Resolved configuration");

    if !config.enabled && !matches!(cli.command, Commands::Completions { .. }) {
        eprintln!("DoxyDoc is disabled by configuration");
        return;
    }

    match &cli.command {
        Commands::Snippet { file, line, column, plain } => {
            let doc = read_document(file);
            let Some(cursor) = cursor_offset(&doc, *line, *column) else {
                eprintln!("Line {line} is out of range ({} lines)", doc.line_count());
                std::process::exit(1);
            };

            let analysis = analyze(&doc, cursor, &config);
            if analysis.snippet.is_empty() {
                eprintln!("DoxyDoc: Unable to retrieve snippet");
                std::process::exit(1);
            }
            let snippet =
                if *plain { render_plain(&analysis.snippet) } else { analysis.snippet.clone() };

            if cli.json {
                print_json(&serde_json::json!({
                    "outcome": analysis.outcome,
                    "snippet": snippet,
                    "placeholders": placeholder_indices(&analysis.snippet),
                }));
            } else {
                println!("{snippet}");
            }
        }
        Commands::Classify { lines } => {
            let mut all = vec!["/**".to_string()];
            all.extend(lines.iter().cloned());
            let doc = TextBuffer::from_lines(&all);
            let outcome = classify::inspect(&doc, 0, config.max_lookahead_lines);

            if cli.json {
                print_json(&serde_json::json!(outcome));
            } else {
                match &outcome {
                    doxydoc_core::types::Outcome::Declaration { declaration: d } => {
                        println!("Kind:        {}", d.kind.label());
                        if let Some(ret) = &d.return_type {
                            println!("Returns:     {ret}");
                        }
                        if !d.has_no_parameters() {
                            let params: Vec<String> = d
                                .parameters
                                .iter()
                                .map(|p| format!("{} {}", p.declared_type, p.name))
                                .collect();
                            println!("Parameters:  {}", params.join(", "));
                        }
                        if !d.template_args.is_empty() {
                            println!("Template:    {}", d.template_args.join(", "));
                        }
                        if d.is_friend {
                            println!("Friend:      yes");
                        }
                    }
                    other => {
                        eprintln!("Not recognized: {other:?}");
                        std::process::exit(1);
                    }
                }
            }
        }
        Commands::Fill { files, in_place } => {
            let results: Vec<(PathBuf, Result<fill::FillReport, String>)> = files
                .par_iter()
                .map(|path| (path.clone(), fill::fill_file(path, &config, *in_place)))
                .collect();

            let mut failed = false;
            for (path, result) in results {
                match result {
                    Ok(report) => {
                        info!(path = %path.display(), filled = report.filled, "Filled openers");
                        if cli.json {
                            print_json(&serde_json::json!({
                                "path": path.display().to_string(),
                                "filled": report.filled,
                            }));
                        } else if !*in_place {
                            print!("{}", report.text);
                        } else {
                            eprintln!("{}: {} comment(s) filled", path.display(), report.filled);
                        }
                    }
                    Err(e) => {
                        eprintln!("{}: {e}", path.display());
                        failed = true;
                    }
                }
            }
            if failed {
                std::process::exit(1);
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "dxd", &mut std::io::stdout());
        }
    }
}
