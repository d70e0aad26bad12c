//! Pagegrade: SEO and AEO scoring CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pagegrade::config::{default_config_json, load_config, CONFIG_FILENAME};
use pagegrade::document::{screen, Document};
use pagegrade::reporter::{ConsoleReporter, JsonReporter, TextReporter};
use pagegrade::rewrite::ChatRewriter;
use pagegrade::{AnalysisReport, Analyzer, ComparisonEntry, EngineConfig};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Pagegrade: deterministic SEO and answer-engine scoring for a parsed page
#[derive(Parser, Debug)]
#[command(name = "pagegrade")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Document JSON file to analyze, or `-` for stdin (omit when using a subcommand)
    #[arg(required = true)]
    document: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short, conflicts_with = "text")]
    json: bool,

    /// Output as plain text (no colors)
    #[arg(long)]
    text: bool,

    /// Minimum SEO and AEO score (exit 1 if either is below)
    #[arg(long, short)]
    threshold: Option<u8>,

    /// Quiet mode (scores only)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (show passing checks and examples)
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .pagegraderc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Generate a before/after rewrite example (requires the `ai` feature and PAGEGRADE_AI_API_KEY)
    #[arg(long)]
    rewrite: bool,

    /// Write the report to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze several pages in parallel and rank them
    Compare {
        /// Document JSON files, or directories containing them
        #[arg(required = true)]
        documents: Vec<PathBuf>,

        /// Output format as JSON
        #[arg(long, short)]
        json: bool,

        /// Path to config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create .pagegraderc.json with the default weights and thresholds
    Init {
        /// Minimum score threshold (e.g. 70)
        #[arg(long)]
        threshold: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("PAGEGRADE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(cmd) = args.command {
        return match cmd {
            Commands::Compare {
                documents,
                json,
                config,
            } => run_compare(&documents, json, config.as_deref()),
            Commands::Init { threshold, dir } => run_init(threshold, dir.as_deref()),
        };
    }

    let Some(path) = args.document.as_deref() else {
        anyhow::bail!("a document path is required when not using a subcommand");
    };

    let config = load_engine_config(path, args.config.as_deref())?.merge_with_cli(args.threshold);
    let threshold = config.threshold;

    let document = read_document(path)?;
    screen(&document).context("Page cannot be scored")?;

    let mut analyzer = Analyzer::new(config).context("Invalid configuration")?;
    if args.rewrite {
        match ChatRewriter::from_env() {
            Ok(rewriter) => analyzer = analyzer.with_rewriter(Box::new(rewriter)),
            Err(e) => eprintln!(
                "{}: rewrite example disabled ({})",
                "Warning".yellow(),
                e
            ),
        }
    }

    let report = analyzer
        .analyze(&document)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;

    emit(&args, &report)?;

    Ok(threshold_exit(&report, threshold))
}

fn emit(args: &Args, report: &AnalysisReport) -> Result<()> {
    if let Some(ref output) = args.output {
        let rendered = if args.json {
            JsonReporter::new().pretty().with_timestamp().report(report)
        } else {
            TextReporter::new().report(report)
        };
        std::fs::write(output, rendered)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        if !args.quiet {
            eprintln!(
                "{} Report written to {}",
                "✓".green(),
                output.display()
            );
        }
        return Ok(());
    }

    if args.json {
        println!("{}", JsonReporter::new().pretty().report(report));
    } else if args.text {
        print!("{}", TextReporter::new().report(report));
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }
        if args.quiet {
            reporter.report_quiet(report);
        } else {
            reporter.report(report);
        }
    }
    Ok(())
}

fn threshold_exit(report: &AnalysisReport, threshold: Option<u8>) -> ExitCode {
    let Some(threshold) = threshold else {
        return ExitCode::SUCCESS;
    };
    let lowest = report.seo.score.min(report.aeo.score);
    if lowest < threshold {
        eprintln!(
            "{}: score {} is below threshold {}",
            "Failed".red().bold(),
            lowest,
            threshold
        );
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Config search starts next to the document (or in the current dir for stdin)
fn load_engine_config(document: &Path, custom: Option<&Path>) -> Result<EngineConfig> {
    let work_dir = if is_stdin(document) {
        std::env::current_dir().context("Failed to get current directory")?
    } else {
        document
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    };
    load_config(&work_dir, custom)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_document(path: &Path) -> Result<Document> {
    let raw = if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read document from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document: {}", path.display()))?
    };
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse document JSON: {}", path.display()))
}

/// Expand directories into the `.json` files they contain, sorted
fn collect_documents(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .filter(|p| p.file_name().is_some_and(|name| name != CONFIG_FILENAME))
            .collect();
        found.sort();
        files.extend(found);
    }
    Ok(files)
}

fn run_compare(paths: &[PathBuf], json: bool, config_path: Option<&Path>) -> Result<ExitCode> {
    let files = collect_documents(paths)?;
    if files.is_empty() {
        anyhow::bail!("No document files found");
    }

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&cwd, config_path)?;
    let analyzer = Analyzer::new(config).context("Invalid configuration")?;

    // Unreadable and rejected pages keep their slot as an error entry
    let mut documents = Vec::new();
    let mut positions = Vec::new();
    let mut slots: Vec<(usize, ComparisonEntry)> = Vec::new();
    for (index, file) in files.iter().enumerate() {
        match screened_document(file) {
            Ok(document) => {
                positions.push(index);
                documents.push(document);
            }
            Err(entry) => slots.push((index, entry)),
        }
    }

    slots.extend(positions.into_iter().zip(analyzer.compare(&documents)));
    slots.sort_by_key(|(index, _)| *index);
    let entries: Vec<ComparisonEntry> = slots.into_iter().map(|(_, entry)| entry).collect();

    if json {
        println!("{}", JsonReporter::new().pretty().report_comparison(&entries));
    } else {
        ConsoleReporter::new().report_comparison(&entries);
    }

    if entries.iter().all(|e| e.outcome.is_err()) {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

/// Read and screen one page for a comparison; failures become that page's entry
fn screened_document(path: &Path) -> std::result::Result<Document, ComparisonEntry> {
    let document = read_document(path).map_err(|e| ComparisonEntry {
        url: path.display().to_string(),
        outcome: Err(format!("{:#}", e)),
    })?;
    if let Err(rejection) = screen(&document) {
        let url = if document.url.trim().is_empty() {
            path.display().to_string()
        } else {
            document.url.clone()
        };
        return Err(ComparisonEntry {
            url,
            outcome: Err(rejection.to_string()),
        });
    }
    Ok(document)
}

fn run_init(threshold: Option<u8>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    std::fs::write(&config_path, default_config_json(threshold.or(Some(70))))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    eprintln!("{} Created {}", "✓".green(), config_path.display());
    Ok(ExitCode::SUCCESS)
}
