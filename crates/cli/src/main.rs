mod echo;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use wiki_offline_core::{FetchConfig, Optimizer, fetch_source, is_url};

use echo::{format_size, print_banner, print_detail, print_error, print_step, print_success};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert a wiki page into a self-contained offline HTML file
#[derive(Parser, Debug)]
#[command(name = "wiki-offline")]
#[command(version)]
#[command(about = "Convert a wiki page into an offline-browsable HTML file", long_about = None)]
struct Args {
    /// Page URL, local HTML file, or "-" for stdin
    #[arg(value_name = "SOURCE")]
    source: String,

    /// File to write the converted page to
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Root directory of the offline mirror (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Print a JSON report of the changes to stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("wiki_offline_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}

async fn run(args: Args) -> anyhow::Result<()> {
    const STEPS: usize = 3;

    if args.verbose {
        print_banner();
        print_step(1, STEPS, "Resolving output paths");
    }

    let output = absolute(&args.output)?;
    let base_dir = match &args.base_dir {
        Some(dir) => absolute(dir)?,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let optimizer = Optimizer::new(&base_dir).context("Invalid base directory")?;
    let ctx = optimizer.output_context(&output).context("Invalid output path")?;

    if args.verbose {
        print_detail("Base", &base_dir.display().to_string());
        print_detail("Output", &output.display().to_string());
        print_detail("Prefix", ctx.prefix());
        eprintln!();

        let message = if args.source == "-" {
            "Reading from stdin".to_string()
        } else if is_url(&args.source) {
            format!("Fetching from {}", args.source.bright_white().underline())
        } else {
            format!("Reading from file {}", args.source.bright_white())
        };
        print_step(2, STEPS, &message);
    }

    let config = FetchConfig {
        timeout: args.timeout,
        user_agent: args.user_agent.unwrap_or_else(|| FetchConfig::default().user_agent),
    };
    let html = fetch_source(&args.source, &config)
        .await
        .with_context(|| format!("Failed to read page: {}", args.source))?;

    if args.verbose {
        print_detail("Size", &format_size(html.len()));
        eprintln!();
        print_step(3, STEPS, "Rewriting page");
    }

    let report = optimizer.optimize(&html, &output).context("Failed to convert page")?;

    if args.verbose {
        if let Some(title) = &report.title {
            print_detail("Title", title);
        }
        print_detail("Stripped", &format!("{} elements, {} comments", report.stripped_elements, report.stripped_comments));
        print_detail("Stylesheets removed", &report.removed_stylesheets.to_string());
        print_detail("Links", &report.rewritten_links.to_string());
        print_detail("Images", &report.rewritten_images.to_string());
        eprintln!();
    }

    print_success(&format!("Page written to {}", output.display().bright_white()));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.to_json()?)?);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
