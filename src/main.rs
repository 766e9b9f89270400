//! depgrab CLI - harvest npm dependencies from URLs and check for takeovers

use clap::{ArgAction, ArgGroup, Parser};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use depgrab::config::{self, DepgrabConfig};
use depgrab::dependency::StoredDependency;
use depgrab::report::{NullReporter, Reporter};
use depgrab::storage::DependencyStore;
use depgrab::ui::{self, ConsoleReporter, Icons};
use depgrab::{Crawler, HttpFetcher, TakeoverProber, Verbosity};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "depgrab")]
#[command(version)]
#[command(about = "Extract npm dependencies from package.json files and JS bundles")]
#[command(long_about = r#"
depgrab fetches package.json manifests and JavaScript bundles, stores every
declared npm dependency in a local SQLite database, and can check the npm
registry for package names nobody has claimed (dependency confusion).

Example usage:
  depgrab -u https://app.example.com/package.json https://app.example.com/main.js
  depgrab -f targets.txt -v -d
  depgrab --check-takeover
"#)]
#[command(group(ArgGroup::new("source").args(["urls", "file"])))]
struct Cli {
    /// URLs to analyze
    #[arg(short, long, num_args = 1..)]
    urls: Option<Vec<String>>,

    /// File containing URLs (one per line, `#` for comments)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Verbosity (-v per URL, -vv every dependency, -vvv debug logs)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Show the stored results table
    #[arg(short, long)]
    display: bool,

    /// Only check stored packages for possible takeovers
    #[arg(short = 't', long)]
    check_takeover: bool,

    /// Path to the database file
    #[arg(long)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Delay between registry requests, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Verify TLS certificates (off by default)
    #[arg(long)]
    verify_tls: bool,

    /// Print results as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let verbosity = Verbosity::from_occurrences(cli.verbose);

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?;

    // Resolve the URL source before touching the network or the database
    let urls = if cli.check_takeover {
        Vec::new()
    } else {
        depgrab::urls::resolve_urls(cli.urls.as_deref(), cli.file.as_deref())?
    };

    let database = cli.database.clone().unwrap_or_else(|| config.database_path());
    config::ensure_db_dir(&database)?;
    let store = DependencyStore::open(&database)?;
    let fetcher = build_fetcher(&cli, &config)?;

    let mut console = ConsoleReporter::new(verbosity);
    let mut quiet = NullReporter;
    let reporter: &mut dyn Reporter = if cli.json { &mut quiet } else { &mut console };

    if cli.check_takeover {
        if !cli.json {
            ui::header("Checking stored packages for possible takeovers");
            ui::status(Icons::DATABASE, "Database", &database.display().to_string());
            ui::status(Icons::PACKAGE, "Registry", config.registry_url());
        }

        let delay = cli.delay_ms.map(Duration::from_millis).unwrap_or_else(|| config.probe_delay());
        let report = TakeoverProber::new(&fetcher, &store)
            .with_registry_url(config.registry_url())
            .with_delay(delay)
            .run(reporter)?;

        if cli.json {
            let records = if cli.display { Some(store.all_records()?) } else { None };
            print_json("report", &report, records.as_deref())?;
            return Ok(());
        }

        ui::section("Takeover check");
        ui::summary_row("Checked:", &format!("{} packages", report.checked));
        if report.findings.is_empty() {
            ui::success(&format!("No unclaimed packages among {} checked", report.checked));
        } else {
            println!("{}", ui::findings_table(&report.findings));
            ui::warn(&format!(
                "{} of {} packages look unclaimed",
                report.findings.len(),
                report.checked
            ));
        }
        if report.errors > 0 {
            ui::warn(&format!("{} registry checks failed", report.errors));
        }

        if cli.display {
            display_results(&store)?;
        }
        return Ok(());
    }

    if !cli.json {
        ui::header(&format!("Analyzing {} URLs", urls.len()));
        ui::status(Icons::DATABASE, "Database", &database.display().to_string());
    }

    let summary = Crawler::new(&fetcher, &store).run(urls.as_slice(), reporter);

    if cli.json {
        let records = if cli.display { Some(store.all_records()?) } else { None };
        print_json("summary", &summary, records.as_deref())?;
    } else {
        if cli.display {
            display_results(&store)?;
        }
        ui::success(&format!(
            "Analysis complete: {} new dependencies found across {} URLs",
            summary.inserted, summary.urls
        ));
        if summary.failed > 0 {
            ui::warn(&format!("{} URLs could not be processed", summary.failed));
        }
        let stats = store.stats()?;
        println!("{} Database totals", Icons::STATS);
        println!("{}", ui::stats_table(&[
            ("Records", stats.records.to_string()),
            ("Packages", stats.packages.to_string()),
            ("URLs", stats.urls.to_string()),
            ("Direct", stats.direct().to_string()),
            ("Dev", stats.dev.to_string()),
        ]));
    }

    Ok(())
}

fn build_fetcher(cli: &Cli, config: &DepgrabConfig) -> anyhow::Result<HttpFetcher> {
    let mut builder = HttpFetcher::builder()
        .accept_invalid_certs(!cli.verify_tls && config.accept_invalid_certs())
        .timeout(config.timeout());
    if let Some(agent) = &config.user_agent {
        builder = builder.user_agent(agent.clone());
    }
    Ok(builder.build()?)
}

fn display_results(store: &DependencyStore) -> anyhow::Result<()> {
    let records = store.all_records()?;
    ui::section("Stored dependencies");
    if !records.is_empty() {
        println!("{}", ui::dependencies_table(&records));
    }
    ui::info("Total dependencies", &records.len().to_string());
    Ok(())
}

/// Single JSON object for `--json`: the run's result under `key`, plus the
/// stored records when `--display` was given
fn json_document<T: Serialize>(
    key: &str,
    value: &T,
    records: Option<&[StoredDependency]>,
) -> serde_json::Result<serde_json::Value> {
    let mut document = serde_json::Map::new();
    document.insert(key.to_string(), serde_json::to_value(value)?);
    if let Some(records) = records {
        document.insert("records".to_string(), serde_json::to_value(records)?);
    }
    Ok(serde_json::Value::Object(document))
}

fn print_json<T: Serialize>(key: &str, value: &T, records: Option<&[StoredDependency]>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&json_document(key, value, records)?)?);
    Ok(())
}
