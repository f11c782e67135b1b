//! Circles Search CLI
//!
//! Opens the interactive search surface by default; also provides
//! one-shot search, trending, and history subcommands.

use clap::{Parser, Subcommand};
use circles_search::api::types::TrackEvent;
use circles_search::api::SearchClient;
use circles_search::tui::App;
use circles_search::{AppConfig, CirclesError, RecentSearches, ResultKind};
use console::style;
use indicatif::HumanDuration;
use std::time::Instant;

/// Circles Search - find restaurants, lists, posts, and people
#[derive(Parser)]
#[command(name = "circles")]
#[command(author = "Circles Contributors")]
#[command(version)]
#[command(about = "Search the Circles dining app from your terminal", long_about = None)]
struct Cli {
    /// Base URL of the Circles API (overrides CIRCLES_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive search surface (default)
    Ui,

    /// Run a single search and print the results
    Search {
        /// Search query (use -- before the query if it starts with -)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Page to fetch
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Results per category
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },

    /// Show trending searches
    Trending {
        /// Number of entries
        #[arg(short, long, default_value = "8")]
        limit: usize,
    },

    /// Show or clear the local recent-search list
    History {
        /// Clear the list instead of showing it
        #[arg(long)]
        clear: bool,
    },
}

fn main() {
    circles_search::logging::init();
    circles_search::logging::info("MAIN", "Circles Search starting up");

    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }

    let result = match cli.command {
        None | Some(Commands::Ui) => cmd_ui(config),

        Some(Commands::Search {
            query,
            page,
            limit,
            output,
        }) => cmd_search(config, &query, page, limit, &output),

        Some(Commands::Trending { limit }) => cmd_trending(config, limit),

        Some(Commands::History { clear }) => cmd_history(config, clear),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Interactive surface
fn cmd_ui(config: AppConfig) -> circles_search::Result<()> {
    let recent = RecentSearches::load(RecentSearches::default_path(), config.recent_cap);
    let mut app = App::new(config, recent)?;

    let mut terminal = ratatui::init();
    let run_result = app.run(&mut terminal);
    ratatui::restore();
    run_result?;

    // Activation happens after the terminal is back to normal
    if let Some(result) = app.activation {
        println!(
            "{} {} {}",
            style("\u{2192}").cyan().bold(),
            style(&result.name).yellow(),
            style(result.route()).dim()
        );
    }

    Ok(())
}

/// One-shot search command
fn cmd_search(
    config: AppConfig,
    query: &str,
    page: usize,
    limit: usize,
    output_format: &str,
) -> circles_search::Result<()> {
    let got = query.chars().count();
    if got < config.min_query_len {
        return Err(CirclesError::QueryTooShort {
            min: config.min_query_len,
            got,
        });
    }

    let client = SearchClient::new(config.base_url.clone(), config.request_timeout)?;
    let start = Instant::now();

    println!(
        "{} Searching for '{}'",
        style("\u{2192}").cyan().bold(),
        style(query).yellow()
    );

    let results = client.search(query, page, limit)?;

    // Same bookkeeping as the interactive surface
    let mut recent = RecentSearches::load(RecentSearches::default_path(), config.recent_cap);
    recent.record(query);
    client.track(&TrackEvent::impression(
        query,
        ResultKind::Restaurant,
        results.total(),
    ));

    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!();
    println!(
        "Found {} results in {}:",
        style(results.total()).green(),
        style(HumanDuration(start.elapsed())).cyan()
    );

    for kind in ResultKind::ALL {
        let bucket = results.bucket(kind);
        if bucket.is_empty() {
            continue;
        }

        println!();
        println!(
            "{} ({})",
            style(kind.plural_label()).bold(),
            bucket.len()
        );
        for (i, hit) in bucket.iter().enumerate() {
            println!(
                "  {} {}",
                style(format!("{:3}.", i + 1)).dim(),
                style(&hit.name).cyan()
            );
            if !hit.subtitle.is_empty() {
                println!("      {}", style(&hit.subtitle).dim());
            }
            let meta = circles_search::tui::style::metadata_line(hit);
            if !meta.is_empty() {
                println!("      {}", style(meta).dim());
            }
        }
    }

    if results.has_more {
        println!();
        println!(
            "  {} more results available (--page {})",
            style("\u{2026}").dim(),
            page + 1
        );
    }

    Ok(())
}

/// Trending command. Falls back to the built-in list when the endpoint
/// is unreachable, same as the interactive surface.
fn cmd_trending(config: AppConfig, limit: usize) -> circles_search::Result<()> {
    let client = SearchClient::new(config.base_url.clone(), config.request_timeout)?;

    let trending = match client.trending(limit) {
        Ok(items) => items,
        Err(e) => {
            eprintln!(
                "{} trending unavailable ({}), showing defaults",
                style("!").yellow().bold(),
                e
            );
            circles_search::history::trending_fallback()
        }
    };

    println!("{}", style("Trending Now").bold());
    for (i, item) in trending.iter().enumerate() {
        match item.search_count {
            Some(count) => println!(
                "  {} {} {}",
                style(format!("{:2}.", i + 1)).dim(),
                item.query,
                style(format!("({} searches)", circles_search::format_count(count))).dim()
            ),
            None => println!("  {} {}", style(format!("{:2}.", i + 1)).dim(), item.query),
        }
    }

    Ok(())
}

/// History command
fn cmd_history(config: AppConfig, clear: bool) -> circles_search::Result<()> {
    let mut recent = RecentSearches::load(RecentSearches::default_path(), config.recent_cap);

    if clear {
        recent.clear();
        println!("{} Recent searches cleared", style("\u{2713}").green().bold());
        return Ok(());
    }

    if recent.is_empty() {
        println!("No recent searches.");
        return Ok(());
    }

    println!("{}", style("Recent Searches").bold());
    for (i, term) in recent.entries().iter().enumerate() {
        println!("  {} {}", style(format!("{:2}.", i + 1)).dim(), term);
    }

    Ok(())
}
