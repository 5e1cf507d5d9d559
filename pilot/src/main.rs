use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pilot::config::Config;
use pilot::format::{format_magnitude, format_percent, sort_by_followers_desc, PLACEHOLDER};
use pilot::models::{InfluencerRecord, Page, SearchQuery};
use pilot::services::{SearchResults, SearchService, SummaryService};

#[derive(Parser)]
#[command(name = "pilot")]
#[command(about = "Search influencers and enrich results with engagement insights")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a keyword search and print the enriched results
    Search(SearchArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Search keywords, e.g. "fashion hyderabad"
    #[arg(required = true, num_args = 1..)]
    keywords: Vec<String>,

    /// Number of results to request (defaults to PILOT_DEFAULT_LIMIT)
    #[arg(long, short)]
    limit: Option<u32>,

    /// Opaque user identifier forwarded to the search service
    #[arg(long)]
    user_id: Option<String>,

    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long, default_value_t = 10)]
    rows_per_page: usize,

    /// Order by follower count, largest first
    #[arg(long)]
    sort_followers: bool,

    /// Print the page as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Generate an AI summary for this username from the results
    #[arg(long, value_name = "USERNAME")]
    summary_for: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env();
    tracing::debug!(base_url = %config.api.base_url, "Loaded configuration");

    match cli.command {
        Command::Search(args) => run_search(&config, args).await,
    }
}

fn init_tracing() {
    let json_logs = std::env::var("PILOT_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let (json_layer, text_layer) = if json_logs {
        (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
            None,
        )
    } else {
        (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pilot=info".into()),
        )
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run_search(config: &Config, args: SearchArgs) -> anyhow::Result<()> {
    let service = SearchService::from_config(config)?;

    let keyword = args.keywords.join(" ");
    let limit = args.limit.unwrap_or(config.search.default_limit);
    let mut query = SearchQuery::new(keyword, limit);
    if let Some(user_id) = args.user_id {
        query = query.with_user_id(user_id);
    }

    let results = match service.search(query.clone()).await {
        Ok(results) => results,
        Err(e) => {
            tracing::error!(error = %e, "Search failed");
            anyhow::bail!(e.user_message());
        }
    };

    let records = if args.sort_followers {
        sort_by_followers_desc(&results.records)
    } else {
        results.records.clone()
    };
    let page = Page::paginate(&records, args.page, args.rows_per_page);

    if args.json {
        let output = json_output(&query, &results, &page);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_table(&query, &results, &page);
    }

    if let Some(username) = args.summary_for {
        let Some(record) = find_by_username(&records, &username) else {
            anyhow::bail!("No result with username '{username}'");
        };
        let summaries = SummaryService::new(service.api(), &config.summary);
        println!();
        println!("Summary for @{}:", record.username().unwrap_or(username));
        println!("{}", summaries.generate(record).await);
    }

    Ok(())
}

fn find_by_username<'a>(
    records: &'a [InfluencerRecord],
    username: &str,
) -> Option<&'a InfluencerRecord> {
    let wanted = username.trim().trim_start_matches('@');
    records.iter().find(|record| {
        record
            .username()
            .is_some_and(|name| name.eq_ignore_ascii_case(wanted))
    })
}

fn json_output(
    query: &SearchQuery,
    results: &SearchResults,
    page: &Page<InfluencerRecord>,
) -> Value {
    json!({
        "keyword": query.keyword.trim(),
        "fromCache": results.from_cache,
        "fetchedAt": results.fetched_at.to_rfc3339(),
        "page": page,
    })
}

const COLUMNS: [&str; 7] = [
    "#",
    "Influencer",
    "Followers",
    "Avg Likes",
    "Eng. Rate",
    "Posts",
    "Niches",
];

fn field<'a>(record: &'a InfluencerRecord, names: &[&str]) -> &'a Value {
    names
        .iter()
        .find_map(|name| record.get(name).filter(|value| !value.is_null()))
        .unwrap_or(&Value::Null)
}

fn row(index: usize, record: &InfluencerRecord) -> [String; 7] {
    let who = match record.username() {
        Some(username) => format!("{} (@{username})", record.display_name()),
        None => record.display_name(),
    };
    let niches = record.niche_tags(3);

    [
        index.to_string(),
        who,
        format_magnitude(field(record, &["followers"])),
        format_magnitude(field(record, &["avg_likes"])),
        format_percent(field(record, &["eng_rate"])),
        format_magnitude(field(record, &["post_count", "total_posts"])),
        if niches.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            niches.join(", ")
        },
    ]
}

fn print_table(query: &SearchQuery, results: &SearchResults, page: &Page<InfluencerRecord>) {
    if page.total == 0 {
        println!("No influencers found for \"{}\".", query.keyword.trim());
        return;
    }

    let offset = (page.page - 1) * page.rows_per_page;
    let rows: Vec<[String; 7]> = page
        .items
        .iter()
        .enumerate()
        .map(|(i, record)| row(offset + i + 1, record))
        .collect();

    let mut widths = COLUMNS.map(|title| title.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let header: Vec<String> = COLUMNS.iter().map(|title| title.to_string()).collect();
    println!("{}", line(&header).trim_end());
    for cells in &rows {
        println!("{}", line(cells).trim_end());
    }

    println!();
    println!(
        "Page {}/{} ({} results{}, fetched {})",
        page.page,
        page.total_pages,
        page.total,
        if results.from_cache { ", cached" } else { "" },
        results.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: Value) -> InfluencerRecord {
        InfluencerRecord::try_from(value).unwrap()
    }

    #[test]
    fn test_cli_parses_search_flags() {
        let cli = Cli::parse_from([
            "pilot",
            "search",
            "fashion",
            "hyderabad",
            "--limit",
            "5",
            "--sort-followers",
            "--summary-for",
            "@chef",
        ]);
        let Command::Search(args) = cli.command;

        assert_eq!(args.keywords.join(" "), "fashion hyderabad");
        assert_eq!(args.limit, Some(5));
        assert!(args.sort_followers);
        assert_eq!(args.page, 1);
        assert_eq!(args.rows_per_page, 10);
        assert_eq!(args.summary_for.as_deref(), Some("@chef"));
    }

    #[test]
    fn test_find_by_username_ignores_case_and_at() {
        let records = vec![
            record(json!({"username": "Chef"})),
            record(json!({"handle": "dancer"})),
        ];
        assert!(find_by_username(&records, "@chef").is_some());
        assert!(find_by_username(&records, "DANCER").is_some());
        assert!(find_by_username(&records, "nobody").is_none());
    }

    #[test]
    fn test_row_formats_metrics() {
        let cells = row(
            1,
            &record(json!({
                "full_name": "Asha Rao",
                "username": "asha",
                "followers": 1_200_000,
                "avg_likes": 1500,
                "eng_rate": 3.456,
                "niches": ["fashion", "travel", "food", "art"]
            })),
        );
        assert_eq!(cells[1], "Asha Rao (@asha)");
        assert_eq!(cells[2], "1.20M");
        assert_eq!(cells[3], "1.5K");
        assert_eq!(cells[4], "3.46%");
        assert_eq!(cells[5], PLACEHOLDER);
        assert_eq!(cells[6], "fashion, travel, food");
    }
}
