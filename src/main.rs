use tracing_subscriber::util::SubscriberInitExt;

pub(crate) mod config;
pub(crate) mod dashboard;
pub(crate) mod error;
pub(crate) mod hn_api;
pub(crate) mod http;
pub(crate) mod tech_news;

pub(crate) static CLIENT: std::sync::LazyLock<reqwest::Client> = std::sync::LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(config::config().request_timeout)
        .build()
        .expect("Failed to build HTTP client")
});

const EXPORT_DIRECTORY: &str = "export";
const EXPORT_FILE: &str = "export/dashboard.json";

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short = 'n', long)]
    #[arg(help = "Number of top stories to fetch [default: NUM_STORIES_TO_REQUEST or 10]")]
    limit: Option<usize>,

    #[arg(short, long)]
    #[arg(help = "Only list stories and tech news matching this term")]
    search: Option<String>,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Export the dashboard to json in the export directory")]
    export: bool,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Log to console")]
    log_to_console: bool,
}

async fn build_dashboard(args: &Args) -> anyhow::Result<dashboard::Dashboard> {
    use anyhow::Context;

    let config = config::config();
    let limit = args.limit.unwrap_or(config.num_stories_to_request);

    let stories = hn_api::fetch_top_stories(&CLIENT, &config.hn_api_base_url, limit)
        .await
        .context("Failed to fetch Hacker News stories")?;

    tracing::info!(limit, num_stories = stories.len(), "Got Hacker News stories");

    let tech_news = tech_news::list_tech_news(&CLIENT, config.tech_news_feed_url.as_deref())
        .await
        .context("Failed to fetch tech news")?;

    tracing::info!(num_items = tech_news.len(), "Got tech news");

    let dashboard = dashboard::Dashboard::build(stories, tech_news, args.search.as_deref());

    tracing::info!(
        stats =? dashboard.stats,
        search =? args.search,
        num_stories_shown = dashboard.hacker_news_stories.len(),
        num_tech_news_shown = dashboard.tech_news_items.len(),
        "Built dashboard"
    );

    Ok(dashboard)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let dashboard = build_dashboard(&args).await?;
    let json = serde_json::to_string_pretty(&dashboard)?;

    if args.export {
        std::fs::create_dir_all(EXPORT_DIRECTORY)?;
        std::fs::write(EXPORT_FILE, json)?;
        tracing::info!("Exported dashboard to {}", EXPORT_FILE);
    } else {
        println!("{json}");
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;

    use clap::Parser;
    let args = Args::parse();

    let file_appender =
        tracing_appender::rolling::daily(&config::config().log_directory, "hn_dashboard.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer();
    let file_layer = file_layer
        .with_writer(non_blocking)
        .json()
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    // stdout carries the dashboard json.
    let pretty_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    let registry = tracing_subscriber::registry().with(file_layer);

    if config::config().log_to_console || args.log_to_console {
        registry.with(pretty_layer).init();
    } else {
        registry.init();
    };

    tracing::info!(
        config =? config::config(),
        args =? args,
        "Starting HN Dashboard"
    );

    // Every request has its own timeout, this bounds the whole run.
    const TIMEOUT: u64 = 5 * 60;
    let failed = tokio::select! {
        res = run(args) => match res {
            Ok(_) => {
                tracing::info!("HN Dashboard finished");
                false
            }
            Err(e) => {
                tracing::error!(error =? e, "Dashboard data unavailable");
                true
            }
        },
        _ = tokio::time::sleep(std::time::Duration::from_secs(TIMEOUT)) => {
            tracing::error!(timeout = TIMEOUT, "Timeout when building dashboard");
            true
        }
    };

    if failed {
        eprintln!("error: dashboard data unavailable, see log for details");
        drop(guard);
        std::process::exit(1);
    }
}
