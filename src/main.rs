use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use configuration::{Settings, load_config};
use market_data::{
    CachedHistory, CoinGeckoClient, MemoryCache, PriceHistoryProvider, StooqClient,
};
use session::{HorizonRow, SessionOrchestrator, SessionReport};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Meridian market analytics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let settings = match load_config() {
        Ok(settings) => settings,
        Err(error) => {
            tracing::warn!(%error, "could not load config.toml; using built-in defaults");
            Settings::default()
        }
    };

    match cli.command {
        Commands::Backtest(args) => handle_backtest(args, settings).await,
        Commands::History(args) => handle_history(args, settings).await,
    }
}

/// Wraps a concrete client in the shared caching decorator.
fn cached_provider(
    client: Arc<dyn PriceHistoryProvider>,
    settings: &Settings,
) -> Arc<dyn PriceHistoryProvider> {
    Arc::new(
        CachedHistory::new(client, Arc::new(MemoryCache::new()))
            .with_ttl(Duration::from_secs(settings.market_data.history_ttl_seconds)),
    )
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Backtested portfolio insights over free daily market data.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Backtest a preset or custom holdings and print portfolio insights.
    Backtest(BacktestArgs),
    /// Print recent daily closes for a single symbol.
    History(HistoryArgs),
}

#[derive(Parser)]
struct BacktestArgs {
    /// Preset portfolio code (e.g. "semi"). Unknown codes fall back to the default.
    #[arg(long)]
    preset: Option<String>,

    /// Custom holdings instead of a preset: "SYMBOL WEIGHT" pairs separated
    /// by ';' or newlines, e.g. "aapl.us 40; msft.us 30; spy.us 30".
    #[arg(long, conflicts_with = "preset")]
    holdings: Option<String>,

    /// Trailing window in provider days (defaults to the configured ~15y).
    #[arg(long)]
    days: Option<u32>,

    /// Emit the full report as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct HistoryArgs {
    /// Symbol in the source's convention: "spy.us" or "^spx" for stooq,
    /// a coin id like "bitcoin" for coingecko.
    #[arg(long)]
    symbol: String,

    /// Number of daily closes to fetch.
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// Which upstream to query.
    #[arg(long, value_enum, default_value_t = Source::Stooq)]
    source: Source,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Source {
    Stooq,
    Coingecko,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_backtest(args: BacktestArgs, settings: Settings) -> anyhow::Result<()> {
    let provider = cached_provider(
        Arc::new(StooqClient::new(&settings.market_data.stooq_base_url)),
        &settings,
    );
    let days = args.days.unwrap_or(settings.backtest.default_days);
    let orchestrator = SessionOrchestrator::new(provider, settings);

    let report = match &args.holdings {
        Some(text) => {
            orchestrator
                .run_holdings(&text.replace(';', "\n"), days)
                .await?
        }
        None => {
            orchestrator
                .run_preset(args.preset.as_deref().unwrap_or_default(), days)
                .await?
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

async fn handle_history(args: HistoryArgs, settings: Settings) -> anyhow::Result<()> {
    let client: Arc<dyn PriceHistoryProvider> = match args.source {
        Source::Stooq => Arc::new(StooqClient::new(&settings.market_data.stooq_base_url)),
        Source::Coingecko => Arc::new(CoinGeckoClient::new(
            &settings.market_data.coingecko_base_url,
        )),
    };
    let provider = cached_provider(client, &settings);
    let points = provider.fetch_history(&args.symbol, args.days).await?;
    if points.is_empty() {
        println!("No history available for '{}'.", args.symbol);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Close"]);
    for point in &points {
        table.add_row(vec![
            point.date.to_string(),
            point
                .price
                .map_or_else(|| "n/a".to_string(), |price| format!("{price:.2}")),
        ]);
    }
    println!("{table}");
    Ok(())
}

// ==============================================================================
// Table Rendering
// ==============================================================================

fn print_report(report: &SessionReport) {
    println!(
        "\n{}: {} day window, {} index points",
        report.label,
        report.days,
        report.series.len()
    );

    let mut allocation_table = Table::new();
    allocation_table.set_header(vec!["Symbol", "Weight"]);
    for allocation in &report.allocations {
        allocation_table.add_row(vec![
            allocation.symbol.clone(),
            format!("{:.2}%", allocation.weight * 100.0),
        ]);
    }
    println!("{allocation_table}");

    let mut insight_table = Table::new();
    insight_table.set_header(vec!["Metric", "Value"]);
    insight_table.add_row(vec![
        "Total return".to_string(),
        fmt_pct(report.insights.total_return),
    ]);
    insight_table.add_row(vec!["CAGR".to_string(), fmt_pct(report.insights.cagr)]);
    insight_table.add_row(vec![
        "Max drawdown".to_string(),
        fmt_pct(report.insights.max_drawdown),
    ]);
    insight_table.add_row(vec![
        "Volatility (ann.)".to_string(),
        fmt_pct(report.insights.volatility),
    ]);
    if let Some(window) = &report.insights.drawdown {
        insight_table.add_row(vec![
            "Worst stretch".to_string(),
            format!("{} -> {}", window.peak_date, window.trough_date),
        ]);
    }
    if let Some(months) = &report.insights.best_worst_month {
        insight_table.add_row(vec![
            "Best month".to_string(),
            format!(
                "{}-{:02} ({})",
                months.best.year,
                months.best.month,
                fmt_pct(Some(months.best.ret))
            ),
        ]);
        insight_table.add_row(vec![
            "Worst month".to_string(),
            format!(
                "{}-{:02} ({})",
                months.worst.year,
                months.worst.month,
                fmt_pct(Some(months.worst.ret))
            ),
        ]);
    }
    for (code, correlation) in &report.insights.benchmark_correlations {
        insight_table.add_row(vec![
            format!("Correlation vs {code}"),
            correlation.map_or_else(|| "n/a".to_string(), |c| format!("{c:.3}")),
        ]);
    }
    println!("{insight_table}");

    println!("\nWhat-if horizons: {}", report.label);
    println!("{}", horizon_table(&report.horizons, report.investment));
    for benchmark in &report.benchmarks {
        println!("\nWhat-if horizons: {} ({})", benchmark.label, benchmark.symbol);
        println!("{}", horizon_table(&benchmark.horizons, report.investment));
    }
}

fn horizon_table(rows: &[HorizonRow], investment: f64) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Horizon".to_string(),
        "Total return".to_string(),
        "CAGR".to_string(),
        format!("End value of ${investment:.0}"),
    ]);
    for row in rows {
        table.add_row(vec![
            row.label.clone(),
            fmt_pct(row.total_return),
            fmt_pct(row.cagr),
            row.end_value
                .map_or_else(|| "n/a".to_string(), |value| format!("${value:.0}")),
        ]);
    }
    table
}

fn fmt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v * 100.0))
}
