use chart::{render_spending_chart, BarChartConfig};
use compute::Analyzer;
use read::load_transactions;
use report::{report_skipped, report_summary, LogSink};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod chart;
mod compute;
mod data;
mod read;
mod report;

const DEFAULT_TRANSACTIONS_PATH: &str = "transactions.json";

/// Log to stderr, `info` and up unless `RUST_LOG` says otherwise. The report
/// itself goes through the log, so turning it down to `warn` silences it.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<(), anyhow::Error> {
    setup_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        anyhow::bail!("usage: {} [transactions.json | transactions.csv]", args[0]);
    }
    let path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TRANSACTIONS_PATH));

    let batch = load_transactions(&path);
    let mut sink = LogSink;
    report_skipped(&batch.skipped, &mut sink);

    let analyzer = Analyzer::new(batch.transactions);
    if analyzer.is_empty() {
        tracing::warn!("No transactions to analyze.");
        return Ok(());
    }
    report_summary(&analyzer, &mut sink);
    render_spending_chart(
        std::io::stdout().lock(),
        &analyzer.spending_by_category(),
        &BarChartConfig::default(),
    )?;
    Ok(())
}
