use crate::{compute::Analyzer, read::SkippedRecord};
use rust_decimal::Decimal;

/// Where report lines end up. The binary sends them to the log, tests just
/// collect them.
pub(crate) trait ReportSink {
    fn line(&mut self, line: String);
}

/// Sends every report line to the log stream at `info` level.
pub(crate) struct LogSink;

impl ReportSink for LogSink {
    fn line(&mut self, line: String) {
        tracing::info!("{line}");
    }
}

impl ReportSink for Vec<String> {
    fn line(&mut self, line: String) {
        self.push(line);
    }
}

/// Currency amount, rounded to the cent, sign in front: `-$4.50`.
pub(crate) fn money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${:.2}", rounded.abs())
}

pub(crate) fn report_summary<S: ReportSink>(analyzer: &Analyzer, sink: &mut S) {
    sink.line("------ Budget Summary ------".to_owned());
    sink.line(format!("Transactions: {}", analyzer.len()));
    sink.line(format!("Total Earned: {}", money(analyzer.total_earned())));
    sink.line(format!("Total Spent:  {}", money(analyzer.total_spent().abs())));
    sink.line(format!("Net Balance:  {}", money(analyzer.net_balance())));
    sink.line(format!(
        "Average Daily Spending: {}",
        money(analyzer.average_daily_spending())
    ));
    sink.line("Spending by Category:".to_owned());
    for (category, amount) in analyzer.spending_by_category() {
        sink.line(format!("  {category}: {}", money(amount)));
    }
    sink.line("Transactions per Category:".to_owned());
    for (category, count) in analyzer.transactions_per_category() {
        sink.line(format!("  {category}: {count}"));
    }
}

/// Lists the records the loader had to drop. Says nothing if there are none.
pub(crate) fn report_skipped<S: ReportSink>(skipped: &[SkippedRecord], sink: &mut S) {
    if skipped.is_empty() {
        return;
    }
    sink.line(format!("Skipped {} unreadable record(s):", skipped.len()));
    for record in skipped {
        sink.line(format!("  record #{}: {}", record.index + 1, record.error));
    }
}
