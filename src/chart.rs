use crate::report::money;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::{collections::BTreeMap, io::Write};

/// Look of the spending chart.
pub(crate) struct BarChartConfig {
    /// Length in terminal cells of the longest bar.
    pub width: usize,
    pub filled_char: char,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            width: 40,
            filled_char: '\u{2588}', // █  FULL BLOCK
        }
    }
}

/// Number of cells for `amount` when `max` gets the full width. Anything that
/// was actually spent gets at least one cell.
fn bar_len(amount: Decimal, max: Decimal, width: usize) -> usize {
    if max <= Decimal::ZERO || amount <= Decimal::ZERO {
        return 0;
    }
    let cells = (amount / max * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(width);
    cells.clamp(1, width.max(1))
}

/// Draws one horizontal bar per category. Returns whether anything was drawn:
/// with no spending at all there's nothing to chart, so we just warn.
pub(crate) fn render_spending_chart<W: Write>(
    mut writer: W,
    spending: &BTreeMap<String, Decimal>,
    config: &BarChartConfig,
) -> std::io::Result<bool> {
    if spending.is_empty() {
        tracing::warn!("No expenses to chart.");
        return Ok(false);
    }
    let max = spending.values().copied().max().unwrap_or_default();
    let label_width = spending
        .keys()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or_default();

    writeln!(writer, "Spending by Category")?;
    for (category, amount) in spending {
        let len = bar_len(*amount, max, config.width);
        let bar: String = std::iter::repeat(config.filled_char).take(len).collect();
        writeln!(writer, "{category:<label_width$} | {bar} {}", money(*amount))?;
    }
    writer.flush()?;
    Ok(true)
}
