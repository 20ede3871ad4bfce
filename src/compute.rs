use crate::data::Transaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Aggregates over a fixed set of transactions. Nothing is cached: every figure
/// is recomputed from the transactions when asked for.
/// Maps are ordered so reports come out the same every time.
#[derive(Debug)]
pub(crate) struct Analyzer {
    transactions: Vec<Transaction>,
}

impl Analyzer {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn expenses(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| t.is_expense())
    }

    /// Sum of all expenses, as a negative (or zero) amount.
    pub fn total_spent(&self) -> Decimal {
        self.expenses().map(|t| t.amount).sum()
    }

    pub fn total_earned(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| !t.is_expense())
            .map(|t| t.amount)
            .sum()
    }

    pub fn net_balance(&self) -> Decimal {
        self.total_earned() + self.total_spent()
    }

    /// How much went out, per category. Categories without any expense don't
    /// show up at all.
    pub fn spending_by_category(&self) -> BTreeMap<String, Decimal> {
        let mut summary = BTreeMap::new();
        for t in self.expenses() {
            *summary.entry(t.category.clone()).or_insert(Decimal::ZERO) += t.amount.abs();
        }
        summary
    }

    /// Number of transactions per category, income included.
    pub fn transactions_per_category(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for t in &self.transactions {
            *counts.entry(t.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// How much went out, per day that had at least one expense.
    pub fn daily_spending(&self) -> BTreeMap<NaiveDate, Decimal> {
        let mut days = BTreeMap::new();
        for t in self.expenses() {
            *days.entry(t.date).or_insert(Decimal::ZERO) += t.amount.abs();
        }
        days
    }

    /// Average over days with spending, not over transactions: three expenses on
    /// the same day count as one day.
    pub fn average_daily_spending(&self) -> Decimal {
        let days = self.daily_spending();
        if days.is_empty() {
            return Decimal::ZERO;
        }
        days.values().sum::<Decimal>() / Decimal::from(days.len())
    }
}

#[cfg(test)]
mod tests {
    use super::Analyzer;
    use crate::data::Transaction;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn tx(date: &str, amount: Decimal, category: &str) -> Transaction {
        Transaction::new(date, amount, category, None).unwrap()
    }

    fn mixed() -> Analyzer {
        Analyzer::new(vec![
            tx("2024-05-01", dec!(-50.25), "groceries"),
            tx("2024-05-01", dec!(-12.10), "transport"),
            tx("2024-05-02", dec!(2000.00), "salary"),
            tx("2024-05-03", dec!(-7.65), "groceries"),
            tx("2024-05-03", dec!(15), "groceries"),
            tx("2024-05-05", dec!(0), "misc"),
        ])
    }

    #[test]
    fn test_scenario() {
        let analyzer = Analyzer::new(vec![
            tx("2024-05-01", dec!(-50.25), "groceries"),
            tx("2024-05-02", dec!(2000.00), "salary"),
        ]);
        assert_eq!(analyzer.total_spent(), dec!(-50.25));
        assert_eq!(analyzer.total_earned(), dec!(2000.00));
        assert_eq!(
            analyzer.spending_by_category(),
            BTreeMap::from([("groceries".to_owned(), dec!(50.25))])
        );
        assert_eq!(analyzer.average_daily_spending(), dec!(50.25));
        assert_eq!(analyzer.net_balance(), dec!(1949.75));
    }
    #[test]
    fn test_same_day_counts_once() {
        let analyzer = Analyzer::new(vec![
            tx("2024-05-01", dec!(-10), "food"),
            tx("2024-05-01", dec!(-20), "food"),
        ]);
        assert_eq!(analyzer.average_daily_spending(), dec!(30.0));
    }
    #[test]
    fn test_average_over_days() {
        let analyzer = mixed();
        assert_eq!(
            analyzer.daily_spending(),
            BTreeMap::from([
                (chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), dec!(62.35)),
                (chrono::NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(), dec!(7.65)),
            ])
        );
        assert_eq!(analyzer.average_daily_spending(), dec!(35));
    }
    #[test]
    fn test_empty() {
        let analyzer = Analyzer::new(vec![]);
        assert!(analyzer.is_empty());
        assert_eq!(analyzer.total_spent(), dec!(0));
        assert_eq!(analyzer.total_earned(), dec!(0));
        assert!(analyzer.spending_by_category().is_empty());
        assert!(analyzer.transactions_per_category().is_empty());
        assert_eq!(analyzer.average_daily_spending(), dec!(0));
    }
    #[test]
    fn test_no_expenses() {
        let analyzer = Analyzer::new(vec![
            tx("2024-05-02", dec!(2000.00), "salary"),
            tx("2024-05-03", dec!(0), "misc"),
        ]);
        assert_eq!(analyzer.total_spent(), dec!(0));
        assert!(analyzer.spending_by_category().is_empty());
        assert_eq!(analyzer.average_daily_spending(), dec!(0));
    }
    #[test]
    fn test_net_balance_is_sum_of_amounts() {
        let analyzer = mixed();
        let sum: Decimal = analyzer.transactions.iter().map(|t| t.amount).sum();
        assert_eq!(analyzer.total_earned() + analyzer.total_spent(), sum);
        assert_eq!(analyzer.net_balance(), dec!(1945));
    }
    #[test]
    fn test_spending_by_category() {
        let analyzer = mixed();
        let spending = analyzer.spending_by_category();
        assert_eq!(
            spending,
            BTreeMap::from([
                ("groceries".to_owned(), dec!(57.90)),
                ("transport".to_owned(), dec!(12.10)),
            ])
        );
        assert!(spending.values().all(|v| *v >= dec!(0)));
        assert_eq!(
            spending.values().sum::<Decimal>(),
            analyzer.total_spent().abs()
        );
    }
    #[test]
    fn test_transactions_per_category() {
        let analyzer = mixed();
        let counts = analyzer.transactions_per_category();
        assert_eq!(
            counts,
            BTreeMap::from([
                ("groceries".to_owned(), 3),
                ("misc".to_owned(), 1),
                ("salary".to_owned(), 1),
                ("transport".to_owned(), 1),
            ])
        );
        assert_eq!(counts.values().sum::<usize>(), analyzer.len());
    }
    #[test]
    fn test_categories_are_opaque() {
        let analyzer = Analyzer::new(vec![
            tx("2024-05-01", dec!(-1), "Food"),
            tx("2024-05-01", dec!(-2), "food"),
            tx("2024-05-01", dec!(-3), "food "),
        ]);
        assert_eq!(analyzer.spending_by_category().len(), 3);
    }
    #[test]
    fn test_idempotent() {
        let analyzer = mixed();
        assert_eq!(analyzer.total_spent(), analyzer.total_spent());
        assert_eq!(analyzer.total_earned(), analyzer.total_earned());
        assert_eq!(
            analyzer.spending_by_category(),
            analyzer.spending_by_category()
        );
        assert_eq!(
            analyzer.transactions_per_category(),
            analyzer.transactions_per_category()
        );
        assert_eq!(
            analyzer.average_daily_spending(),
            analyzer.average_daily_spending()
        );
    }
}
