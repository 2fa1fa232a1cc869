//! Totals and trends computed from the loaded ledger.
//!
//! Rows whose transaction type could not be parsed are left out of every
//! aggregate. Rows whose amount could not be parsed count as zero.

use std::collections::BTreeMap;

use time::Date;

use crate::ledger::record::{TransactionRecord, TransactionType};

/// The sum of the amounts for one category and transaction type.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category as entered.
    pub category: String,
    /// Whether the total is money spent or received.
    pub transaction_type: TransactionType,
    /// The sum of the parsed amounts. Zero if none of the amounts parsed.
    pub total: f64,
}

/// Total income, total expenses and the difference between them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// The sum of all income amounts.
    pub income: f64,
    /// The sum of all expense amounts.
    pub expense: f64,
    /// Income minus expense.
    pub balance: f64,
}

/// Income, expenses and balance for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyBalance {
    /// The first day of the month.
    pub month: Date,
    /// The sum of income amounts in the month.
    pub income: f64,
    /// The sum of expense amounts in the month.
    pub expense: f64,
    /// Income minus expense for the month.
    pub balance: f64,
}

/// Sum the amounts grouped by category and transaction type.
///
/// The result is sorted by category, then by transaction type with expenses
/// before income.
pub fn category_totals(ledger: &[TransactionRecord]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<(&str, TransactionType), f64> = BTreeMap::new();

    for record in ledger {
        let Some(transaction_type) = record.transaction_type() else {
            continue;
        };

        *totals
            .entry((record.category.as_str(), transaction_type))
            .or_default() += record.amount().unwrap_or_default();
    }

    totals
        .into_iter()
        .map(|((category, transaction_type), total)| CategoryTotal {
            category: category.to_owned(),
            transaction_type,
            total,
        })
        .collect()
}

/// Sum all income and expenses and compute the balance.
pub fn income_expense_balance(ledger: &[TransactionRecord]) -> Summary {
    let (income, expense) = sum_by_type(ledger.iter());

    Summary {
        income,
        expense,
        balance: income - expense,
    }
}

/// Compute the income, expenses and balance of each month in chronological order.
///
/// Rows without a valid date are skipped. A month appears if at least one
/// row has a valid date and transaction type in it. A month with only one
/// kind of transaction reports zero for the other.
pub fn monthly_trend(ledger: &[TransactionRecord]) -> Vec<MonthlyBalance> {
    let mut months: BTreeMap<Date, Vec<&TransactionRecord>> = BTreeMap::new();

    for record in ledger {
        let (Some(date), Some(_)) = (record.date(), record.transaction_type()) else {
            continue;
        };

        // The first day of a month always exists.
        let Ok(month) = date.replace_day(1) else {
            continue;
        };

        months.entry(month).or_default().push(record);
    }

    months
        .into_iter()
        .map(|(month, records)| {
            let (income, expense) = sum_by_type(records.into_iter());

            MonthlyBalance {
                month,
                income,
                expense,
                balance: income - expense,
            }
        })
        .collect()
}

/// Returns the sums of the (income, expense) amounts.
fn sum_by_type<'a>(records: impl Iterator<Item = &'a TransactionRecord>) -> (f64, f64) {
    records.fold((0.0, 0.0), |(income, expense), record| {
        let amount = record.amount().unwrap_or_default();

        match record.transaction_type() {
            Some(TransactionType::Income) => (income + amount, expense),
            Some(TransactionType::Expense) => (income, expense + amount),
            None => (income, expense),
        }
    })
}

/// Format each month as a short label, e.g. "Jan 2024".
pub fn format_month_labels(months: &[MonthlyBalance]) -> Vec<String> {
    months
        .iter()
        .map(|monthly| format!("{} {}", month_abbreviation(monthly.month), monthly.month.year()))
        .collect()
}

fn month_abbreviation(date: Date) -> &'static str {
    match date.month() {
        time::Month::January => "Jan",
        time::Month::February => "Feb",
        time::Month::March => "Mar",
        time::Month::April => "Apr",
        time::Month::May => "May",
        time::Month::June => "Jun",
        time::Month::July => "Jul",
        time::Month::August => "Aug",
        time::Month::September => "Sep",
        time::Month::October => "Oct",
        time::Month::November => "Nov",
        time::Month::December => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::ledger::record::{Amount, Field, TransactionRecord, TransactionType};

    use super::{
        CategoryTotal, MonthlyBalance, Summary, category_totals, format_month_labels,
        income_expense_balance, monthly_trend,
    };

    fn record(
        date: time::Date,
        category: &str,
        item: &str,
        amount: f64,
        transaction_type: TransactionType,
    ) -> TransactionRecord {
        TransactionRecord::new(
            date,
            category,
            item,
            Amount::from_input(&amount.to_string()).unwrap(),
            transaction_type,
        )
    }

    fn example_ledger() -> Vec<TransactionRecord> {
        vec![
            record(
                date!(2024 - 01 - 05),
                "Food",
                "Lunch",
                1000.0,
                TransactionType::Expense,
            ),
            record(
                date!(2024 - 01 - 10),
                "Salary",
                "-",
                5000.0,
                TransactionType::Income,
            ),
            record(
                date!(2024 - 02 - 01),
                "Food",
                "Dinner",
                500.0,
                TransactionType::Expense,
            ),
        ]
    }

    #[test]
    fn summary_of_example_ledger() {
        let got = income_expense_balance(&example_ledger());

        assert_eq!(
            got,
            Summary {
                income: 5000.0,
                expense: 1500.0,
                balance: 3500.0,
            }
        );
    }

    #[test]
    fn monthly_trend_of_example_ledger() {
        let got = monthly_trend(&example_ledger());

        assert_eq!(
            got,
            vec![
                MonthlyBalance {
                    month: date!(2024 - 01 - 01),
                    income: 5000.0,
                    expense: 1000.0,
                    balance: 4000.0,
                },
                MonthlyBalance {
                    month: date!(2024 - 02 - 01),
                    income: 0.0,
                    expense: 500.0,
                    balance: -500.0,
                },
            ]
        );
    }

    #[test]
    fn category_totals_of_example_ledger() {
        let got = category_totals(&example_ledger());

        assert_eq!(
            got,
            vec![
                CategoryTotal {
                    category: "Food".to_owned(),
                    transaction_type: TransactionType::Expense,
                    total: 1500.0,
                },
                CategoryTotal {
                    category: "Salary".to_owned(),
                    transaction_type: TransactionType::Income,
                    total: 5000.0,
                },
            ]
        );
    }

    #[test]
    fn category_totals_ignore_row_order() {
        let mut reversed = example_ledger();
        reversed.reverse();

        assert_eq!(
            category_totals(&reversed),
            category_totals(&example_ledger())
        );
    }

    #[test]
    fn same_category_is_split_by_type() {
        let ledger = vec![
            record(
                date!(2024 - 01 - 01),
                "Gift",
                "Sent",
                200.0,
                TransactionType::Expense,
            ),
            record(
                date!(2024 - 01 - 02),
                "Gift",
                "Received",
                300.0,
                TransactionType::Income,
            ),
        ];

        let got = category_totals(&ledger);

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].transaction_type, TransactionType::Expense);
        assert_eq!(got[1].transaction_type, TransactionType::Income);
    }

    #[test]
    fn invalid_amount_is_excluded_from_sums() {
        let mut ledger = example_ledger();
        ledger.push(TransactionRecord {
            amount: Field::parse("abc"),
            ..record(
                date!(2024 - 02 - 03),
                "Snacks",
                "Chips",
                0.0,
                TransactionType::Expense,
            )
        });

        let summary = income_expense_balance(&ledger);
        let totals = category_totals(&ledger);

        assert_eq!(summary.expense, 1500.0);
        assert_eq!(
            totals
                .iter()
                .find(|total| total.category == "Snacks")
                .map(|total| total.total),
            Some(0.0)
        );
        assert_eq!(monthly_trend(&ledger)[1].expense, 500.0);
    }

    #[test]
    fn invalid_date_is_excluded_from_trend_only() {
        let mut ledger = example_ledger();
        ledger.push(TransactionRecord {
            date: Field::parse("someday"),
            ..record(
                date!(2024 - 03 - 01),
                "Food",
                "Cake",
                250.0,
                TransactionType::Expense,
            )
        });

        assert_eq!(income_expense_balance(&ledger).expense, 1750.0);
        assert_eq!(monthly_trend(&ledger).len(), 2);
    }

    #[test]
    fn invalid_type_is_excluded_from_all_aggregates() {
        let mut ledger = example_ledger();
        ledger.push(TransactionRecord {
            transaction_type: Field::parse("Refund"),
            ..record(
                date!(2024 - 03 - 01),
                "Shop",
                "Return",
                999.0,
                TransactionType::Income,
            )
        });

        assert_eq!(income_expense_balance(&ledger).income, 5000.0);
        assert!(category_totals(&ledger).iter().all(|t| t.category != "Shop"));
        assert_eq!(monthly_trend(&ledger).len(), 2);
    }

    #[test]
    fn empty_ledger_has_no_aggregates() {
        assert_eq!(income_expense_balance(&[]), Summary::default());
        assert!(category_totals(&[]).is_empty());
        assert!(monthly_trend(&[]).is_empty());
    }

    #[test]
    fn month_labels_include_year() {
        let labels = format_month_labels(&monthly_trend(&example_ledger()));

        assert_eq!(labels, vec!["Jan 2024", "Feb 2024"]);
    }
}
