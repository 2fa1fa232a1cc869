//! The rows of the ledger and the cell types they are made of.
//!
//! Cells are read as text first and parsed second. A cell that fails to parse
//! keeps its original text so that the row can still be listed and written
//! back unchanged, but it is treated as missing by the aggregations.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The column names of the ledger CSV file, in the order they are written.
pub const LEDGER_COLUMNS: [&str; 5] = ["date", "category", "item", "amount", "type"];

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// A cell that keeps the text it was read from alongside its parsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<T> {
    raw: String,
    value: Option<T>,
}

impl<T> Field<T> {
    /// The exact text of the cell.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed value, or `None` if the text could not be parsed.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T: FromStr> Field<T> {
    /// Parse `raw`, ignoring leading and trailing whitespace.
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_owned(),
            value: raw.trim().parse().ok(),
        }
    }
}

impl<T: Display> Field<T> {
    /// Create a field from a known good value.
    pub fn new(value: T) -> Self {
        Self {
            raw: value.to_string(),
            value: Some(value),
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self {
            raw: String::new(),
            value: None,
        }
    }
}

impl<T> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de, T: FromStr> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Field::parse(&raw))
    }
}

/// A finite amount of money in yen.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    /// Parse an amount entered in the entry form.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if `raw` is not a finite number that is
    /// zero or greater.
    pub fn from_input(raw: &str) -> Result<Self, Error> {
        match raw.trim().parse::<Amount>() {
            Ok(amount) if amount.0 >= 0.0 => Ok(amount),
            _ => Err(Error::InvalidAmount(raw.to_owned())),
        }
    }

    /// The amount as a float.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(Self(number)),
            _ => Err(Error::InvalidAmount(s.to_owned())),
        }
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The calendar date of a transaction.
///
/// Read from `YYYY-MM-DD`. Anything after the first space or `T` is ignored,
/// so timestamps written by spreadsheet tools still parse. Always written as
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LedgerDate(Date);

impl LedgerDate {
    /// Wrap a date.
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    /// The wrapped date.
    pub fn date(&self) -> Date {
        self.0
    }
}

impl FromStr for LedgerDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date_part = s
            .split([' ', 'T'])
            .next()
            .ok_or_else(|| Error::InvalidDate(s.to_owned()))?;

        Date::parse(date_part, DATE_FORMAT)
            .map(Self)
            .map_err(|_| Error::InvalidDate(s.to_owned()))
    }
}

impl Display for LedgerDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.format(DATE_FORMAT) {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(std::fmt::Error),
        }
    }
}

/// Whether a transaction is money going out or coming in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money spent.
    #[serde(alias = "expense", alias = "支出")]
    Expense,
    /// Money received.
    #[serde(alias = "income", alias = "収入")]
    Income,
}

impl TransactionType {
    /// The label used in the CSV file and the entry form.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "Expense",
            TransactionType::Income => "Income",
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Expense" | "expense" | "支出" => Ok(TransactionType::Expense),
            "Income" | "income" | "収入" => Ok(TransactionType::Income),
            other => Err(format!("unknown transaction type {other:?}")),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the ledger.
///
/// Rows have no identifier. A row is identified by its position in the
/// loaded ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// When the transaction happened.
    #[serde(alias = "日付", default)]
    pub date: Field<LedgerDate>,
    /// A free text grouping such as "Food".
    #[serde(alias = "カテゴリ", default)]
    pub category: String,
    /// A free text description such as "Lunch".
    #[serde(alias = "品目", default)]
    pub item: String,
    /// How much money changed hands.
    #[serde(alias = "金額", default)]
    pub amount: Field<Amount>,
    /// Whether the money went out or came in.
    #[serde(rename = "type", alias = "区分", default)]
    pub transaction_type: Field<TransactionType>,
}

impl TransactionRecord {
    /// Create a record from validated form values.
    pub fn new(
        date: Date,
        category: &str,
        item: &str,
        amount: Amount,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            date: Field::new(LedgerDate::new(date)),
            category: category.to_owned(),
            item: item.to_owned(),
            amount: Field::new(amount),
            transaction_type: Field::new(transaction_type),
        }
    }

    /// The date, if it could be parsed.
    pub fn date(&self) -> Option<Date> {
        self.date.value().map(LedgerDate::date)
    }

    /// The amount, if it could be parsed.
    pub fn amount(&self) -> Option<f64> {
        self.amount.value().map(Amount::as_f64)
    }

    /// The transaction type, if it could be parsed.
    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type.value().copied()
    }
}
