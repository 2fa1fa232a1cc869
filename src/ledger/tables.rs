//! Table views for the transaction list and the aggregated ledger data.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    html::{BUTTON_DELETE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    ledger::{
        aggregation::{CategoryTotal, MonthlyBalance, format_month_labels},
        record::{Amount, Field, TransactionRecord},
    },
};

/// The max number of graphemes to display in the item column before
/// truncating and displaying ellipses.
const MAX_ITEM_GRAPHEMES: usize = 32;

const TABLE_STYLE: &str = "w-full text-sm text-left text-gray-500 dark:text-gray-400";
const TABLE_CONTAINER_STYLE: &str = "overflow-x-auto rounded-lg shadow";
const SECTION_HEADER_STYLE: &str = "text-xl font-semibold mb-4";
const AMOUNT_CELL_STYLE: &str = "px-6 py-4 text-right whitespace-nowrap";

fn amount_color_class(amount: f64) -> &'static str {
    if amount >= 0.0 {
        "text-green-600 dark:text-green-400"
    } else {
        "text-red-600 dark:text-red-400"
    }
}

/// Shorten `item` to at most [MAX_ITEM_GRAPHEMES] graphemes.
///
/// Returns the text to display and, if it was shortened, the full text for the
/// cell's title.
fn format_item(item: &str) -> (String, Option<&str>) {
    let item_length = item.graphemes(true).count();

    if item_length <= MAX_ITEM_GRAPHEMES {
        (item.to_owned(), None)
    } else {
        let truncated: String = item.graphemes(true).take(MAX_ITEM_GRAPHEMES - 3).collect();
        let truncated = truncated + "...";
        (truncated, Some(item))
    }
}

/// The parsed amount as yen, or the text from the file if it is not a number.
fn format_amount(amount: &Field<Amount>) -> String {
    match amount.value() {
        Some(amount) => format_currency(amount.as_f64()),
        None => amount.raw().to_owned(),
    }
}

/// Every row of the ledger in file order, each with a delete button.
///
/// Rows with cells that could not be parsed are shown with the text from the
/// file.
pub(super) fn transaction_table(ledger: &[TransactionRecord]) -> Markup {
    html! {
        section id="transactions" class="w-full mb-8"
        {
            h3 class=(SECTION_HEADER_STYLE) { "Transactions" }

            @if ledger.is_empty() {
                p class="text-gray-600 dark:text-gray-400" {
                    "No transactions yet. Record your first one with the form above."
                }
            } @else {
                div class=(TABLE_CONTAINER_STYLE)
                {
                    table class=(TABLE_STYLE)
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Item" }
                                th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                                th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                            }
                        }

                        tbody
                        {
                            @for (index, record) in ledger.iter().enumerate() {
                                (transaction_row(index, record))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(index: usize, record: &TransactionRecord) -> Markup {
    let (item, full_item) = format_item(&record.item);

    html! {
        tr class=(TABLE_ROW_STYLE) data-index=(index)
        {
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} { (record.date.raw()) }
            td class=(TABLE_CELL_STYLE) { (record.category) }
            td class=(TABLE_CELL_STYLE) title=[full_item] { (item) }
            td class=(AMOUNT_CELL_STYLE) { (format_amount(&record.amount)) }
            td class=(TABLE_CELL_STYLE) { (record.transaction_type.raw()) }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(endpoints::transaction_url(index))
                    hx-confirm={
                        "Are you sure you want to delete '" (record.item) "' on "
                        (record.date.raw()) "?"
                    }
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

/// The sum of the amounts for each category, split by transaction type.
pub(super) fn category_totals_table(totals: &[CategoryTotal]) -> Markup {
    html! {
        section id="category-totals" class="w-full"
        {
            h3 class=(SECTION_HEADER_STYLE) { "Totals by Category" }

            div class=(TABLE_CONTAINER_STYLE)
            {
                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Total" }
                        }
                    }

                    tbody
                    {
                        @for total in totals {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"} {
                                    (total.category)
                                }
                                td class=(TABLE_CELL_STYLE) { (total.transaction_type) }
                                td class=(AMOUNT_CELL_STYLE) { (format_currency(total.total)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Income, expenses and balance for each month in chronological order.
pub(super) fn monthly_trend_table(trend: &[MonthlyBalance]) -> Markup {
    let labels = format_month_labels(trend);

    html! {
        section id="monthly-trend" class="w-full"
        {
            h3 class=(SECTION_HEADER_STYLE) { "Monthly Balance" }

            div class=(TABLE_CONTAINER_STYLE)
            {
                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Month" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Income" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Expense" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Balance" }
                        }
                    }

                    tbody
                    {
                        @for (label, month) in labels.iter().zip(trend) {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white whitespace-nowrap"} {
                                    (label)
                                }
                                td class=(AMOUNT_CELL_STYLE) { (format_currency(month.income)) }
                                td class=(AMOUNT_CELL_STYLE) { (format_currency(month.expense)) }
                                td class={(AMOUNT_CELL_STYLE) " " (amount_color_class(month.balance))} {
                                    (format_currency(month.balance))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
