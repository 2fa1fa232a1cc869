//! Metric cards for total income, total expenses and the balance.

use maud::{Markup, html};

use crate::{html::format_currency, ledger::aggregation::Summary};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

fn balance_color_class(balance: f64) -> &'static str {
    if balance >= 0.0 {
        "text-green-600 dark:text-green-400"
    } else {
        "text-red-600 dark:text-red-400"
    }
}

fn metric_card(id: &str, label: &str, amount: f64, color_class: &str) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE) aria-label=(format!("{label}: {}", format_currency(amount)))
        {
            div class="text-sm text-gray-600 dark:text-gray-400 mb-1" { (label) }
            div class={"text-3xl font-bold " (color_class)} { (format_currency(amount)) }
        }
    }
}

pub(super) fn summary_cards_view(summary: &Summary) -> Markup {
    html! {
        section class="w-full mb-8"
        {
            div class="grid grid-cols-1 sm:grid-cols-3 gap-4"
            {
                (metric_card("total-income", "Income", summary.income, "text-green-600 dark:text-green-400"))
                (metric_card("total-expense", "Expense", summary.expense, "text-red-600 dark:text-red-400"))
                (metric_card("balance", "Balance", summary.balance, balance_color_class(summary.balance)))
            }
        }
    }
}
