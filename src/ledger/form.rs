use maud::{Markup, html};
use time::Date;

use crate::{
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, submit_button,
    },
    ledger::record::TransactionType,
};

fn transaction_type_radio(transaction_type: TransactionType, is_checked: bool) -> Markup {
    let id = format!(
        "transaction-type-{}",
        transaction_type.as_str().to_lowercase()
    );

    html! {
        div class="flex items-center gap-3"
        {
            input
                name="type"
                id=(id)
                type="radio"
                value=(transaction_type.as_str())
                checked[is_checked]
                required
                tabindex="0"
                class=(FORM_RADIO_INPUT_STYLE);

            label for=(id) class=(FORM_RADIO_LABEL_STYLE)
            {
                (transaction_type.as_str())
            }
        }
    }
}

/// The form for recording a transaction. The date defaults to `today`.
pub(super) fn entry_form(today: Date) -> Markup {
    html! {
        section id="entry-form" class="w-full mb-8"
        {
            h3 class="text-xl font-semibold mb-4" { "Record a transaction" }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                hx-disabled-elt="#submit-button"
                class="grid grid-cols-1 md:grid-cols-2 gap-4
                    bg-white dark:bg-gray-800 p-4 rounded-lg shadow"
            {
                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        value=(today)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    input
                        name="category"
                        id="category"
                        type="text"
                        placeholder="Food"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="item" class=(FORM_LABEL_STYLE) { "Item" }

                    input
                        name="item"
                        id="item"
                        type="text"
                        placeholder="Lunch"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    div class="input-wrapper w-full"
                    {
                        input
                            name="amount"
                            id="amount"
                            type="number"
                            min="0"
                            step="any"
                            placeholder="0"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                fieldset class="space-y-2 md:col-span-2"
                {
                    legend class=(FORM_LABEL_STYLE) { "Type" }

                    div class=(FORM_RADIO_GROUP_STYLE)
                    {
                        (transaction_type_radio(TransactionType::Expense, true))
                        (transaction_type_radio(TransactionType::Income, false))
                    }
                }

                div class="md:col-span-2" { (submit_button("Add")) }
            }
        }
    }
}
