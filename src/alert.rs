//! Error alerts that htmx swaps into the page's alert container.

use maud::{Markup, html};

/// An error message with a longer explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    pub fn into_html(self) -> Markup {
        html! {
            div
                role="alert"
                class="flex items-start gap-3 p-4 mb-4 text-sm rounded-lg shadow-lg
                    text-red-800 bg-red-50 border border-red-300
                    dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="mt-1" { (self.details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="font-bold leading-none"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn renders_message_and_details() {
        let html = Alert {
            message: "Invalid amount".to_owned(),
            details: "Enter a number.".to_owned(),
        }
        .into_html()
        .into_string();

        let fragment = Html::parse_fragment(&html);
        let paragraphs = fragment
            .select(&Selector::parse("div[role=alert] p").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>();

        assert_eq!(paragraphs, vec!["Invalid amount", "Enter a number."]);
    }

    #[test]
    fn omits_empty_details() {
        let html = Alert {
            message: "Something went wrong".to_owned(),
            details: String::new(),
        }
        .into_html()
        .into_string();

        let fragment = Html::parse_fragment(&html);
        let count = fragment.select(&Selector::parse("p").unwrap()).count();

        assert_eq!(count, 1);
    }
}
