use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};

use crate::endpoints;

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_RADIO_GROUP_STYLE: &str = "flex gap-2";
pub const FORM_RADIO_INPUT_STYLE: &str = "peer h-4 w-4 shrink-0 cursor-pointer \
    text-blue-600 border-gray-300 dark:border-gray-600 focus-visible:ring-2 \
    focus-visible:ring-blue-500 focus-visible:ring-offset-2";
pub const FORM_RADIO_LABEL_STYLE: &str = "flex-1 rounded border border-gray-300 \
    dark:border-gray-600 bg-white dark:bg-gray-700 px-3 py-2 text-sm font-medium \
    text-gray-700 dark:text-white cursor-pointer transition \
    hover:border-gray-400 hover:bg-gray-50 hover:text-gray-900 \
    peer-checked:border-blue-600 peer-checked:bg-blue-50 peer-checked:text-blue-700 \
    peer-checked:dark:border-blue-500 peer-checked:dark:bg-blue-600/20 \
    peer-checked:dark:text-blue-200";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js";
const HTMX_RESPONSE_TARGETS_SRC: &str =
    "https://unpkg.com/htmx-ext-response-targets@2.0.4/dist/response-targets.js";
const TAILWIND_SRC: &str = "https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
    Style(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Kakeibo" }
                link rel="icon" type="image/svg+xml" href="/static/favicon.svg";

                script src=(TAILWIND_SRC) {}
                script src=(HTMX_SRC) {}
                script src=(HTMX_RESPONSE_TARGETS_SRC) {}

                style
                {
                    r#"
                    #indicator.htmx-indicator {
                        display: none;
                    }

                    #indicator.htmx-request .htmx-indicator {
                        display: inline;
                    }

                    #indicator.htmx-request.htmx-indicator {
                        display: inline;
                    }
                    "#
                }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                        HeadElement::Style(text) => style { (text) }
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Error responses from htmx requests are swapped in here.
                div
                    id="alert-container"
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

/// A full page for an error, with a link back to the ledger.
pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        main class="flex flex-col items-center gap-4 px-4 py-16 text-center text-gray-900 dark:text-white"
        {
            h1 class="text-7xl lg:text-9xl font-extrabold text-blue-600 dark:text-blue-500"
            {
                (header)
            }

            p class="text-3xl md:text-4xl font-bold" { (description) }
            p class="max-w-screen-sm text-xl md:text-2xl" { (fix) }

            a href=(endpoints::LEDGER_VIEW) class={(BUTTON_PRIMARY_STYLE) " max-w-xs my-4"}
            {
                "Back to the ledger"
            }
        }
    );

    base(title, &[], &content)
}

/// The centred card that holds the log-in and registration forms.
pub fn auth_card(title: &str, form: &Markup) -> Markup {
    html! {
        main class="flex flex-col items-center justify-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            p class="mb-6 text-2xl font-semibold" { "家計簿 Kakeibo" }

            div class="w-full sm:max-w-md p-6 sm:p-8 space-y-6 rounded-lg shadow bg-white dark:bg-gray-800 dark:border dark:border-gray-700"
            {
                h1 class="text-xl md:text-2xl font-bold" { (title) }

                (form)
            }
        }
    }
}

/// A labelled input for the log-in and registration forms.
pub struct AuthField<'a> {
    pub label: &'a str,
    pub name: &'a str,
    pub id: &'a str,
    pub input_type: &'a str,
    pub value: &'a str,
    pub autocomplete: &'a str,
    pub error_message: Option<&'a str>,
}

impl AuthField<'_> {
    pub fn into_html(self) -> Markup {
        html! {
            div
            {
                label for=(self.id) class=(FORM_LABEL_STYLE) { (self.label) }

                input
                    type=(self.input_type)
                    name=(self.name)
                    id=(self.id)
                    autocomplete=(self.autocomplete)
                    value=(self.value)
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    autofocus[self.error_message.is_some()];

                @if let Some(error_message) = self.error_message
                {
                    p class="text-red-500 text-base" { (error_message) }
                }
            }
        }
    }
}

/// A full width submit button that shows a spinner while its htmx request is in flight.
pub fn submit_button(text: &str) -> Markup {
    html! {
        button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
        {
            span class="htmx-indicator" id="indicator"
            {
                span
                    role="status"
                    class="inline-block w-4 h-4 me-2 align-[-2px] rounded-full border-2 border-white border-t-transparent animate-spin"
                {}
            }
            (text)
        }
    }
}

/// Returns the CSS styles for adding a yen sign prefix to number inputs.
pub fn yen_input_styles() -> HeadElement {
    HeadElement::Style(PreEscaped(
        r#"
        .input-wrapper {
            position: relative;
            display: block;
        }
        .input-wrapper input[type="number"] {
            padding-left: 1.6rem;
        }
        .input-wrapper::before {
            content: '¥';
            position: absolute;
            left: 0.6rem;
            top: 50%;
            transform: translateY(-50%);
            pointer-events: none;
        }
        "#
        .to_owned(),
    ))
}

fn yen_formatter() -> Option<&'static Formatter> {
    static YEN: OnceLock<Option<Formatter>> = OnceLock::new();

    YEN.get_or_init(|| {
        Formatter::currency("¥")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(0)))
    })
    .as_ref()
}

/// Format `number` as whole yen with thousands separators, e.g. "¥1,500" or "-¥500".
pub fn format_currency(number: f64) -> String {
    let yen = number.round();

    // numfmt renders zero as a bare "0".
    if yen == 0.0 {
        return "¥0".to_owned();
    }

    let sign = if yen < 0.0 { "-" } else { "" };
    match yen_formatter() {
        Some(formatter) => format!("{sign}{}", formatter.fmt_string(yen.abs())),
        None => format!("{sign}¥{}", yen.abs()),
    }
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE) { (text) }
    )
}
