//! The navigation bar shown at the top of every page for a logged-in user.

use maud::{Markup, html};

use crate::endpoints;

const LINK_STYLE: &str = "block py-2 px-3 rounded-sm md:p-0 text-gray-900 \
    hover:bg-gray-100 md:hover:bg-transparent md:hover:text-blue-700 \
    dark:text-white dark:hover:bg-gray-700 md:dark:hover:bg-transparent \
    md:dark:hover:text-blue-500";
const CURRENT_LINK_STYLE: &str = "block py-2 px-3 rounded-sm md:p-0 text-white \
    bg-blue-700 md:bg-transparent md:text-blue-700 dark:text-white \
    md:dark:text-blue-500";

/// The pages linked from the navigation bar, as `(url, title)`.
const LINKS: [(&str, &str); 2] = [
    (endpoints::LEDGER_VIEW, "Ledger"),
    (endpoints::LOG_OUT, "Log out"),
];

pub struct NavBar<'a> {
    current_page: &'a str,
    username: &'a str,
}

impl<'a> NavBar<'a> {
    /// The navigation bar for `username` on the page at `current_page`.
    ///
    /// The link to `current_page`, if there is one, is highlighted.
    pub fn new(current_page: &'a str, username: &'a str) -> Self {
        Self {
            current_page,
            username,
        }
    }

    pub fn into_html(self) -> Markup {
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a href=(endpoints::ROOT) class="text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "Kakeibo"
                    }

                    div class="flex items-center gap-6"
                    {
                        span id="signed-in-user" class="text-sm text-gray-600 dark:text-gray-400"
                        {
                            "Signed in as " strong { (self.username) }
                        }

                        ul class="font-medium flex flex-row space-x-4 md:space-x-8"
                        {
                            @for (url, title) in LINKS {
                                @let is_current = url == self.current_page;
                                li
                                {
                                    a
                                        href=(url)
                                        class=(if is_current { CURRENT_LINK_STYLE } else { LINK_STYLE })
                                        aria-current=[is_current.then_some("page")]
                                    {
                                        (title)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::endpoints;

    use super::NavBar;

    fn render(current_page: &str) -> Html {
        Html::parse_fragment(&NavBar::new(current_page, "alice").into_html().into_string())
    }

    fn current_links(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("a[aria-current=page]").unwrap())
            .map(|link| link.value().attr("href").unwrap_or_default().to_owned())
            .collect()
    }

    #[test]
    fn ledger_link_is_current_on_ledger_page() {
        assert_eq!(current_links(&render(endpoints::LEDGER_VIEW)), [endpoints::LEDGER_VIEW]);
    }

    #[test]
    fn no_link_is_current_elsewhere() {
        for page in [endpoints::ROOT, endpoints::INTERNAL_ERROR_VIEW, "/nowhere"] {
            assert!(current_links(&render(page)).is_empty(), "page {page}");
        }
    }

    #[test]
    fn links_to_ledger_and_log_out() {
        let html = render(endpoints::LEDGER_VIEW);

        let hrefs: Vec<_> = html
            .select(&Selector::parse("ul a").unwrap())
            .filter_map(|link| link.value().attr("href"))
            .collect();

        assert_eq!(hrefs, [endpoints::LEDGER_VIEW, endpoints::LOG_OUT]);
    }

    #[test]
    fn shows_signed_in_user() {
        let html = render(endpoints::LEDGER_VIEW);

        let text = html
            .select(&Selector::parse("#signed-in-user").unwrap())
            .next()
            .expect("No signed in user found")
            .text()
            .collect::<String>();

        assert_eq!(text, "Signed in as alice");
    }
}
