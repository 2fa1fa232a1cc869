//! The ledger page: entry form, transaction list, summaries and the trend chart.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    auth::SessionContext,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, yen_input_styles},
    ledger::{
        aggregation::{category_totals, income_expense_balance, monthly_trend},
        cards::summary_cards_view,
        charts::{LedgerChart, chart_scripts, chart_view},
        form::entry_form,
        record::TransactionRecord,
        store::LedgerStore,
        tables::{category_totals_table, monthly_trend_table, transaction_table},
    },
    navigation::NavBar,
    timezone::get_local_date,
};

/// The state needed for displaying the ledger page.
#[derive(Debug, Clone)]
pub struct LedgerPageState {
    /// The shared household ledger.
    pub ledger: Arc<Mutex<LedgerStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for LedgerPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the ledger for the logged-in user.
///
/// The ledger file is read on every request.
pub async fn get_ledger_page(
    State(state): State<LedgerPageState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::StoreLockError)?
        .load()
        .inspect_err(|error| tracing::error!("could not load the ledger: {error}"))?;

    let nav_bar = NavBar::new(endpoints::LEDGER_VIEW, &session.username);

    Ok(ledger_view(nav_bar, &session.username, entry_form(today), &ledger).into_response())
}

fn ledger_view(
    nav_bar: NavBar<'_>,
    username: &str,
    entry_form: Markup,
    ledger: &[TransactionRecord],
) -> Markup {
    let nav_bar = nav_bar.into_html();
    let mut head_elements = vec![yen_input_styles()];

    let summaries = if ledger.is_empty() {
        None
    } else {
        let trend = monthly_trend(ledger);
        let chart = LedgerChart::monthly_trend(&trend);
        let markup = html! {
            (summary_cards_view(&income_expense_balance(ledger)))

            div class="grid grid-cols-1 xl:grid-cols-2 gap-4 w-full mb-8"
            {
                (category_totals_table(&category_totals(ledger)))
                (monthly_trend_table(&trend))
            }

            section id="charts" class="w-full mb-8"
            {
                (chart_view(&chart))
            }
        };
        head_elements.extend(chart_scripts(&chart));

        Some(markup)
    };

    let content = html!(
        (nav_bar)

        div class={(PAGE_CONTAINER_STYLE) " max-w-screen-xl"}
        {
            h2 id="welcome" class="text-2xl font-bold mb-6 self-start"
            {
                "Welcome, " (username)
            }

            (entry_form)

            @if let Some(summaries) = summaries {
                (summaries)
            }

            (transaction_table(ledger))
        }
    );

    base("Ledger", &head_elements, &content)
}
