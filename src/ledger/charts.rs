//! The monthly balance trend chart.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered with an HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Line, bar::Bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    html::HeadElement,
    ledger::aggregation::{MonthlyBalance, format_month_labels},
};

const ECHARTS_SRC: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// A chart with its HTML container ID and ECharts configuration.
pub(super) struct LedgerChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

impl LedgerChart {
    pub(super) fn monthly_trend(trend: &[MonthlyBalance]) -> Self {
        Self {
            id: "monthly-trend-chart",
            options: monthly_trend_chart(trend).to_string(),
        }
    }
}

pub(super) fn chart_view(chart: &LedgerChart) -> Markup {
    html!(
        div
            id=(chart.id)
            class="min-h-[380px] w-full rounded dark:bg-gray-100"
        {}
    )
}

/// The script tags that load ECharts and draw `chart` once the page has loaded.
pub(super) fn chart_scripts(chart: &LedgerChart) -> [HeadElement; 2] {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{}");
            const chart = echarts.init(chartDom);
            const option = {};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#,
        chart.id, chart.options
    );

    [
        HeadElement::ScriptLink(ECHARTS_SRC.to_owned()),
        HeadElement::ScriptSource(PreEscaped(script)),
    ]
}

fn monthly_trend_chart(trend: &[MonthlyBalance]) -> Chart {
    let labels = format_month_labels(trend);
    let income: Vec<f64> = trend.iter().map(|month| month.income).collect();
    let expense: Vec<f64> = trend.iter().map(|month| month.expense).collect();
    let balance: Vec<f64> = trend.iter().map(|month| month.balance).collect();

    Chart::new()
        .title(Title::new().text("Monthly Balance"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(60)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Income").data(income))
        .series(Bar::new().name("Expense").data(expense))
        .series(Line::new().name("Balance").data(balance))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('ja-JP', {
              style: 'currency',
              currency: 'JPY'
            });
            return (number || number === 0) ? currencyFormatter.format(number) : \"-\";",
    )
}

fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::ledger::aggregation::MonthlyBalance;

    use super::LedgerChart;

    #[test]
    fn chart_options_include_month_labels_and_series() {
        let trend = [
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
        ];

        let chart = LedgerChart::monthly_trend(&trend);

        assert_eq!(chart.id, "monthly-trend-chart");
        for want in ["Jan 2024", "Feb 2024", "Income", "Expense", "Balance", "4000", "-500"] {
            assert!(
                chart.options.contains(want),
                "want chart options to contain {want:?}, got {}",
                chart.options
            );
        }
    }
}
