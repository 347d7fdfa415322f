//! Top accounts page.
//!
//! Charts the 100 largest liquid HIVE balances. The database does the
//! filtering, ordering, and limiting; post-processing just picks the rows
//! apart into bars.

use super::{require_column, ChartBar, ChartData, PageSpec};
use crate::db::DataTable;
use crate::error::Result;

pub(super) const SPEC: PageSpec = PageSpec {
    title: "Top Accounts",
    intro: "Queries the accounts table of the mirror database for the 100 largest \
            liquid HIVE balances above 1000 and charts them in descending order.",
    trigger_label: "Load top accounts",
    query: "SELECT name, balance FROM accounts WHERE balance > 1000 \
            ORDER BY balance DESC LIMIT 100",
    chart_title: "Top 100 Hive accounts by balance",
    value_suffix: "HIVE",
};

/// Turns the fetched rows into bars, keeping the database's ordering.
///
/// Rows whose balance is NULL or non-numeric get no bar.
pub(super) fn build_chart(table: &DataTable) -> Result<ChartData> {
    let name_idx = require_column(table, "name")?;
    let balance_idx = require_column(table, "balance")?;

    let mut bars = Vec::with_capacity(table.row_count());
    for row in &table.rows {
        let Some(balance) = row[balance_idx].as_f64() else {
            continue;
        };
        bars.push(ChartBar {
            label: row[name_idx].to_display_string(),
            value: balance,
        });
    }

    Ok(ChartData {
        title: SPEC.chart_title.to_string(),
        value_suffix: SPEC.value_suffix,
        bars,
    })
}
