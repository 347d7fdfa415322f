//! Community power page.
//!
//! Fetches one row per community subscription with the subscriber's vesting
//! shares, then aggregates client-side: shares are summed per community and
//! converted to Hive Power with the chain factor.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::{require_column, ChartBar, ChartData, PageSpec};
use crate::db::DataTable;
use crate::error::Result;
use crate::hive;

pub(super) const SPEC: PageSpec = PageSpec {
    title: "Community Power",
    intro: "Joins community subscriptions with account vesting shares, sums the \
            shares per community, and charts the totals converted to Hive Power.",
    trigger_label: "Load community power",
    query: "SELECT c.title AS title, a.vesting_shares AS vesting_shares \
            FROM subscribers s \
            JOIN communities c ON c.name = s.community \
            JOIN accounts a ON a.name = s.account",
    chart_title: "Hive Power by community",
    value_suffix: "HP",
};

/// Sums vesting shares per community and converts each total to HP.
///
/// NULL shares contribute nothing. Communities are sorted by descending
/// power, ties broken by title so the chart is stable.
pub(super) fn build_chart(table: &DataTable, hive_per_mvest: f64) -> Result<ChartData> {
    let title_idx = require_column(table, "title")?;
    let vests_idx = require_column(table, "vesting_shares")?;

    let mut totals: HashMap<String, f64> = HashMap::new();
    for row in &table.rows {
        let Some(vests) = row[vests_idx].as_f64() else {
            continue;
        };
        let title = row[title_idx].to_display_string();
        *totals.entry(title).or_insert(0.0) += vests;
    }

    let mut bars: Vec<ChartBar> = totals
        .into_iter()
        .map(|(label, vests)| ChartBar {
            label,
            value: hive::vests_to_hp(vests, hive_per_mvest),
        })
        .collect();

    bars.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });

    Ok(ChartData {
        title: SPEC.chart_title.to_string(),
        value_suffix: SPEC.value_suffix,
        bars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ColumnInfo, Value};

    fn subscription_table(rows: Vec<(&str, Value)>) -> DataTable {
        DataTable::with_data(
            vec![
                ColumnInfo::new("title", "TEXT"),
                ColumnInfo::new("vesting_shares", "REAL"),
            ],
            rows.into_iter()
                .map(|(title, vests)| vec![Value::from(title), vests])
                .collect(),
        )
    }

    #[test]
    fn test_shares_are_summed_per_community_and_converted() {
        // 600 HIVE per MVEST; shares are in raw vests.
        let factor = 600.0;
        let table = subscription_table(vec![
            ("Photography", Value::Float(2_000_000.0)),
            ("Gaming", Value::Float(500_000.0)),
            ("Photography", Value::Float(1_000_000.0)),
            ("Music", Value::Float(4_000_000.0)),
        ]);

        let chart = build_chart(&table, factor).unwrap();

        assert_eq!(chart.bars.len(), 3);
        // Music: 4M vests -> 2400 HP, Photography: 3M -> 1800, Gaming: 0.5M -> 300.
        assert_eq!(chart.bars[0].label, "Music");
        assert!((chart.bars[0].value - 2400.0).abs() < 1e-6);
        assert_eq!(chart.bars[1].label, "Photography");
        assert!((chart.bars[1].value - 1800.0).abs() < 1e-6);
        assert_eq!(chart.bars[2].label, "Gaming");
        assert!((chart.bars[2].value - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_null_shares_contribute_nothing() {
        let table = subscription_table(vec![
            ("Gaming", Value::Float(1_000_000.0)),
            ("Gaming", Value::Null),
        ]);

        let chart = build_chart(&table, 500.0).unwrap();
        assert_eq!(chart.bars.len(), 1);
        assert!((chart.bars[0].value - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_ties_sorted_by_title() {
        let table = subscription_table(vec![
            ("Zebra", Value::Float(1_000_000.0)),
            ("Alpha", Value::Float(1_000_000.0)),
        ]);

        let chart = build_chart(&table, 500.0).unwrap();
        assert_eq!(chart.bars[0].label, "Alpha");
        assert_eq!(chart.bars[1].label, "Zebra");
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let table = DataTable::with_data(
            vec![ColumnInfo::new("title", "TEXT")],
            vec![vec![Value::String("Gaming".to_string())]],
        );
        let err = build_chart(&table, 500.0).unwrap_err();
        assert!(err.to_string().contains("vesting_shares"));
    }

    #[test]
    fn test_empty_table_builds_empty_chart() {
        let chart = build_chart(&subscription_table(Vec::new()), 500.0).unwrap();
        assert!(chart.bars.is_empty());
        assert_eq!(chart.title, "Hive Power by community");
    }
}
