//! Dashboard pages.
//!
//! Each page pairs a fixed SQL query with a post-processing step that turns
//! the fetched table into bar chart data. Pages own no state; the TUI holds
//! the per-page view and triggers queries on demand.

mod community_power;
mod top_accounts;

use crate::db::DataTable;
use crate::error::{HivedashError, Result};

/// Identifies one of the dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageId {
    TopAccounts,
    CommunityPower,
}

impl PageId {
    /// All pages in display order.
    pub const ALL: [PageId; 2] = [PageId::TopAccounts, PageId::CommunityPower];

    /// Position of this page in `ALL`.
    pub fn index(&self) -> usize {
        match self {
            PageId::TopAccounts => 0,
            PageId::CommunityPower => 1,
        }
    }

    /// Static description of the page.
    pub fn spec(&self) -> &'static PageSpec {
        match self {
            PageId::TopAccounts => &top_accounts::SPEC,
            PageId::CommunityPower => &community_power::SPEC,
        }
    }

    /// True if post-processing needs the HIVE-per-MVEST chain factor.
    pub fn needs_hive_per_mvest(&self) -> bool {
        matches!(self, PageId::CommunityPower)
    }

    /// Builds the chart for this page from a fetched table.
    ///
    /// `hive_per_mvest` is required by pages that convert vesting shares;
    /// passing `None` to such a page is an error so a missing factor
    /// degrades into the no-result state instead of charting garbage.
    pub fn build_chart(&self, table: &DataTable, hive_per_mvest: Option<f64>) -> Result<ChartData> {
        match self {
            PageId::TopAccounts => top_accounts::build_chart(table),
            PageId::CommunityPower => {
                let factor = hive_per_mvest.ok_or_else(|| {
                    HivedashError::internal("HIVE per MVEST factor unavailable")
                })?;
                community_power::build_chart(table, factor)
            }
        }
    }
}

/// Static description of a page: what it shows and the query it runs.
#[derive(Debug)]
pub struct PageSpec {
    /// Tab label.
    pub title: &'static str,

    /// Short explanation shown above the chart.
    pub intro: &'static str,

    /// Hint shown while the page has not been loaded yet.
    pub trigger_label: &'static str,

    /// The fixed SQL query this page runs.
    pub query: &'static str,

    /// Chart heading.
    pub chart_title: &'static str,

    /// Unit suffix for bar values.
    pub value_suffix: &'static str,
}

/// Data ready to render as a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// Chart heading.
    pub title: String,

    /// Unit suffix for bar values.
    pub value_suffix: &'static str,

    /// Bars in display order, largest first where the page sorts.
    pub bars: Vec<ChartBar>,
}

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
}

/// Looks up a required column, erroring with its name when absent.
fn require_column(table: &DataTable, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| HivedashError::internal(format!("query result is missing column '{name}'")))
}
