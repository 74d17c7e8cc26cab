use crate::views::stat::StatCard;

/// Data required to render the dashboard.
#[derive(Debug)]
pub struct DashboardPageData {
    /// Summary cards in display order.
    pub stats: Vec<StatCard>,
}
