//! The API endpoints URIs.

/// The route for searching and paging through records.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for the sales totals of a month.
pub const STATISTICS: &str = "/api/statistics";
/// The route for the price histogram of a month.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for the category breakdown of a month.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The route for every monthly report in one response.
pub const COMBINED: &str = "/api/combined";
