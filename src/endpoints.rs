//! The API endpoints URIs.

/// The route for listing a page of a month's transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for a month's sale totals.
pub const STATISTICS: &str = "/statistics";
/// The route for a month's price histogram.
pub const BAR_CHART: &str = "/bar-chart";
/// The route for a month's transaction count per category.
pub const PIE_CHART: &str = "/pie-chart";
/// The route for the statistics, bar chart and pie chart in one response.
pub const COMBINED_DATA: &str = "/combined-data";
/// The route that reloads the database from the seed snapshot.
pub const INITIALIZE: &str = "/initialize";
/// The route for checking that the server is up.
pub const HEALTH: &str = "/health";
