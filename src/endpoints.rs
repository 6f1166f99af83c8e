//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page for one month.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for replacing the stored records with the seed data.
pub const INITIALIZE: &str = "/api/initialize";
/// The route for searching and paging through records.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for a month's sales totals.
pub const STATISTICS: &str = "/api/statistics";
/// The route for a month's price range counts.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for a month's category counts.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The route for all of a month's views in one response.
pub const COMBINED: &str = "/api/combined";
