pub mod analytics_service;
pub mod chart_service;
pub mod currency_service;
pub mod ledger_service;
pub mod portfolio_service;
pub mod rate_service;
