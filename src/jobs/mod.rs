pub mod dashboard_refresh;
