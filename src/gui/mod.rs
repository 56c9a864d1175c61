//! GUI module - User interface components

mod app;
mod compliance_tab;
mod cost_tab;
mod dashboard_tab;
mod exploration_tab;
mod remediation_tab;
mod widgets;

pub use app::TagScopeApp;
