//! UI layer for the dashboard window: app shell and user cards.

pub mod app;
pub mod card;

pub use app::DashboardApp;
