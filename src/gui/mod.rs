//! GUI module - User interface components

mod app;
mod player_panel;

pub use app::DashboardApp;
pub use player_panel::PlayerPanel;
