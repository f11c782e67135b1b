//! Interactive search surface
//!
//! A ratatui front-end over the orchestrator in [`app`]: search bar on
//! top, category tabs, result rows, recent/trending when idle.

pub mod app;
pub mod input;
pub mod results;
pub mod style;
pub mod ui;

pub use app::{App, BgMessage, Phase};
