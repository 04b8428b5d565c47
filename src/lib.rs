//! GDP-per-capita dashboard.
//!
//! The dataset is loaded once ([`data::loader::load_file`]), the page layout is
//! derived from it ([`layout::build_layout`]), and every control change goes
//! through the pure [`chart::render`] callback. Two front-ends sit on top: the
//! HTTP dashboard in [`server`] and the native viewer in [`app`].

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod layout;
pub mod server;
pub mod state;
pub mod ui;

pub use error::{DashboardError, Result};
