//! `Jobboard`: terminal job tracker library.

pub mod app;
pub mod config;
pub mod controller;
pub mod state;
pub mod store;
pub mod ui;
pub mod view;
