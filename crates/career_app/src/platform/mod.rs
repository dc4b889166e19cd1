pub mod app;
pub mod cli;
mod config;
mod effects;
mod input;
mod logging;
mod ui;
