pub mod app;
pub mod cmd;
pub mod config;
pub mod error;
pub mod features;
pub mod kube;
pub mod logging;
pub mod ui;
