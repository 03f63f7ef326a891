pub mod config;
pub mod controller;
pub mod docstore;
pub mod errors;
pub mod filter;
pub mod graphql;
pub mod issue;
pub mod logging;
pub mod navigation;
pub mod notification;
pub mod prototype;
pub mod tracker_config;
pub mod views;
