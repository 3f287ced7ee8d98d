pub mod api;
pub mod comments;
pub mod config;
pub mod feed;
pub mod logging;
pub mod model;
pub mod shutdown;
pub mod ui;
