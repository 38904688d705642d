pub mod catalog;
pub mod config;
pub mod loader;
pub mod output;
pub mod ratings;
pub mod render;
pub mod timeline;
