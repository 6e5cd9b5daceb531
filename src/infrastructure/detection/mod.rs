//! Detection service adapters

pub mod http;

pub use http::HttpDetectionClient;
