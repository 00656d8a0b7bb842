//! Outbound HTTP calls to the dealership backend and the sentiment analyzer.

pub mod rest_api;

pub use rest_api::RestApi;
