//! Shared models and utilities

pub mod cancel;
pub mod models;

pub use cancel::CancelFlag;
