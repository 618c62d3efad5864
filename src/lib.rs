//! An in-memory car directory served over a small REST API.
//!
//! [`service::CarService`] holds the cars; [`api::create_router`] exposes it
//! over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use error::{Error, Result};
