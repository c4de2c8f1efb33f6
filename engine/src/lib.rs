// Dashboard engine: indicators, chart construction, price data and page rendering

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod render;
pub mod services;

pub use error::{EngineError, Result};
