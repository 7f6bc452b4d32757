//! Video Cataloger Library
//!
//! Organizes downloaded video files into per-video folders, looks them up on
//! Bilibili and records them in a spreadsheet catalog.

pub mod cli;
pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
