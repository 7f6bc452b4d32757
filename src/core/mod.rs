//! Core business logic modules.

pub mod catalog;
pub mod organizer;
pub mod pipeline;
pub mod scanner;
