//! Name generators.

pub mod folder;
