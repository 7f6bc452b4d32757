//! External service clients.

pub mod bilibili;
pub mod cover;
