//! Foundational data models and chemical file I/O.

pub mod io;
pub mod models;
