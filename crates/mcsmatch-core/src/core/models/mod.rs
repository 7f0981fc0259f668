//! # Core Models Module
//!
//! Fundamental data structures for representing small molecules and the
//! atom-to-atom mappings produced by a subgraph-matching engine.
//!
//! ## Key Components
//!
//! - [`element`] - Chemical elements with symbols and standard atomic weights
//! - [`atom`] - Individual atom representation with label and coordinates
//! - [`topology`] - Bond connectivity and bond orders
//! - [`molecule`] - Flat atom/bond container with derived properties
//! - [`mapping`] - Identifier-keyed and position-keyed atom mappings

pub mod atom;
pub mod element;
pub mod mapping;
pub mod molecule;
pub mod topology;
