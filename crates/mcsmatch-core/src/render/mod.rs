//! # Render Module
//!
//! Rasterised depictions of match results. Molecules are projected onto the
//! x/y plane and drawn as bond lines and atom discs, with mapped atoms
//! highlighted. Two compositions exist: side-by-side query/target panels
//! (accumulated in a [`builder::DepictionBuilder`] and stacked into one
//! image) and the hub-and-rim wheel that places one reference molecule at
//! the centre of its comparison partners.

pub mod builder;
pub(crate) mod depict;
