//! # mcsmatch Core Library
//!
//! The result-reporting layer of a molecular maximum-common-subgraph (MCS)
//! comparison pipeline. The matching engine itself is an external collaborator;
//! this library takes its raw output (molecules, atom mappings, match
//! statistics) and turns it into persistent artifacts.
//!
//! ## Architecture
//!
//! The library is split into three layers with a strict downward dependency
//! direction:
//!
//! - **[`core`]: The Foundation.** Stateless molecular data models
//!   (`Molecule`, `AtomMapping`) and chemical file I/O (MDL molfile V2000,
//!   SMILES line notation).
//!
//! - **[`report`]: The Writer.** Session-scoped output streams for
//!   graph-score logs, match logs and tab-separated descriptor tables, plus
//!   the derived similarity metrics (Cosine, Soergel) computed from raw
//!   match counts.
//!
//! - **[`render`]: The Depictions.** Rasterised side-by-side and hub-and-rim
//!   depictions of matched molecule pairs, written as PNG.

pub mod core;
pub mod render;
pub mod report;
