//! Provides input/output functionality for chemical file formats.
//!
//! Two serializations are supported: the MDL molfile V2000 connection table
//! (read and write) and SMILES line notation (write only). A unified
//! trait-based interface covers formats with both directions; the SMILES
//! writer is a one-way free-function module.

pub mod mol;
pub mod smiles;
pub mod traits;
