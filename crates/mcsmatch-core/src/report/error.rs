use crate::core::io::mol::MolError;
use crate::core::io::smiles::SmilesError;
use crate::render::builder::RenderError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Molfile serialization failed: {0}")]
    Mol(#[from] MolError),

    #[error("SMILES serialization failed: {0}")]
    Smiles(#[from] SmilesError),

    #[error("Depiction rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Invalid session state: {0}")]
    State(&'static str),

    #[error("Unknown output format tag: '{0}'")]
    UnknownFormat(String),
}
