use crate::cli::ConvertArgs;
use crate::error::{CliError, Result};
use mcsmatch::core::io::mol::MolFile;
use mcsmatch::core::io::traits::ChemicalFile;
use mcsmatch::report::config::ReportConfig;
use mcsmatch::report::writer::{OutputFormat, ResultWriter};
use tracing::{debug, info};

pub fn run(args: ConvertArgs) -> Result<()> {
    let format: OutputFormat = args.format.parse()?;

    info!("Reading molecule from '{}'.", args.input.display());
    let molecule = MolFile::read_from_path(&args.input).map_err(|source| CliError::FileParsing {
        path: args.input.clone(),
        source,
    })?;
    debug!(
        "Parsed '{}': {} atoms, {} bonds.",
        molecule.name(),
        molecule.atom_count(),
        molecule.bond_count()
    );

    let mut writer = ResultWriter::new(ReportConfig::default());
    writer.write_mol(format, &molecule, &args.output)?;
    info!("Wrote {:?} output to '{}'.", format, args.output);
    Ok(())
}
