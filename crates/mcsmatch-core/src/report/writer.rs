use super::config::ReportConfig;
use super::error::{ReportError, Result};
use super::metrics::{DerivedMetrics, MatchStatistics, format_score};
use super::session::{RecordLayout, Session, SessionMode};
use crate::core::io::mol::MolFile;
use crate::core::io::smiles;
use crate::core::io::traits::ChemicalFile;
use crate::core::models::mapping::{AtomMapping, IndexMapping};
use crate::core::models::molecule::Molecule;
use crate::render::builder::{DepictionBuilder, render_hub_wheel};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;

/// The chemical output formats the export dispatch can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// MDL molfile V2000 connection table.
    Mol,
    /// SMILES line notation.
    Smiles,
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    /// Parses a format tag. Unrecognized tags fail loudly instead of
    /// silently dropping the write.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mol" => Ok(Self::Mol),
            "smi" | "smiles" => Ok(Self::Smiles),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Path literal that redirects a molecule export to the default output sink.
pub const DEFAULT_DESTINATION: &str = "--";

/// Writes the results of an MCS comparison run to text files and images.
///
/// The writer owns at most one open [`Session`] at a time. All session
/// streams are acquired by [`start_session`](Self::start_session) and
/// released together by [`close_session`](Self::close_session); any result
/// write outside that window is a state error. Depictions accumulate in
/// the owned [`DepictionBuilder`] independently of the session streams.
pub struct ResultWriter {
    config: ReportConfig,
    session: Option<Session>,
    depictions: DepictionBuilder,
    output_sink: Option<Box<dyn Write>>,
}

impl ResultWriter {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            session: None,
            depictions: DepictionBuilder::new(),
            output_sink: None,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// The record layout selected by the configuration.
    pub fn layout(&self) -> RecordLayout {
        if self.config.append_mode {
            RecordLayout::Tabular
        } else {
            RecordLayout::Verbose
        }
    }

    /// Installs a pre-opened sink for [`DEFAULT_DESTINATION`] exports.
    /// Without one, such exports go to standard output.
    pub fn set_output_sink(&mut self, sink: Box<dyn Write>) {
        self.output_sink = Some(sink);
    }

    /// Opens the three output streams.
    ///
    /// # Errors
    ///
    /// Returns a state error if a session is already open, or an I/O error
    /// if any stream cannot be created.
    pub fn start_session(&mut self, mode: SessionMode, extension: &str) -> Result<()> {
        if self.session.is_some() {
            return Err(ReportError::State(
                "session already started; close it before starting another",
            ));
        }
        self.session = Some(Session::open(&self.config, mode, extension)?);
        Ok(())
    }

    /// Flushes and closes the three output streams.
    ///
    /// # Errors
    ///
    /// Returns a state error if no session is open.
    pub fn close_session(&mut self) -> Result<()> {
        match self.session.take() {
            Some(session) => session.close(),
            None => Err(ReportError::State("no session to close")),
        }
    }

    fn session_mut(&mut self) -> Result<&mut Session> {
        self.session
            .as_mut()
            .ok_or(ReportError::State("session not started"))
    }

    /// Appends one line to the graph-score log:
    /// `query<TAB>target<TAB>tanimoto`.
    pub fn write_graph_scores(&mut self, query: &str, target: &str, tanimoto: f64) -> Result<()> {
        let session = self.session_mut()?;
        writeln!(
            session.graph,
            "{}\t{}\t{}",
            query,
            target,
            format_score(tanimoto)
        )?;
        Ok(())
    }

    /// Writes one descriptor record for a comparison.
    ///
    /// Cosine and Soergel are derived here from the molecule sizes; a
    /// zero-size match forces all four metrics to zero (see
    /// [`DerivedMetrics::derive`]). In the tabular layout all three
    /// session streams are flushed afterwards so partial runs stay
    /// tail-able.
    pub fn write_results(
        &mut self,
        query: &Molecule,
        target: &Molecule,
        stats: &MatchStatistics,
    ) -> Result<()> {
        let metrics = DerivedMetrics::derive(
            stats.tanimoto,
            stats.euclidean,
            stats.atoms_matched,
            query.atom_count(),
            target.atom_count(),
        );
        let counts = (
            query.atom_count(),
            target.atom_count(),
            query.bond_count(),
            target.bond_count(),
        );
        let layout = self.layout();
        let session = self.session_mut()?;
        let d = &mut session.descriptors;

        match layout {
            RecordLayout::Verbose => {
                write!(d, "{}\t{} ", stats.query_path, stats.target_path)?;
                write!(d, "Tanimoto (Sim.)= {} ", format_score(metrics.tanimoto))?;
                write!(d, "Euclidian (Dist.)= {} ", format_score(metrics.euclidean))?;
                write!(d, "Cosine (Sim.)= {} ", format_score(metrics.cosine))?;
                write!(d, "Soergel (Dist.)= {} ", format_score(metrics.soergel))?;
                write!(d, "Query (Atom Count)= {} ", counts.0)?;
                write!(d, "Target (Atom Count)= {} ", counts.1)?;
                write!(d, "Query (Bond Count)= {} ", counts.2)?;
                write!(d, "Target (Bond Count)= {} ", counts.3)?;
                write!(d, "Match (Size)= {} ", stats.atoms_matched)?;
                writeln!(d, "Time (ms):{} ", stats.elapsed_ms)?;
            }
            RecordLayout::Tabular => {
                write!(d, "{}\t{}\t", stats.query_path, stats.target_path)?;
                write!(d, "{}\t", format_score(metrics.tanimoto))?;
                write!(d, "{}\t", format_score(metrics.euclidean))?;
                write!(d, "{}\t", format_score(metrics.cosine))?;
                write!(d, "{}\t", format_score(metrics.soergel))?;
                write!(d, "{}\t{}\t{}\t{}\t", counts.0, counts.1, counts.2, counts.3)?;
                write!(d, "{}\t", stats.atoms_matched)?;
                writeln!(d, "Time (ms):{} ", stats.elapsed_ms)?;
                session.flush_all()?;
            }
        }
        Ok(())
    }

    /// Writes the three-line header of a match-log section.
    pub fn write_header(&mut self, query: &str, target: &str, max_matched: usize) -> Result<()> {
        let session = self.session_mut()?;
        writeln!(session.matches, "Molecule 1=\t{}", query)?;
        writeln!(session.matches, "Molecule 2=\t{}", target)?;
        writeln!(session.matches, "Max atoms matched=\t{}", max_matched)?;
        Ok(())
    }

    /// Appends one complete solution block to the match log: a blank line,
    /// the solution index, one label pair per mapped atom, a blank line and
    /// the `//` record separator.
    pub fn write_mapping(&mut self, solution_index: usize, mapping: &AtomMapping) -> Result<()> {
        let session = self.session_mut()?;
        let m = &mut session.matches;
        writeln!(m)?;
        writeln!(m, "Solution=\t{}", solution_index)?;
        for (query_label, target_label) in mapping.iter() {
            writeln!(m, "{}\t{}", query_label, target_label)?;
        }
        writeln!(m)?;
        writeln!(m, "//")?;
        Ok(())
    }

    /// Writes the best-mapping section: label pairs, a separator banner,
    /// the reference names and match size, then the position-keyed mapping.
    ///
    /// Positions are stored 0-based and rendered 1-based; the shift is a
    /// report convention, applied only here.
    pub fn write_best_mapping(
        &mut self,
        atoms_matched: usize,
        mapping: &AtomMapping,
        positions: &IndexMapping,
        query_ref: &str,
        target_ref: &str,
    ) -> Result<()> {
        let session = self.session_mut()?;
        let m = &mut session.matches;
        for (query_label, target_label) in mapping.iter() {
            writeln!(m, "{}\t{}", query_label, target_label)?;
        }
        writeln!(m)?;
        writeln!(m, "------------------------------------")?;
        writeln!(m, "Query ={}", query_ref)?;
        writeln!(m, "Target = {}", target_ref)?;
        writeln!(m, "Max atoms matched=\t{}", atoms_matched)?;
        for (query_index, target_index) in positions.iter() {
            writeln!(m, "{}\t{}", query_index + 1, target_index + 1)?;
        }
        Ok(())
    }

    /// Builds the score annotation used to caption pair depictions.
    pub fn make_label(&self, tanimoto: f64, stereo: f64) -> String {
        format!(
            "Scores [Tanimoto: {}, Stereo: {}]",
            format_score(tanimoto),
            format_score(stereo)
        )
    }

    /// Serializes a molecule in the given format.
    ///
    /// A `filepath` of [`DEFAULT_DESTINATION`] writes to the configured
    /// output sink (or standard output if none is installed). The
    /// destination is flushed and consumed by this call; a configured sink
    /// is gone afterwards.
    pub fn write_mol(
        &mut self,
        format: OutputFormat,
        molecule: &Molecule,
        filepath: &str,
    ) -> Result<()> {
        if filepath == DEFAULT_DESTINATION {
            match self.output_sink.take() {
                Some(mut sink) => {
                    Self::write_mol_to(format, molecule, &mut sink)?;
                    sink.flush()?;
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    Self::write_mol_to(format, molecule, &mut stdout)?;
                    stdout.flush()?;
                }
            }
        } else {
            let file = File::create(filepath)?;
            let mut writer = BufWriter::new(file);
            Self::write_mol_to(format, molecule, &mut writer)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Serializes a molecule in the given format to an arbitrary writer.
    pub fn write_mol_to(
        format: OutputFormat,
        molecule: &Molecule,
        writer: &mut impl Write,
    ) -> Result<()> {
        match format {
            OutputFormat::Mol => MolFile::write_to(molecule, writer)?,
            OutputFormat::Smiles => smiles::write(molecule, writer)?,
        }
        Ok(())
    }

    /// Exports the query molecule to `<query-out-name><suffix>.mol`.
    pub fn write_query_mol(&self, molecule: &Molecule) -> Result<()> {
        let path = format!("{}{}.mol", self.config.query_out_name, self.config.suffix);
        MolFile::write_to_path(molecule, path)?;
        Ok(())
    }

    /// Exports the target molecule to `<target-out-name><suffix>.mol`.
    pub fn write_target_mol(&self, molecule: &Molecule) -> Result<()> {
        let path = format!("{}{}.mol", self.config.target_out_name, self.config.suffix);
        MolFile::write_to_path(molecule, path)?;
        Ok(())
    }

    /// Accumulates one side-by-side pair depiction for the next image write.
    pub fn add_pair_depiction(
        &mut self,
        query: &Molecule,
        target: &Molecule,
        label: &str,
        mapping: &IndexMapping,
    ) {
        self.depictions.add_pair(query, target, label, mapping);
    }

    /// Renders the accumulated pair depictions to
    /// `<query>_<target><suffix>.png`, using the configured image size when
    /// both dimensions are set and default sizing otherwise. Drains the
    /// accumulated panels.
    pub fn write_pair_image(&mut self, query_name: &str, target_name: &str) -> Result<()> {
        let filename = format!(
            "{}_{}{}.png",
            query_name, target_name, self.config.suffix
        );
        let size = self.config.image_size();
        self.depictions.render_to_file(filename, size)?;
        Ok(())
    }

    /// Composes and writes the hub-and-rim wheel image to `<name>.png`.
    pub fn write_hub_image(
        &self,
        hub: &Molecule,
        rim: &[Molecule],
        name: &str,
        mappings: &[IndexMapping],
    ) -> Result<()> {
        let image = render_hub_wheel(hub, rim, mappings);
        image
            .save_with_format(format!("{}.png", name), image::ImageFormat::Png)
            .map_err(crate::render::builder::RenderError::Encode)?;
        Ok(())
    }
}
