use super::config::ReportConfig;
use super::error::{ReportError, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// How an output session opens its streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Truncate all three streams; the descriptor header is always written.
    Fresh,
    /// Open all three streams in append mode; the descriptor header is
    /// written only if the descriptor file did not previously exist.
    Append,
}

/// The record layout used for descriptor rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// Human-readable `Label= value` pairs, buffered.
    Verbose,
    /// Raw tab-separated values, flushed after every record.
    Tabular,
}

/// Column labels of the descriptor table header, in order.
pub const DESCRIPTOR_COLUMNS: [&str; 15] = [
    "Query",
    "Target",
    "Tanimoto (Sim.)",
    "Tanimoto (Bond Sim.)",
    "Tanimoto (Atom Sim.)",
    "Euclidian (Dist.)",
    "Cosine (Sim.)",
    "Soergel (Dist.)",
    "Query (Atom Count)",
    "Target (Atom Count)",
    "Query (Bond Count)",
    "Target (Bond Count)",
    "Match (Size)",
    "Query (Wt.)",
    "Target (Wt.)",
];

/// The three lifecycle-coupled output streams of one reporting session.
///
/// All three are opened together by [`Session::open`] and released together
/// by [`Session::close`]; there is no way to hold a partially open group.
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) graph: BufWriter<File>,
    pub(crate) matches: BufWriter<File>,
    pub(crate) descriptors: BufWriter<File>,
}

impl Session {
    /// Opens the stream group, deriving each file name from the configured
    /// base path, the session suffix and the extension token.
    pub(crate) fn open(
        config: &ReportConfig,
        mode: SessionMode,
        extension: &str,
    ) -> Result<Self> {
        let graph_path = format!("{}{}{}", config.graph_file, config.suffix, extension);
        let match_path = format!("{}{}{}", config.match_file, config.suffix, extension);
        let descriptor_path = format!("{}{}{}", config.descriptor_file, config.suffix, extension);

        let mut session = match mode {
            SessionMode::Fresh => {
                let mut session = Self {
                    graph: BufWriter::new(File::create(&graph_path)?),
                    matches: BufWriter::new(File::create(&match_path)?),
                    descriptors: BufWriter::new(File::create(&descriptor_path)?),
                };
                session.write_descriptor_header()?;
                session
            }
            SessionMode::Append => {
                let descriptor_existed = Path::new(&descriptor_path).exists();
                let mut session = Self {
                    graph: BufWriter::new(open_append(&graph_path)?),
                    matches: BufWriter::new(open_append(&match_path)?),
                    descriptors: BufWriter::new(open_append(&descriptor_path)?),
                };
                if !descriptor_existed {
                    session.write_descriptor_header()?;
                }
                session
            }
        };
        // Make the header visible even if the run dies before the first row.
        session.descriptors.flush()?;
        Ok(session)
    }

    fn write_descriptor_header(&mut self) -> io::Result<()> {
        writeln!(self.descriptors, "{}", DESCRIPTOR_COLUMNS.join("\t"))
    }

    pub(crate) fn flush_all(&mut self) -> io::Result<()> {
        self.graph.flush()?;
        self.matches.flush()?;
        self.descriptors.flush()
    }

    /// Flushes and releases all three streams together.
    pub(crate) fn close(mut self) -> Result<()> {
        self.flush_all().map_err(ReportError::Io)
    }
}

fn open_append(path: &str) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> ReportConfig {
        ReportConfig {
            graph_file: dir.join("graph").to_string_lossy().into_owned(),
            match_file: dir.join("match").to_string_lossy().into_owned(),
            descriptor_file: dir.join("desc").to_string_lossy().into_owned(),
            suffix: "_run".to_string(),
            ..ReportConfig::default()
        }
    }

    fn header_line_count(path: &Path) -> usize {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .filter(|line| line.starts_with("Query\tTarget\t"))
            .count()
    }

    #[test]
    fn fresh_session_creates_all_three_streams_with_header() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let session = Session::open(&config, SessionMode::Fresh, ".txt").unwrap();
        session.close().unwrap();

        assert!(dir.path().join("graph_run.txt").exists());
        assert!(dir.path().join("match_run.txt").exists());
        let desc = dir.path().join("desc_run.txt");
        assert_eq!(header_line_count(&desc), 1);
        let header = fs::read_to_string(&desc).unwrap();
        assert_eq!(header.trim_end().split('\t').count(), 15);
    }

    #[test]
    fn fresh_session_truncates_previous_content() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(dir.path().join("desc_run.txt"), "stale row\n").unwrap();

        Session::open(&config, SessionMode::Fresh, ".txt")
            .unwrap()
            .close()
            .unwrap();
        let content = fs::read_to_string(dir.path().join("desc_run.txt")).unwrap();
        assert!(!content.contains("stale row"));
        assert!(content.starts_with("Query\t"));
    }

    #[test]
    fn append_session_writes_header_only_when_file_is_new() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let desc = dir.path().join("desc_run.txt");

        Session::open(&config, SessionMode::Append, ".txt")
            .unwrap()
            .close()
            .unwrap();
        assert_eq!(header_line_count(&desc), 1);

        // Repeated append starts must not duplicate the header.
        for _ in 0..3 {
            Session::open(&config, SessionMode::Append, ".txt")
                .unwrap()
                .close()
                .unwrap();
        }
        assert_eq!(header_line_count(&desc), 1);
    }

    #[test]
    fn fresh_session_always_rewrites_the_header() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let desc = dir.path().join("desc_run.txt");

        for _ in 0..2 {
            Session::open(&config, SessionMode::Fresh, ".txt")
                .unwrap()
                .close()
                .unwrap();
            assert_eq!(header_line_count(&desc), 1);
        }
    }

    #[test]
    fn open_fails_when_the_directory_is_missing() {
        let config = ReportConfig {
            graph_file: "/nonexistent/dir/graph".to_string(),
            ..ReportConfig::default()
        };
        assert!(matches!(
            Session::open(&config, SessionMode::Fresh, ".txt"),
            Err(ReportError::Io(_))
        ));
    }
}
