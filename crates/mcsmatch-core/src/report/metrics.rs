/// Raw statistics for one query/target comparison, as handed over by the
/// matching engine.
///
/// Ephemeral: constructed per comparison and never persisted as a value —
/// only its formatted projection reaches the output streams.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStatistics {
    pub query_path: String,
    pub target_path: String,
    /// Tanimoto similarity, computed upstream by the matching engine.
    pub tanimoto: f64,
    /// Euclidean distance, computed upstream by the matching engine.
    pub euclidean: f64,
    /// Number of atoms in the maximum common subgraph.
    pub atoms_matched: usize,
    pub elapsed_ms: u64,
}

/// The four similarity/distance values written into a descriptor record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub tanimoto: f64,
    pub euclidean: f64,
    pub cosine: f64,
    pub soergel: f64,
}

impl DerivedMetrics {
    /// Derives the reportable metrics from raw match counts.
    ///
    /// Cosine and Soergel are computed here from the atom counts; Tanimoto
    /// and Euclidean pass through from the engine. A zero-size match forces
    /// all four values to 0.0 regardless of what the engine supplied —
    /// downstream consumers rely on zero-match rows reading as true zero.
    pub fn derive(
        tanimoto: f64,
        euclidean: f64,
        atoms_matched: usize,
        query_atoms: usize,
        target_atoms: usize,
    ) -> Self {
        if atoms_matched == 0 {
            return Self {
                tanimoto: 0.0,
                euclidean: 0.0,
                cosine: 0.0,
                soergel: 0.0,
            };
        }
        let m = atoms_matched as f64;
        let q = query_atoms as f64;
        let t = target_atoms as f64;
        Self {
            tanimoto,
            euclidean,
            cosine: m / (q * t).sqrt(),
            soergel: (q + t - 2.0 * m) / (q + t - m),
        }
    }
}

/// Formats a score or count with exactly two fraction digits.
pub fn format_score(value: f64) -> String {
    format!("{:.2}", value)
}
