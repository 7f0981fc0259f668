/// An ordered, one-to-one, partial mapping from query atom labels to target
/// atom labels.
///
/// Produced by the external matching engine and consumed read-only by the
/// match reports. Insertion order is preserved so that reports are
/// reproducible run to run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomMapping {
    pairs: Vec<(String, String)>,
}

impl AtomMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, query_label: &str, target_label: &str) {
        self.pairs
            .push((query_label.to_string(), target_label.to_string()));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(q, t)| (q.as_str(), t.as_str()))
    }
}

impl FromIterator<(String, String)> for AtomMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// An ordered mapping from 0-based query atom indices to 0-based target atom
/// indices.
///
/// The internal representation is always 0-based; the best-mapping report
/// renders indices 1-based, applying the shift at formatting time only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexMapping {
    pairs: Vec<(usize, usize)>,
}

impl IndexMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, query_index: usize, target_index: usize) {
        self.pairs.push((query_index, target_index));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied()
    }

    /// Query-side indices, in mapping order.
    pub fn query_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.pairs.iter().map(|(q, _)| *q)
    }

    /// Target-side indices, in mapping order.
    pub fn target_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.pairs.iter().map(|(_, t)| *t)
    }
}

impl FromIterator<(usize, usize)> for IndexMapping {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_mapping_preserves_insertion_order() {
        let mut mapping = AtomMapping::new();
        mapping.push("3", "5");
        mapping.push("1", "2");
        let pairs: Vec<_> = mapping.iter().collect();
        assert_eq!(pairs, vec![("3", "5"), ("1", "2")]);
        assert_eq!(mapping.len(), 2);
        assert!(!mapping.is_empty());
    }

    #[test]
    fn index_mapping_exposes_both_sides() {
        let mapping: IndexMapping = vec![(0, 4), (2, 1)].into_iter().collect();
        assert_eq!(mapping.query_indices().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(mapping.target_indices().collect::<Vec<_>>(), vec![4, 1]);
    }

    #[test]
    fn empty_mappings_report_empty() {
        assert!(AtomMapping::new().is_empty());
        assert!(IndexMapping::new().is_empty());
        assert_eq!(IndexMapping::new().len(), 0);
    }
}
