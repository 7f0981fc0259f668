use super::element::Element;
use nalgebra::Point3;

/// An atom in a small-molecule graph.
///
/// Atoms carry a string `label` that identifies them in the match reports;
/// identifier-keyed atom mappings refer to atoms by this label rather than
/// by their position in the container. Labels are assigned by whoever loads
/// the molecule (the molfile reader uses the 1-based atom serial).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The chemical element of this atom.
    pub element: Element,
    /// Stable identifier used by identifier-keyed atom mappings.
    pub label: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    pub fn new(element: Element, label: &str, position: Point3<f64>) -> Self {
        Self {
            element,
            label: label.to_string(),
            position,
        }
    }
}
