use super::atom::Atom;
use super::topology::{Bond, BondOrder};

/// A flat small-molecule container: atoms plus undirected bonds.
///
/// Molecules are read-only as far as the reporting layer is concerned;
/// they are built once (by a file reader or the matching engine) and then
/// queried for counts, labels, weights and connectivity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Molecule {
    name: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl Molecule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            atoms: Vec::new(),
            bonds: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends an atom and returns its index.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Records a bond between two atom indices.
    ///
    /// Index validity is not checked here; serializers validate the
    /// container before writing and report an inconsistency error.
    pub fn add_bond(&mut self, a: usize, b: usize, order: BondOrder) {
        self.bonds.push(Bond::new(a, b, order));
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Sum of standard atomic weights, in g/mol.
    pub fn molecular_weight(&self) -> f64 {
        self.atoms.iter().map(|a| a.element.weight()).sum()
    }

    /// Neighbours of an atom, in bond insertion order.
    pub fn neighbours(&self, index: usize) -> Vec<(usize, BondOrder)> {
        self.bonds
            .iter()
            .filter_map(|bond| bond.partner(index).map(|other| (other, bond.order)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use nalgebra::Point3;

    fn ethanol() -> Molecule {
        // C-C-O with explicit heavy atoms only
        let mut mol = Molecule::new("ethanol");
        mol.add_atom(Atom::new(Element::C, "1", Point3::new(0.0, 0.0, 0.0)));
        mol.add_atom(Atom::new(Element::C, "2", Point3::new(1.5, 0.0, 0.0)));
        mol.add_atom(Atom::new(Element::O, "3", Point3::new(2.2, 1.1, 0.0)));
        mol.add_bond(0, 1, BondOrder::Single);
        mol.add_bond(1, 2, BondOrder::Single);
        mol
    }

    #[test]
    fn counts_reflect_added_atoms_and_bonds() {
        let mol = ethanol();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.name(), "ethanol");
    }

    #[test]
    fn molecular_weight_sums_atomic_weights() {
        let mol = ethanol();
        let expected = 2.0 * 12.011 + 15.999;
        assert!((mol.molecular_weight() - expected).abs() < 1e-9);
    }

    #[test]
    fn neighbours_follow_bond_insertion_order() {
        let mol = ethanol();
        assert_eq!(
            mol.neighbours(1),
            vec![(0, BondOrder::Single), (2, BondOrder::Single)]
        );
        assert_eq!(mol.neighbours(0), vec![(1, BondOrder::Single)]);
        assert!(mol.neighbours(2).len() == 1);
    }

    #[test]
    fn atom_lookup_is_bounds_checked() {
        let mol = ethanol();
        assert_eq!(mol.atom(2).unwrap().element, Element::O);
        assert!(mol.atom(3).is_none());
    }
}
