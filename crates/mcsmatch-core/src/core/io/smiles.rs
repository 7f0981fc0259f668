use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmilesError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Inconsistent molecule: {0}")]
    Inconsistency(String),
}

/// Manages ring-closure digits, reusing a digit once its ring is closed.
struct DigitPool {
    in_use: Vec<usize>,
}

impl DigitPool {
    fn new() -> Self {
        Self { in_use: Vec::new() }
    }

    fn acquire(&mut self) -> usize {
        let mut digit = 1;
        while self.in_use.contains(&digit) {
            digit += 1;
        }
        self.in_use.push(digit);
        digit
    }

    fn release(&mut self, digit: usize) {
        if let Some(pos) = self.in_use.iter().position(|d| *d == digit) {
            self.in_use.remove(pos);
        }
    }
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

fn bond_symbol(order: BondOrder) -> &'static str {
    match order {
        BondOrder::Single => "",
        BondOrder::Double => "=",
        BondOrder::Triple => "#",
        BondOrder::Aromatic => ":",
    }
}

fn push_digit(out: &mut String, digit: usize) {
    if digit < 10 {
        out.push(char::from(b'0' + digit as u8));
    } else {
        out.push('%');
        out.push_str(&format!("{:02}", digit));
    }
}

/// Generates a SMILES string for a molecule.
///
/// Two-pass traversal: a first depth-first scan marks the ring-closure
/// bonds (the non-tree edges of the spanning tree), a second pass emits
/// atoms in the same order with branch parentheses and closure digits.
/// Traversal follows atom insertion order, so the output is deterministic
/// for a given container. Atoms are written as bare element symbols;
/// disconnected components are joined with `.`.
///
/// # Errors
///
/// Returns an error if a bond references an atom outside the container.
pub fn generate(molecule: &Molecule) -> Result<String, SmilesError> {
    let n = molecule.atom_count();
    for bond in molecule.bonds() {
        if bond.a >= n || bond.b >= n {
            return Err(SmilesError::Inconsistency(format!(
                "bond {}-{} references an atom outside the container (size {})",
                bond.a, bond.b, n
            )));
        }
    }

    let mut visited = vec![false; n];
    let mut out = String::new();
    for root in 0..n {
        if visited[root] {
            continue;
        }
        if !out.is_empty() {
            out.push('.');
        }
        let mut closures = HashSet::new();
        let mut seen = vec![false; n];
        scan_closures(molecule, root, usize::MAX, &mut seen, &mut closures);

        let mut open = HashMap::new();
        let mut digits = DigitPool::new();
        emit_atom(
            molecule,
            root,
            None,
            &mut visited,
            &closures,
            &mut open,
            &mut digits,
            &mut out,
        );
    }
    Ok(out)
}

/// Writes the SMILES line notation for a molecule, newline-terminated.
///
/// # Errors
///
/// Returns an error if the molecule is inconsistent or writing fails.
pub fn write(molecule: &Molecule, writer: &mut impl Write) -> Result<(), SmilesError> {
    let smiles = generate(molecule)?;
    writer.write_all(smiles.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn scan_closures(
    molecule: &Molecule,
    u: usize,
    parent: usize,
    seen: &mut [bool],
    closures: &mut HashSet<(usize, usize)>,
) {
    seen[u] = true;
    for (v, _) in molecule.neighbours(u) {
        if v == parent || v == u {
            continue;
        }
        if seen[v] {
            closures.insert(edge_key(u, v));
        } else {
            scan_closures(molecule, v, u, seen, closures);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn emit_atom(
    molecule: &Molecule,
    u: usize,
    parent: Option<usize>,
    visited: &mut [bool],
    closures: &HashSet<(usize, usize)>,
    open: &mut HashMap<(usize, usize), usize>,
    digits: &mut DigitPool,
    out: &mut String,
) {
    visited[u] = true;
    if let Some(atom) = molecule.atom(u) {
        out.push_str(atom.element.symbol());
    }

    for (v, order) in molecule.neighbours(u) {
        let key = edge_key(u, v);
        if !closures.contains(&key) {
            continue;
        }
        if let Some(digit) = open.remove(&key) {
            push_digit(out, digit);
            digits.release(digit);
        } else {
            let digit = digits.acquire();
            open.insert(key, digit);
            out.push_str(bond_symbol(order));
            push_digit(out, digit);
        }
    }

    let children: Vec<(usize, BondOrder)> = molecule
        .neighbours(u)
        .into_iter()
        .filter(|(v, _)| Some(*v) != parent && !visited[*v] && !closures.contains(&edge_key(u, *v)))
        .collect();
    let last = children.len().saturating_sub(1);
    for (i, (v, order)) in children.into_iter().enumerate() {
        if visited[v] {
            continue;
        }
        let branch = i != last;
        if branch {
            out.push('(');
        }
        out.push_str(bond_symbol(order));
        emit_atom(molecule, v, Some(u), visited, closures, open, digits, out);
        if branch {
            out.push(')');
        }
    }
}
