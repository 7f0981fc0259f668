use crate::core::io::traits::ChemicalFile;
use crate::core::models::atom::Atom;
use crate::core::models::element::Element;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// The V2000 connection table caps both counts at three digits.
const V2000_MAX_COUNT: usize = 999;

#[derive(Debug, Error)]
pub enum MolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Inconsistent molecule: {0}")]
    Inconsistency(String),
    #[error("Molecule exceeds the V2000 limit of {limit} {what} (has {count})")]
    TooLarge {
        what: &'static str,
        count: usize,
        limit: usize,
    },
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_err(line: usize, message: impl Into<String>) -> MolError {
    MolError::Parse {
        line,
        message: message.into(),
    }
}

/// MDL molfile (V2000 connection table).
///
/// Reading assigns each atom a label equal to its 1-based serial in the
/// atom block, which is the identifier convention the match reports use.
pub struct MolFile;

impl ChemicalFile for MolFile {
    type Error = MolError;

    fn read_from(reader: &mut impl BufRead) -> Result<Molecule, Self::Error> {
        let lines: Vec<String> = reader.lines().collect::<Result<_, io::Error>>()?;
        if lines.len() < 4 {
            return Err(parse_err(
                lines.len(),
                "molfile is truncated before the counts line",
            ));
        }

        let name = lines[0].trim();
        let mut molecule = Molecule::new(name);

        let counts_line = &lines[3];
        let atom_count: usize = slice_and_trim(counts_line, 0, 3)
            .parse()
            .map_err(|_| parse_err(4, "invalid atom count in columns 1-3"))?;
        let bond_count: usize = slice_and_trim(counts_line, 3, 6)
            .parse()
            .map_err(|_| parse_err(4, "invalid bond count in columns 4-6"))?;

        let atom_block_end = 4 + atom_count;
        let bond_block_end = atom_block_end + bond_count;
        if lines.len() < bond_block_end {
            return Err(parse_err(
                lines.len(),
                format!(
                    "molfile ends before the declared {} atoms and {} bonds",
                    atom_count, bond_count
                ),
            ));
        }

        for (offset, line) in lines[4..atom_block_end].iter().enumerate() {
            let line_num = 5 + offset;
            let x: f64 = slice_and_trim(line, 0, 10)
                .parse()
                .map_err(|_| parse_err(line_num, "invalid x coordinate in columns 1-10"))?;
            let y: f64 = slice_and_trim(line, 10, 20)
                .parse()
                .map_err(|_| parse_err(line_num, "invalid y coordinate in columns 11-20"))?;
            let z: f64 = slice_and_trim(line, 20, 30)
                .parse()
                .map_err(|_| parse_err(line_num, "invalid z coordinate in columns 21-30"))?;
            let element: Element = slice_and_trim(line, 31, 34)
                .parse()
                .map_err(|e| parse_err(line_num, format!("{}", e)))?;
            let serial = offset + 1;
            molecule.add_atom(Atom::new(
                element,
                &serial.to_string(),
                Point3::new(x, y, z),
            ));
        }

        for (offset, line) in lines[atom_block_end..bond_block_end].iter().enumerate() {
            let line_num = atom_block_end + offset + 1;
            let a: usize = slice_and_trim(line, 0, 3)
                .parse()
                .map_err(|_| parse_err(line_num, "invalid first atom number in columns 1-3"))?;
            let b: usize = slice_and_trim(line, 3, 6)
                .parse()
                .map_err(|_| parse_err(line_num, "invalid second atom number in columns 4-6"))?;
            let order: BondOrder = slice_and_trim(line, 6, 9)
                .parse()
                .map_err(|_| parse_err(line_num, "invalid bond type in columns 7-9"))?;
            if a == 0 || b == 0 || a > atom_count || b > atom_count {
                return Err(parse_err(
                    line_num,
                    format!("bond references atom {} or {} outside 1..={}", a, b, atom_count),
                ));
            }
            molecule.add_bond(a - 1, b - 1, order);
        }

        Ok(molecule)
    }

    fn write_to(molecule: &Molecule, writer: &mut impl Write) -> Result<(), Self::Error> {
        let atom_count = molecule.atom_count();
        let bond_count = molecule.bond_count();
        if atom_count > V2000_MAX_COUNT {
            return Err(MolError::TooLarge {
                what: "atoms",
                count: atom_count,
                limit: V2000_MAX_COUNT,
            });
        }
        if bond_count > V2000_MAX_COUNT {
            return Err(MolError::TooLarge {
                what: "bonds",
                count: bond_count,
                limit: V2000_MAX_COUNT,
            });
        }
        for bond in molecule.bonds() {
            if bond.a >= atom_count || bond.b >= atom_count {
                return Err(MolError::Inconsistency(format!(
                    "bond {}-{} references an atom outside the container (size {})",
                    bond.a, bond.b, atom_count
                )));
            }
        }

        writeln!(writer, "{}", molecule.name())?;
        writeln!(writer, "  mcsmatch")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000",
            atom_count, bond_count
        )?;

        for atom in molecule.atoms() {
            writeln!(
                writer,
                "{:>10.4}{:>10.4}{:>10.4} {:<3} 0  0  0  0  0  0  0  0  0  0  0  0",
                atom.position.x,
                atom.position.y,
                atom.position.z,
                atom.element.symbol()
            )?;
        }

        for bond in molecule.bonds() {
            writeln!(
                writer,
                "{:>3}{:>3}{:>3}  0  0  0  0",
                bond.a + 1,
                bond.b + 1,
                bond.order.ctab_code()
            )?;
        }

        writeln!(writer, "M  END")?;
        Ok(())
    }
}
