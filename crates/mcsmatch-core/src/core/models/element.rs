use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Chemical elements that commonly occur in small organic molecules.
///
/// The set covers the organic subset plus the halogens and a few
/// heteroatoms seen in drug-like compounds. Each element carries its
/// standard atomic weight, which feeds the molecular-weight columns of
/// the descriptor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    H,
    B,
    C,
    N,
    O,
    F,
    Si,
    P,
    S,
    Cl,
    Br,
    I,
}

static SYMBOL_TO_ELEMENT: Map<&'static str, Element> = phf_map! {
    "H" => Element::H,
    "B" => Element::B,
    "C" => Element::C,
    "N" => Element::N,
    "O" => Element::O,
    "F" => Element::F,
    "Si" => Element::Si,
    "P" => Element::P,
    "S" => Element::S,
    "Cl" => Element::Cl,
    "Br" => Element::Br,
    "I" => Element::I,
};

impl Element {
    /// Returns the element symbol as written in chemical file formats.
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Si => "Si",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::Br => "Br",
            Element::I => "I",
        }
    }

    /// Returns the standard atomic weight in g/mol (IUPAC 2021 values).
    pub fn weight(&self) -> f64 {
        match self {
            Element::H => 1.008,
            Element::B => 10.81,
            Element::C => 12.011,
            Element::N => 14.007,
            Element::O => 15.999,
            Element::F => 18.998,
            Element::Si => 28.085,
            Element::P => 30.974,
            Element::S => 32.06,
            Element::Cl => 35.45,
            Element::Br => 79.904,
            Element::I => 126.904,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element symbol: '{0}'")]
pub struct ParseElementError(pub String);

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = s.trim();
        SYMBOL_TO_ELEMENT
            .get(symbol)
            .copied()
            .ok_or_else(|| ParseElementError(symbol.to_string()))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_parses_known_symbols() {
        assert_eq!("C".parse::<Element>().unwrap(), Element::C);
        assert_eq!("Cl".parse::<Element>().unwrap(), Element::Cl);
        assert_eq!("Br".parse::<Element>().unwrap(), Element::Br);
        assert_eq!("Si".parse::<Element>().unwrap(), Element::Si);
    }

    #[test]
    fn from_str_trims_whitespace() {
        assert_eq!(" N ".parse::<Element>().unwrap(), Element::N);
        assert_eq!("O  ".parse::<Element>().unwrap(), Element::O);
    }

    #[test]
    fn from_str_rejects_unknown_symbols() {
        assert!("Xx".parse::<Element>().is_err());
        assert!("".parse::<Element>().is_err());
        assert!("c".parse::<Element>().is_err());
    }

    #[test]
    fn symbol_round_trips_through_from_str() {
        for element in [Element::H, Element::C, Element::Cl, Element::I] {
            assert_eq!(element.symbol().parse::<Element>().unwrap(), element);
        }
    }

    #[test]
    fn weights_match_standard_values() {
        assert!((Element::C.weight() - 12.011).abs() < 1e-9);
        assert!((Element::H.weight() - 1.008).abs() < 1e-9);
        assert!((Element::Br.weight() - 79.904).abs() < 1e-9);
    }

    #[test]
    fn display_prints_the_symbol() {
        assert_eq!(Element::Cl.to_string(), "Cl");
        assert_eq!(Element::C.to_string(), "C");
    }
}
