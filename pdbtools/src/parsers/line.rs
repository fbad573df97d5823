use serde::Serialize;

use crate::parsers::chemistry::lookup_mass;
use crate::parsers::Position;

/// The parsed fields from an ATOM or HETATM line in a PDB file.
///
/// Text fields keep the padding they have in the file, except for the
/// element symbol which is trimmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomLine {
    pub record_type: String,
    pub atom_number: isize,
    pub atom_name: String,
    pub alt_loc: char,
    pub residue_name: String,
    pub chain_id: char,
    pub residue_number: isize,
    pub insertion_code: char,
    pub position: Position,
    pub occupancy: f64,
    pub temp_factor: f64,
    pub element: String,
    pub charge: String,
}

impl Default for AtomLine {
    fn default() -> Self {
        AtomLine {
            record_type: "ATOM  ".to_owned(),
            atom_number: 0,
            atom_name: "    ".to_owned(),
            alt_loc: ' ',
            residue_name: "   ".to_owned(),
            chain_id: ' ',
            residue_number: 0,
            insertion_code: ' ',
            position: [0.0; 3],
            occupancy: 0.0,
            temp_factor: 0.0,
            element: String::new(),
            charge: "  ".to_owned(),
        }
    }
}

/// One atom of a structure: the fields read from its line and the mass
/// deduced from its element.
///
/// Only the position can change once the record exists. The mass is looked up
/// when the record is built, so keeping the element read-only keeps the two
/// consistent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomRecord {
    #[serde(flatten)]
    line: AtomLine,
    mass: Option<f64>,
}

impl AtomRecord {
    pub fn line(&self) -> &AtomLine {
        &self.line
    }

    pub fn into_line(self) -> AtomLine {
        self.line
    }

    pub fn record_type(&self) -> &str {
        &self.line.record_type
    }

    pub fn atom_number(&self) -> isize {
        self.line.atom_number
    }

    pub fn atom_name(&self) -> &str {
        &self.line.atom_name
    }

    pub fn residue_name(&self) -> &str {
        &self.line.residue_name
    }

    pub fn residue_number(&self) -> isize {
        self.line.residue_number
    }

    pub fn chain_id(&self) -> char {
        self.line.chain_id
    }

    pub fn element(&self) -> &str {
        &self.line.element
    }

    pub fn mass(&self) -> Option<f64> {
        self.mass
    }

    pub fn position(&self) -> Position {
        self.line.position
    }

    pub fn position_mut(&mut self) -> &mut Position {
        &mut self.line.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.line.position = position;
    }
}

impl From<AtomLine> for AtomRecord {
    fn from(line: AtomLine) -> Self {
        let mass = lookup_mass(&line.element);
        AtomRecord { line, mass }
    }
}
