pub type Position = [f64; 3];

pub mod chemistry;
pub mod errors;
pub mod line;
pub mod pdb;

pub use chemistry::lookup_mass;
pub use line::{AtomLine, AtomRecord};
pub use pdb::{parse_atom_line, read_pdb, read_structure};
