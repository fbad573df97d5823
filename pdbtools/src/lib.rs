pub mod test_utils;

pub mod analysis;
pub mod application;
pub mod parsers;
pub mod transform;
pub mod writers;

pub use analysis::{centroid, rmsd, AnalysisError, CentroidMode};
pub use parsers::{read_pdb, read_structure, AtomLine, AtomRecord, Position};
pub use transform::{center, translate, translate_checked, CenterCheck};
pub use writers::{write_atom_line, write_structure, write_structure_file};
