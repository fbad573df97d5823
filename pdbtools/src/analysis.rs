use crate::parsers::{AtomRecord, Position};
use log::warn;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Unsupported centroid mode \"{0}\"; use \"geometric\" (or \"geom\") or \"center_of_mass\" (or \"com\").")]
    UnsupportedMode(String),
    #[error("Atom {atom_number} has element \"{element}\" with no known mass; it is unsupported for a mass-weighted centroid.")]
    UnknownMass { atom_number: isize, element: String },
    #[error("Cannot compute the centroid of a structure without atoms.")]
    EmptyStructure,
}

/// How the atoms are weighted when computing a centroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CentroidMode {
    /// Every atom weights the same.
    Geometric,
    /// Atoms are weighted by their mass.
    CenterOfMass,
}

impl FromStr for CentroidMode {
    type Err = AnalysisError;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "geometric" | "geom" => Ok(Self::Geometric),
            "center_of_mass" | "com" => Ok(Self::CenterOfMass),
            _ => Err(AnalysisError::UnsupportedMode(mode.to_owned())),
        }
    }
}

impl fmt::Display for CentroidMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometric => write!(f, "geometric"),
            Self::CenterOfMass => write!(f, "center_of_mass"),
        }
    }
}

/// Compute the centroid of the atoms.
///
/// With [`CentroidMode::CenterOfMass`], every atom needs a known mass. Failing
/// that, the whole call fails with [`AnalysisError::UnknownMass`] naming the
/// first atom without one.
pub fn centroid(atoms: &[AtomRecord], mode: CentroidMode) -> Result<Position, AnalysisError> {
    if atoms.is_empty() {
        return Err(AnalysisError::EmptyStructure);
    }
    match mode {
        CentroidMode::Geometric => Ok(geometric_center(atoms)),
        CentroidMode::CenterOfMass => center_of_mass(atoms),
    }
}

fn geometric_center(atoms: &[AtomRecord]) -> Position {
    let natoms = atoms.len() as f64;
    let mut sum = [0.0; 3];
    for atom in atoms {
        let position = atom.position();
        sum[0] += position[0];
        sum[1] += position[1];
        sum[2] += position[2];
    }
    [sum[0] / natoms, sum[1] / natoms, sum[2] / natoms]
}

fn center_of_mass(atoms: &[AtomRecord]) -> Result<Position, AnalysisError> {
    let mut weighted_sum = [0.0; 3];
    let mut total_mass = 0.0;
    for atom in atoms {
        let mass = atom.mass().ok_or_else(|| AnalysisError::UnknownMass {
            atom_number: atom.atom_number(),
            element: atom.element().to_owned(),
        })?;
        let position = atom.position();
        weighted_sum[0] += position[0] * mass;
        weighted_sum[1] += position[1] * mass;
        weighted_sum[2] += position[2] * mass;
        total_mass += mass;
    }
    Ok([
        weighted_sum[0] / total_mass,
        weighted_sum[1] / total_mass,
        weighted_sum[2] / total_mass,
    ])
}

/// Root mean square deviation between two structures, without superposition.
///
/// Atoms are paired by index, so both structures must list the same atoms in
/// the same order. Only the atom count is checked. When the counts differ, or
/// when there is no atom at all, a warning is logged and there is no result.
pub fn rmsd(reference: &[AtomRecord], other: &[AtomRecord]) -> Option<f64> {
    let natoms = reference.len();
    if natoms != other.len() {
        warn!(
            "Uneven numbers of atoms ({natoms} and {}). RMSD cannot be calculated.",
            other.len()
        );
        return None;
    }
    if natoms == 0 {
        warn!("No atoms to compare. RMSD cannot be calculated.");
        return None;
    }
    let sum_of_squares: f64 = reference
        .iter()
        .zip(other)
        .map(|(first, second)| squared_distance(first.position(), second.position()))
        .sum();
    Some((sum_of_squares / natoms as f64).sqrt())
}

fn squared_distance(first: Position, second: Position) -> f64 {
    let dx = first[0] - second[0];
    let dy = first[1] - second[1];
    let dz = first[2] - second[2];
    dx * dx + dy * dy + dz * dz
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::AtomLine;
    use assert_float_eq::*;
    use rstest::{fixture, rstest};

    fn make_atom(atom_number: isize, element: &str, position: Position) -> AtomRecord {
        AtomRecord::from(AtomLine {
            atom_number,
            element: element.to_owned(),
            position,
            ..Default::default()
        })
    }

    /// A hydrogen at the origin and a carbon one unit away along x.
    #[fixture]
    fn hydrogen_carbon() -> Vec<AtomRecord> {
        vec![
            make_atom(1, "H", [0.0, 0.0, 0.0]),
            make_atom(2, "C", [1.0, 0.0, 0.0]),
        ]
    }

    #[fixture]
    fn scattered() -> Vec<AtomRecord> {
        vec![
            make_atom(1, "N", [11.104, 6.134, -6.504]),
            make_atom(2, "C", [11.639, 6.071, -5.147]),
            make_atom(3, "O", [13.751, 6.149, -6.226]),
            make_atom(4, "S", [15.727, 7.650, -3.040]),
            make_atom(5, "H", [-2.5, 0.125, 40.0]),
        ]
    }

    #[rstest]
    #[case("geometric", CentroidMode::Geometric)]
    #[case("geom", CentroidMode::Geometric)]
    #[case("center_of_mass", CentroidMode::CenterOfMass)]
    #[case("com", CentroidMode::CenterOfMass)]
    fn test_parse_mode(#[case] name: &str, #[case] expected: CentroidMode) {
        assert_eq!(name.parse::<CentroidMode>(), Ok(expected));
    }

    #[rstest]
    #[case("mass")]
    #[case("Geometric")]
    #[case("")]
    fn test_parse_unsupported_mode(#[case] name: &str) {
        assert_eq!(
            name.parse::<CentroidMode>(),
            Err(AnalysisError::UnsupportedMode(name.to_owned()))
        );
    }

    #[rstest]
    fn test_geometric_centroid(hydrogen_carbon: Vec<AtomRecord>) {
        let center = centroid(&hydrogen_carbon, CentroidMode::Geometric).unwrap();
        assert_eq!(center, [0.5, 0.0, 0.0]);
    }

    #[rstest]
    fn test_center_of_mass(hydrogen_carbon: Vec<AtomRecord>) {
        let center = centroid(&hydrogen_carbon, CentroidMode::CenterOfMass).unwrap();
        assert_float_absolute_eq!(center[0], 12.01 / 13.02, 1e-12);
        assert_eq!(center[1], 0.0);
        assert_eq!(center[2], 0.0);
    }

    #[rstest]
    fn test_center_of_mass_unknown_element(hydrogen_carbon: Vec<AtomRecord>) {
        let mut atoms = hydrogen_carbon;
        atoms.push(make_atom(3, "FE", [2.0, 2.0, 2.0]));
        let error = centroid(&atoms, CentroidMode::CenterOfMass).unwrap_err();
        assert_eq!(
            error,
            AnalysisError::UnknownMass {
                atom_number: 3,
                element: "FE".to_owned()
            }
        );
        // The geometric centroid does not need masses.
        assert!(centroid(&atoms, CentroidMode::Geometric).is_ok());
    }

    #[rstest]
    #[case(CentroidMode::Geometric)]
    #[case(CentroidMode::CenterOfMass)]
    fn test_centroid_empty(#[case] mode: CentroidMode) {
        assert_eq!(centroid(&[], mode), Err(AnalysisError::EmptyStructure));
    }

    #[rstest]
    fn test_rmsd_self(scattered: Vec<AtomRecord>) {
        assert_eq!(rmsd(&scattered, &scattered), Some(0.0));
    }

    #[rstest]
    #[case([1.0, 0.0, 0.0])]
    #[case([0.0, -3.0, 4.0])]
    #[case([1.5, 2.5, -0.5])]
    fn test_rmsd_uniform_translation(scattered: Vec<AtomRecord>, #[case] shift: Position) {
        let moved: Vec<AtomRecord> = scattered
            .iter()
            .cloned()
            .map(|mut atom| {
                let position = atom.position_mut();
                position[0] += shift[0];
                position[1] += shift[1];
                position[2] += shift[2];
                atom
            })
            .collect();
        let norm = squared_distance(shift, [0.0; 3]).sqrt();
        let value = rmsd(&scattered, &moved).unwrap();
        assert_float_absolute_eq!(value, norm, 1e-9);
    }

    #[test]
    fn test_rmsd_single_pair() {
        let first = vec![make_atom(1, "C", [0.0, 0.0, 0.0]), make_atom(2, "C", [0.0, 0.0, 0.0])];
        let second = vec![make_atom(1, "C", [2.0, 0.0, 0.0]), make_atom(2, "C", [0.0, 0.0, 0.0])];
        // sqrt((4 + 0) / 2)
        assert_f64_near!(rmsd(&first, &second).unwrap(), 2.0_f64.sqrt());
    }

    #[rstest]
    fn test_rmsd_uneven(scattered: Vec<AtomRecord>) {
        assert_eq!(rmsd(&scattered, &scattered[1..]), None);
        assert_eq!(rmsd(&scattered[..2], &scattered), None);
    }

    #[test]
    fn test_rmsd_empty() {
        assert_eq!(rmsd(&[], &[]), None);
    }
}
