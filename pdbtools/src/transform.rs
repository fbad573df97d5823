use crate::analysis::{centroid, AnalysisError, CentroidMode};
use crate::parsers::{AtomRecord, Position};
use log::{info, warn};
use serde::Serialize;

/// Centroids of a structure after it moved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CenterCheck {
    pub geometric: Option<Position>,
    /// Missing when an element of the structure has no known mass.
    pub center_of_mass: Option<Position>,
}

/// Move every atom by `-offset`, in place.
pub fn translate(atoms: &mut [AtomRecord], offset: Position) {
    for atom in atoms.iter_mut() {
        let position = atom.position_mut();
        position[0] -= offset[0];
        position[1] -= offset[1];
        position[2] -= offset[2];
    }
}

/// Same as [`translate`], then report where the centers ended up.
pub fn translate_checked(atoms: &mut [AtomRecord], offset: Position) -> CenterCheck {
    translate(atoms, offset);
    check_center(atoms)
}

/// Compute both centroids of the structure and log them.
///
/// This is informational: a centroid that cannot be computed is logged and
/// left out of the report.
pub fn check_center(atoms: &[AtomRecord]) -> CenterCheck {
    let center_of_mass = optional_centroid(atoms, CentroidMode::CenterOfMass);
    let geometric = optional_centroid(atoms, CentroidMode::Geometric);
    if let Some([x, y, z]) = center_of_mass {
        info!("New center of mass is: {x} {y} {z}");
    }
    if let Some([x, y, z]) = geometric {
        info!("New geometric center is: {x} {y} {z}");
    }
    CenterCheck {
        geometric,
        center_of_mass,
    }
}

fn optional_centroid(atoms: &[AtomRecord], mode: CentroidMode) -> Option<Position> {
    match centroid(atoms, mode) {
        Ok(center) => Some(center),
        Err(error) => {
            warn!("No {mode} center: {error}");
            None
        }
    }
}

/// Put the centroid of the structure at the origin.
///
/// Returns the centroid that was removed. On error, the atoms did not move.
pub fn center(atoms: &mut [AtomRecord], mode: CentroidMode) -> Result<Position, AnalysisError> {
    let current = centroid(atoms, mode)?;
    translate(atoms, current);
    Ok(current)
}
