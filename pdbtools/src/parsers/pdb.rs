use crate::parsers::errors::*;
use crate::parsers::line::{AtomLine, AtomRecord};
use log::{debug, trace};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

/// Every numeric column ends before this offset. The element and charge
/// columns after it are optional.
const MINIMUM_LINE_LENGTH: usize = 66;

/// Read the ATOM and HETATM records of a PDB file, in file order.
///
/// The file is closed before the function returns, whether the read succeeds
/// or not.
pub fn read_structure<P>(path: P) -> Result<Vec<AtomRecord>, ReadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)?;
    let atoms = read_pdb(BufReader::new(file))?;
    debug!("Read {} atoms from {}.", atoms.len(), path.display());
    Ok(atoms)
}

/// Read the ATOM and HETATM records from any buffered PDB input.
///
/// Other records are skipped. The first ill-formatted atom line aborts the
/// read.
pub fn read_pdb<F>(input: F) -> Result<Vec<AtomRecord>, ReadError>
where
    F: BufRead,
{
    let mut atoms = Vec::new();
    let mut skipped = 0;
    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.starts_with("ATOM") || line.starts_with("HETATM") {
            let atom = parse_atom_line(line).map_err(|error| ReadError::FormatError {
                error,
                line_number: lineno + 1,
                content: line.to_owned(),
            })?;
            trace!("Atom {} read from line {}.", atom.atom_number(), lineno + 1);
            atoms.push(atom);
        } else {
            skipped += 1;
        }
    }
    debug!("Skipped {skipped} lines that are not atoms.");
    Ok(atoms)
}

/// Parse a single ATOM or HETATM line.
///
/// The line must reach the temperature factor column. The element and charge
/// columns are cut short, or empty, when the line stops before them.
pub fn parse_atom_line(line: &str) -> Result<AtomRecord, FormatError> {
    if line.len() < MINIMUM_LINE_LENGTH {
        return Err(FormatError::LineTooShort);
    }
    // From this point, slicing the line up to the temperature factor can only
    // fail on a character boundary, which is reported as a field error.

    let record_type = text(line, 0..6, FieldError::RecordType)?.to_owned();
    let atom_name = text(line, 12..16, FieldError::AtomName)?.to_owned();
    let alt_loc = character(line, 16, FieldError::Alternate)?;
    let residue_name = text(line, 17..20, FieldError::ResidueName)?.to_owned();
    let chain_id = character(line, 21, FieldError::ChainIdentifier)?;
    let insertion_code = character(line, 26, FieldError::InsertionCode)?;

    let atom_number = number(line, 6..11, FieldError::Serial)?;
    let residue_number = number(line, 22..26, FieldError::ResidueIdentifier)?;
    let x = number(line, 30..38, FieldError::X)?;
    let y = number(line, 38..46, FieldError::Y)?;
    let z = number(line, 46..54, FieldError::Z)?;
    let occupancy = number(line, 54..60, FieldError::Occupancy)?;
    let temp_factor = number(line, 60..66, FieldError::TemperatureFactor)?;

    let element = trailing_text(line, 76..78, FieldError::Element)?
        .trim()
        .to_owned();
    let charge = trailing_text(line, 78..80, FieldError::Charge)?.to_owned();

    Ok(AtomRecord::from(AtomLine {
        record_type,
        atom_number,
        atom_name,
        alt_loc,
        residue_name,
        chain_id,
        residue_number,
        insertion_code,
        position: [x, y, z],
        occupancy,
        temp_factor,
        element,
        charge,
    }))
}

fn text(line: &str, columns: Range<usize>, field: FieldError) -> Result<&str, FormatError> {
    line.get(columns).ok_or(FormatError::FieldFormat(field))
}

/// Like [`text`], but the columns may be missing at the end of the line.
fn trailing_text(
    line: &str,
    columns: Range<usize>,
    field: FieldError,
) -> Result<&str, FormatError> {
    let end = columns.end.min(line.len());
    let start = columns.start.min(end);
    text(line, start..end, field)
}

fn character(line: &str, column: usize, field: FieldError) -> Result<char, FormatError> {
    text(line, column..(column + 1), field)?
        .chars()
        .next()
        .ok_or(FormatError::FieldFormat(field))
}

fn number<T>(line: &str, columns: Range<usize>, field: FieldError) -> Result<T, FormatError>
where
    T: FromStr,
{
    text(line, columns, field)?
        .trim()
        .parse()
        .map_err(|_| FormatError::FieldFormat(field))
}
