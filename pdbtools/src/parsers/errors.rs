use std::io;
use thiserror::Error;

/// When a PDB field is ill-formatted, this enum tells what field has the issue.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("record type")]
    RecordType,
    #[error("atom serial number")]
    Serial,
    #[error("atom name")]
    AtomName,
    #[error("alternate location")]
    Alternate,
    #[error("residue name")]
    ResidueName,
    #[error("chain identifier")]
    ChainIdentifier,
    #[error("residue sequence number")]
    ResidueIdentifier,
    #[error("insertion code")]
    InsertionCode,
    #[error("x coordinate")]
    X,
    #[error("y coordinate")]
    Y,
    #[error("z coordinate")]
    Z,
    #[error("occupancy")]
    Occupancy,
    #[error("temperature factor")]
    TemperatureFactor,
    #[error("element symbol")]
    Element,
    #[error("charge")]
    Charge,
}

/// What when wrong when reading an ATOM line in a PDB file?
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[error("the {0} field is ill-formatted")]
    FieldFormat(FieldError),
    #[error("the line stops before the temperature factor")]
    LineTooShort,
}

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Line {line_number}: {error}.\n{content}")]
    FormatError {
        error: FormatError,
        /// Line number in the file, counting from 1.
        line_number: usize,
        content: String,
    },
    #[error("Error while reading the file: {0}")]
    IOError(#[from] io::Error),
}

impl ReadError {
    /// The format error and the line it occurred at, if the read failed on
    /// the content rather than on the file itself.
    pub fn format_error(&self) -> Option<(FormatError, usize)> {
        match self {
            Self::FormatError {
                error, line_number, ..
            } => Some((*error, *line_number)),
            Self::IOError(_) => None,
        }
    }
}
