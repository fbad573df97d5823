use crate::analysis::{centroid, rmsd, AnalysisError, CentroidMode};
use crate::parsers::errors::ReadError;
use crate::parsers::{read_structure, AtomRecord, Position};
use crate::transform::{center, check_center, CenterCheck};
use crate::writers::{write_atom_line, write_structure_file};
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Read PDB files, measure their centers and RMSD, and center them.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
    /// Print the results as JSON.
    #[clap(long, global = true, value_parser, default_value_t = false)]
    pub json: bool,
    /// Display more information about what the software does.
    #[clap(short, long, global = true, value_parser, default_value_t = false)]
    pub verbose: bool,
    /// Be very verbose about what the software does.
    #[clap(short, long, global = true, value_parser, default_value_t = false)]
    pub trace: bool,
}

impl Cli {
    pub fn new(command: Command) -> Self {
        Cli {
            command,
            json: false,
            verbose: false,
            trace: false,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Count the atoms, show the first one, and compute both centers.
    Info {
        /// The PDB file to read.
        #[clap(value_parser)]
        input: PathBuf,
    },
    /// Compute the centroid of a structure.
    Centroid {
        /// The PDB file to read.
        #[clap(value_parser)]
        input: PathBuf,
        /// "geometric" (or "geom"), or "center_of_mass" (or "com").
        #[clap(short, long, value_parser, default_value = "geometric")]
        mode: String,
    },
    /// Compute the RMSD between two structures listing the same atoms in the same order.
    Rmsd {
        #[clap(value_parser)]
        reference: PathBuf,
        #[clap(value_parser)]
        other: PathBuf,
    },
    /// Move the centroid of a structure to the origin.
    Center {
        /// The PDB file to read.
        #[clap(value_parser)]
        input: PathBuf,
        /// "geometric" (or "geom"), or "center_of_mass" (or "com").
        #[clap(short, long, value_parser, default_value = "geometric")]
        mode: String,
        /// Write the centered atoms to this file.
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
        /// Recompute both centers after the move.
        #[clap(long, value_parser, default_value_t = false)]
        check: bool,
    },
    /// Compute the RMSD between two structures, then center both.
    Compare {
        #[clap(value_parser)]
        first: PathBuf,
        #[clap(value_parser)]
        second: PathBuf,
        /// "geometric" (or "geom"), or "center_of_mass" (or "com").
        #[clap(short, long, value_parser, default_value = "center_of_mass")]
        mode: String,
        /// Write the first structure, centered, to this file.
        #[clap(long, value_parser)]
        output_first: Option<PathBuf>,
        /// Write the second structure, centered, to this file.
        #[clap(long, value_parser)]
        output_second: Option<PathBuf>,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Cannot read the structure in {}: {source}", path.display())]
    CannotReadStructure { path: PathBuf, source: ReadError },
    #[error("Cannot write the structure to {}: {source}", path.display())]
    CannotWriteStructure { path: PathBuf, source: io::Error },
    #[error("{0}")]
    AnalysisError(#[from] AnalysisError),
    #[error("Cannot write the report: {0}")]
    CannotWriteReport(#[from] io::Error),
    #[error("Cannot serialize the report: {0}")]
    CannotSerializeReport(#[from] serde_json::Error),
}

#[derive(Serialize, Debug)]
pub struct InfoReport {
    pub input: PathBuf,
    pub atom_count: usize,
    pub first_atom: Option<AtomRecord>,
    #[serde(skip)]
    first_line: Option<String>,
    pub centers: CenterCheck,
}

#[derive(Serialize, Debug)]
pub struct CentroidReport {
    pub input: PathBuf,
    pub mode: CentroidMode,
    pub centroid: Position,
}

#[derive(Serialize, Debug)]
pub struct RmsdReport {
    pub rmsd: Option<f64>,
}

#[derive(Serialize, Debug)]
pub struct CenterReport {
    pub input: PathBuf,
    pub mode: CentroidMode,
    /// The centroid before the structure moved.
    pub removed: Position,
    pub check: Option<CenterCheck>,
    pub output: Option<PathBuf>,
}

#[derive(Serialize, Debug)]
pub struct CompareReport {
    pub rmsd: Option<f64>,
    pub first: CenterReport,
    pub second: CenterReport,
}

struct DisplayPosition<'a>(&'a Position);

impl fmt::Display for DisplayPosition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "{x:.4} {y:.4} {z:.4}")
    }
}

struct DisplayRmsd(Option<f64>);

impl fmt::Display for DisplayRmsd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "rmsd = {value:.4}"),
            None => write!(f, "rmsd = undefined"),
        }
    }
}

fn write_check(f: &mut fmt::Formatter<'_>, check: &CenterCheck) -> fmt::Result {
    match &check.center_of_mass {
        Some(position) => writeln!(f, "New center of mass is: {}", DisplayPosition(position))?,
        None => writeln!(f, "New center of mass is: undefined")?,
    }
    match &check.geometric {
        Some(position) => writeln!(f, "New geometric center is: {}", DisplayPosition(position)),
        None => writeln!(f, "New geometric center is: undefined"),
    }
}

impl fmt::Display for InfoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {} atoms", self.input.display(), self.atom_count)?;
        if let Some(line) = &self.first_line {
            write!(f, "First atom:\n{line}")?;
        }
        match &self.centers.geometric {
            Some(position) => writeln!(f, "Geometric center: {}", DisplayPosition(position))?,
            None => writeln!(f, "Geometric center: undefined")?,
        }
        match &self.centers.center_of_mass {
            Some(position) => writeln!(f, "Center of mass: {}", DisplayPosition(position)),
            None => writeln!(f, "Center of mass: undefined"),
        }
    }
}

impl fmt::Display for CentroidReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} center: {}", self.mode, DisplayPosition(&self.centroid))
    }
}

impl fmt::Display for RmsdReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", DisplayRmsd(self.rmsd))
    }
}

impl fmt::Display for CenterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: removed {} center {}",
            self.input.display(),
            self.mode,
            DisplayPosition(&self.removed)
        )?;
        if let Some(check) = &self.check {
            write_check(f, check)?;
        }
        if let Some(output) = &self.output {
            writeln!(f, "Centered structure written to {}", output.display())?;
        }
        Ok(())
    }
}

impl fmt::Display for CompareReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", DisplayRmsd(self.rmsd))?;
        write!(f, "{}{}", self.first, self.second)
    }
}

/// Run one command and write its report to `output`.
pub fn run<W>(cli: Cli, output: &mut W) -> Result<(), AppError>
where
    W: Write,
{
    let json = cli.json;
    match cli.command {
        Command::Info { input } => {
            let atoms = load(&input)?;
            let first_line = match atoms.first() {
                Some(atom) => {
                    let mut buffer = Vec::new();
                    write_atom_line(&mut buffer, atom)?;
                    Some(String::from_utf8_lossy(&buffer).into_owned())
                }
                None => None,
            };
            let report = InfoReport {
                atom_count: atoms.len(),
                first_atom: atoms.first().cloned(),
                first_line,
                centers: check_center(&atoms),
                input,
            };
            emit(output, json, &report)?;
        }
        Command::Centroid { input, mode } => {
            let mode: CentroidMode = mode.parse()?;
            let atoms = load(&input)?;
            let report = CentroidReport {
                centroid: centroid(&atoms, mode)?,
                input,
                mode,
            };
            emit(output, json, &report)?;
        }
        Command::Rmsd { reference, other } => {
            let reference = load(&reference)?;
            let other = load(&other)?;
            let report = RmsdReport {
                rmsd: rmsd(&reference, &other),
            };
            emit(output, json, &report)?;
        }
        Command::Center {
            input,
            mode,
            output: destination,
            check,
        } => {
            let mode: CentroidMode = mode.parse()?;
            let mut atoms = load(&input)?;
            let report = center_and_save(input, &mut atoms, mode, destination, check)?;
            emit(output, json, &report)?;
        }
        Command::Compare {
            first,
            second,
            mode,
            output_first,
            output_second,
        } => {
            let mode: CentroidMode = mode.parse()?;
            let mut first_atoms = load(&first)?;
            let mut second_atoms = load(&second)?;
            let value = rmsd(&first_atoms, &second_atoms);
            let report = CompareReport {
                rmsd: value,
                first: center_and_save(first, &mut first_atoms, mode, output_first, true)?,
                second: center_and_save(second, &mut second_atoms, mode, output_second, true)?,
            };
            emit(output, json, &report)?;
        }
    }
    output.flush()?;
    Ok(())
}

fn load(path: &Path) -> Result<Vec<AtomRecord>, AppError> {
    let atoms = read_structure(path).map_err(|source| AppError::CannotReadStructure {
        path: path.to_owned(),
        source,
    })?;
    info!("{} atoms read from {}.", atoms.len(), path.display());
    Ok(atoms)
}

fn center_and_save(
    input: PathBuf,
    atoms: &mut [AtomRecord],
    mode: CentroidMode,
    destination: Option<PathBuf>,
    check: bool,
) -> Result<CenterReport, AppError> {
    let removed = center(atoms, mode)?;
    debug!("Removed the {mode} center from {}.", input.display());
    let check = check.then(|| check_center(atoms));
    if let Some(destination) = &destination {
        write_structure_file(destination, atoms).map_err(|source| {
            AppError::CannotWriteStructure {
                path: destination.clone(),
                source,
            }
        })?;
    }
    Ok(CenterReport {
        input,
        mode,
        removed,
        check,
        output: destination,
    })
}

fn emit<W, R>(output: &mut W, json: bool, report: &R) -> Result<(), AppError>
where
    W: Write,
    R: Serialize + fmt::Display,
{
    if json {
        serde_json::to_writer_pretty(&mut *output, report)?;
        writeln!(output)?;
    } else {
        write!(output, "{report}")?;
    }
    Ok(())
}
