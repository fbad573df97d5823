use crate::parsers::AtomRecord;
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write one atom as a PDB ATOM/HETATM line.
///
/// The layout is the printf format
/// `%-6s%5d %-4s%1s%-3s %1s%4d%1s   %8.3f%8.3f%8.3f%6.2f%6.2f          %1s%-2s`.
/// The element only has a minimum width of one, so a two letter element
/// pushes the charge one column to the right of where a reader expects it.
/// Values wider than their column are written in full. The sink is neither
/// flushed nor closed.
pub fn write_atom_line<W>(sink: &mut W, atom: &AtomRecord) -> io::Result<()>
where
    W: Write,
{
    let line = atom.line();
    let [x, y, z] = line.position;
    writeln!(
        sink,
        "{:<6}{:>5} {:<4}{:>1}{:<3} {:>1}{:>4}{:>1}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>1}{:<2}",
        line.record_type,
        line.atom_number,
        line.atom_name,
        line.alt_loc,
        line.residue_name,
        line.chain_id,
        line.residue_number,
        line.insertion_code,
        x,
        y,
        z,
        line.occupancy,
        line.temp_factor,
        line.element,
        line.charge,
    )
}

/// Write every atom, in order, with [`write_atom_line`].
pub fn write_structure<W>(sink: &mut W, atoms: &[AtomRecord]) -> io::Result<()>
where
    W: Write,
{
    for atom in atoms {
        write_atom_line(sink, atom)?;
    }
    Ok(())
}

/// Create or truncate the file at `path` and write the atoms in it.
pub fn write_structure_file<P>(path: P, atoms: &[AtomRecord]) -> io::Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut output = BufWriter::new(File::create(path)?);
    write_structure(&mut output, atoms)?;
    output.flush()?;
    debug!("Wrote {} atoms to {}.", atoms.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{parse_atom_line, read_pdb, AtomLine};
    use crate::test_ressource;
    use rstest::rstest;
    use std::fs;
    use std::io::Cursor;

    fn to_line(atom: &AtomRecord) -> String {
        let mut buffer = Vec::new();
        write_atom_line(&mut buffer, atom).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_write_atom_line() {
        let atom = AtomRecord::from(AtomLine {
            record_type: "ATOM".to_owned(),
            atom_number: 1,
            atom_name: " N  ".to_owned(),
            alt_loc: ' ',
            residue_name: "GLY".to_owned(),
            chain_id: 'A',
            residue_number: 3,
            insertion_code: ' ',
            position: [17.119, 0.186, 36.32],
            occupancy: 1.0,
            temp_factor: 64.1,
            element: "N".to_owned(),
            charge: "".to_owned(),
        });
        assert_eq!(
            to_line(&atom),
            "ATOM      1  N   GLY A   3      17.119   0.186  36.320  1.00 64.10          N  \n"
        );
    }

    #[test]
    fn test_write_two_letter_element() {
        let atom = AtomRecord::from(AtomLine {
            record_type: "HETATM".to_owned(),
            atom_number: 1203,
            atom_name: "MG".to_owned(),
            residue_name: "MG".to_owned(),
            chain_id: 'B',
            residue_number: 201,
            position: [5.0, -5.0, 0.5],
            occupancy: 0.5,
            temp_factor: 12.0,
            element: "MG".to_owned(),
            charge: "2+".to_owned(),
            ..Default::default()
        });
        assert_eq!(
            to_line(&atom),
            "HETATM 1203 MG   MG  B 201       5.000  -5.000   0.500  0.50 12.00          MG2+\n"
        );
    }

    #[test]
    fn test_write_overflowing_fields() {
        let atom = AtomRecord::from(AtomLine {
            atom_number: 1234567,
            residue_number: -12345,
            position: [-12345.6789, 0.0, 123456.0],
            ..Default::default()
        });
        assert_eq!(
            to_line(&atom),
            "ATOM  1234567           -12345    -12345.679   0.000123456.000  0.00  0.00             \n"
        );
    }

    #[rstest]
    #[case("ATOM      1  N   GLY A   3      17.119   0.186  36.320  1.00 64.10          N  ")]
    #[case("HETATM 1203 MG    MG B 201B      5.000  -5.000   0.500  0.50 12.00          MG2+")]
    #[case("ATOM    512  CA AARG C  77A    -10.250  99.999  -0.001  0.35  5.00          C  ")]
    fn test_write_parsed_line(#[case] line: &str) {
        let atom = parse_atom_line(line).unwrap();
        assert_eq!(to_line(&atom), format!("{line}\n"));
    }

    #[test]
    fn test_write_structure_file() {
        let atoms = crate::parsers::read_structure(test_ressource!("dipeptide.pdb")).unwrap();
        let path = std::env::temp_dir().join(format!("{}.pdb", uuid::Uuid::new_v4()));
        write_structure_file(&path, &atoms).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(written.lines().count(), atoms.len());
        let read_back = read_pdb(Cursor::new(written)).unwrap();
        assert_eq!(read_back, atoms);
    }
}
