/// Atomic mass, in atomic mass units, of the elements most often found in
/// biomolecular structures.
///
/// The lookup is case sensitive and expects a symbol without surrounding
/// spaces, as stored in [`AtomLine::element`](crate::parsers::AtomLine).
/// Unknown symbols have no mass rather than an error; only mass-weighted
/// analyses care about it.
pub fn lookup_mass(symbol: &str) -> Option<f64> {
    let mass = match symbol {
        "H"  =>  1.01,
        "C"  => 12.01,
        "N"  => 14.01,
        "O"  => 16.0,
        "P"  => 30.97,
        "S"  => 32.07,
        "MG" => 24.30,
        _ => return None,
    };
    Some(mass)
}
