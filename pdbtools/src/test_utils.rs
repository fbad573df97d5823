/// Path to a file in the test resources of the crate.
#[macro_export]
macro_rules! test_ressource {
    ($fname:expr) => {
        concat!(env!("CARGO_MANIFEST_DIR"), "/ressources/tests/", $fname) // assumes Linux ('/')!
    };
}
