//! Compile tests for `#[derive(Sift)]` usage that must be accepted:
//! - tuple and unit structs
//! - boxed nested records
//! - an explicit `#[sift(crate = "...")]` path

#[test]
fn derive_pass_tests() {
    let t = trybuild::TestCases::new();
    t.pass("tests/pass/*.rs");
}
