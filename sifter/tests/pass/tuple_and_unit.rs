//! Tuple fields are named by position; unit structs have no fields.

use sifter::{sift_to_level, Level, Sift};

#[derive(Sift)]
struct Coordinates(f64, #[sift(confidential = "level2")] f64);

#[derive(Sift)]
struct Heartbeat;

fn main() {
    let public = sift_to_level(&Coordinates(1.0, 2.0), Level::LEVEL0).unwrap();
    assert!(public.contains_key("0"));
    assert!(!public.contains_key("1"));

    assert!(sift_to_level(&Heartbeat, Level::UNRESTRICTED)
        .unwrap()
        .is_empty());
}
