//! Nested and embedded records may sit behind a `Box`.

use sifter::{to_json_string, Level, Sift};

#[derive(Sift)]
struct Owner {
    name: String,
}

#[derive(Sift)]
struct Stamp {
    #[sift(confidential = "level1")]
    at: u64,
}

#[derive(Sift)]
struct Document {
    #[sift(json = "owner", nested)]
    owner: Box<Owner>,
    #[sift(embed)]
    stamp: Box<Stamp>,
}

fn main() {
    let document = Document {
        owner: Box::new(Owner { name: "ada".into() }),
        stamp: Box::new(Stamp { at: 7 }),
    };
    assert_eq!(
        to_json_string(&document, Level::LEVEL1).unwrap(),
        r#"{"at":7,"owner":{"name":"ada"}}"#
    );
}
