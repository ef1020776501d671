//! The crate path can be given explicitly, e.g. when `sifter` is re-exported.

mod reexport {
    pub use sifter as inner;
}

use sifter::{Level, Sifter};

#[derive(sifter::Sift)]
#[sift(crate = "crate::reexport::inner")]
struct Session {
    #[sift(json = "user")]
    user: String,
    #[sift(json = "token", confidential = "level3")]
    token: String,
}

fn main() {
    let session = Session {
        user: "ada".into(),
        token: "t".into(),
    };
    let tree = Sifter::new().sift(&session, Level::LEVEL2).unwrap();
    assert_eq!(tree.len(), 1);
    assert!(tree.contains_key("user"));
}
