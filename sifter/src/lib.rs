//! Confidentiality-level sifting for structured records.
//!
//! Records declare, per field, an output alias, an omit-on-empty rule and a
//! confidentiality level (`level0` public to `level3` most restricted). Sifting
//! a record at a maximum level produces an [`OutputTree`] holding only the
//! fields at or below that level, recursing through nested and embedded
//! records. A nested record's own level gates its whole subtree.
//!
//! This crate separates:
//! - **Tags**: the raw metadata strings attached to fields (`tag`).
//! - **Plans**: the per-type access plan compiled once from those tags and
//!   cached by type identity (`plan`, `cache`).
//! - **Sifting**: the breadth-first traversal that applies a plan and a level
//!   to a value (`sift`).
//!
//! ```rust
//! use sifter::{Level, Sift, Sifter};
//!
//! #[derive(Sift)]
//! struct Location {
//!     #[sift(confidential = "level1")]
//!     city: String,
//! }
//!
//! #[derive(Sift)]
//! struct Device {
//!     #[sift(json = "id")]
//!     serial: String,
//!     #[sift(json = "location", confidential = "level1", nested)]
//!     location: Location,
//! }
//!
//! let device = Device {
//!     serial: "A-1".into(),
//!     location: Location { city: "Lyon".into() },
//! };
//!
//! let sifter = Sifter::new();
//! let public = sifter.to_json_string(&device, Level::LEVEL0).unwrap();
//! assert_eq!(public, r#"{"id":"A-1"}"#);
//! let internal = sifter.to_json_string(&device, Level::LEVEL1).unwrap();
//! assert_eq!(internal, r#"{"id":"A-1","location":{"city":"Lyon"}}"#);
//! ```
//!
//! What this crate does not do:
//! - encrypt, decrypt or persist anything
//! - validate the values it passes through
//! - perform I/O or logging (the `slog` feature only adapts values for `slog`)
//!
//! The `Sift` derive macro lives in `sifter-derive` and is re-exported here.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use sifter_derive::Sift;

#[allow(unused_extern_crates)]
extern crate self as sifter;

// Module declarations
mod cache;
mod engine;
mod error;
mod level;
pub mod plan;
pub mod record;
mod sift;
#[cfg(feature = "slog")]
pub mod slog;
pub mod tag;
mod tree;

// Re-exports
pub use cache::PlanCache;
pub use engine::{sift_to_level, to_json_string, to_json_vec, Sifter};
pub use error::SiftError;
pub use level::Level;
pub use plan::{FieldPlan, TypePlan};
pub use record::{
    FieldDescriptor, FieldKind, FieldRef, LeafValue, Record, RecordDescriptor, RecordType,
    Siftable,
};
pub use sift::{sift, MAX_FIELD_ENTRIES};
pub use tag::TagError;
pub use tree::{Node, OutputTree};
