//! Adapters for emitting sifted records through `slog`.
//!
//! This module connects the sifting engine with `slog` by providing a
//! `slog::Value` that serializes the sifted tree as structured JSON via
//! `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is the sifted tree, never the
//!   original record.
//! - Avoiding fallible logging APIs: sifting failures are represented as
//!   placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or choose a level for the caller; the derived
//! `slog::Value` impl logs the public (`LEVEL0`) view.

use serde_json::Value as JsonValue;
use slog::{Key, Record as SlogRecord, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{record::Siftable, sift_to_level, Level};

/// Placeholder logged when a record cannot be sifted.
pub const SIFT_FAILED_PLACEHOLDER: &str = "Failed to sift value";

/// A `slog::Value` that emits a sifted record as structured JSON.
pub struct SiftedJson {
    value: JsonValue,
}

impl SiftedJson {
    /// Sifts `value` at `max_level` with the process-wide engine.
    ///
    /// If sifting fails, the stored value is the string
    /// [`SIFT_FAILED_PLACEHOLDER`].
    pub fn new<S>(value: &S, max_level: Level) -> Self
    where
        S: Siftable + ?Sized,
    {
        let value = sift_to_level(value, max_level).map_or_else(
            |_| JsonValue::String(SIFT_FAILED_PLACEHOLDER.to_string()),
            JsonValue::from,
        );
        Self { value }
    }

    /// Sifts `value` keeping only public (`LEVEL0`) fields.
    pub fn public<S>(value: &S) -> Self
    where
        S: Siftable + ?Sized,
    {
        Self::new(value, Level::LEVEL0)
    }

    /// Returns the JSON payload that will be logged.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for SiftedJson {
    fn serialize(
        &self,
        record: &SlogRecord<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts records into a `slog::Value` that logs their sifted form.
///
/// ## Example
/// ```ignore
/// use sifter::{slog::IntoSiftedJson, Level};
///
/// info!(logger, "device"; "device" => device.sifted_json(Level::LEVEL1));
/// ```
pub trait IntoSiftedJson: Siftable {
    /// Sifts `self` at `max_level` and wraps the result for logging.
    fn sifted_json(&self, max_level: Level) -> SiftedJson {
        SiftedJson::new(self, max_level)
    }
}

impl<T> IntoSiftedJson for T where T: Siftable + ?Sized {}
