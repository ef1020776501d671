//! Entrypoints: the [`Sifter`] engine and the free functions that use the
//! process-wide instance.

use std::sync::{Arc, OnceLock};

use crate::{
    cache::PlanCache,
    plan::TypePlan,
    record::{RecordType, Siftable},
    sift::sift,
    tree::OutputTree,
    Level, SiftError,
};

/// Sifting engine: a plan cache plus the operations that use it.
///
/// Cloning is cheap; clones share the cache.
#[derive(Clone, Debug, Default)]
pub struct Sifter {
    cache: Arc<PlanCache>,
}

impl Sifter {
    /// Creates an engine with its own, empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine over an existing cache.
    #[must_use]
    pub fn with_cache(cache: Arc<PlanCache>) -> Self {
        Self { cache }
    }

    /// Returns the process-wide engine used by [`sift_to_level`].
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<Sifter> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Returns the plan cache, shared with every clone of this engine.
    pub fn cache(&self) -> &Arc<PlanCache> {
        &self.cache
    }

    /// Returns the plan for `T`, compiling and caching it if needed.
    pub fn plan<T: RecordType>(&self) -> Result<Arc<TypePlan>, SiftError> {
        self.cache.get_or_compile(T::record_descriptor())
    }

    /// Sifts a record, or a reference to one, keeping fields up to `max_level`.
    pub fn sift<S>(&self, value: &S, max_level: Level) -> Result<OutputTree, SiftError>
    where
        S: Siftable + ?Sized,
    {
        let record = value.as_record()?;
        let plan = self.cache.get_or_compile(record.descriptor())?;
        sift(record, &plan, max_level)
    }

    /// Sifts a record and encodes the result as JSON bytes.
    pub fn to_json_vec<S>(&self, value: &S, max_level: Level) -> Result<Vec<u8>, SiftError>
    where
        S: Siftable + ?Sized,
    {
        let tree = self.sift(value, max_level)?;
        serde_json::to_vec(&tree).map_err(|source| SiftError::Encode {
            field: "<root>",
            source,
        })
    }

    /// Sifts a record and encodes the result as a JSON string.
    pub fn to_json_string<S>(&self, value: &S, max_level: Level) -> Result<String, SiftError>
    where
        S: Siftable + ?Sized,
    {
        let tree = self.sift(value, max_level)?;
        serde_json::to_string(&tree).map_err(|source| SiftError::Encode {
            field: "<root>",
            source,
        })
    }
}

/// Sifts a record, or a reference to one, with the process-wide engine.
///
/// ```rust
/// use sifter::{sift_to_level, Level, Sift};
///
/// #[derive(Sift)]
/// struct Account {
///     #[sift(json = "user")]
///     name: String,
///     #[sift(confidential = "level2")]
///     iban: String,
/// }
///
/// let account = Account {
///     name: "ada".into(),
///     iban: "FR76 3000 6000 0112 3456 7890 189".into(),
/// };
/// let public = sift_to_level(&account, Level::LEVEL0).unwrap();
/// assert!(public.contains_key("user"));
/// assert!(!public.contains_key("iban"));
/// ```
pub fn sift_to_level<S>(value: &S, max_level: Level) -> Result<OutputTree, SiftError>
where
    S: Siftable + ?Sized,
{
    Sifter::global().sift(value, max_level)
}

/// Sifts a record with the process-wide engine and encodes it as JSON bytes.
///
/// Ignore and omit-on-empty rules apply at every level, including
/// [`Level::UNRESTRICTED`].
pub fn to_json_vec<S>(value: &S, max_level: Level) -> Result<Vec<u8>, SiftError>
where
    S: Siftable + ?Sized,
{
    Sifter::global().to_json_vec(value, max_level)
}

/// Sifts a record with the process-wide engine and encodes it as a JSON string.
pub fn to_json_string<S>(value: &S, max_level: Level) -> Result<String, SiftError>
where
    S: Siftable + ?Sized,
{
    Sifter::global().to_json_string(value, max_level)
}
