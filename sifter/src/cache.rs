//! Memoization of compiled plans by type identity.

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    plan::{compile, TypePlan},
    record::RecordDescriptor,
    SiftError,
};

/// Read-mostly store of compiled plans, keyed by record type.
///
/// Entries live as long as the cache. Compilation runs outside the lock, so
/// two threads missing on the same type at once may both compile it; the
/// results are identical and the first insert wins. Failed compilations are
/// not stored.
#[derive(Debug, Default)]
pub struct PlanCache {
    plans: RwLock<HashMap<TypeId, Arc<TypePlan>>>,
}

impl PlanCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached plan for the described type, compiling it on a miss.
    pub fn get_or_compile(
        &self,
        descriptor: &'static RecordDescriptor,
    ) -> Result<Arc<TypePlan>, SiftError> {
        let id = descriptor.id();
        if let Some(plan) = self.get(id) {
            return Ok(plan);
        }

        let plan = Arc::new(compile(descriptor)?);

        // Plans are immutable, so a poisoned map is still consistent.
        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(plans.entry(id).or_insert(plan)))
    }

    /// Returns the cached plan for a type, without compiling.
    pub fn get(&self, id: TypeId) -> Option<Arc<TypePlan>> {
        self.plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Returns `true` if a plan for the type is cached.
    pub fn contains(&self, id: TypeId) -> bool {
        self.plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    /// Number of cached plans.
    pub fn len(&self) -> usize {
        self.plans.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if no plan is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
