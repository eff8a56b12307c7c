//! Front type -> behind type mapping shared by every binder of a process.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use serde::Serialize;

use crate::{
    behind::{Behind, TypeKey},
    binding::{construct, LiveBehind},
    error::BindError,
};

pub(crate) type Construct = fn(std::rc::Rc<dyn Any>, TypeKey) -> Result<LiveBehind, BindError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub front: TypeKey,
    pub behind: TypeKey,
    /// Constructor parameter type of `behind`.
    pub parameter: TypeKey,
}

impl RegistryEntry {
    pub fn accepts(&self, front: TypeKey) -> bool {
        self.parameter == front
    }
}

#[derive(Clone, Copy)]
pub(crate) struct Slot {
    pub(crate) entry: RegistryEntry,
    pub(crate) construct: Construct,
}

#[derive(Default)]
pub struct Registry {
    slots: RwLock<HashMap<TypeId, Slot>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps front type `F` to behind type `B`, replacing any previous mapping for `F`.
    ///
    /// Whether `B` can actually be constructed from an `F` is only checked when a
    /// binding is created. Returns the replaced entry, if any.
    pub fn register<F, B>(&self) -> Option<RegistryEntry>
    where
        F: Any,
        B: Behind,
    {
        let slot = Slot {
            entry: RegistryEntry {
                front: TypeKey::of::<F>(),
                behind: TypeKey::of::<B>(),
                parameter: TypeKey::of::<B::Front>(),
            },
            construct: construct::<B>,
        };
        let replaced = self
            .write()
            .insert(TypeId::of::<F>(), slot)
            .map(|previous| previous.entry);

        match &replaced {
            Some(previous) => tracing::warn!(
                front = slot.entry.front.name(),
                previous = previous.behind.name(),
                behind = slot.entry.behind.name(),
                "replaced registered behind type"
            ),
            None => tracing::debug!(
                front = slot.entry.front.name(),
                behind = slot.entry.behind.name(),
                "registered behind type"
            ),
        }
        replaced
    }

    /// Registers `B` against its own constructor parameter type.
    pub fn register_behind<B: Behind>(&self) -> Option<RegistryEntry> {
        self.register::<B::Front, B>()
    }

    pub fn resolve(&self, front: TypeId) -> Option<RegistryEntry> {
        self.read().get(&front).map(|slot| slot.entry)
    }

    pub fn resolve_type<F: Any>(&self) -> Option<RegistryEntry> {
        self.resolve(TypeId::of::<F>())
    }

    pub fn contains<F: Any>(&self) -> bool {
        self.read().contains_key(&TypeId::of::<F>())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of all entries ordered by front type name.
    pub fn entries(&self) -> Vec<RegistryEntry> {
        let mut entries: Vec<_> = self.read().values().map(|slot| slot.entry).collect();
        entries.sort_by(|a, b| a.front.name().cmp(b.front.name()));
        entries
    }

    pub(crate) fn slot(&self, front: TypeId) -> Option<Slot> {
        self.read().get(&front).copied()
    }

    // Every mutation is a single insert, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Slot>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Slot>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
