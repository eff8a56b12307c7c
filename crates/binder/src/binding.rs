//! Binding handles: the caller-owned lifetime of one constructed behind instance.

use std::{any::Any, fmt, rc::Rc};

use serde::Serialize;

use crate::{
    behind::{Behind, TypeKey},
    error::BindError,
    registry::RegistryEntry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingStatus {
    Live,
    Disposed,
}

/// Type-erased view of a constructed behind instance.
trait BoundBehind {
    fn as_any(&self) -> &dyn Any;
    fn is_disposable(&self) -> bool;
    fn release(&mut self);
}

struct Bound<B> {
    behind: B,
    release: Option<fn(&mut B)>,
}

impl<B: 'static> BoundBehind for Bound<B> {
    fn as_any(&self) -> &dyn Any {
        &self.behind
    }

    fn is_disposable(&self) -> bool {
        self.release.is_some()
    }

    fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release(&mut self.behind);
        }
    }
}

/// A constructed behind instance with its release hook, resolved once at bind time.
pub(crate) struct LiveBehind {
    bound: Box<dyn BoundBehind>,
}

pub(crate) fn construct<B: Behind>(
    front: Rc<dyn Any>,
    front_type: TypeKey,
) -> Result<LiveBehind, BindError> {
    let front =
        front
            .downcast::<B::Front>()
            .map_err(|_| BindError::IncompatibleConstructor {
                front: front_type,
                behind: TypeKey::of::<B>(),
                expected: TypeKey::of::<B::Front>(),
            })?;

    let behind = B::new(front)?;
    Ok(LiveBehind {
        bound: Box::new(Bound {
            behind,
            release: B::dispose_hook(),
        }),
    })
}

/// Exclusive handle on a live binding.
///
/// Disposal releases the behind instance's resources (when it has the capability)
/// and drops it. Disposing twice is a no-op, and dropping a live handle disposes it.
pub struct BindingHandle {
    front: TypeKey,
    behind: TypeKey,
    owner: &'static str,
    disposable: bool,
    live: Option<LiveBehind>,
}

impl BindingHandle {
    pub(crate) fn new(entry: &RegistryEntry, owner: &'static str, live: LiveBehind) -> Self {
        Self {
            front: entry.front,
            behind: entry.behind,
            owner,
            disposable: live.bound.is_disposable(),
            live: Some(live),
        }
    }

    pub fn dispose(&mut self) {
        let Some(mut live) = self.live.take() else {
            return;
        };
        live.bound.release();
        drop(live);
        tracing::debug!(
            front = self.front.name(),
            behind = self.behind.name(),
            owner = self.owner,
            "disposed binding"
        );
    }

    pub fn status(&self) -> BindingStatus {
        if self.live.is_some() {
            BindingStatus::Live
        } else {
            BindingStatus::Disposed
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.live.is_none()
    }

    pub fn front_type(&self) -> TypeKey {
        self.front
    }

    pub fn behind_type(&self) -> TypeKey {
        self.behind
    }

    pub fn owner_type(&self) -> &'static str {
        self.owner
    }

    /// Whether the behind type exposed a release capability when it was bound.
    pub fn is_disposable(&self) -> bool {
        self.disposable
    }

    /// The behind instance, while the binding is live.
    pub fn behind<B: Any>(&self) -> Option<&B> {
        self.live.as_ref()?.bound.as_any().downcast_ref::<B>()
    }
}

impl Drop for BindingHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for BindingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingHandle")
            .field("front", &self.front)
            .field("behind", &self.behind)
            .field("owner", &self.owner)
            .field("status", &self.status())
            .finish()
    }
}

/// Bindings anchored to one owner, e.g. everything bound while a window was open.
#[derive(Debug, Default)]
pub struct BindingSet {
    handles: Vec<BindingHandle>,
}

impl BindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, handle: BindingHandle) {
        self.handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_disposed()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BindingHandle> {
        self.handles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut BindingHandle> {
        self.handles.iter_mut()
    }

    /// Disposes every handle, newest first, and empties the set.
    /// Returns how many were still live.
    pub fn dispose_all(&mut self) -> usize {
        let mut disposed = 0;
        while let Some(mut handle) = self.handles.pop() {
            if !handle.is_disposed() {
                handle.dispose();
                disposed += 1;
            }
        }
        disposed
    }
}

impl Drop for BindingSet {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

#[cfg(test)]
#[path = "tests/binding_tests.rs"]
mod tests;
