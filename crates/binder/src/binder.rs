//! Turns a front instance into a live binding using a shared registry.

use std::{rc::Rc, sync::Arc};

use crate::{
    behind::Front,
    binding::BindingHandle,
    error::BindError,
    registry::Registry,
};

/// Creates bindings from the pairings of one [`Registry`].
#[derive(Clone)]
pub struct Binder {
    registry: Arc<Registry>,
}

impl Binder {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Constructs the behind instance registered for the runtime type of `front`.
    ///
    /// `owner` only anchors the binding's lifetime on the caller side; its type
    /// name is recorded on the handle and nothing else is read from it. Errors
    /// returned by the behind constructor come back unchanged as
    /// [`BindError::Behind`].
    pub fn create_binding<O: ?Sized>(
        &self,
        _owner: &O,
        front: Rc<dyn Front>,
    ) -> Result<BindingHandle, BindError> {
        let owner_type = std::any::type_name::<O>();
        let front_type = Front::type_key(&*front);

        let slot = self
            .registry
            .slot(front_type.id())
            .ok_or(BindError::UnregisteredFront { front: front_type })?;

        if !slot.entry.accepts(front_type) {
            return Err(BindError::IncompatibleConstructor {
                front: front_type,
                behind: slot.entry.behind,
                expected: slot.entry.parameter,
            });
        }

        let live = (slot.construct)(Front::into_any(front), front_type)?;
        tracing::debug!(
            front = front_type.name(),
            behind = slot.entry.behind.name(),
            owner = owner_type,
            "created binding"
        );
        Ok(BindingHandle::new(&slot.entry, owner_type, live))
    }
}

#[cfg(test)]
#[path = "tests/binder_tests.rs"]
mod tests;
