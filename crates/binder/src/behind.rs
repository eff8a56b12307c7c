//! Type identities and the contracts front and behind types satisfy.

use std::{
    any::{Any, TypeId},
    fmt,
    hash::{Hash, Hasher},
    rc::Rc,
};

use serde::{Serialize, Serializer};

/// Identity of a type: its `TypeId` plus the name used in diagnostics.
///
/// Equality and hashing only look at the `TypeId`.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for TypeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// A control holder whose runtime type can be recovered behind `Rc<dyn Front>`.
///
/// Implemented for every `'static` type; front types never implement it by hand.
/// Call through the trait path (`Front::type_key(&*front)`) on an `Rc<dyn Front>`,
/// otherwise method lookup picks the impl for the `Rc` itself.
pub trait Front: Any {
    fn type_key(&self) -> TypeKey;
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<T: Any> Front for T {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

/// Release capability a behind type may opt into.
///
/// `dispose` runs from `Drop` of handles and binding sets, possibly while the
/// thread is already unwinding, so it must not panic.
pub trait Dispose {
    fn dispose(&mut self);
}

/// Logic driving the controls of one front instance.
///
/// `new` runs to completion before a binding is handed out, so event
/// subscriptions made there are live as soon as the caller gets the handle.
pub trait Behind: Sized + 'static {
    /// The constructor parameter. A front binds only if its runtime type is exactly this.
    type Front: Any;

    fn new(front: Rc<Self::Front>) -> anyhow::Result<Self>;

    /// Release hook for behind types holding subscriptions or other resources,
    /// typically `Some(Self::dispose)` for types implementing [`Dispose`].
    ///
    /// Read once when a binding is created; the handle keeps the returned hook.
    fn dispose_hook() -> Option<fn(&mut Self)> {
        None
    }
}
