//! Run-time binder pairing designer-produced front types with the logic that drives them.
//!
//! A [`Registry`] maps each front type to a behind type. A [`Binder`] looks up the
//! runtime type of a front instance, constructs the registered behind type with
//! that instance and hands back a [`BindingHandle`] owning the result.

pub mod behind;
pub mod binder;
pub mod binding;
pub mod error;
pub mod registry;

pub use behind::{Behind, Dispose, Front, TypeKey};
pub use binder::Binder;
pub use binding::{BindingHandle, BindingSet, BindingStatus};
pub use error::BindError;
pub use registry::{Registry, RegistryEntry};
