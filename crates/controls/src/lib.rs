//! Minimal single-threaded controls for front types: multicast events and a few widgets.

pub mod event;
pub mod widgets;

pub use event::{Event, SubscriptionId};
pub use widgets::{Button, ClickArgs, Label, TextBox, TextChanged};
