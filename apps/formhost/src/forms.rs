//! Designer-side front types and the logic bound to them.

use std::{
    cell::Cell,
    rc::{Rc, Weak},
};

use binder::{Behind, Dispose, Registry};
use controls::{Button, Label, SubscriptionId, TextBox};

pub struct GreetingForm {
    pub name: TextBox,
    pub greet: Button,
    pub output: Label,
}

impl GreetingForm {
    pub fn new() -> Self {
        Self {
            name: TextBox::new("name"),
            greet: Button::new("greet", "Greet"),
            output: Label::default(),
        }
    }
}

pub struct GreetingLogic {
    front: Rc<GreetingForm>,
    greet_click: SubscriptionId,
    name_changed: SubscriptionId,
    greeted: Rc<Cell<u64>>,
}

impl GreetingLogic {
    pub fn greeted(&self) -> u64 {
        self.greeted.get()
    }
}

impl Behind for GreetingLogic {
    type Front = GreetingForm;

    fn new(front: Rc<GreetingForm>) -> anyhow::Result<Self> {
        let greeted = Rc::new(Cell::new(0));

        let form: Weak<GreetingForm> = Rc::downgrade(&front);
        let counter = Rc::clone(&greeted);
        let greet_click = front.greet.click.subscribe(move |_| {
            let Some(form) = form.upgrade() else {
                return;
            };
            form.output
                .set_text(format!("Hello, {}!", form.name.text().trim()));
            counter.set(counter.get() + 1);
        });

        let form: Weak<GreetingForm> = Rc::downgrade(&front);
        let name_changed = front.name.text_changed.subscribe(move |change| {
            if let Some(form) = form.upgrade() {
                form.greet.set_enabled(!change.text.trim().is_empty());
            }
        });

        front.greet.set_enabled(!front.name.text().trim().is_empty());

        Ok(Self {
            front,
            greet_click,
            name_changed,
            greeted,
        })
    }

    fn dispose_hook() -> Option<fn(&mut Self)> {
        Some(Self::dispose)
    }
}

impl Dispose for GreetingLogic {
    fn dispose(&mut self) {
        self.front.greet.click.unsubscribe(self.greet_click);
        self.front.name.text_changed.unsubscribe(self.name_changed);
        tracing::debug!(greeted = self.greeted.get(), "greeting logic released");
    }
}

pub struct AboutForm {
    pub title: Label,
    pub close: Button,
}

impl AboutForm {
    pub fn new() -> Self {
        Self {
            title: Label::default(),
            close: Button::new("close", "Close"),
        }
    }
}

/// Fills in static text once; holds nothing that needs releasing.
pub struct AboutLogic;

impl Behind for AboutLogic {
    type Front = AboutForm;

    fn new(front: Rc<AboutForm>) -> anyhow::Result<Self> {
        front
            .title
            .set_text(concat!("formhost ", env!("CARGO_PKG_VERSION")));
        Ok(Self)
    }
}

pub fn register_forms(registry: &Registry) {
    registry.register_behind::<GreetingLogic>();
    registry.register_behind::<AboutLogic>();
}
