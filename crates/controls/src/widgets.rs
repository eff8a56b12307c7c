use std::cell::{Cell, RefCell};

use crate::event::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickArgs {
    pub control: String,
    pub click_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChanged {
    pub control: String,
    pub previous: String,
    pub text: String,
}

#[derive(Debug)]
pub struct Button {
    name: String,
    text: RefCell<String>,
    enabled: Cell<bool>,
    clicks: Cell<u64>,
    pub click: Event<ClickArgs>,
}

impl Button {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: RefCell::new(text.into()),
            enabled: Cell::new(true),
            clicks: Cell::new(0),
            click: Event::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Simulates a user click. Disabled buttons ignore it and return false.
    pub fn perform_click(&self) -> bool {
        if !self.enabled.get() {
            return false;
        }
        let click_count = self.clicks.get() + 1;
        self.clicks.set(click_count);
        self.click.raise(&ClickArgs {
            control: self.name.clone(),
            click_count,
        });
        true
    }
}

#[derive(Debug)]
pub struct TextBox {
    name: String,
    text: RefCell<String>,
    pub text_changed: Event<TextChanged>,
}

impl TextBox {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: RefCell::new(String::new()),
            text_changed: Event::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Raises `text_changed` only when the text actually changes.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        let previous = self.text.replace(text.clone());
        if previous != text {
            self.text_changed.raise(&TextChanged {
                control: self.name.clone(),
                previous,
                text,
            });
        }
    }
}

#[derive(Debug, Default)]
pub struct Label {
    text: RefCell<String>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: RefCell::new(text.into()),
        }
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }
}

#[cfg(test)]
#[path = "tests/widgets_tests.rs"]
mod tests;
