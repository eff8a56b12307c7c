//! Simulated windowing host: opens windows, binds their forms, drives input, closes them.

use std::{rc::Rc, sync::Arc};

use anyhow::Context;
use binder::{BindError, Binder, BindingSet, Front, Registry, RegistryEntry, TypeKey};
use serde::Serialize;

use crate::{
    config::Settings,
    forms::{self, AboutForm, GreetingForm, GreetingLogic},
};

#[derive(Debug, Serialize)]
pub struct HostReport {
    pub registry: Vec<RegistryEntry>,
    pub windows: Vec<WindowReport>,
}

#[derive(Debug, Serialize)]
pub struct WindowReport {
    pub id: usize,
    pub bindings: Vec<BindingReport>,
    pub greeting: String,
    pub about: String,
    pub greeted: u64,
    pub disposed: usize,
    pub listeners_after_close: usize,
}

#[derive(Debug, Serialize)]
pub struct BindingReport {
    pub front: TypeKey,
    pub behind: TypeKey,
    pub disposable: bool,
}

/// Bindings owned by one open window; closing the window disposes them.
pub struct Window {
    id: usize,
    bindings: BindingSet,
}

impl Window {
    pub fn open(id: usize) -> Self {
        tracing::debug!(window = id, "window opened");
        Self {
            id,
            bindings: BindingSet::new(),
        }
    }

    pub fn bind(&mut self, binder: &Binder, front: Rc<dyn Front>) -> Result<(), BindError> {
        let handle = binder.create_binding(&*self, front)?;
        self.bindings.insert(handle);
        Ok(())
    }

    pub fn greeting_logic(&self) -> Option<&GreetingLogic> {
        self.bindings
            .iter()
            .find_map(|handle| handle.behind::<GreetingLogic>())
    }

    fn binding_reports(&self) -> Vec<BindingReport> {
        self.bindings
            .iter()
            .map(|handle| BindingReport {
                front: handle.front_type(),
                behind: handle.behind_type(),
                disposable: handle.is_disposable(),
            })
            .collect()
    }

    pub fn close(mut self) -> usize {
        let disposed = self.bindings.dispose_all();
        tracing::debug!(window = self.id, disposed, "window closed");
        disposed
    }
}

pub fn build_binder() -> Binder {
    let registry = Arc::new(Registry::new());
    forms::register_forms(&registry);
    Binder::new(registry)
}

pub fn run(settings: &Settings) -> anyhow::Result<HostReport> {
    let binder = build_binder();
    let mut windows = Vec::with_capacity(settings.windows);

    for id in 1..=settings.windows {
        windows.push(run_window(&binder, settings, id)?);
    }

    tracing::info!(windows = windows.len(), "all windows closed");
    Ok(HostReport {
        registry: binder.registry().entries(),
        windows,
    })
}

fn run_window(binder: &Binder, settings: &Settings, id: usize) -> anyhow::Result<WindowReport> {
    let greeting = Rc::new(GreetingForm::new());
    let about = Rc::new(AboutForm::new());

    let mut window = Window::open(id);
    window
        .bind(binder, greeting.clone())
        .with_context(|| format!("failed to bind greeting form of window {id}"))?;
    window
        .bind(binder, about.clone())
        .with_context(|| format!("failed to bind about form of window {id}"))?;
    let bindings = window.binding_reports();

    greeting.name.set_text(format!("{} #{id}", settings.user_name));
    for _ in 0..settings.clicks {
        greeting.greet.perform_click();
    }
    let greeted = window.greeting_logic().map_or(0, GreetingLogic::greeted);
    about.close.perform_click();

    let disposed = window.close();
    let listeners_after_close =
        greeting.greet.click.handler_count() + greeting.name.text_changed.handler_count();

    tracing::info!(window = id, greeted, disposed, "window session finished");
    Ok(WindowReport {
        id,
        bindings,
        greeting: greeting.output.text(),
        about: about.title.text(),
        greeted,
        disposed,
        listeners_after_close,
    })
}

pub fn render_text(report: &HostReport) -> String {
    let mut out = String::new();
    out.push_str("registered forms:\n");
    for entry in &report.registry {
        out.push_str(&format!("  {} -> {}\n", entry.front, entry.behind));
    }
    for window in &report.windows {
        out.push_str(&format!(
            "window {}: \"{}\" (greeted {}x, {} bindings disposed, {} listeners left)\n",
            window.id, window.greeting, window.greeted, window.disposed, window.listeners_after_close
        ));
    }
    out
}
