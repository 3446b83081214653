//! Host-side registration model.
//!
//! [`Registrar`] is the load/unload state machine the bundle's `__init__.py`
//! implements in Python, expressed against a [`Host`] trait so it can be
//! driven and checked outside the host application.

pub mod bundle;
pub mod render;

use crate::errors::{BadkitError, Result};
use crate::types::addon::BlendUnit;
use crate::types::class::ClassRecord;
use crate::utils::logger::{LogLevel, Logger};
use std::path::Path;

pub use bundle::Blobs;

/// What a menu draw callback renders: a button for one operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub operator_idname: String,
    pub text: Option<String>,
}

/// Identifies an appended draw callback so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawHandle(pub u64);

/// The plugin ABI of the host application.
pub trait Host {
    fn register_class(&mut self, class: &ClassRecord) -> Result<()>;
    fn unregister_class(&mut self, bl_idname: &str) -> Result<()>;

    /// Exposes a property group instance on the active document under `attribute`.
    fn attach_scope_property(&mut self, attribute: &str, class: &ClassRecord) -> Result<()>;
    fn detach_scope_property(&mut self, attribute: &str) -> Result<()>;

    fn append_draw(&mut self, target: &str, entry: MenuEntry) -> Result<DrawHandle>;
    fn remove_draw(&mut self, target: &str, handle: DrawHandle) -> Result<()>;

    fn append_node_groups(&mut self, _unit: &BlendUnit) -> Result<()> {
        Ok(())
    }

    fn remove_node_groups(&mut self, _unit: &BlendUnit) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrarState {
    Unregistered,
    Registered,
}

/// One applied effect and how to undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Teardown {
    NodeGroups(BlendUnit),
    Class(String),
    ScopeProperty(String),
    Draw { target: String, handle: DrawHandle },
}

impl Teardown {
    fn describe(&self) -> String {
        match self {
            Teardown::NodeGroups(unit) => format!("node groups of '{}'", unit.name),
            Teardown::Class(idname) => format!("class {}", idname),
            Teardown::ScopeProperty(attr) => format!("scope property {}", attr),
            Teardown::Draw { target, .. } => format!("draw callback on {}", target),
        }
    }

    fn undo<H: Host + ?Sized>(&self, host: &mut H) -> Result<()> {
        match self {
            Teardown::NodeGroups(unit) => host.remove_node_groups(unit),
            Teardown::Class(idname) => host.unregister_class(idname),
            Teardown::ScopeProperty(attr) => host.detach_scope_property(attr),
            Teardown::Draw { target, handle } => host.remove_draw(target, *handle),
        }
    }
}

/// Outcome of [`Registrar::unload`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnloadReport {
    pub steps: usize,
    pub failures: Vec<String>,
}

impl UnloadReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

pub struct Registrar {
    classes: Vec<ClassRecord>,
    blend: Vec<BlendUnit>,
    state: RegistrarState,
    teardown: Vec<Teardown>,
}

impl Registrar {
    pub fn from_blobs(blobs: Blobs) -> Self {
        Registrar {
            classes: blobs.classes,
            blend: blobs.blend,
            state: RegistrarState::Unregistered,
            teardown: Vec::new(),
        }
    }

    pub fn from_archive(path: &Path) -> Result<Self> {
        Ok(Self::from_blobs(Blobs::from_archive(path)?))
    }

    pub fn state(&self) -> RegistrarState {
        self.state
    }

    pub fn classes(&self) -> &[ClassRecord] {
        &self.classes
    }

    /// Effects applied and not yet undone, oldest first.
    pub fn pending_teardown(&self) -> &[Teardown] {
        &self.teardown
    }

    /// Appends auxiliary data, then registers every class in order.
    ///
    /// A no-op when already registered. On failure the effects applied so
    /// far stay recorded and [`Registrar::unload`] undoes them; loading again
    /// before that is refused.
    pub fn load<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        if self.state == RegistrarState::Registered {
            return Ok(());
        }
        if !self.teardown.is_empty() {
            return Err(BadkitError::host(
                "a previous load failed part way; unload before loading again",
            ));
        }

        for unit in &self.blend {
            host.append_node_groups(unit)?;
            self.teardown.push(Teardown::NodeGroups(unit.clone()));
        }

        for class in &self.classes {
            host.register_class(class)?;
            self.teardown.push(Teardown::Class(class.bl_idname.clone()));

            if class.is_property_container() {
                host.attach_scope_property(&class.bl_idname, class)?;
                self.teardown
                    .push(Teardown::ScopeProperty(class.bl_idname.clone()));
            }

            if let Some(target) = class.draw_target() {
                let entry = MenuEntry {
                    operator_idname: class.bl_idname.clone(),
                    text: class.bl_label.clone(),
                };
                let handle = host.append_draw(target, entry)?;
                self.teardown.push(Teardown::Draw {
                    target: target.to_string(),
                    handle,
                });
            }
        }

        self.state = RegistrarState::Registered;
        Ok(())
    }

    /// Undoes every recorded effect in reverse order. Failures are logged and
    /// counted, never returned; the registrar always ends unregistered.
    pub fn unload<H: Host + ?Sized>(&mut self, host: &mut H) -> UnloadReport {
        let logger = Logger::new();
        let mut report = UnloadReport::default();

        while let Some(step) = self.teardown.pop() {
            report.steps += 1;
            if let Err(err) = step.undo(host) {
                let message = format!("Teardown of {} failed: {}", step.describe(), err);
                logger.log_message(LogLevel::Warning, &message);
                report.failures.push(message);
            }
        }

        self.state = RegistrarState::Unregistered;
        report
    }
}
