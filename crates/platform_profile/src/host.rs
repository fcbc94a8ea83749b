//! Host service contracts the facade reads from and writes to.
//!
//! The facade never touches browser globals directly. Browser adapters live in
//! `platform_profile_web`; this module ships inert and in-memory implementations for native
//! builds and tests.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::{
    schedule::{ManualScheduler, TaskScheduler},
    ViewportSample,
};

/// Source of raw viewport readings.
pub trait ViewportSource {
    /// Current viewport reading, or `None` when the host cannot measure.
    fn sample(&self) -> Option<ViewportSample>;
}

/// Sink for root-document attributes such as `dir` and `lang`.
pub trait DocumentAttributes {
    /// Sets `name` to `value` on the root document element.
    fn set_document_attribute(&self, name: &str, value: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Viewport source for hosts without a viewport.
pub struct NoopViewportSource;

impl ViewportSource for NoopViewportSource {
    fn sample(&self) -> Option<ViewportSample> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Document sink for hosts without a document.
pub struct NoopDocumentAttributes;

impl DocumentAttributes for NoopDocumentAttributes {
    fn set_document_attribute(&self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }
}

/// Settable viewport source used by tests and headless embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryViewport {
    sample: Rc<RefCell<Option<ViewportSample>>>,
}

impl MemoryViewport {
    /// Creates a source reporting `sample`.
    pub fn new(sample: ViewportSample) -> Self {
        Self {
            sample: Rc::new(RefCell::new(Some(sample))),
        }
    }

    /// Replaces the reported reading.
    pub fn set(&self, sample: ViewportSample) {
        *self.sample.borrow_mut() = Some(sample);
    }
}

impl ViewportSource for MemoryViewport {
    fn sample(&self) -> Option<ViewportSample> {
        *self.sample.borrow()
    }
}

/// Recording document sink used by tests and headless embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    attributes: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryDocument {
    /// Last value written for `name`.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }
}

impl DocumentAttributes for MemoryDocument {
    fn set_document_attribute(&self, name: &str, value: &str) -> Result<(), String> {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// Bundle of host services injected into a [`crate::Platform`].
#[derive(Clone)]
pub struct PlatformHost {
    /// Viewport reading source.
    pub viewport: Rc<dyn ViewportSource>,
    /// Root document attribute sink.
    pub document: Rc<dyn DocumentAttributes>,
    /// Timer service for debounced work.
    pub scheduler: Rc<dyn TaskScheduler>,
}

impl PlatformHost {
    /// Host with no viewport, no document, and a scheduler whose clock never moves.
    pub fn headless() -> Self {
        Self {
            viewport: Rc::new(NoopViewportSource),
            document: Rc::new(NoopDocumentAttributes),
            scheduler: Rc::new(ManualScheduler::new()),
        }
    }
}

impl Default for PlatformHost {
    fn default() -> Self {
        Self::headless()
    }
}
