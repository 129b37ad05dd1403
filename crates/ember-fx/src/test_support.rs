//! Recording doubles for surfaces, stages and elements.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use ember_core::{ParticleConfig, Rgb};

use crate::animator::Stage;
use crate::element::ElementOps;
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Clear,
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        alpha: f64,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        alpha: f64,
    },
}

/// Records every draw call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub marks: Vec<Mark>,
}

impl RecordingSurface {
    pub fn circles(&self) -> usize {
        self.marks
            .iter()
            .filter(|m| matches!(m, Mark::Circle { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.marks
            .iter()
            .filter(|m| matches!(m, Mark::Line { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.marks.push(Mark::Clear);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, _color: Rgb, alpha: f64) {
        self.marks.push(Mark::Circle {
            x,
            y,
            radius,
            alpha,
        });
    }

    fn stroke_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        _color: Rgb,
        alpha: f64,
    ) {
        self.marks.push(Mark::Line {
            from,
            to,
            width,
            alpha,
        });
    }
}

/// A host document with at most one container.
#[derive(Debug, Default)]
pub struct MockStage {
    container: Option<(f64, f64)>,
    has_context: bool,
    pub mutations: usize,
}

impl MockStage {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_container(width: f64, height: f64) -> Self {
        Self {
            container: Some((width, height)),
            has_context: true,
            mutations: 0,
        }
    }

    pub fn without_context(width: f64, height: f64) -> Self {
        Self {
            container: Some((width, height)),
            has_context: false,
            mutations: 0,
        }
    }
}

impl Stage for MockStage {
    type Surface = RecordingSurface;

    fn mount(
        &mut self,
        _selector: &str,
        _config: &ParticleConfig,
    ) -> Option<(RecordingSurface, f64, f64)> {
        let (width, height) = self.container?;
        if !self.has_context {
            return None;
        }
        self.mutations += 1;
        Some((RecordingSurface::default(), width, height))
    }
}

/// An in-memory element.
#[derive(Debug, Default)]
pub struct MockElement {
    pub attributes: RefCell<BTreeMap<String, String>>,
    pub classes: RefCell<BTreeSet<String>>,
    pub styles: RefCell<BTreeMap<String, String>>,
    pub text: RefCell<String>,
}

impl MockElement {
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.classes.borrow_mut().insert(class.to_string());
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        *self.text.borrow_mut() = text.to_string();
        self
    }
}

impl ElementOps for MockElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, name: &str) {
        self.attributes.borrow_mut().remove(name);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }

    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut styles = self.styles.borrow_mut();
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }
}
