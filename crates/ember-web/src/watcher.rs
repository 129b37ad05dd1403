//! Shared viewport watcher for reveal animations and lazy images.
//!
//! One `IntersectionObserver` exists per root margin; all of them report into
//! a single [`WatchRegistry`]. Each observer keeps its own table of the keys
//! its targets carry, so one element can be watched for several reactions and
//! several instances on one page never see each other's keys.

use std::cell::RefCell;
use std::rc::Rc;

use ember_fx::{TargetKeys, Watch, WatchRegistry};
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::ElementRef;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;
type SharedTargets = Rc<RefCell<TargetKeys<Element>>>;

struct MarginObserver {
    root_margin: String,
    targets: SharedTargets,
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

pub struct ViewportWatcher {
    registry: Rc<RefCell<WatchRegistry>>,
    observers: RefCell<Vec<MarginObserver>>,
    thresholds: Vec<f64>,
}

impl ViewportWatcher {
    /// `thresholds` lists every visibility ratio targets may ask for.
    pub fn new(thresholds: &[f64]) -> Self {
        let mut thresholds = thresholds.to_vec();
        thresholds.push(0.0);
        thresholds.sort_by(f64::total_cmp);
        thresholds.dedup();
        Self {
            registry: Rc::new(RefCell::new(WatchRegistry::new())),
            observers: RefCell::new(Vec::new()),
            thresholds,
        }
    }

    /// Start watching `element`.
    pub fn watch(
        &self,
        element: &Element,
        root_margin: &str,
        watch: Watch,
    ) -> Result<(), JsValue> {
        let index = self.observer_index(root_margin)?;
        let key = self.registry.borrow_mut().register(watch);

        let observers = self.observers.borrow();
        let entry = &observers[index];
        entry.targets.borrow_mut().insert(element.clone(), key);
        entry.observer.observe(element);
        Ok(())
    }

    /// Number of targets still registered.
    pub fn pending(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Stop observing everything.
    pub fn disconnect(&self) {
        for entry in self.observers.borrow_mut().drain(..) {
            entry.observer.disconnect();
            entry.targets.borrow_mut().clear();
        }
        self.registry.borrow_mut().clear();
    }

    /// Index of the observer for `root_margin`, creating it if needed.
    fn observer_index(&self, root_margin: &str) -> Result<usize, JsValue> {
        if let Some(index) = self
            .observers
            .borrow()
            .iter()
            .position(|o| o.root_margin == root_margin)
        {
            return Ok(index);
        }

        let targets = SharedTargets::default();
        let callback = observer_callback(self.registry.clone(), targets.clone());

        let options = IntersectionObserverInit::new();
        let thresholds: Array = self.thresholds.iter().map(|t| JsValue::from_f64(*t)).collect();
        options.set_threshold(&thresholds);
        options.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        let mut observers = self.observers.borrow_mut();
        observers.push(MarginObserver {
            root_margin: root_margin.to_string(),
            targets,
            observer,
            _callback: callback,
        });
        Ok(observers.len() - 1)
    }
}

fn observer_callback(
    registry: Rc<RefCell<WatchRegistry>>,
    targets: SharedTargets,
) -> ObserverCallback {
    Closure::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            let target = entry.target();
            let report = targets.borrow_mut().report(
                &mut registry.borrow_mut(),
                &target,
                entry.is_intersecting(),
                entry.intersection_ratio(),
            );
            for reaction in &report.reactions {
                reaction.apply(&ElementRef(&target));
            }
            if report.release {
                observer.unobserve(&target);
            }
        }
    })
}
