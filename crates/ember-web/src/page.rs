//! One enhancement instance bound to a document.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ember_core::EnhancementConfig;
use ember_fx::Setup;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, Window};

use crate::listener::Listener;
use crate::particles::ParticleLoop;
use crate::reveal::Reveal;
use crate::scroll::ScrollEffects;
use crate::styles::{self, StyleInjector};
use crate::timers::Timers;
use crate::typing::TypingRun;
use crate::{effects, forms, navigation, reveal, scroll, typing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pending,
    Running,
    Stopped,
}

pub struct Page {
    pub window: Window,
    pub document: Document,
    pub config: EnhancementConfig,
    pub timers: Rc<Timers>,
    pub styles: Rc<StyleInjector>,
    listeners: RefCell<Vec<Listener>>,
    rng: RefCell<SmallRng>,
    reveal: RefCell<Option<Reveal>>,
    particles: RefCell<Option<ParticleLoop>>,
    scroll: RefCell<Option<ScrollEffects>>,
    typing: RefCell<Vec<TypingRun>>,
    phase: Cell<Phase>,
}

impl Page {
    pub fn new(window: Window, document: Document, config: EnhancementConfig, seed: u64) -> Self {
        Self {
            timers: Rc::new(Timers::new(window.clone())),
            styles: Rc::new(StyleInjector::new(document.clone())),
            window,
            document,
            config,
            listeners: RefCell::new(Vec::new()),
            rng: RefCell::new(SmallRng::seed_from_u64(seed)),
            reveal: RefCell::new(None),
            particles: RefCell::new(None),
            scroll: RefCell::new(None),
            typing: RefCell::new(Vec::new()),
            phase: Cell::new(Phase::Pending),
        }
    }

    /// Attach a listener that lives until [`Page::stop`].
    pub fn listen<F>(
        &self,
        target: &EventTarget,
        event: &'static str,
        callback: F,
    ) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let listener = Listener::new(target, event, callback)?;
        self.listeners.borrow_mut().push(listener);
        Ok(())
    }

    pub fn with_rng<T>(&self, f: impl FnOnce(&mut SmallRng) -> T) -> T {
        f(&mut self.rng.borrow_mut())
    }

    pub fn is_running(&self) -> bool {
        self.phase.get() == Phase::Running
    }

    /// Run every enabled enhancement in page order. Runs at most once.
    ///
    /// Each enhancement installs on its own; one that fails is logged and
    /// the rest still run.
    pub fn install(&self) {
        if self.phase.get() != Phase::Pending {
            return;
        }
        self.phase.set(Phase::Running);
        let config = &self.config;
        let mut setup = Setup::new();

        // Sticky header, progress bar and back-to-top share one scroll listener.
        *self.scroll.borrow_mut() = setup
            .step("scroll effects", || scroll::install(self))
            .flatten();
        if config.scroll.smooth_anchors {
            setup.step("smooth anchors", || navigation::smooth_anchors(self));
        }

        if supports_intersection_observer(&self.window) {
            *self.reveal.borrow_mut() = setup
                .step("reveal", || reveal::install(self))
                .flatten();
        } else {
            log::debug!("IntersectionObserver unavailable, skipping reveal and lazy images");
        }

        if config.forms.enabled {
            setup.step("form feedback", || forms::install(self));
        }
        if config.print.enabled {
            setup.step("print mode", || effects::print_mode(self));
        }
        if config.shuffle.enabled {
            setup.step("post shuffle", || effects::shuffle_posts(self));
        }
        if config.categories.enabled {
            setup.step("category highlight", || navigation::category_highlight(self));
        }
        if config.typing.enabled {
            *self.typing.borrow_mut() = setup
                .step("typing", || typing::install(self))
                .unwrap_or_default();
        }
        if config.links.enabled {
            setup.step("link transitions", || effects::link_transitions(self));
        }
        if config.particles.enabled {
            let particles = setup
                .step("particles", || {
                    self.with_rng(|rng| {
                        ParticleLoop::start(&self.window, &self.document, &config.particles, rng)
                    })
                })
                .flatten();
            if particles.is_none() {
                log::debug!("no particle container matches `{}`", config.particles.selector);
            }
            *self.particles.borrow_mut() = particles;
        }
        self.styles.inject("color-pulse", styles::COLOR_PULSE_CSS);
        if config.easter_egg.enabled {
            setup.step("easter egg", || effects::easter_egg(self));
        }

        if let Some(root) = self.document.document_element() {
            setup.step("loaded class", || root.class_list().add_1(&config.loaded_class));
        }
        if setup.failed().is_empty() {
            log::info!("site enhancements loaded");
        } else {
            log::info!(
                "site enhancements loaded, {} skipped after errors",
                setup.failed().len()
            );
        }
    }

    /// Detach everything this instance attached.
    pub fn stop(&self) {
        if self.phase.replace(Phase::Stopped) == Phase::Stopped {
            return;
        }
        self.listeners.borrow_mut().clear();
        self.timers.clear_all();
        if let Some(reveal) = self.reveal.borrow_mut().take() {
            reveal.remove();
        }
        if let Some(particles) = self.particles.borrow_mut().take() {
            particles.stop();
        }
        if let Some(scroll) = self.scroll.borrow_mut().take() {
            scroll.remove();
        }
        for run in self.typing.borrow_mut().drain(..) {
            run.finish();
        }
        self.styles.remove_all();
        if let Some(root) = self.document.document_element() {
            let _ = root.class_list().remove_1(&self.config.loaded_class);
        }
        log::debug!("site enhancements stopped");
    }
}

fn supports_intersection_observer(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}
