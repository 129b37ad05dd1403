//! Display-refresh loop driving the particle overlay.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ember_core::ParticleConfig;
use ember_fx::ParticleAnimator;
use rand::Rng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::canvas::{CanvasSurface, DomStage};
use crate::listener::Listener;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// A running particle overlay with an explicit stop handle.
pub struct ParticleLoop {
    window: Window,
    animator: Rc<RefCell<ParticleAnimator<CanvasSurface>>>,
    frame: Rc<RefCell<Option<FrameCallback>>>,
    request: Rc<Cell<Option<i32>>>,
    _resize: Option<Listener>,
}

impl ParticleLoop {
    /// Mount the overlay and schedule the first frame. Returns `Ok(None)`
    /// without touching the page when there is no container or no canvas
    /// support.
    pub fn start<R: Rng + ?Sized>(
        window: &Window,
        document: &Document,
        config: &ParticleConfig,
        rng: &mut R,
    ) -> Result<Option<Self>, JsValue> {
        let mut stage = DomStage::new(document);
        let Some(animator) = ParticleAnimator::mount(&mut stage, config, rng) else {
            return Ok(None);
        };
        let animator = Rc::new(RefCell::new(animator));
        let request = Rc::new(Cell::new(None));
        let frame: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        {
            let animator = animator.clone();
            let request = request.clone();
            let slot = frame.clone();
            let window = window.clone();
            *frame.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
                if !animator.borrow_mut().frame() {
                    request.set(None);
                    return;
                }
                if let Some(callback) = slot.borrow().as_ref() {
                    request.set(
                        window
                            .request_animation_frame(callback.as_ref().unchecked_ref())
                            .ok(),
                    );
                }
            }));
        }

        let resize = {
            let animator = animator.clone();
            Listener::new(window, "resize", move |_| {
                let mut animator = animator.borrow_mut();
                let (width, height) = animator.surface().fit_to_container();
                animator.resize(width, height);
            })
            .ok()
        };

        let particle_loop = Self {
            window: window.clone(),
            animator,
            frame,
            request,
            _resize: resize,
        };
        particle_loop.schedule()?;
        Ok(Some(particle_loop))
    }

    fn schedule(&self) -> Result<(), JsValue> {
        if let Some(callback) = self.frame.borrow().as_ref() {
            let id = self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())?;
            self.request.set(Some(id));
        }
        Ok(())
    }

    /// Stop the loop, cancel the pending frame and remove the canvas.
    pub fn stop(&self) {
        self.animator.borrow_mut().stop();
        if let Some(id) = self.request.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.frame.borrow_mut().take();
        self.animator.borrow().surface().detach();
    }
}
