//! Timeouts and intervals owned by one enhancement instance.
//!
//! Callbacks stay alive in the table until they have fired (or been
//! cleared), and `clear_all` cancels everything still pending.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

struct Entry {
    handle: i32,
    interval: bool,
    done: Rc<Cell<bool>>,
    _callback: Closure<dyn FnMut()>,
}

pub struct Timers {
    window: Window,
    entries: RefCell<Vec<Entry>>,
}

impl Timers {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Run `callback` once after `delay_ms`.
    pub fn timeout<F>(&self, delay_ms: u32, callback: F) -> Result<i32, JsValue>
    where
        F: FnOnce() + 'static,
    {
        let done = Rc::new(Cell::new(false));
        let finished = done.clone();
        let mut callback = Some(callback);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(callback) = callback.take() {
                callback();
            }
            finished.set(true);
        });
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                clamp_delay(delay_ms),
            )?;
        self.push(handle, false, done, closure);
        Ok(handle)
    }

    /// Run `callback` every `period_ms` until cleared.
    pub fn interval<F>(&self, period_ms: u32, callback: F) -> Result<i32, JsValue>
    where
        F: FnMut() + 'static,
    {
        let closure = Closure::<dyn FnMut()>::new(callback);
        let handle = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                clamp_delay(period_ms),
            )?;
        self.push(handle, true, Rc::new(Cell::new(false)), closure);
        Ok(handle)
    }

    /// Cancel one timer. Safe to call from inside that timer's own callback.
    pub fn clear(&self, handle: i32) {
        for entry in self.entries.borrow().iter() {
            if entry.handle == handle && !entry.done.get() {
                self.cancel(entry);
            }
        }
    }

    /// Cancel every pending timer and release all callbacks.
    pub fn clear_all(&self) {
        let entries = std::mem::take(&mut *self.entries.borrow_mut());
        for entry in &entries {
            if !entry.done.get() {
                self.cancel(entry);
            }
        }
    }

    fn cancel(&self, entry: &Entry) {
        if entry.interval {
            self.window.clear_interval_with_handle(entry.handle);
        } else {
            self.window.clear_timeout_with_handle(entry.handle);
        }
        entry.done.set(true);
    }

    fn push(
        &self,
        handle: i32,
        interval: bool,
        done: Rc<Cell<bool>>,
        callback: Closure<dyn FnMut()>,
    ) {
        let mut entries = self.entries.borrow_mut();
        // A timeout is marked done only after its callback returns, so a callback
        // that schedules another timer never drops itself here.
        entries.retain(|entry| !entry.done.get());
        entries.push(Entry {
            handle,
            interval,
            done,
            _callback: callback,
        });
    }
}

fn clamp_delay(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}
