//! Browser front end for the ember page enhancements.
//!
//! Loading the module installs every effect on the current page. Pages that
//! want to control the lifetime themselves set `data-ember-manual` on
//! `<html>` and construct [`Enhancements`] from script:
//!
//! ```js
//! import init, { Enhancements } from "./ember_web.js";
//! await init();
//! const ember = new Enhancements();
//! // later
//! ember.stop();
//! ```
//!
//! Settings come from a JSON block in the page:
//!
//! ```html
//! <script type="application/json" id="ember-config">
//!   { "particles": { "count": 40 }, "log_level": "debug" }
//! </script>
//! ```

mod canvas;
mod dom;
mod effects;
mod forms;
mod listener;
mod logger;
mod navigation;
mod page;
mod particles;
mod reveal;
mod scroll;
mod styles;
mod timers;
mod typing;
mod watcher;

use std::rc::Rc;

use ember_core::EnhancementConfig;
use log::LevelFilter;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::listener::Listener;
use crate::page::Page;

/// Id of the `<script type="application/json">` element holding settings.
pub const CONFIG_ELEMENT_ID: &str = "ember-config";

/// Attribute on `<html>` that turns off automatic installation.
pub const MANUAL_ATTRIBUTE: &str = "data-ember-manual";

/// Handle to the effects installed on the current page.
#[wasm_bindgen]
pub struct Enhancements {
    page: Rc<Page>,
    ready: Option<Listener>,
}

#[wasm_bindgen]
impl Enhancements {
    /// Install the effects now, or as soon as the document is interactive.
    #[wasm_bindgen(constructor)]
    pub fn install() -> Result<Enhancements, JsValue> {
        logger::init(LevelFilter::Info);
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let config = load_config(&document);
        logger::init(logger::parse_level(&config.log_level));

        let page = Rc::new(Page::new(window, document.clone(), config, random_seed()));

        let ready = if document.ready_state() == "loading" {
            let pending = Rc::downgrade(&page);
            Some(Listener::new(&document, "DOMContentLoaded", move |_| {
                if let Some(page) = pending.upgrade() {
                    page.install();
                }
            })?)
        } else {
            page.install();
            None
        };

        Ok(Enhancements { page, ready })
    }

    /// Remove every listener, timer, observer and element this instance added.
    pub fn stop(&mut self) {
        self.ready.take();
        self.page.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.page.is_running()
    }
}

/// Module entry point.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Ok(());
    };
    let manual = document
        .document_element()
        .is_some_and(|root| root.has_attribute(MANUAL_ATTRIBUTE));
    if manual {
        return Ok(());
    }

    // The automatic instance lives as long as the page.
    std::mem::forget(Enhancements::install()?);
    Ok(())
}

fn random_seed() -> u64 {
    let half = || (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (half() << 32) | half()
}

fn load_config(document: &Document) -> EnhancementConfig {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return EnhancementConfig::default();
    };
    let text = element.text_content().unwrap_or_default();
    match EnhancementConfig::from_json(&text) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
            EnhancementConfig::default()
        }
    }
}
