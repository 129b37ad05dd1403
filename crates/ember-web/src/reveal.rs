//! Reveal-on-scroll, roadmap items and lazy images.

use ember_core::RevealConfig;
use ember_fx::{Reaction, Watch, clear_hidden, prepare_hidden};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{self, ElementRef};
use crate::page::Page;
use crate::styles;
use crate::watcher::ViewportWatcher;

/// The watcher plus every element given hiding inline styles.
pub struct Reveal {
    watcher: ViewportWatcher,
    hidden: Vec<Element>,
}

impl Reveal {
    /// Stop watching and restore the inline styles of every prepared element.
    pub fn remove(self) {
        self.watcher.disconnect();
        for element in &self.hidden {
            clear_hidden(&ElementRef(element));
        }
    }

    fn watch_all(&mut self, page: &Page) -> Result<(), JsValue> {
        let config = &page.config;
        if config.lazy_images.enabled {
            let lazy = &config.lazy_images;
            for image in dom::query_all(&page.document, &lazy.selector) {
                let reaction = Reaction::LoadImage {
                    source_attribute: lazy.source_attribute.clone(),
                    lazy_class: lazy.lazy_class.clone(),
                };
                let watch = Watch {
                    reaction,
                    threshold: 0.0,
                    once: true,
                };
                self.watcher.watch(&image, &lazy.root_margin, watch)?;
            }
        }

        for (name, section) in [("reveal", &config.reveal), ("roadmap", &config.roadmap)] {
            if section.enabled {
                self.watch_section(page, name, section)?;
            }
        }
        Ok(())
    }

    fn watch_section(
        &mut self,
        page: &Page,
        name: &'static str,
        section: &RevealConfig,
    ) -> Result<(), JsValue> {
        let targets = dom::query_all(&page.document, &section.selector);
        if targets.is_empty() {
            return Ok(());
        }
        if section.prepare_hidden {
            page.styles.inject(name, &styles::reveal_css(&section.class));
        }

        for target in targets {
            let watch = Watch {
                reaction: Reaction::AddClass(section.class.clone()),
                threshold: section.threshold,
                once: section.once,
            };
            self.watcher.watch(&target, &section.root_margin, watch)?;
            if section.prepare_hidden {
                prepare_hidden(&ElementRef(&target));
                self.hidden.push(target);
            }
        }
        Ok(())
    }
}

/// Register every watched element. Returns `None` when nothing on the page
/// needs watching. A failure part way through undoes what was prepared.
pub fn install(page: &Page) -> Result<Option<Reveal>, JsValue> {
    let config = &page.config;
    let mut reveal = Reveal {
        watcher: ViewportWatcher::new(&[config.reveal.threshold, config.roadmap.threshold]),
        hidden: Vec::new(),
    };
    if let Err(err) = reveal.watch_all(page) {
        reveal.remove();
        return Err(err);
    }

    let pending = reveal.watcher.pending();
    if pending == 0 {
        return Ok(None);
    }
    log::debug!("watching {pending} elements");
    Ok(Some(reveal))
}
