//! Small page effects: print mode, post shuffle, link transitions and the
//! key sequence easter egg.

use std::cell::RefCell;
use std::rc::Rc;

use ember_fx::EasterEgg;
use ember_fx::print::PrintMode;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, KeyboardEvent};

use crate::dom::{self, ElementRef};
use crate::page::Page;
use crate::styles;

pub fn print_mode(page: &Page) -> Result<(), JsValue> {
    let mode = Rc::new(PrintMode::new(page.config.print.class.clone()));
    for (event, entering) in [("beforeprint", true), ("afterprint", false)] {
        let mode = mode.clone();
        let document = page.document.clone();
        page.listen(&page.window, event, move |_| {
            let Some(body) = document.body() else {
                return;
            };
            if entering {
                mode.before_print(&ElementRef(&body));
            } else {
                mode.after_print(&ElementRef(&body));
            }
        })?;
    }
    Ok(())
}

/// Reorder the posts container's children uniformly at random.
pub fn shuffle_posts(page: &Page) -> Result<(), JsValue> {
    let Some(container) = page
        .document
        .get_element_by_id(&page.config.shuffle.container_id)
    else {
        return Ok(());
    };
    let mut posts = dom::children(&container);
    let swaps = page.with_rng(|rng| ember_fx::shuffle(&mut posts, rng));
    for post in &posts {
        container.append_child(post)?;
    }
    log::debug!("shuffled {} posts ({swaps} swaps)", posts.len());
    Ok(())
}

pub fn link_transitions(page: &Page) -> Result<(), JsValue> {
    let config = page.config.links.clone();
    page.listen(&page.document, "mouseover", move |event| {
        let Some(link) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|e| e.closest(&config.selector).ok().flatten())
        else {
            return;
        };
        let class_list = link.class_list();
        if config.skip_classes.iter().any(|c| class_list.contains(c)) {
            return;
        }
        if let Some(link) = link.dyn_ref::<HtmlElement>() {
            let _ = link.style().set_property("transition", "all 0.3s ease");
        }
    })
}

pub fn easter_egg(page: &Page) -> Result<(), JsValue> {
    let egg = Rc::new(RefCell::new(EasterEgg::new(&page.config.easter_egg)));
    let document = page.document.clone();
    let timers = page.timers.clone();
    let injector = page.styles.clone();

    page.listen(&page.document, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let mut egg = egg.borrow_mut();
        if !egg.on_key(&event.key(), js_sys::Date::now()) {
            return;
        }
        let Some(body) = document.body() else {
            return;
        };
        injector.inject("rainbow", styles::RAINBOW_CSS);
        let _ = body
            .style()
            .set_property("animation", "rainbow 2s linear infinite");
        log::info!("party mode");

        let duration = egg.effect().duration_ms() as u32;
        let reset = timers.timeout(duration, move || {
            let _ = body.style().remove_property("animation");
        });
        if let Err(err) = reset {
            log::warn!("could not schedule party mode reset: {err:?}");
        }
    })
}
