//! JavaScript-facing component lifecycle.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use marquee_core::config::OBSERVED_ATTRIBUTES;
use marquee_core::style::TAG_CONTENT;
use marquee_core::{MarqueeController, MotionState};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MutationObserver, MutationObserverInit, MutationRecord, Node};

use crate::dom;
use crate::elements;
use crate::host::{DomHost, SharedController};
use crate::listeners;

type MutationCallback = Closure<dyn FnMut(js_sys::Array, MutationObserver)>;

/// Everything a connected marquee keeps alive.
struct Mounted {
    controller: Rc<SharedController>,
    listeners: Rc<RefCell<Vec<EventListener>>>,
    observer: MutationObserver,
    _on_mutation: MutationCallback,
    _attach_frame: AnimationFrame,
}

/// One `<scrolling-content>` element.
#[wasm_bindgen]
pub struct ScrollingContent {
    element: HtmlElement,
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl ScrollingContent {
    /// Wraps an element. Nothing happens until [`connect`](Self::connect).
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(element: HtmlElement) -> Self {
        console_error_panic_hook::set_once();
        Self {
            element,
            mounted: None,
        }
    }

    /// Structures the element and starts the marquee on the next frame.
    /// Calling it again while connected does nothing.
    ///
    /// # Errors
    ///
    /// Fails if the element is not in a document or the DOM rejects a
    /// structural change.
    pub fn connect(&mut self) -> Result<(), JsValue> {
        if self.mounted.is_some() {
            return Ok(());
        }
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let track = dom::prepare(&self.element)?;

        let controller: Rc<SharedController> = Rc::new_cyclic(|weak| {
            RefCell::new(MarqueeController::new(DomHost::new(
                window.clone(),
                self.element.clone(),
                track.clone(),
                weak.clone(),
            )))
        });
        let listeners = Rc::new(RefCell::new(Vec::new()));

        // Measure only after the browser has laid the new structure out.
        let attach_frame = {
            let weak = Rc::downgrade(&controller);
            let slot = Rc::clone(&listeners);
            let element = self.element.clone();
            request_animation_frame(move |_| {
                let Some(controller) = weak.upgrade() else {
                    return;
                };
                let Ok(mut marquee) = controller.try_borrow_mut() else {
                    return;
                };
                marquee.on_attach();
                drop(marquee);
                *slot.borrow_mut() = listeners::install(&window, &element, &track, &weak);
            })
        };

        let on_mutation: MutationCallback = {
            let weak = Rc::downgrade(&controller);
            let element = self.element.clone();
            Closure::wrap(Box::new(move |records: js_sys::Array, _: MutationObserver| {
                let Some(controller) = weak.upgrade() else {
                    return;
                };
                let Ok(mut marquee) = controller.try_borrow_mut() else {
                    return;
                };
                for record in records.iter() {
                    let Ok(record) = record.dyn_into::<MutationRecord>() else {
                        continue;
                    };
                    let Some(name) = record.attribute_name() else {
                        continue;
                    };
                    let old = record.old_value();
                    let new = element.get_attribute(&name);
                    marquee.on_config_change(&name, old.as_deref(), new.as_deref());
                }
            }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>)
        };
        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
        let filter: js_sys::Array = OBSERVED_ATTRIBUTES
            .iter()
            .map(|name| JsValue::from_str(name))
            .collect();
        let init = MutationObserverInit::new();
        init.set_attributes(true);
        init.set_attribute_old_value(true);
        init.set_attribute_filter(&filter);
        observer.observe_with_options(&self.element, &init)?;

        self.mounted = Some(Mounted {
            controller,
            listeners,
            observer,
            _on_mutation: on_mutation,
            _attach_frame: attach_frame,
        });
        Ok(())
    }

    /// Stops the marquee and removes every listener. The DOM structure
    /// and clones stay in place for a later reconnect.
    pub fn disconnect(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        mounted.observer.disconnect();
        if let Ok(mut marquee) = mounted.controller.try_borrow_mut() {
            marquee.on_detach();
        }
        mounted.listeners.borrow_mut().clear();
    }

    /// Forwards `attributeChangedCallback` from a custom-element shim.
    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(&self, name: &str, old: Option<String>, new: Option<String>) {
        let Some(mounted) = &self.mounted else {
            return;
        };
        if let Ok(mut marquee) = mounted.controller.try_borrow_mut() {
            marquee.on_config_change(name, old.as_deref(), new.as_deref());
        }
    }

    /// Current track offset (px).
    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.mounted
            .as_ref()
            .and_then(|m| m.controller.try_borrow().ok().map(|c| c.offset()))
            .unwrap_or(0.0)
    }

    /// `"idle"`, `"animating"` or `"dragging"`.
    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn motion(&self) -> String {
        let state = self
            .mounted
            .as_ref()
            .and_then(|m| m.controller.try_borrow().ok().map(|c| c.motion()))
            .unwrap_or_default();
        match state {
            MotionState::Idle => "idle",
            MotionState::Animating => "animating",
            MotionState::Dragging => "dragging",
        }
        .to_owned()
    }
}

impl Drop for ScrollingContent {
    fn drop(&mut self) {
        self.disconnect();
    }
}

type Tracked = Rc<RefCell<Vec<ScrollingContent>>>;

/// Marquees started by [`mount_all`], kept in step with the document.
#[wasm_bindgen]
pub struct MarqueeRegistry {
    marquees: Tracked,
    watch: Option<(MutationObserver, MutationCallback)>,
}

#[wasm_bindgen]
impl MarqueeRegistry {
    /// Number of mounted marquees.
    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.marquees.borrow().len()
    }

    /// Returns true if nothing is mounted.
    #[wasm_bindgen(js_name = isEmpty)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marquees.borrow().is_empty()
    }

    /// Stops watching the document and disconnects every marquee.
    #[wasm_bindgen(js_name = unmountAll)]
    pub fn unmount_all(&mut self) {
        if let Some((observer, _)) = self.watch.take() {
            observer.disconnect();
        }
        for mut marquee in self.marquees.borrow_mut().drain(..) {
            marquee.disconnect();
        }
    }
}

impl Drop for MarqueeRegistry {
    fn drop(&mut self) {
        self.unmount_all();
    }
}

/// Disconnects tracked marquees that left the document and connects
/// `<scrolling-content>` elements that entered it.
fn sync(document: &Document, marquees: &mut Vec<ScrollingContent>) -> Result<(), JsValue> {
    marquees.retain_mut(|marquee| {
        if marquee.element.is_connected() {
            return true;
        }
        marquee.disconnect();
        false
    });

    let nodes = document.query_selector_all(TAG_CONTENT)?;
    for i in 0..nodes.length() {
        let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let node: &Node = &element;
        if marquees.iter().any(|m| m.element.is_same_node(Some(node))) {
            continue;
        }
        let mut marquee = ScrollingContent::new(element);
        marquee.connect()?;
        marquees.push(marquee);
    }
    Ok(())
}

/// Connects every `<scrolling-content>` element in the document, then
/// keeps watching it: marquees added later are connected, removed ones
/// are disconnected.
///
/// Once [`define_elements`](crate::define_elements) has run the browser
/// manages marquees itself, and the returned registry stays empty.
///
/// # Errors
///
/// Fails if there is no document or an element cannot be structured.
#[wasm_bindgen(js_name = mountAll)]
pub fn mount_all() -> Result<MarqueeRegistry, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let marquees: Tracked = Rc::new(RefCell::new(Vec::new()));
    if elements::content_is_defined() {
        tracing::debug!("marquees are managed by their custom element");
        return Ok(MarqueeRegistry {
            marquees,
            watch: None,
        });
    }
    sync(&document, &mut marquees.borrow_mut())?;

    let on_change: MutationCallback = {
        let weak = Rc::downgrade(&marquees);
        let document = document.clone();
        Closure::wrap(Box::new(move |_: js_sys::Array, _: MutationObserver| {
            let Some(tracked) = weak.upgrade() else {
                return;
            };
            let Ok(mut tracked) = tracked.try_borrow_mut() else {
                return;
            };
            if let Err(error) = sync(&document, &mut tracked) {
                tracing::debug!(?error, "marquee sync failed");
            }
        }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>)
    };
    let observer = MutationObserver::new(on_change.as_ref().unchecked_ref())?;
    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    observer.observe_with_options(&document, &init)?;

    tracing::debug!(count = marquees.borrow().len(), "marquees mounted");
    Ok(MarqueeRegistry {
        marquees,
        watch: Some((observer, on_change)),
    })
}
