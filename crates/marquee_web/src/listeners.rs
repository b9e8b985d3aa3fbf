//! DOM event wiring.
//!
//! Every listener holds only a weak reference to the controller, so the
//! returned [`EventListener`]s are the sole owners of the closures and
//! dropping them detaches everything.

use std::rc::Weak;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use marquee_core::{InputEvent, InputSource, PointerSample};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget, HtmlElement, MouseEvent, PointerEvent, TouchEvent, Window};

use crate::host::SharedController;

const ACTIVE: EventListenerOptions = EventListenerOptions {
    phase: EventListenerPhase::Bubble,
    passive: false,
};

/// Returns true when the browser has the unified pointer model.
pub(crate) fn supports_pointer_events(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("PointerEvent")).unwrap_or(false)
}

/// Hands `input` to the controller and honours its response.
fn dispatch(controller: &Weak<SharedController>, event: &Event, input: InputEvent) {
    let Some(controller) = controller.upgrade() else {
        return;
    };
    let Ok(mut controller) = controller.try_borrow_mut() else {
        return;
    };
    let response = controller.on_input(input);
    if response.prevent_default && event.cancelable() {
        event.prevent_default();
    }
}

fn on(
    target: &EventTarget,
    kind: &'static str,
    controller: &Weak<SharedController>,
    map: fn(&Event) -> Option<InputEvent>,
) -> EventListener {
    let controller = controller.clone();
    EventListener::new_with_options(target, kind, ACTIVE, move |event: &Event| {
        if let Some(input) = map(event) {
            dispatch(&controller, event, input);
        }
    })
}

fn pointer_sample(event: &Event) -> Option<PointerSample> {
    let event = event.dyn_ref::<PointerEvent>()?;
    Some(PointerSample::pointer(
        f64::from(event.client_x()),
        f64::from(event.client_y()),
        event.pointer_id(),
        InputSource::from_pointer_type(&event.pointer_type()),
    ))
}

fn mouse_sample(event: &Event) -> Option<PointerSample> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(PointerSample {
        pointer_id: None,
        ..PointerSample::pointer(
            f64::from(event.client_x()),
            f64::from(event.client_y()),
            0,
            InputSource::Mouse,
        )
    })
}

/// Samples the first active touch, or the first lifted one on release.
fn touch_sample(event: &Event, lifted: bool) -> Option<PointerSample> {
    let event = event.dyn_ref::<TouchEvent>()?;
    let touches = event.touches();
    let touch = if lifted {
        event.changed_touches().item(0)?
    } else {
        touches.item(0)?
    };
    let count = if lifted { 1 } else { touches.length() as usize };
    Some(PointerSample::touch(
        f64::from(touch.client_x()),
        f64::from(touch.client_y()),
        count,
    ))
}

fn primary_button(event: &Event) -> bool {
    event.dyn_ref::<MouseEvent>().map_or(false, |e| e.button() == 0)
}

/// Installs hover, drag and resize listeners for one marquee.
pub(crate) fn install(
    window: &Window,
    element: &HtmlElement,
    track: &HtmlElement,
    controller: &Weak<SharedController>,
) -> Vec<EventListener> {
    let mut listeners = vec![
        on(element, "mouseenter", controller, |_| Some(InputEvent::HoverEnter)),
        on(element, "mouseleave", controller, |_| Some(InputEvent::HoverLeave)),
    ];

    if supports_pointer_events(window) {
        listeners.extend([
            on(track, "pointerdown", controller, |event| {
                let sample = pointer_sample(event)?;
                if sample.source == InputSource::Mouse && !primary_button(event) {
                    return None;
                }
                Some(InputEvent::Press(sample))
            }),
            on(window, "pointermove", controller, |event| {
                pointer_sample(event).map(InputEvent::Move)
            }),
            on(window, "pointerup", controller, |event| {
                pointer_sample(event).map(InputEvent::Release)
            }),
            on(window, "pointercancel", controller, |event| {
                pointer_sample(event).map(InputEvent::Cancel)
            }),
        ]);
    } else {
        tracing::debug!("pointer events unavailable, using touch and mouse");
        listeners.extend([
            on(track, "touchstart", controller, |event| {
                touch_sample(event, false).map(InputEvent::Press)
            }),
            on(track, "touchmove", controller, |event| {
                touch_sample(event, false).map(InputEvent::Move)
            }),
            on(track, "touchend", controller, |event| {
                touch_sample(event, true).map(InputEvent::Release)
            }),
            on(track, "touchcancel", controller, |event| {
                touch_sample(event, true).map(InputEvent::Cancel)
            }),
            on(track, "mousedown", controller, |event| {
                if !primary_button(event) {
                    return None;
                }
                mouse_sample(event).map(InputEvent::Press)
            }),
            on(window, "mousemove", controller, |event| {
                mouse_sample(event).map(InputEvent::Move)
            }),
            on(window, "mouseup", controller, |event| {
                mouse_sample(event).map(InputEvent::Release)
            }),
        ]);
    }

    let resize = controller.clone();
    listeners.push(EventListener::new(window, "resize", move |_event: &Event| {
        let Some(controller) = resize.upgrade() else {
            return;
        };
        if let Ok(mut controller) = controller.try_borrow_mut() {
            controller.on_resize();
        }
    }));

    listeners
}
