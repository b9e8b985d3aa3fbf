//! Custom element registration.
//!
//! `customElements.define` needs a real JavaScript class, so the class is a
//! small inline shim whose lifecycle callbacks hand the element to Rust and
//! keep the returned [`ScrollingContent`] on the element until it leaves
//! the document.

use marquee_core::style::{TAG_CONTENT, TAG_ITEM, TAG_TRACK};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::component::ScrollingContent;

#[wasm_bindgen(inline_js = r#"
export function defineMarqueeElements(content, track, item, create) {
    const plain = (tag) => {
        if (!customElements.get(tag)) {
            customElements.define(tag, class extends HTMLElement {});
        }
    };
    plain(track);
    plain(item);
    if (customElements.get(content)) {
        return false;
    }
    customElements.define(content, class extends HTMLElement {
        connectedCallback() {
            if (!this.__marquee) {
                this.__marquee = create(this);
            }
        }
        disconnectedCallback() {
            const marquee = this.__marquee;
            this.__marquee = null;
            if (marquee) {
                marquee.disconnect();
                marquee.free();
            }
        }
    });
    return true;
}

export function isMarqueeDefined(content) {
    return customElements.get(content) !== undefined;
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = defineMarqueeElements, catch)]
    fn define_marquee_elements(
        content: &str,
        track: &str,
        item: &str,
        create: &js_sys::Function,
    ) -> Result<bool, JsValue>;

    #[wasm_bindgen(js_name = isMarqueeDefined)]
    fn is_marquee_defined(content: &str) -> bool;
}

/// Property on a defined `<scrolling-content>` holding its marquee while
/// connected.
pub const MARQUEE_PROPERTY: &str = "__marquee";

/// Registers `<scrolling-content>`, `<scrolling-track>` and
/// `<scrolling-item>`. From then on the browser connects every marquee as
/// it enters the document and disconnects it as it leaves. Attribute
/// changes reach the marquee through its own observer.
///
/// Returns false if `<scrolling-content>` was already defined.
///
/// # Errors
///
/// Fails if the page has no custom element registry.
#[wasm_bindgen(js_name = defineElements)]
pub fn define_elements() -> Result<bool, JsValue> {
    let create = Closure::wrap(Box::new(|element: HtmlElement| -> JsValue {
        let mut marquee = ScrollingContent::new(element);
        if let Err(error) = marquee.connect() {
            tracing::debug!(?error, "marquee failed to connect");
        }
        JsValue::from(marquee)
    }) as Box<dyn FnMut(HtmlElement) -> JsValue>);
    // The class lives as long as the page, and so does its factory.
    let create = create.into_js_value();

    let defined =
        define_marquee_elements(TAG_CONTENT, TAG_TRACK, TAG_ITEM, create.unchecked_ref())?;
    tracing::debug!(defined, "custom elements registered");
    Ok(defined)
}

/// Returns true once `<scrolling-content>` is a defined custom element.
pub(crate) fn content_is_defined() -> bool {
    is_marquee_defined(TAG_CONTENT)
}
