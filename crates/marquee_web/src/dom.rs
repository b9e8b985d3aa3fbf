//! Element structuring and inline styles.

use marquee_core::style::{ElementStyle, ATTR_GAP, ATTR_PAD, TAG_ITEM, TAG_TRACK};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

/// Applies declarations to an element's inline style.
pub(crate) fn apply_style(element: &HtmlElement, style: &ElementStyle) -> Result<(), JsValue> {
    let css = element.style();
    for (property, value) in style.declarations() {
        css.set_property(property, value)?;
    }
    Ok(())
}

fn as_html(element: Element) -> Result<HtmlElement, JsValue> {
    element.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

fn create(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    as_html(document.create_element(tag)?)
}

/// Moves every child of `from` into `to`, keeping order.
fn adopt_children(from: &HtmlElement, to: &HtmlElement) -> Result<(), JsValue> {
    while let Some(child) = from.first_child() {
        to.append_child(&child)?;
    }
    Ok(())
}

/// Ensures `root > scrolling-track > scrolling-item` exists and styles all
/// three levels. Loose content is wrapped, never discarded.
///
/// Returns the track.
pub(crate) fn prepare(root: &HtmlElement) -> Result<HtmlElement, JsValue> {
    let document = root
        .owner_document()
        .ok_or_else(|| JsValue::from_str("element has no document"))?;

    apply_style(root, &ElementStyle::container())?;

    let track = match root.query_selector(TAG_TRACK)? {
        Some(existing) => as_html(existing)?,
        None => {
            let track = create(&document, TAG_TRACK)?;
            adopt_children(root, &track)?;
            root.append_child(&track)?;
            track
        }
    };

    if track.query_selector(TAG_ITEM)?.is_none() {
        let item = create(&document, TAG_ITEM)?;
        adopt_children(&track, &item)?;
        track.append_child(&item)?;
    }

    apply_style(&track, &ElementStyle::track(track.get_attribute(ATTR_GAP).as_deref()))?;

    let items = track.children();
    for i in 0..items.length() {
        let Some(item) = items.item(i) else {
            continue;
        };
        if !item.tag_name().eq_ignore_ascii_case(TAG_ITEM) {
            continue;
        }
        let pad = item.get_attribute(ATTR_PAD);
        if let Ok(item) = item.dyn_into::<HtmlElement>() {
            apply_style(&item, &ElementStyle::item(pad.as_deref()))?;
        }
    }

    Ok(track)
}
