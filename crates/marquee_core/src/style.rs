//! Inline styles for the three marquee elements.
//!
//! The binding applies these verbatim. Keeping them here means the
//! `data-gap` / `data-pad` override rules are testable without a browser.

use crate::config::parse_number_prefix;

/// Tag of the outer component.
pub const TAG_CONTENT: &str = "scrolling-content";
/// Tag of the flex track that gets translated.
pub const TAG_TRACK: &str = "scrolling-track";
/// Tag of one replicated content unit.
pub const TAG_ITEM: &str = "scrolling-item";

/// Track attribute overriding the gap, in px.
pub const ATTR_GAP: &str = "data-gap";
/// Item attribute setting the padding, in px.
pub const ATTR_PAD: &str = "data-pad";

/// Default gap, resolvable from the page's stylesheet.
pub const DEFAULT_GAP: &str = "var(--scrolling-content-gap, 1rem)";

/// Ordered list of CSS declarations for one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementStyle {
    declarations: Vec<(&'static str, String)>,
}

impl ElementStyle {
    fn with(mut self, property: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if let Some(existing) = self.declarations.iter_mut().find(|(p, _)| *p == property) {
            existing.1 = value;
        } else {
            self.declarations.push((property, value));
        }
        self
    }

    /// `<scrolling-content>`: clips the moving track.
    #[must_use]
    pub fn container() -> Self {
        Self::default().with("overflow", "hidden")
    }

    /// `<scrolling-track>`: horizontal flex row. Vertical panning stays with
    /// the browser so page scroll works while the track is touched.
    #[must_use]
    pub fn track(gap_override: Option<&str>) -> Self {
        let style = Self::default()
            .with("display", "flex")
            .with("flex-wrap", "nowrap")
            .with("align-items", "center")
            .with("gap", DEFAULT_GAP)
            .with("cursor", "pointer")
            .with("touch-action", "pan-y")
            .with("will-change", "transform");
        match gap_override.and_then(px_value) {
            Some(gap) => style.with("gap", gap),
            None => style,
        }
    }

    /// `<scrolling-item>`: one flex unit.
    #[must_use]
    pub fn item(pad_override: Option<&str>) -> Self {
        let style = Self::default()
            .with("display", "flex")
            .with("align-items", "center")
            .with("gap", DEFAULT_GAP);
        match pad_override.and_then(px_value) {
            Some(pad) => style.with("padding", pad),
            None => style,
        }
    }

    /// Returns the declarations in application order.
    #[must_use]
    pub fn declarations(&self) -> &[(&'static str, String)] {
        &self.declarations
    }

    /// Returns the value of one property.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }
}

/// CSS transform for a track offset.
#[must_use]
pub fn translate_x(offset: f64) -> String {
    format!("translateX({offset}px)")
}

fn px_value(raw: &str) -> Option<String> {
    parse_number_prefix(raw)
        .filter(|v| v.is_finite())
        .map(|v| format!("{v}px"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_gap_override() {
        assert_eq!(ElementStyle::track(None).get("gap"), Some(DEFAULT_GAP));
        assert_eq!(ElementStyle::track(Some("24")).get("gap"), Some("24px"));
        assert_eq!(ElementStyle::track(Some("1.5rem")).get("gap"), Some("1.5px"));
        assert_eq!(ElementStyle::track(Some("wide")).get("gap"), Some(DEFAULT_GAP));
        assert_eq!(ElementStyle::track(None).get("touch-action"), Some("pan-y"));
    }

    #[test]
    fn test_item_padding() {
        assert_eq!(ElementStyle::item(None).get("padding"), None);
        assert_eq!(ElementStyle::item(Some("8")).get("padding"), Some("8px"));
    }

    #[test]
    fn test_translate_x() {
        assert_eq!(translate_x(-130.0), "translateX(-130px)");
        assert_eq!(translate_x(-12.5), "translateX(-12.5px)");
    }
}
