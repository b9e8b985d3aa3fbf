//! # Marquee Web
//!
//! Browser binding for [`marquee_core`]. Turns
//!
//! ```html
//! <scrolling-content data-mobile-speed="30" data-desktop-speed="80">
//!   <img src="logo-a.svg"> <img src="logo-b.svg">
//! </scrolling-content>
//! ```
//!
//! into an endlessly scrolling, draggable strip.
//!
//! ## Usage
//!
//! ```js
//! import init, { defineElements } from "./marquee_web.js";
//! await init();
//! defineElements();
//! ```
//!
//! The browser then connects each marquee as it enters the document and
//! disconnects it as it leaves. Pages that cannot register custom elements
//! call `mountAll()` instead, which watches the document for added and
//! removed marquees until `unmountAll()`.

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

#[cfg(target_arch = "wasm32")]
mod component;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod elements;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod listeners;

#[cfg(target_arch = "wasm32")]
pub use component::{mount_all, MarqueeRegistry, ScrollingContent};
#[cfg(target_arch = "wasm32")]
pub use elements::{define_elements, MARQUEE_PROPERTY};
#[cfg(target_arch = "wasm32")]
pub use host::DomHost;

pub use marquee_core::style::{TAG_CONTENT, TAG_ITEM, TAG_TRACK};
