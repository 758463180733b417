//! Markdown-subset fragment renderer.
//!
//! Converts the constrained Markdown dialect used by workbench briefs
//! (headings, flat unordered lists, bold/italic, paragraphs, blank-line
//! breaks) into an HTML fragment for direct injection into a container
//! element. Anything outside the dialect passes through as literal
//! paragraph text.
//!
//! The output is a **fragment**, not a document: no `<html>`/`<body>`
//! wrapper is emitted and no HTML escaping is applied. Callers are
//! responsible for only feeding trusted content.
//!
//! Rendering is one-way. Feeding the HTML output back through
//! [`render`] does not reproduce it; no round-trip law holds.
//!
//! # Example
//!
//! ```
//! use pmw_renderer::render;
//!
//! let html = render("# Launch plan\n\n- **Q1**: discovery\n- Q2: beta");
//! assert!(html.starts_with("<h1"));
//! assert!(html.contains("<li><strong>Q1</strong>: discovery</li>"));
//! ```

mod fragment;
mod inline;

pub use fragment::{FragmentRenderer, render};
pub use inline::apply_inline;
