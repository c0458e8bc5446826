//! Swwim render tree.
//!
//! Content components never produce HTML strings directly. They return
//! structured [`RenderNode`] trees which the kernel's theme layer turns into
//! markup, so the same output can be inspected in tests or rendered through
//! templates.

pub mod node;

pub use node::{
    NodeBuilder, RenderNode, container, filtered_markup, fragment, html, link, markup, text,
    void,
};
