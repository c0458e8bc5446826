//! Body content rendering.
//!
//! This module provides:
//! - ContentBlock: a typed, keyed entry of a CMS body sequence
//! - SerializerRegistry: block type to component/wrapper lookup
//! - BodyRenderer: ordered body blocks to render nodes
//! - Rich text: Portable Text rendering, plain text and reading time

pub mod block;
pub mod body;
pub mod components;
pub mod refs;
pub mod rich_text;
pub mod serializers;

pub use block::{ContentBlock, Payload};
pub use body::{BodyRenderer, render_body};
pub use refs::{AuthorRef, ImageRef, Slug};
pub use rich_text::{body_plain_text, reading_time_minutes, to_plain_text};
pub use serializers::{
    ComponentFn, RICH_TEXT_TYPE, RenderContext, SerializerDeclaration, SerializerEntry,
    SerializerRegistry, WrapperFn, build_registry, standard_declarations, standard_registry,
};
