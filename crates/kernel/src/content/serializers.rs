//! Serializer registry mapping content block types to render functions.
//!
//! Provides:
//! - `SerializerDeclaration`: one row of the declarative serializer table
//! - `SerializerEntry`: component, optional wrapper and static args for a type
//! - `SerializerRegistry`: immutable lookup table built once from declarations
//! - `standard_registry`: the process-wide registry for site pages

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use serde_json::Value;
use swwim_render::RenderNode;

use super::block::{ContentBlock, Payload};
use super::{components, rich_text};

/// Type tag of rich text blocks.
///
/// Rich text recurses into nested blocks instead of taking a flat payload, so
/// it never appears in the inline serializer table.
pub const RICH_TEXT_TYPE: &str = "block";

/// Renders a payload into a node.
pub type ComponentFn = fn(&Payload, &RenderContext<'_>) -> RenderNode;

/// Frames an already rendered node.
pub type WrapperFn = fn(RenderNode) -> RenderNode;

/// Declaration of how one content block type renders.
#[derive(Debug, Clone)]
pub struct SerializerDeclaration {
    pub type_name: String,
    pub component: ComponentFn,
    pub wrapper: Option<WrapperFn>,
    pub args: Option<Payload>,
}

impl SerializerDeclaration {
    pub fn new(type_name: &str, component: ComponentFn) -> Self {
        Self {
            type_name: type_name.to_string(),
            component,
            wrapper: None,
            args: None,
        }
    }

    pub fn with_wrapper(mut self, wrapper: WrapperFn) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    pub fn with_args(mut self, args: Payload) -> Self {
        self.args = Some(args);
        self
    }
}

/// Registered serializer for a single block type.
#[derive(Debug, Clone)]
pub struct SerializerEntry {
    pub component: ComponentFn,
    pub wrapper: Option<WrapperFn>,
    pub args: Option<Payload>,
}

impl SerializerEntry {
    /// Render a block: `wrapper(component(payload ⊕ args))`, or the bare
    /// component output when no wrapper is declared.
    pub fn render(&self, block: &ContentBlock, ctx: &RenderContext<'_>) -> RenderNode {
        let payload = block.merged_payload(self.args.as_ref());
        let node = (self.component)(&payload, ctx);
        match self.wrapper {
            Some(wrapper) => wrapper(node),
            None => node,
        }
    }
}

/// What a component can reach while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    registry: &'a SerializerRegistry,
}

impl<'a> RenderContext<'a> {
    pub fn new(registry: &'a SerializerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a SerializerRegistry {
        self.registry
    }

    /// Render a custom object embedded in rich text.
    ///
    /// Returns `None` when the object has no `_type` or no inline serializer.
    pub fn render_inline(&self, object: &Value) -> Option<RenderNode> {
        let type_name = object.get("_type").and_then(|t| t.as_str())?;
        let component = self.registry.inline_component(type_name)?;
        let payload = object.as_object()?;
        Some(component(payload, self))
    }
}

/// Registry of serializers, keyed by block type tag.
///
/// Built once and never mutated afterwards; share it behind an [`Arc`].
#[derive(Debug, Clone, Default)]
pub struct SerializerRegistry {
    entries: HashMap<String, SerializerEntry>,
    inline: HashMap<String, ComponentFn>,
}

impl SerializerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the serializer for a block type.
    pub fn get(&self, type_name: &str) -> Option<&SerializerEntry> {
        self.entries.get(type_name)
    }

    /// Check whether a block type is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// Return the number of registered block types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// List all registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Component used for objects of this type nested inside rich text.
    pub fn inline_component(&self, type_name: &str) -> Option<ComponentFn> {
        self.inline.get(type_name).copied()
    }

    /// Types renderable inside rich text, sorted.
    pub fn inline_type_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.inline.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Build a registry from a declarative table.
///
/// Every declaration becomes a body serializer. All but the rich text type
/// also become inline serializers for objects embedded in rich text. A later
/// declaration for the same type replaces an earlier one.
pub fn build_registry(
    declarations: impl IntoIterator<Item = SerializerDeclaration>,
) -> SerializerRegistry {
    let mut registry = SerializerRegistry::new();
    for declaration in declarations {
        if declaration.type_name != RICH_TEXT_TYPE {
            registry
                .inline
                .insert(declaration.type_name.clone(), declaration.component);
        }
        registry.entries.insert(
            declaration.type_name,
            SerializerEntry {
                component: declaration.component,
                wrapper: declaration.wrapper,
                args: declaration.args,
            },
        );
    }
    registry
}

/// The serializer table for site body content.
pub fn standard_declarations() -> Vec<SerializerDeclaration> {
    vec![
        SerializerDeclaration::new(RICH_TEXT_TYPE, rich_text::render_rich_text)
            .with_wrapper(components::section_wrapper),
        SerializerDeclaration::new("statBlock", components::stat_block)
            .with_wrapper(components::section_wrapper),
        SerializerDeclaration::new("quote", components::quote)
            .with_wrapper(components::section_wrapper),
        SerializerDeclaration::new("imageCarousel", components::image_carousel)
            .with_wrapper(components::section_wrapper),
    ]
}

static STANDARD_REGISTRY: LazyLock<Arc<SerializerRegistry>> =
    LazyLock::new(|| Arc::new(build_registry(standard_declarations())));

/// The process-wide registry built from [`standard_declarations`].
pub fn standard_registry() -> Arc<SerializerRegistry> {
    Arc::clone(&STANDARD_REGISTRY)
}
