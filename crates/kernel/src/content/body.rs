//! Body rendering: ordered content blocks to render nodes.

use std::sync::Arc;

use swwim_render::RenderNode;
use tracing::{debug, error};

use super::block::ContentBlock;
use super::serializers::{RenderContext, SerializerRegistry, standard_registry};
use crate::error::{ContentError, ContentResult};

/// Render a body sequence with the given registry.
///
/// Output order matches input order and every node carries its block's key.
/// An absent or empty body renders to nothing. A block whose type has no
/// serializer aborts rendering with [`ContentError::UnmappedContentType`].
pub fn render_body(
    registry: &SerializerRegistry,
    blocks: Option<&[ContentBlock]>,
) -> ContentResult<Vec<RenderNode>> {
    let blocks = blocks.unwrap_or_default();
    let ctx = RenderContext::new(registry);

    let nodes = blocks
        .iter()
        .map(|block| {
            let Some(entry) = registry.get(&block.block_type) else {
                error!(
                    type_name = %block.block_type,
                    key = %block.key,
                    "no serializer implemented for body object"
                );
                return Err(ContentError::UnmappedContentType {
                    type_name: block.block_type.clone(),
                });
            };
            Ok(entry.render(block, &ctx).with_key(block.key.as_str()))
        })
        .collect::<ContentResult<Vec<_>>>()?;

    debug!(blocks = nodes.len(), "rendered body");
    Ok(nodes)
}

/// Body renderer bound to one registry.
#[derive(Debug, Clone)]
pub struct BodyRenderer {
    registry: Arc<SerializerRegistry>,
}

impl Default for BodyRenderer {
    fn default() -> Self {
        Self::new(standard_registry())
    }
}

impl BodyRenderer {
    pub fn new(registry: Arc<SerializerRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SerializerRegistry {
        &self.registry
    }

    /// See [`render_body`].
    pub fn render(&self, blocks: Option<&[ContentBlock]>) -> ContentResult<Vec<RenderNode>> {
        render_body(&self.registry, blocks)
    }
}
