//! JSON-LD script embedding.

use serde::Serialize;
use tracing::debug;

use super::schema::SchemaObject;

pub const JSON_LD_TYPE: &str = "application/ld+json";

/// One embeddable script tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaScript {
    pub key: String,
    #[serde(rename = "type")]
    pub script_type: String,
    pub content: String,
}

impl SchemaScript {
    /// `<script>` markup with `</` escaped so content cannot close the tag.
    ///
    /// The key identifies the descriptor only and is not written out.
    pub fn to_html(&self) -> String {
        format!(
            r#"<script type="{}">{}</script>"#,
            self.script_type,
            self.content.replace("</", "<\\/")
        )
    }
}

/// Serialize the present schemas into script descriptors.
///
/// Absent entries are dropped before keys are assigned, so keys follow
/// positions in the filtered sequence. Nothing present yields an empty vec.
pub fn embed_schemas<I>(schemas: I) -> Vec<SchemaScript>
where
    I: IntoIterator<Item = Option<SchemaObject>>,
{
    let scripts: Vec<SchemaScript> = schemas
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(index, schema)| SchemaScript {
            key: format!("schema-{index}"),
            script_type: JSON_LD_TYPE.to_string(),
            content: schema.into_value().to_string(),
        })
        .collect();
    debug!(count = scripts.len(), "embedded structured data");
    scripts
}

/// Markup for a head region; empty when there are no scripts.
pub fn render_schema_scripts(scripts: &[SchemaScript]) -> String {
    scripts
        .iter()
        .map(SchemaScript::to_html)
        .collect::<Vec<_>>()
        .join("\n")
}
