//! `PropertyDefinitions` enumeration and the enum writer shared with value
//! lists.

use std::path::PathBuf;

use crate::error::ScaffoldResult;
use crate::generator::source::{doc_text, quote, SourceBuilder};
use crate::generator::traits::{
    ArtifactEmitter, ArtifactKind, EmitContext, GeneratedArtifact, GeneratorConfig,
};
use crate::naming::{clean_name, IdentifierScope};
use crate::schema::PropertyDefDescriptor;

/// Name of the property enumeration type and file.
pub const PROPERTY_ENUM_NAME: &str = "PropertyDefinitions";

/// One enum member: vault id and original display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntry<'a> {
    pub id: i32,
    pub display_name: &'a str,
}

/// Render an enum whose members carry `[Description("<display name>")]`
/// and the vault id as value, in the given order.
pub(crate) fn render_enum<'a>(
    config: &GeneratorConfig,
    type_name: &str,
    summary: &str,
    entries: impl IntoIterator<Item = EnumEntry<'a>>,
) -> String {
    let mut scope = IdentifierScope::new();
    scope.reserve(type_name);

    let mut builder = SourceBuilder::new(config);
    builder
        .banner()
        .usings(&["System.ComponentModel"])
        .line(format!("namespace {}", config.model_namespace()))
        .open()
        .line("/// <summary>")
        .line(format!("/// {}", doc_text(summary)))
        .line("/// </summary>")
        .line(format!("public enum {type_name}"))
        .open();

    for (index, entry) in entries.into_iter().enumerate() {
        if index > 0 {
            builder.blank();
        }
        let name = scope.claim(&clean_name(entry.display_name));
        builder
            .line(format!("[Description({})]", quote(entry.display_name)))
            .line(format!("{name} = {},", entry.id));
    }

    builder.close().close();
    builder.finish()
}

/// Emits `Models/PropertyDefinitions.<ext>` with one member per property
/// definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyEnumEmitter;

impl ArtifactEmitter for PropertyEnumEmitter {
    type Input = [PropertyDefDescriptor];

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::PropertyEnum
    }

    fn relative_path(&self, _input: &[PropertyDefDescriptor], config: &GeneratorConfig) -> PathBuf {
        config.model_path(PROPERTY_ENUM_NAME)
    }

    fn generate(
        &self,
        input: &[PropertyDefDescriptor],
        ctx: &EmitContext<'_>,
    ) -> ScaffoldResult<GeneratedArtifact> {
        ctx.host
            .verbose(&format!("Generating {PROPERTY_ENUM_NAME} with {} members", input.len()));

        let content = render_enum(
            ctx.config,
            PROPERTY_ENUM_NAME,
            "Property definitions of the vault.",
            input.iter().map(|pdef| EnumEntry {
                id: pdef.id,
                display_name: &pdef.name,
            }),
        );

        Ok(GeneratedArtifact::new(
            self.relative_path(input, ctx.config),
            content,
            self.kind(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::traits::LineEnding;
    use crate::host::RecordingHost;
    use crate::schema::{SchemaSnapshot, ValueKind};

    #[test]
    fn test_property_enum() {
        let schema = SchemaSnapshot::new();
        let config = GeneratorConfig::new().with_line_ending(LineEnding::Lf);
        let host = RecordingHost::new();
        let ctx = EmitContext::new(&schema, &config, &host);

        let pdefs = vec![
            PropertyDefDescriptor::new(0, "Name or title", ValueKind::Text),
            PropertyDefDescriptor::new(1020, "Customer's e-mail", ValueKind::Text),
            PropertyDefDescriptor::new(1021, "Customers email", ValueKind::Text),
        ];
        let artifact = PropertyEnumEmitter.generate(&pdefs, &ctx).unwrap();
        let code = &artifact.content;

        assert_eq!(
            artifact.relative_path,
            PathBuf::from("Models/PropertyDefinitions.cs")
        );
        assert!(code.starts_with("// <auto-generated>"));
        assert!(code.contains("using System.ComponentModel;"));
        assert!(code.contains("public enum PropertyDefinitions"));
        assert!(code.contains("[Description(\"Name or title\")]\n        Nameortitle = 0,"));
        assert!(code.contains("[Description(\"Customer's e-mail\")]\n        Customersemail = 1020,"));
        assert!(code.contains("Customersemail_2 = 1021,"));
    }

    #[test]
    fn test_member_named_like_enum_is_suffixed() {
        let config = GeneratorConfig::new();
        let code = render_enum(
            &config,
            "Status",
            "Items",
            [EnumEntry {
                id: 1,
                display_name: "Status",
            }],
        );
        assert!(code.contains("Status_2 = 1,"));
    }
}
