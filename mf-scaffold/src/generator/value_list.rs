//! Enumerations for static value lists.

use std::path::PathBuf;

use crate::error::ScaffoldResult;
use crate::generator::property_enum::{render_enum, EnumEntry};
use crate::generator::traits::{
    ArtifactEmitter, ArtifactKind, EmitContext, GeneratedArtifact, GeneratorConfig,
};
use crate::naming::clean_name;
use crate::schema::ObjectTypeDescriptor;

/// Emits `Models/<ValueList>.<ext>` with one member per item.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueListEnumEmitter;

impl ArtifactEmitter for ValueListEnumEmitter {
    type Input = ObjectTypeDescriptor;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ValueListEnum
    }

    fn relative_path(&self, input: &ObjectTypeDescriptor, config: &GeneratorConfig) -> PathBuf {
        config.model_path(&clean_name(&input.name_singular))
    }

    fn generate(
        &self,
        input: &ObjectTypeDescriptor,
        ctx: &EmitContext<'_>,
    ) -> ScaffoldResult<GeneratedArtifact> {
        let type_name = clean_name(&input.name_singular);
        let items = ctx.schema.list_static_value_list_items(input.id)?;
        ctx.host
            .verbose(&format!("Generating {type_name} with {} items", items.len()));

        let content = render_enum(
            ctx.config,
            &type_name,
            &format!("Items of the value list {}.", input.name_singular),
            items.iter().map(|item| EnumEntry {
                id: item.id,
                display_name: &item.name,
            }),
        );

        Ok(GeneratedArtifact::new(
            self.relative_path(input, ctx.config),
            content,
            self.kind(),
        ))
    }
}
