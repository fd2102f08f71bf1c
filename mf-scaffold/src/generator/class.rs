//! Concrete class types, optionally split into generated + partial files.

use std::path::PathBuf;

use tracing::debug;

use crate::error::{GenerateError, ScaffoldResult};
use crate::generator::object_type::{object_type_class_name, write_constructors};
use crate::generator::source::{comment_text, quote, SourceBuilder};
use crate::generator::traits::{
    ArtifactEmitter, ArtifactKind, EmitContext, GeneratedArtifact, GeneratorConfig,
};
use crate::generator::type_mapper::{property_reference, AccessorShape, TypeMapper};
use crate::naming::{clean_name, IdentifierScope};
use crate::schema::{ObjectClassDescriptor, PropertyDefDescriptor};

/// One generated property of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMember {
    /// C# property name, unique within the class.
    pub name: String,
    /// Vault display name, used in the binding comment.
    pub display_name: String,
    /// Expression naming the property definition.
    pub reference: String,
    pub shape: AccessorShape,
}

/// Why a property definition got no member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The vault computes the value.
    AutomaticValue,
    /// Built-in property in the reserved id range; the wrapper handles it.
    ReservedBuiltin,
}

/// Decide whether `pdef` is excluded before type mapping.
pub fn skip_reason(pdef: &PropertyDefDescriptor) -> Option<SkipReason> {
    if pdef.is_automatic() {
        Some(SkipReason::AutomaticValue)
    } else if pdef.is_reserved_builtin() {
        Some(SkipReason::ReservedBuiltin)
    } else {
        None
    }
}

/// Name of the generated type for a class.
pub fn class_type_name(class: &ObjectClassDescriptor) -> String {
    clean_name(&class.name)
}

/// Emits `Models/<Class>.<ext>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassEmitter {
    type_mapper: TypeMapper,
}

impl ClassEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Members of `class` in associated-property order. Skipped properties
    /// are reported through the host; unsupported kinds as warnings.
    pub fn members(
        &self,
        class: &ObjectClassDescriptor,
        ctx: &EmitContext<'_>,
    ) -> ScaffoldResult<Vec<ClassMember>> {
        let mut scope = IdentifierScope::new();
        scope.reserve(class_type_name(class));

        let mut members = Vec::new();
        for associated in ctx.schema.list_associated_properties(class.id)? {
            let pdef = ctx.schema.get_property_def(associated.property_def)?;

            if let Some(reason) = skip_reason(&pdef) {
                debug!(class = %class.name, property = %pdef.name, ?reason, "skipping property");
                continue;
            }

            let Some(shape) = self.type_mapper.map_property_type(&pdef, ctx.schema)? else {
                let warning = GenerateError::UnsupportedValueKind {
                    property: pdef.name.clone(),
                    value_kind: pdef.data_type.to_string(),
                };
                ctx.host.warning(&warning.to_string());
                continue;
            };

            members.push(ClassMember {
                name: scope.claim(&clean_name(&pdef.name)),
                display_name: pdef.name.clone(),
                reference: property_reference(&pdef),
                shape,
            });
        }

        Ok(members)
    }
}

impl ArtifactEmitter for ClassEmitter {
    type Input = ObjectClassDescriptor;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Class
    }

    fn relative_path(&self, input: &ObjectClassDescriptor, config: &GeneratorConfig) -> PathBuf {
        config.model_path(&class_type_name(input))
    }

    fn generate(
        &self,
        input: &ObjectClassDescriptor,
        ctx: &EmitContext<'_>,
    ) -> ScaffoldResult<GeneratedArtifact> {
        let type_name = class_type_name(input);
        let object_type = ctx.schema.get_object_type(input.object_type)?;
        let base_name = object_type_class_name(&object_type);
        let members = self.members(input, ctx)?;
        let modifier = if ctx.config.partials { "public partial class" } else { "public class" };

        ctx.host.verbose(&format!(
            "Generating {type_name} with {} properties",
            members.len()
        ));

        let mut builder = SourceBuilder::new(ctx.config);
        builder
            .banner()
            .usings(&["System", "System.Collections.Generic", "MFilesAPI"])
            .line(format!("namespace {}", ctx.config.model_namespace()))
            .open()
            .line(format!("[MetaStructureClass(Name = {})]", quote(&input.name)))
            .line(format!("{modifier} {type_name} : {base_name}"))
            .open();

        write_constructors(&mut builder, &type_name);

        for member in &members {
            builder
                .blank()
                .line(format!(
                    "// Binding property for {}.",
                    comment_text(&member.display_name)
                ))
                .line(format!("public {} {}", member.shape.storage_type, member.name))
                .open()
                .line(format!("get {{ return {}; }}", member.shape.getter(&member.reference)))
                .line(format!("set {{ {}; }}", member.shape.setter(&member.reference)))
                .close();
        }

        builder.close().close();

        Ok(GeneratedArtifact::new(
            self.relative_path(input, ctx.config),
            builder.finish(),
            self.kind(),
        ))
    }
}

/// Emits the hand-editable `Models/Partials/<Class>.<ext>` skeleton.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassPartialEmitter;

impl ArtifactEmitter for ClassPartialEmitter {
    type Input = ObjectClassDescriptor;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ClassPartial
    }

    fn relative_path(&self, input: &ObjectClassDescriptor, config: &GeneratorConfig) -> PathBuf {
        config.partial_path(&class_type_name(input))
    }

    fn generate(
        &self,
        input: &ObjectClassDescriptor,
        ctx: &EmitContext<'_>,
    ) -> ScaffoldResult<GeneratedArtifact> {
        let type_name = class_type_name(input);

        let mut builder = SourceBuilder::new(ctx.config);
        builder
            .usings(&["System", "MFilesAPI"])
            .line(format!("namespace {}", ctx.config.model_namespace()))
            .open()
            .line(format!("public partial class {type_name}"))
            .open()
            .close()
            .close();

        Ok(GeneratedArtifact::new(
            self.relative_path(input, ctx.config),
            builder.finish(),
            self.kind(),
        ))
    }
}
