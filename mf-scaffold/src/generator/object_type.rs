//! Abstract per-object-type base classes (`OT_<Name>`).

use std::path::PathBuf;

use crate::error::ScaffoldResult;
use crate::generator::base::BASE_TYPE_NAME;
use crate::generator::source::{doc_text, SourceBuilder};
use crate::generator::traits::{
    ArtifactEmitter, ArtifactKind, EmitContext, GeneratedArtifact, GeneratorConfig,
};
use crate::naming::clean_name;
use crate::schema::ObjectTypeDescriptor;

/// The four construction shapes of the wrapper: parameter list and the
/// arguments forwarded to the base constructor.
const CONSTRUCTORS: [(&str, &str); 4] = [
    (
        "Vault vault, ObjectVersion versionInfo, bool checkOut = false",
        "vault, versionInfo, checkOut",
    ),
    (
        "ObjectVersionAndProperties ovap, bool checkOut = false",
        "ovap, checkOut",
    ),
    (
        "Vault vault, ObjVer objVer, bool checkOut = false",
        "vault, objVer, checkOut",
    ),
    (
        "Vault vault, int objType, int id, int version, bool checkOut = false",
        "vault, objType, id, version, checkOut",
    ),
];

/// Name of the generated base class for an object type.
pub fn object_type_class_name(object_type: &ObjectTypeDescriptor) -> String {
    format!("OT_{}", clean_name(&object_type.name_singular))
}

/// Emit the wrapper's constructor surface for `type_name`.
pub(crate) fn write_constructors(builder: &mut SourceBuilder<'_>, type_name: &str) {
    for (index, (parameters, arguments)) in CONSTRUCTORS.iter().enumerate() {
        if index > 0 {
            builder.blank();
        }
        builder
            .line(format!("public {type_name}({parameters})"))
            .line(format!("    : base({arguments})"))
            .open()
            .close();
    }
}

/// Emits `Models/OT_<Name>.<ext>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectTypeEmitter;

impl ArtifactEmitter for ObjectTypeEmitter {
    type Input = ObjectTypeDescriptor;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ObjectType
    }

    fn relative_path(&self, input: &ObjectTypeDescriptor, config: &GeneratorConfig) -> PathBuf {
        config.model_path(&object_type_class_name(input))
    }

    fn generate(
        &self,
        input: &ObjectTypeDescriptor,
        ctx: &EmitContext<'_>,
    ) -> ScaffoldResult<GeneratedArtifact> {
        let type_name = object_type_class_name(input);
        ctx.host
            .verbose(&format!("Generating {type_name} for object type {}", input.id));

        let mut builder = SourceBuilder::new(ctx.config);
        builder
            .banner()
            .usings(&["System", "MFilesAPI"])
            .line(format!("namespace {}", ctx.config.model_namespace()))
            .open()
            .line("/// <summary>")
            .line(format!(
                "/// Base type for objects of type {}.",
                doc_text(&input.name_singular)
            ))
            .line("/// </summary>")
            .line(format!("public abstract class {type_name} : {BASE_TYPE_NAME}"))
            .open();
        write_constructors(&mut builder, &type_name);
        builder.close().close();

        Ok(GeneratedArtifact::new(
            self.relative_path(input, ctx.config),
            builder.finish(),
            self.kind(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::traits::LineEnding;
    use crate::host::RecordingHost;
    use crate::schema::SchemaSnapshot;

    fn emit(object_type: &ObjectTypeDescriptor) -> GeneratedArtifact {
        let schema = SchemaSnapshot::new();
        let config = GeneratorConfig::new()
            .with_root_namespace("Contoso")
            .with_line_ending(LineEnding::Lf);
        let host = RecordingHost::new();
        let ctx = EmitContext::new(&schema, &config, &host);
        ObjectTypeEmitter.generate(object_type, &ctx).unwrap()
    }

    #[test]
    fn test_object_type_class() {
        let artifact = emit(&ObjectTypeDescriptor::new(0, "Document"));

        assert_eq!(artifact.relative_path, PathBuf::from("Models/OT_Document.cs"));
        assert_eq!(artifact.kind, ArtifactKind::ObjectType);
        assert!(artifact.content.contains("namespace Contoso.Models"));
        assert!(artifact
            .content
            .contains("public abstract class OT_Document : ObjVerEx"));
    }

    #[test]
    fn test_four_constructors() {
        let content = emit(&ObjectTypeDescriptor::new(0, "Document")).content;

        assert_eq!(content.matches("public OT_Document(").count(), 4);
        assert!(content.contains(
            "public OT_Document(Vault vault, ObjectVersion versionInfo, bool checkOut = false)"
        ));
        assert!(content.contains("public OT_Document(ObjectVersionAndProperties ovap, bool checkOut = false)"));
        assert!(content.contains("public OT_Document(Vault vault, ObjVer objVer, bool checkOut = false)"));
        assert!(content.contains(": base(vault, objType, id, version, checkOut)"));
    }

    #[test]
    fn test_name_is_sanitised() {
        let artifact = emit(&ObjectTypeDescriptor::new(101, "Sales order"));
        assert_eq!(
            artifact.relative_path,
            PathBuf::from("Models/OT_Salesorder.cs")
        );
    }
}
