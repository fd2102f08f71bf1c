//! The shared instance wrapper, emitted once per run.

use std::path::PathBuf;

use crate::error::ScaffoldResult;
use crate::generator::traits::{
    ArtifactEmitter, ArtifactKind, EmitContext, GeneratedArtifact, GeneratorConfig,
};

/// Template of `ObjVerEx` plus its support types.
const TEMPLATE: &str = include_str!("../../templates/ObjVerEx.cs");

/// Placeholder replaced by the model namespace.
const NAMESPACE_PLACEHOLDER: &str = "NAMESPACE";

/// Name of the wrapper type every object type derives from.
pub const BASE_TYPE_NAME: &str = "ObjVerEx";

/// Emits `Models/ObjVerEx.<ext>` from the bundled template.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseWrapperEmitter;

impl BaseWrapperEmitter {
    /// Template text with the namespace filled in and line endings
    /// normalised to the configured style.
    pub fn render(config: &GeneratorConfig) -> String {
        let namespace = config.model_namespace();
        let eol = config.line_ending.as_str();

        TEMPLATE
            .replace("\r\n", "\n")
            .replace(NAMESPACE_PLACEHOLDER, &namespace)
            .split('\n')
            .collect::<Vec<_>>()
            .join(eol)
    }
}

impl ArtifactEmitter for BaseWrapperEmitter {
    type Input = ();

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::BaseWrapper
    }

    fn relative_path(&self, _input: &(), config: &GeneratorConfig) -> PathBuf {
        config.model_path(BASE_TYPE_NAME)
    }

    fn generate(&self, input: &(), ctx: &EmitContext<'_>) -> ScaffoldResult<GeneratedArtifact> {
        ctx.host.verbose("Generating base wrapper type");
        Ok(GeneratedArtifact::new(
            self.relative_path(input, ctx.config),
            Self::render(ctx.config),
            self.kind(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::traits::LineEnding;

    #[test]
    fn test_namespace_is_substituted() {
        let config = GeneratorConfig::new().with_root_namespace("Contoso");
        let code = BaseWrapperEmitter::render(&config);

        assert!(code.contains("namespace Contoso.Models"));
        assert!(!code.contains(NAMESPACE_PLACEHOLDER));
        assert!(code.contains("public class MetaStructureClassAttribute"));
        assert!(code.contains("public abstract class ObjVerEx"));
    }

    #[test]
    fn test_line_endings_follow_config() {
        let crlf = BaseWrapperEmitter::render(&GeneratorConfig::new());
        assert!(crlf.contains("\r\n"));
        assert!(!crlf.replace("\r\n", "").contains('\n'));

        let lf = BaseWrapperEmitter::render(&GeneratorConfig::new().with_line_ending(LineEnding::Lf));
        assert!(!lf.contains('\r'));
    }

    #[test]
    fn test_path() {
        let path = BaseWrapperEmitter.relative_path(&(), &GeneratorConfig::new());
        assert_eq!(path, PathBuf::from("Models/ObjVerEx.cs"));
    }
}
