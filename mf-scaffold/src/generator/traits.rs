//! Emitter trait and generator configuration.
//!
//! Every artifact kind has one emitter implementing [`ArtifactEmitter`].
//! Emitters are pure over the schema: the same descriptor, schema and
//! configuration always produce the same bytes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ScaffoldResult;
use crate::host::HostUi;
use crate::schema::SchemaProvider;

/// Folder every artifact lands in, relative to the project directory.
pub const MODELS_DIR: &str = "Models";

/// Sub-folder of [`MODELS_DIR`] holding hand-editable partials.
pub const PARTIALS_DIR: &str = "Partials";

/// Namespace segment appended to the project's root namespace.
pub const MODELS_NAMESPACE: &str = "Models";

/// Trait for artifact emitters.
///
/// # Example
///
/// ```rust,ignore
/// use mf_scaffold::generator::{ArtifactEmitter, EmitContext, ObjectTypeEmitter};
///
/// let artifact = ObjectTypeEmitter.generate(&object_type, &ctx)?;
/// println!("{}", artifact.relative_path.display());
/// ```
pub trait ArtifactEmitter {
    /// The schema element one artifact is generated from.
    type Input: ?Sized;

    /// Kind of artifact produced.
    fn kind(&self) -> ArtifactKind;

    /// Target path for `input`, relative to the project directory.
    fn relative_path(&self, input: &Self::Input, config: &GeneratorConfig) -> PathBuf;

    /// Produce the artifact for `input`.
    fn generate(&self, input: &Self::Input, ctx: &EmitContext<'_>) -> ScaffoldResult<GeneratedArtifact>;
}

/// Collaborators shared by every emitter in one run.
#[derive(Clone, Copy)]
pub struct EmitContext<'a> {
    pub schema: &'a dyn SchemaProvider,
    pub config: &'a GeneratorConfig,
    pub host: &'a dyn HostUi,
}

impl<'a> EmitContext<'a> {
    pub fn new(
        schema: &'a dyn SchemaProvider,
        config: &'a GeneratorConfig,
        host: &'a dyn HostUi,
    ) -> Self {
        Self {
            schema,
            config,
            host,
        }
    }
}

/// Generator configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Root namespace of the target project; empty means none.
    pub root_namespace: String,

    /// Split each class into a generated file and a hand-editable partial.
    pub partials: bool,

    /// Indentation style
    pub indent: IndentStyle,

    /// Line ending style
    pub line_ending: LineEnding,

    /// Extension of generated files, without the dot.
    pub extension: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root_namespace: String::new(),
            partials: false,
            indent: IndentStyle::default(),
            line_ending: LineEnding::default(),
            extension: "cs".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project's root namespace.
    pub fn with_root_namespace(mut self, root_namespace: impl Into<String>) -> Self {
        self.root_namespace = root_namespace.into();
        self
    }

    /// Enable or disable partial splitting.
    pub fn with_partials(mut self, partials: bool) -> Self {
        self.partials = partials;
        self
    }

    /// Set the indentation style.
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    /// Set the line ending style.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Set the generated file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Namespace generated types are placed in.
    pub fn model_namespace(&self) -> String {
        let root = self.root_namespace.trim().trim_end_matches('.');
        if root.is_empty() {
            MODELS_NAMESPACE.to_string()
        } else {
            format!("{root}.{MODELS_NAMESPACE}")
        }
    }

    /// `Models/<stem>.<ext>`
    pub fn model_path(&self, stem: &str) -> PathBuf {
        PathBuf::from(MODELS_DIR).join(self.file_name(stem))
    }

    /// `Models/Partials/<stem>.<ext>`
    pub fn partial_path(&self, stem: &str) -> PathBuf {
        PathBuf::from(MODELS_DIR)
            .join(PARTIALS_DIR)
            .join(self.file_name(stem))
    }

    fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension)
    }
}

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndentStyle {
    /// Use 2 spaces for indentation
    Spaces2,

    /// Use 4 spaces for indentation
    #[default]
    Spaces4,

    /// Use tabs for indentation
    Tabs,
}

impl IndentStyle {
    /// Get the indentation string.
    pub fn as_str(&self) -> &str {
        match self {
            IndentStyle::Spaces2 => "  ",
            IndentStyle::Spaces4 => "    ",
            IndentStyle::Tabs => "\t",
        }
    }

    /// Create an indentation string for the given depth.
    pub fn indent(&self, depth: usize) -> String {
        self.as_str().repeat(depth)
    }
}

/// Line ending style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    /// Unix-style line endings (LF)
    Lf,

    /// Windows-style line endings (CRLF); what Visual Studio projects expect.
    #[default]
    #[serde(rename = "crlf")]
    CrLf,
}

impl LineEnding {
    /// Get the line ending string.
    pub fn as_str(&self) -> &str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// What an artifact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// The shared instance wrapper and its support types.
    BaseWrapper,
    /// Enumeration of every property definition.
    PropertyEnum,
    /// Abstract per-object-type base class.
    ObjectType,
    /// Generated class file.
    Class,
    /// Hand-editable companion of a class; never overwritten.
    ClassPartial,
    /// Enumeration of a static value list's items.
    ValueListEnum,
}

impl ArtifactKind {
    /// Whether the artifact may hold user edits.
    pub fn is_hand_editable(&self) -> bool {
        matches!(self, ArtifactKind::ClassPartial)
    }
}

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Path relative to the project directory.
    pub relative_path: PathBuf,

    /// File content.
    pub content: String,

    /// What the file is.
    pub kind: ArtifactKind,
}

impl GeneratedArtifact {
    pub fn new(relative_path: impl Into<PathBuf>, content: impl Into<String>, kind: ArtifactKind) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
            kind,
        }
    }

    /// Content as bytes.
    pub fn bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}
