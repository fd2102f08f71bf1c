//! Two-pass generation: plan everything, then write.
//!
//! [`GenerationOrchestrator::plan`] walks the schema, renders every artifact
//! in memory and checks the project for files that would be replaced. A
//! rejected plan never reaches [`GenerationOrchestrator::apply`], so a run
//! that fails a precondition leaves the project untouched.
//!
//! Walk order: the base wrapper, the property enum, each real object type
//! followed by its classes, then every static value list.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info_span};

use crate::error::{GenerateError, ScaffoldResult};
use crate::generator::{
    ArtifactEmitter, BaseWrapperEmitter, ClassEmitter, ClassPartialEmitter, EmitContext,
    GeneratedArtifact, GeneratorConfig, ObjectTypeEmitter, PropertyEnumEmitter,
    ValueListEnumEmitter,
};
use crate::host::HostUi;
use crate::schema::{CachedSchema, SchemaProvider};
use crate::writer::{ProjectWriter, WriteResult};

/// What [`GenerationOrchestrator::apply`] does with one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAction {
    /// Write the artifact.
    Write,
    /// A hand-editable file already exists; leave it alone.
    KeepExisting,
}

/// One artifact of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedArtifact {
    pub artifact: GeneratedArtifact,
    pub action: PlannedAction,
}

/// Validated set of artifacts, in walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationPlan {
    artifacts: Vec<PlannedArtifact>,
}

impl GenerationPlan {
    pub fn artifacts(&self) -> &[PlannedArtifact] {
        &self.artifacts
    }

    /// Target paths in walk order.
    pub fn paths(&self) -> Vec<&Path> {
        self.artifacts
            .iter()
            .map(|planned| planned.artifact.relative_path.as_path())
            .collect()
    }

    /// The planned artifact targeting `relative_path`.
    pub fn get(&self, relative_path: impl AsRef<Path>) -> Option<&GeneratedArtifact> {
        let relative_path = relative_path.as_ref();
        self.artifacts
            .iter()
            .map(|planned| &planned.artifact)
            .find(|artifact| artifact.relative_path == relative_path)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// Outcome of [`GenerationOrchestrator::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// One entry per artifact handed to the writer.
    pub results: Vec<WriteResult>,
    /// Hand-editable files left as they were.
    pub kept: Vec<PathBuf>,
}

impl ApplyReport {
    /// Total bytes written.
    pub fn bytes_written(&self) -> usize {
        self.results.iter().map(WriteResult::bytes).sum()
    }
}

/// Drives one generation run over a schema.
///
/// Listings are fetched lazily through a [`CachedSchema`] and reused for the
/// whole run, so every emitter sees the same schema.
pub struct GenerationOrchestrator<'a> {
    schema: CachedSchema<&'a dyn SchemaProvider>,
    host: &'a dyn HostUi,
    config: GeneratorConfig,
}

impl<'a> GenerationOrchestrator<'a> {
    pub fn new(schema: &'a dyn SchemaProvider, host: &'a dyn HostUi, config: GeneratorConfig) -> Self {
        Self {
            schema: CachedSchema::new(schema),
            host,
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Render every artifact and check the project for conflicts.
    ///
    /// Without `overwrite`, the first existing generated file in walk order
    /// rejects the whole plan with [`GenerateError::Conflict`]. Existing
    /// hand-editable partials never conflict; they are kept.
    pub fn plan(&self, writer: &dyn ProjectWriter, overwrite: bool) -> ScaffoldResult<GenerationPlan> {
        let _span = info_span!("plan", overwrite).entered();

        let artifacts = self.render_all()?;

        let mut planned = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let exists = writer.exists(&artifact.relative_path);
            let action = if artifact.kind.is_hand_editable() && exists {
                PlannedAction::KeepExisting
            } else if exists && !overwrite {
                return Err(GenerateError::conflict(artifact.relative_path).into());
            } else {
                PlannedAction::Write
            };
            planned.push(PlannedArtifact { artifact, action });
        }

        debug!(artifacts = planned.len(), "plan accepted");
        Ok(GenerationPlan { artifacts: planned })
    }

    /// Persist a validated plan, one progress line per written artifact.
    ///
    /// A failing write stops the run; files written before it stay.
    pub fn apply(&self, plan: GenerationPlan, writer: &mut dyn ProjectWriter) -> ScaffoldResult<ApplyReport> {
        let _span = info_span!("apply", artifacts = plan.len()).entered();

        let mut report = ApplyReport::default();
        for PlannedArtifact { artifact, action } in plan.artifacts {
            match action {
                PlannedAction::Write => {
                    self.host.info(&format!(
                        "Adding {} to project.",
                        artifact.relative_path.display()
                    ));
                    report.results.push(writer.write(&artifact)?);
                }
                PlannedAction::KeepExisting => {
                    self.host.verbose(&format!(
                        "Keeping existing {}",
                        artifact.relative_path.display()
                    ));
                    report.kept.push(artifact.relative_path);
                }
            }
        }

        Ok(report)
    }

    /// [`plan`](Self::plan) followed by [`apply`](Self::apply).
    pub fn generate(&self, writer: &mut dyn ProjectWriter, overwrite: bool) -> ScaffoldResult<ApplyReport> {
        let plan = self.plan(&*writer, overwrite)?;
        self.apply(plan, writer)
    }

    /// Every artifact in walk order, later duplicates of a target path
    /// dropped with a warning.
    fn render_all(&self) -> ScaffoldResult<Vec<GeneratedArtifact>> {
        let ctx = EmitContext::new(&self.schema, &self.config, self.host);
        let mut out = Targets::new(self.host);

        out.push(BaseWrapperEmitter.generate(&(), &ctx)?);

        let property_defs = self.schema.list_property_defs()?;
        out.push(PropertyEnumEmitter.generate(&property_defs, &ctx)?);

        let class_emitter = ClassEmitter::new();
        for object_type in self.schema.list_object_types()? {
            out.push(ObjectTypeEmitter.generate(&object_type, &ctx)?);

            for class in self.schema.list_classes(object_type.id)? {
                out.push(class_emitter.generate(&class, &ctx)?);
                if self.config.partials {
                    out.push(ClassPartialEmitter.generate(&class, &ctx)?);
                }
            }
        }

        for value_list in self.schema.list_value_lists()? {
            if value_list.real_object_type {
                continue;
            }
            out.push(ValueListEnumEmitter.generate(&value_list, &ctx)?);
        }

        Ok(out.artifacts)
    }
}

/// Collects artifacts, keeping the first one per target path.
struct Targets<'h> {
    host: &'h dyn HostUi,
    seen: BTreeSet<PathBuf>,
    artifacts: Vec<GeneratedArtifact>,
}

impl<'h> Targets<'h> {
    fn new(host: &'h dyn HostUi) -> Self {
        Self {
            host,
            seen: BTreeSet::new(),
            artifacts: Vec::new(),
        }
    }

    fn push(&mut self, artifact: GeneratedArtifact) {
        if self.seen.insert(artifact.relative_path.clone()) {
            self.artifacts.push(artifact);
        } else {
            let warning = GenerateError::DuplicateTarget {
                path: artifact.relative_path,
            };
            self.host.warning(&warning.to_string());
        }
    }
}
