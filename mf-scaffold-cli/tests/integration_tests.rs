//! Integration tests for mf-scaffold-cli.
//!
//! These tests verify end-to-end functionality of the CLI tool: loading a
//! snapshot, generating into a project directory, conflict handling and
//! the binary's exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use mf_scaffold::{
    generator::LineEnding,
    host::RecordingHost,
    orchestrator::GenerationOrchestrator,
    schema::SchemaSnapshot,
    writer::ProjectWriter,
};
use mf_scaffold_cli::{
    config::{CliArgs, ConfigManager},
    writer::FsProjectWriter,
};

/// Get the path to test fixtures.
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Create a temporary project holding a copy of the fixture snapshot.
fn create_temp_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::copy(fixtures_path().join("schema.json"), dir.path().join("schema.json")).unwrap();
    dir
}

/// Run the binary inside `dir`.
fn mf_scaffold(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mf-scaffold"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// =============================================================================
// Library Integration Tests
// =============================================================================

#[test]
fn test_fixture_snapshot_loads() {
    let schema = SchemaSnapshot::load(&fixtures_path().join("schema.json")).unwrap();

    assert_eq!(schema.object_types.len(), 2);
    assert_eq!(schema.classes.len(), 1);
    assert_eq!(schema.property_defs.len(), 4);
    assert_eq!(schema.value_list_items.len(), 2);
}

#[test]
fn test_config_and_writer_generate_into_project() {
    let dir = create_temp_project();
    let args = CliArgs {
        project_dir: Some(dir.path().to_path_buf()),
        root_namespace: Some("Contoso".to_string()),
        line_ending: Some(LineEnding::Lf),
        ..Default::default()
    };
    let config = ConfigManager::merge_cli_args(Default::default(), &args);
    let schema = SchemaSnapshot::load(&config.snapshot_path()).unwrap();
    let host = RecordingHost::new();
    let mut writer = FsProjectWriter::new(&config.project.dir, false);

    let report = GenerationOrchestrator::new(&schema, &host, config.generator_config())
        .generate(&mut writer, false)
        .unwrap();

    assert_eq!(report.results.len(), 5);
    for file in [
        "ObjVerEx.cs",
        "PropertyDefinitions.cs",
        "OT_Document.cs",
        "Invoice.cs",
        "Invoicestatus.cs",
    ] {
        let path = dir.path().join("Models").join(file);
        assert!(path.exists(), "missing {}", path.display());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("namespace Contoso.Models"), "{file}");
        assert!(!content.contains('\r'), "{file} has CRLF");
    }

    let invoice = fs::read_to_string(dir.path().join("Models/Invoice.cs")).unwrap();
    assert!(invoice.contains("Customer"));
    assert!(invoice.contains("Amount"));
}

#[test]
fn test_second_run_conflicts_without_force() {
    let dir = create_temp_project();
    let schema = SchemaSnapshot::load(&dir.path().join("schema.json")).unwrap();
    let host = RecordingHost::new();
    let mut writer = FsProjectWriter::new(dir.path(), false);
    let orchestrator = GenerationOrchestrator::new(&schema, &host, Default::default());

    orchestrator.generate(&mut writer, false).unwrap();
    let before = fs::read_to_string(dir.path().join("Models/Invoice.cs")).unwrap();

    let err = orchestrator.generate(&mut writer, false).unwrap_err();
    assert!(err.to_string().contains("ObjVerEx.cs"), "{err}");

    orchestrator.generate(&mut writer, true).unwrap();
    let after = fs::read_to_string(dir.path().join("Models/Invoice.cs")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_partials_survive_forced_regeneration() {
    let dir = create_temp_project();
    let schema = SchemaSnapshot::load(&dir.path().join("schema.json")).unwrap();
    let host = RecordingHost::new();
    let config = mf_scaffold::GeneratorConfig::new().with_partials(true);
    let mut writer = FsProjectWriter::new(dir.path(), false);
    let orchestrator = GenerationOrchestrator::new(&schema, &host, config);

    orchestrator.generate(&mut writer, false).unwrap();
    let partial = dir.path().join("Models/Partials/Invoice.cs");
    assert!(writer.exists(Path::new("Models/Partials/Invoice.cs")));
    fs::write(&partial, "// hand written").unwrap();

    let report = orchestrator.generate(&mut writer, true).unwrap();
    assert_eq!(report.kept, vec![PathBuf::from("Models/Partials/Invoice.cs")]);
    assert_eq!(fs::read_to_string(partial).unwrap(), "// hand written");
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = create_temp_project();
    let schema = SchemaSnapshot::load(&dir.path().join("schema.json")).unwrap();
    let host = RecordingHost::new();
    let mut writer = FsProjectWriter::new(dir.path(), true);

    let report = GenerationOrchestrator::new(&schema, &host, Default::default())
        .generate(&mut writer, false)
        .unwrap();

    assert_eq!(report.results.len(), 5);
    assert!(report.results.iter().all(|r| !r.was_written()));
    assert!(!dir.path().join("Models").exists());
}

// =============================================================================
// Binary Tests
// =============================================================================

#[test]
fn test_binary_generate_succeeds() {
    let dir = create_temp_project();

    let output = mf_scaffold(dir.path(), &["generate", "--namespace", "Contoso"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Adding Models/Invoice.cs to project."));
    assert!(dir.path().join("Models/OT_Document.cs").exists());
}

#[test]
fn test_binary_conflict_exits_with_validation_code() {
    let dir = create_temp_project();

    assert!(mf_scaffold(dir.path(), &["generate"]).status.success());
    let output = mf_scaffold(dir.path(), &["generate"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));

    let forced = mf_scaffold(dir.path(), &["generate", "--force"]);
    assert!(forced.status.success(), "{}", stderr(&forced));
}

#[test]
fn test_binary_missing_snapshot_is_validation_error() {
    let dir = TempDir::new().unwrap();

    let output = mf_scaffold(dir.path(), &["generate"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Schema snapshot not found"));
}

#[test]
fn test_binary_dry_run_prints_content() {
    let dir = create_temp_project();

    let output = mf_scaffold(dir.path(), &["generate", "--dry-run"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("[dry-run]"));
    assert!(stdout(&output).contains("public enum PropertyDefinitions"));
    assert!(!dir.path().join("Models").exists());
}

#[test]
fn test_binary_resolve_alias_and_guid() {
    let dir = create_temp_project();

    let by_alias = mf_scaffold(
        dir.path(),
        &["resolve", "--kind", "property-definition", "PD.Customer"],
    );
    assert!(by_alias.status.success(), "{}", stderr(&by_alias));
    assert_eq!(stdout(&by_alias).trim(), "1020");

    let by_guid = mf_scaffold(
        dir.path(),
        &[
            "resolve",
            "--kind",
            "PropertyDefinition",
            "{6c4e2a10-9d3b-4f7a-a2c1-0e5f8b9d7c33}",
        ],
    );
    assert!(by_guid.status.success(), "{}", stderr(&by_guid));
    assert_eq!(stdout(&by_guid).trim(), "1020");

    let missing = mf_scaffold(
        dir.path(),
        &["resolve", "--kind", "property-definition", "PD.Missing"],
    );
    assert_eq!(missing.status.code(), Some(1));
}

#[test]
fn test_binary_resolve_item() {
    let dir = create_temp_project();

    let by_guid = mf_scaffold(
        dir.path(),
        &["resolve", "--item", "{A7B0C3D2-11E4-4F56-8A9B-C0D1E2F3A4B5}"],
    );
    assert!(by_guid.status.success(), "{}", stderr(&by_guid));
    assert_eq!(stdout(&by_guid).trim(), "(0-77)");

    let bare = mf_scaffold(dir.path(), &["resolve", "--item", "42"]);
    assert_eq!(stdout(&bare).trim(), "42");
}

#[test]
fn test_binary_diff_is_a_stub() {
    let dir = TempDir::new().unwrap();

    let output = mf_scaffold(dir.path(), &["diff", "--mode", "local-and-models"]);

    assert!(output.status.success());
    assert!(stderr(&output).contains("Functionality not completed."));
}

#[test]
fn test_binary_init_refuses_existing_file() {
    let dir = TempDir::new().unwrap();

    let first = mf_scaffold(dir.path(), &["init"]);
    assert!(first.status.success(), "{}", stderr(&first));
    let content = fs::read_to_string(dir.path().join("mf-scaffold.toml")).unwrap();
    assert_eq!(content, ConfigManager::default_config_content());

    let second = mf_scaffold(dir.path(), &["init"]);
    assert_eq!(second.status.code(), Some(2));

    let forced = mf_scaffold(dir.path(), &["init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn test_binary_reads_config_file() {
    let dir = create_temp_project();
    fs::write(
        dir.path().join("mf-scaffold.toml"),
        "[project]\nroot_namespace = \"Fabrikam\"\n\n[generation]\npartials = true\n",
    )
    .unwrap();

    let output = mf_scaffold(dir.path(), &["generate"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let invoice = fs::read_to_string(dir.path().join("Models/Invoice.cs")).unwrap();
    assert!(invoice.contains("namespace Fabrikam.Models"));
    assert!(dir.path().join("Models/Partials/Invoice.cs").exists());
}
