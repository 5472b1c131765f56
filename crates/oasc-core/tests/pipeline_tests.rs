use std::convert::Infallible;

use oasc_core::error::{CompileError, SinkError};
use oasc_core::ir::{Model, Namespace};
use oasc_core::sink::{DirectorySink, FileSink, MemorySink};
use oasc_core::transform::node_path;
use oasc_core::{CodeGenerator, CompileOptions, GeneratedFile, compile, parse};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

/// Writes one line per node.
struct Listing;

impl CodeGenerator for Listing {
    type Error = Infallible;

    fn generate(&self, model: &Model) -> Result<Vec<GeneratedFile>, Self::Error> {
        Ok(model
            .nodes
            .iter()
            .map(|node| GeneratedFile {
                path: format!("{}.txt", node_path(node.namespace(), node.name())),
                content: format!("{} {}\n", node.kind(), node.name()),
            })
            .collect())
    }
}

/// Fails on the nth write.
struct FailingSink {
    inner: MemorySink,
    fail_at: usize,
}

impl FileSink for FailingSink {
    fn write(&mut self, file: &GeneratedFile) -> Result<(), SinkError> {
        if self.inner.files.len() == self.fail_at {
            return Err(SinkError {
                path: file.path.clone(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.inner.write(file)
    }
}

fn options() -> CompileOptions {
    CompileOptions {
        base_package: Namespace::parse("petstore"),
        allow_warnings: false,
    }
}

#[test]
fn compile_writes_one_file_per_node() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let mut sink = MemorySink::new();
    let report = compile(&spec, &options(), &Listing, &mut sink).unwrap();
    assert_eq!(report.files.len(), 13);
    assert_eq!(sink.get("petstore/models/pet.txt"), Some("class Pet\n"));
    assert_eq!(sink.get("petstore/api.txt"), Some("api Api\n"));
}

#[test]
fn compile_to_directory() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());
    compile(&spec, &options(), &Listing, &mut sink).unwrap();
    let owner = std::fs::read_to_string(dir.path().join("petstore/models/pet/pet_owner.txt"));
    assert_eq!(owner.unwrap(), "class PetOwner\n");
}

#[test]
fn duplicate_operation_id_writes_nothing() {
    let yaml = r#"
openapi: 3.0.0
paths:
  /a:
    get: {operationId: same}
  /b:
    post: {operationId: same}
components:
  schemas:
    Pet: {type: object}
"#;
    let spec = parse::from_yaml(yaml).unwrap();
    let mut sink = MemorySink::new();
    let err = compile(&spec, &options(), &Listing, &mut sink).unwrap_err();
    assert!(matches!(err, CompileError::Model(_)), "{err}");
    assert!(sink.files.is_empty());
}

#[test]
fn warnings_fail_unless_allowed() {
    let yaml = r#"
openapi: 3.0.0
paths: {}
components:
  schemas:
    Pet:
      anyOf: [{type: string}, {type: integer}]
"#;
    let spec = parse::from_yaml(yaml).unwrap();
    let mut sink = MemorySink::new();
    let err = compile(&spec, &options(), &Listing, &mut sink).unwrap_err();
    assert!(matches!(err, CompileError::Warnings { count: 1 }), "{err}");
    assert!(sink.files.is_empty());

    let options = CompileOptions {
        allow_warnings: true,
        ..options()
    };
    let report = compile(&spec, &options, &Listing, &mut sink).unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert!(sink.get("petstore/models/pet.txt").is_some());
}

#[test]
fn sink_failure_stops_without_rollback() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let mut sink = FailingSink {
        inner: MemorySink::new(),
        fail_at: 2,
    };
    let err = compile(&spec, &options(), &Listing, &mut sink).unwrap_err();
    assert!(matches!(err, CompileError::Sink(_)), "{err}");
    assert_eq!(sink.inner.files.len(), 2);
}
