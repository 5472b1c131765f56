use oasc_core::ir::Namespace;
use oasc_core::sink::{DirectorySink, MemorySink};
use oasc_core::{CompileOptions, GeneratedFile, compile, parse, render};
use oasc_rust_client::RustClientGenerator;

const PETSTORE: &str = include_str!("../../oasc-core/tests/fixtures/petstore.yaml");

fn options() -> CompileOptions {
    CompileOptions {
        base_package: Namespace::parse("petstore"),
        allow_warnings: false,
    }
}

fn generate(yaml: &str) -> Vec<GeneratedFile> {
    let spec = parse::from_yaml(yaml).unwrap();
    let (files, _) = render(&spec, &options(), &RustClientGenerator).unwrap();
    files
}

fn file<'a>(files: &'a [GeneratedFile], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("missing {path}"))
}

#[test]
fn petstore_files() {
    let files = generate(PETSTORE);
    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "petstore/models/pet/pet_owner.rs",
            "petstore/models/pet.rs",
            "petstore/models/new_pet.rs",
            "petstore/models/pets.rs",
            "petstore/models/inventory.rs",
            "petstore/models/price.rs",
            "petstore/models/empty.rs",
            "petstore/models/list_pets/list_pets_filter.rs",
            "petstore/models/place_order/place_order_body.rs",
            "petstore/other_api.rs",
            "petstore/pets_api.rs",
            "petstore/store_api.rs",
            "petstore/api.rs",
            "petstore/mod.rs",
            "petstore/models/mod.rs",
            "petstore/models/list_pets/mod.rs",
            "petstore/models/place_order/mod.rs",
        ]
    );
    for file in &files {
        assert!(
            file.content.starts_with("// @generated by oasc. Do not edit.\n"),
            "{} should have the header",
            file.path
        );
    }
}

#[test]
fn module_index() {
    let files = generate(PETSTORE);
    assert_eq!(
        file(&files, "petstore/models/mod.rs"),
        "// @generated by oasc. Do not edit.

pub mod empty;
pub mod inventory;
pub mod list_pets;
pub mod new_pet;
pub mod pet;
pub mod pets;
pub mod place_order;
pub mod price;

pub use pet::Pet;
pub use new_pet::NewPet;
pub use pets::Pets;
pub use inventory::Inventory;
pub use price::Price;
pub use empty::Empty;
"
    );
}

#[test]
fn class_fields_keep_wire_names() {
    let files = generate(PETSTORE);
    let pet = file(&files, "petstore/models/pet.rs");
    assert!(pet.contains("pub mod pet_owner;\n\npub use pet_owner::PetOwner;\n"));
    assert!(pet.contains("pub struct Pet {\n"));
    assert!(pet.contains("    #[serde(rename = \"id\")]\n    pub id: i64,\n"));
    assert!(pet.contains(
        "    pub birthday: ::oasc_runtime::Maybe<::oasc_runtime::chrono::NaiveDate>,\n"
    ));
    assert!(pet.contains(
        "    #[serde(rename = \"photo\", default, skip_serializing_if = \"::oasc_runtime::Maybe::is_absent\", with = \"::oasc_runtime::codec::byte_array::maybe\")]\n"
    ));
    assert!(pet.contains("    pub owner: ::oasc_runtime::Maybe<self::pet_owner::PetOwner>,\n"));
    // Schemas that are never parameters don't encode as one.
    assert!(!pet.contains("ToParam"));

    let owner = file(&files, "petstore/models/pet/pet_owner.rs");
    assert!(owner.contains("    pub r#type: ::oasc_runtime::Maybe<::std::string::String>,\n"));

    let empty = file(&files, "petstore/models/empty.rs");
    assert!(empty.contains("pub struct Empty {\n}\n"));
}

#[test]
fn aliases_wrap_their_type() {
    let files = generate(PETSTORE);
    let pets = file(&files, "petstore/models/pets.rs");
    assert!(pets.contains("#[serde(crate = \"::oasc_runtime::serde\", transparent)]\n"));
    assert!(pets.contains("pub struct Pets(pub ::std::vec::Vec<super::pet::Pet>);\n"));
    assert!(pets.contains("impl ::std::convert::From<Pets> for ::std::vec::Vec<super::pet::Pet> {"));

    let price = file(&files, "petstore/models/price.rs");
    assert!(price.contains("pub struct Price(pub ::oasc_runtime::Decimal);\n"));
}

#[test]
fn parameter_classes_encode_their_fields() {
    let files = generate(PETSTORE);
    let filter = file(&files, "petstore/models/list_pets/list_pets_filter.rs");
    assert!(filter.contains("impl ::oasc_runtime::ToParam for ListPetsFilter {"));
    assert!(filter.contains(
        "            (\"species\", ::oasc_runtime::ToParam::to_param(&self.species)),\n            (\"minAge\", ::oasc_runtime::ToParam::to_param(&self.min_age)),\n"
    ));
}

#[test]
fn api_methods_encode_parameters() {
    let files = generate(PETSTORE);
    let api = file(&files, "petstore/api.rs");
    assert!(api.contains("pub struct Api {\n    base_url: ::std::string::String,\n}"));
    assert!(api.contains("    pub fn pets(&self) -> super::pets_api::PetsApi<'_> {\n"));
    assert!(api.contains("    /// List all pets\n    pub fn list_pets(\n        &self,\n"));
    assert!(api.contains(
        "        filter: ::std::option::Option<super::models::list_pets::list_pets_filter::ListPetsFilter>,\n"
    ));
    assert!(api.contains("        let __uri = ::oasc_runtime::UriTemplate::new(\"/pets\");\n"));
    assert!(api.contains(
        "        __query.push(::oasc_runtime::ParamEncoder::new(::oasc_runtime::Style::DeepObject).explode(true).percent_encoded().encode(\"filter\", &filter)?);\n"
    ));

    // Path parameters declared on the path item apply to each operation.
    assert!(api.contains("        let mut __uri = ::oasc_runtime::UriTemplate::new(\"/pets/{petId}\");\n"));
    assert!(api.contains("    pub fn delete_pet(\n        &self,\n        pet_id: i64,\n        x_request_id: ::std::string::String,\n    )"));
    assert!(api.contains(
        "            ::oasc_runtime::ParamEncoder::new(::oasc_runtime::Style::Simple).explode(false).encode(\"X-Request-Id\", &x_request_id)?,\n"
    ));
    assert!(api.contains("            ::oasc_runtime::Method::Delete,\n"));

    assert!(api.contains("        let __request = __request.json(\"application/json\", &body)?;\n"));
    assert!(api.contains(
        "        body: ::std::option::Option<super::models::place_order::place_order_body::PlaceOrderBody>,\n"
    ));
    assert!(api.contains("        let __request = match &body {\n"));
}

#[test]
fn groups_delegate_to_the_api() {
    let files = generate(PETSTORE);
    let store = file(&files, "petstore/store_api.rs");
    assert!(store.contains("/// Operations tagged `store`.\n"));
    assert!(store.contains("pub struct StoreApi<'a> {\n    api: &'a super::api::Api,\n}"));
    assert!(store.contains("        self.api.show_pet_by_id(pet_id)\n"));
    assert!(store.contains("        self.api.place_order(body)\n"));
    assert!(!store.contains("list_pets"));

    let other = file(&files, "petstore/other_api.rs");
    assert!(other.contains("        self.api.health()\n"));
}

#[test]
fn recursive_fields_are_boxed() {
    let files = generate(
        r##"
openapi: 3.0.3
info: {title: Tree, version: "1"}
paths: {}
components:
  schemas:
    Node:
      type: object
      required: [parent]
      properties:
        parent:
          $ref: "#/components/schemas/Node"
        children:
          type: array
          items:
            $ref: "#/components/schemas/Node"
"##,
    );
    let node = file(&files, "petstore/models/node.rs");
    assert!(node.contains("    pub parent: ::std::boxed::Box<self::Node>,\n"));
    assert!(node.contains("    pub children: ::oasc_runtime::Maybe<::std::vec::Vec<self::Node>>,\n"));
}

#[test]
fn deprecated_operations_are_marked() {
    let files = generate(
        r#"
openapi: 3.0.3
info: {title: Old, version: "1"}
paths:
  /legacy:
    get:
      operationId: legacy
      deprecated: true
      tags: [old]
"#,
    );
    let api = file(&files, "petstore/api.rs");
    assert!(api.contains("    #[deprecated]\n    pub fn legacy(\n"));
    let group = file(&files, "petstore/old_api.rs");
    assert!(group.contains("    #[deprecated]\n    #[allow(deprecated)]\n    pub fn legacy(\n"));
}

#[test]
fn compile_writes_every_file() {
    let spec = parse::from_yaml(PETSTORE).unwrap();

    let mut sink = MemorySink::new();
    let report = compile(&spec, &options(), &RustClientGenerator, &mut sink).unwrap();
    assert_eq!(report.files.len(), 17);
    assert_eq!(sink.files.len(), 17);

    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());
    compile(&spec, &options(), &RustClientGenerator, &mut sink).unwrap();
    let written =
        std::fs::read_to_string(dir.path().join("petstore/models/pet/pet_owner.rs")).unwrap();
    assert!(written.contains("pub struct PetOwner {"));
}
