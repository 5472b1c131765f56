use oasc_core::error::ModelError;
use oasc_core::ir::{
    Builtin, Capability, ModelNode, Namespace, ParameterLocation, ParameterStyle, Reference,
};
use oasc_core::parse;
use oasc_core::transform::{ModelOptions, build_model};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

fn options() -> ModelOptions {
    ModelOptions {
        base_package: Namespace::parse("petstore"),
    }
}

fn models() -> Namespace {
    Namespace::parse("petstore.models")
}

#[test]
fn petstore_node_order() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let model = build_model(&spec, &options()).unwrap();
    let nodes: Vec<String> = model
        .nodes
        .iter()
        .map(|n| format!("{} {}", n.kind(), n.reference()))
        .collect();
    assert_eq!(
        nodes,
        [
            "class petstore::models::pet::PetOwner",
            "class petstore::models::Pet",
            "class petstore::models::NewPet",
            "alias petstore::models::Pets",
            "alias petstore::models::Inventory",
            "alias petstore::models::Price",
            "class petstore::models::Empty",
            "class petstore::models::list_pets::ListPetsFilter",
            "class petstore::models::place_order::PlaceOrderBody",
            "group petstore::OtherApi",
            "group petstore::PetsApi",
            "group petstore::StoreApi",
            "api petstore::Api",
        ]
    );
    assert!(model.warnings.is_empty(), "{:?}", model.warnings);
}

#[test]
fn petstore_fields() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let model = build_model(&spec, &options()).unwrap();
    let Some(ModelNode::Class(pet)) = model.find(&Reference::new(models(), "Pet")) else {
        panic!("Pet should be a class");
    };
    let fields: Vec<(&str, &str, String)> = pet
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.wire_name.as_str(), f.reference.to_string()))
        .collect();
    assert_eq!(
        fields,
        [
            ("id", "id", "builtin::Int64".to_string()),
            ("name", "name", "builtin::Text".to_string()),
            ("tag", "tag", "builtin::Optional<builtin::Text>".to_string()),
            ("birthday", "birthday", "builtin::Optional<builtin::Date>".to_string()),
            ("photo", "photo", "builtin::Optional<builtin::Bytes>".to_string()),
            (
                "owner",
                "owner",
                "builtin::Optional<petstore::models::pet::PetOwner>".to_string()
            ),
        ]
    );

    let Some(ModelNode::Class(owner)) =
        model.find(&Reference::new(models().child("pet"), "PetOwner"))
    else {
        panic!("PetOwner should be a class");
    };
    assert_eq!(owner.fields[1].name, "r#type");
    assert_eq!(owner.fields[1].wire_name, "type");
}

#[test]
fn petstore_aliases() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let model = build_model(&spec, &options()).unwrap();
    let wrapped = |name: &str| match model.find(&Reference::new(models(), name)) {
        Some(ModelNode::Alias(alias)) => alias.wrapped.clone(),
        other => panic!("{name} should be an alias, got {other:?}"),
    };
    assert_eq!(
        wrapped("Pets"),
        Builtin::List.of(Reference::new(models(), "Pet"))
    );
    assert_eq!(wrapped("Inventory"), Builtin::Map.of(Builtin::Int32.reference()));
    assert_eq!(wrapped("Price"), Builtin::Decimal.reference());
}

#[test]
fn every_operation_is_reachable() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let model = build_model(&spec, &options()).unwrap();
    let api = model.api().expect("should have an aggregate");
    let ids: Vec<&str> = api.operations.iter().map(|op| op.id.as_str()).collect();
    assert_eq!(
        ids,
        ["listPets", "createPet", "showPetById", "deletePet", "placeOrder", "health"]
    );
    for op in &api.operations {
        assert!(
            model
                .groups()
                .any(|g| g.operations.iter().any(|o| o.id == op.id)),
            "{} should be in a group",
            op.id
        );
    }

    let accessors: Vec<&str> = api.groups.iter().map(|g| g.accessor.as_str()).collect();
    assert_eq!(accessors, ["other", "pets", "store"]);

    let store = model.groups().find(|g| g.tag == "store").unwrap();
    let ids: Vec<&str> = store.operations.iter().map(|op| op.id.as_str()).collect();
    assert_eq!(ids, ["showPetById", "placeOrder"]);

    let other = model.groups().find(|g| g.tag == "other").unwrap();
    assert_eq!(other.operations[0].id, "health");
}

#[test]
fn petstore_parameters() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let model = build_model(&spec, &options()).unwrap();
    let api = model.api().unwrap();
    let op = |id: &str| api.operations.iter().find(|op| op.id == id).unwrap();

    let list = op("listPets");
    let params: Vec<_> = list
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.location, p.style, p.explode, p.required))
        .collect();
    assert_eq!(
        params,
        [
            ("limit", ParameterLocation::Query, ParameterStyle::Form, true, false),
            ("tags", ParameterLocation::Query, ParameterStyle::Form, true, false),
            ("filter", ParameterLocation::Query, ParameterStyle::DeepObject, true, false),
        ]
    );
    assert_eq!(
        list.parameters[2].reference,
        Reference::new(models().child("list_pets"), "ListPetsFilter")
    );

    let delete = op("deletePet");
    let params: Vec<_> = delete
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.wire_name.as_str(), p.style, p.explode, p.required))
        .collect();
    assert_eq!(
        params,
        [
            ("pet_id", "petId", ParameterStyle::Simple, false, true),
            ("x_request_id", "X-Request-Id", ParameterStyle::Simple, false, true),
        ]
    );

    let order = op("placeOrder");
    let body = order.request_body.as_ref().expect("should have a body");
    assert_eq!(body.name, "body");
    assert_eq!(body.content_type, "application/json");
    assert!(!body.required);
    assert_eq!(
        body.reference,
        Reference::new(models().child("place_order"), "PlaceOrderBody")
    );
    assert_eq!(op("createPet").method_name, "create_pet");
}

#[test]
fn parameter_classes_get_capability() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let model = build_model(&spec, &options()).unwrap();
    let capabilities = |reference: Reference| match model.find(&reference) {
        Some(ModelNode::Class(class)) => class.capabilities.clone(),
        other => panic!("{reference} should be a class, got {other:?}"),
    };
    assert!(
        capabilities(Reference::new(models().child("list_pets"), "ListPetsFilter"))
            .contains(&Capability::ParameterValue)
    );
    assert!(capabilities(Reference::new(models(), "Pet")).is_empty());
}

#[test]
fn duplicate_operation_id_fails_before_nodes() {
    let yaml = r#"
openapi: 3.0.0
paths:
  /a:
    get: {operationId: same}
  /b:
    get: {operationId: same}
components:
  schemas:
    Broken: {type: string, format: uuid}
"#;
    let spec = parse::from_yaml(yaml).unwrap();
    let err = build_model(&spec, &options()).unwrap_err();
    assert!(
        matches!(err, ModelError::DuplicateOperationId { ref id, .. } if id == "same"),
        "{err}"
    );
}

#[test]
fn composites_and_non_json_bodies_warn() {
    let yaml = r##"
openapi: 3.1.0
paths:
  /upload:
    post:
      operationId: upload
      requestBody:
        content:
          multipart/form-data:
            schema: {type: object}
components:
  schemas:
    A: {type: object}
    B:
      oneOf:
        - $ref: "#/components/schemas/A"
"##;
    let spec = parse::from_yaml(yaml).unwrap();
    let model = build_model(&spec, &options()).unwrap();
    let contexts: Vec<&str> = model.warnings.iter().map(|w| w.context.as_str()).collect();
    assert_eq!(contexts, ["components.schemas.B", "upload.requestBody"]);
    let upload = &model.api().unwrap().operations[0];
    assert!(upload.request_body.is_none());
}

#[test]
fn unsupported_style_fails() {
    let yaml = r#"
openapi: 3.0.0
paths:
  /a:
    get:
      operationId: a
      parameters:
        - {name: q, in: query, style: tabDelimited, schema: {type: string}}
components:
  schemas: {}
"#;
    let spec = parse::from_yaml(yaml).unwrap();
    let err = build_model(&spec, &options()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsupported parameter style `tabDelimited` in `a.parameters.q`"
    );
}

#[test]
fn colliding_nodes_fail() {
    let yaml = r#"
openapi: 3.0.0
paths: {}
components:
  schemas:
    pet_owner: {type: string}
    PetOwner: {type: integer}
"#;
    let spec = parse::from_yaml(yaml).unwrap();
    let err = build_model(&spec, &options()).unwrap_err();
    assert!(matches!(err, ModelError::NameCollision { .. }), "{err}");
}

#[test]
fn tags_differing_in_case_get_distinct_groups() {
    let yaml = r#"
openapi: 3.0.0
paths:
  /a:
    get: {operationId: a, tags: [pets]}
  /b:
    get: {operationId: b, tags: [Pets]}
  /c:
    get: {operationId: c, tags: [""]}
components:
  schemas: {}
"#;
    let spec = parse::from_yaml(yaml).unwrap();
    let model = build_model(&spec, &options()).unwrap();
    let groups: Vec<(&str, &str)> = model
        .nodes
        .iter()
        .filter_map(|n| match n {
            ModelNode::Group(group) => Some((group.tag.as_str(), group.name.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(groups, [("", "Api2"), ("Pets", "PetsApi"), ("pets", "PetsApi2")]);
}
