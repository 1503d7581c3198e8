//! Integration tests for SchemaDefinitionService (attribute/relationship
//! schemas, model factory resolution, and mixin fallback).

mod fixtures;

use std::sync::Arc;

use fixtures::{blog_owner, blog_schema, commentable};
use record_schema::{
    AttributeMeta, Factory, InMemoryOwner, ModelClass, Owner, QualifiedName, RecordIdentifier,
    RelationshipKind, RelationshipMeta, SchemaConfig, SchemaDefinitionService, SchemaError,
};

#[test]
fn post_scenario() {
    let (_owner, schema) = blog_schema();

    let attributes = schema.attributes_definition_for("post").unwrap();
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes["title"], AttributeMeta::new("title", "string"));

    let relationships = schema.relationships_definition_for("post").unwrap().unwrap();
    assert_eq!(relationships.len(), 1);
    let comments = &relationships["comments"];
    assert_eq!(comments.kind, RelationshipKind::HasMany);
    assert_eq!(comments.type_name, "comment");

    assert!(schema.does_type_exist("post").unwrap());
    assert!(!schema.does_type_exist("unknown-type").unwrap());
}

#[test]
fn repeated_lookups_return_the_same_schema() {
    let (_owner, schema) = blog_schema();

    let first = schema.attributes_definition_for("post").unwrap();
    let second = schema.attributes_definition_for("post").unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let first = schema.relationships_definition_for("post").unwrap().unwrap();
    let second = schema.relationships_definition_for("post").unwrap().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn schemas_are_not_recomputed_after_redefinition() {
    let (owner, schema) = blog_schema();
    let before = schema.attributes_definition_for("post").unwrap();

    owner
        .register_model(
            "post",
            ModelClass::model().attribute(AttributeMeta::new("subtitle", "string")),
        )
        .unwrap();
    let after = schema.attributes_definition_for("post").unwrap();

    assert!(Arc::ptr_eq(&before, &after));
    assert!(after.contains_key("title"));
}

#[test]
fn misses_are_not_memoized() {
    let (owner, schema) = blog_schema();

    assert!(!schema.does_type_exist("author").unwrap());
    assert!(schema.model_factory_for("author").unwrap().is_none());

    owner
        .register_model(
            "author",
            ModelClass::model().attribute(AttributeMeta::new("name", "string")),
        )
        .unwrap();

    assert!(schema.does_type_exist("author").unwrap());
    assert!(schema
        .attributes_definition_for("author")
        .unwrap()
        .contains_key("name"));
}

#[test]
fn empty_attributes_and_absent_relationships() {
    let (_owner, schema) = blog_schema();

    let attributes = schema.attributes_definition_for("tag").unwrap();
    assert!(attributes.is_empty());
    assert!(Arc::ptr_eq(
        &attributes,
        &schema.attributes_definition_for("tag").unwrap()
    ));

    assert!(schema.relationships_definition_for("tag").unwrap().is_none());
    assert!(schema.relationships_definition_for("tag").unwrap().is_none());
}

#[test]
fn absent_relationships_are_cached() {
    let owner = InMemoryOwner::new();
    owner.register_model("tag", ModelClass::model()).unwrap();
    let schema = SchemaDefinitionService::new(owner.clone());

    assert!(schema.relationships_definition_for("tag").unwrap().is_none());

    // The cached `None` stands even if the owner forgets the type.
    owner.unregister(&QualifiedName::model("tag")).unwrap();
    assert!(schema.relationships_definition_for("tag").unwrap().is_none());
}

#[test]
fn mixin_fallback_matches_mixin_declaration() {
    let (_owner, schema) = blog_schema();

    let relationships = schema
        .relationships_definition_for("commentable")
        .unwrap()
        .unwrap();

    assert_eq!(
        relationships["comments"],
        commentable().relationships()["comments"]
    );
}

#[test]
fn flaggable_becomes_a_synthetic_model() {
    let (owner, schema) = blog_schema();

    let relationships = schema
        .relationships_definition_for("flaggable")
        .unwrap()
        .unwrap();
    assert!(relationships.contains_key("flag"));

    assert!(schema.does_type_exist("flaggable").unwrap());
    match owner.factory_for(&QualifiedName::model("flaggable")).unwrap() {
        Some(Factory::Model(class)) => {
            assert!(class.is_mixin());
            assert_eq!(class.mixin().unwrap().name(), "flaggable");
        }
        other => panic!("expected synthetic model, got {:?}", other),
    }

    let factory = schema.model_for("flaggable").unwrap();
    assert!(factory.is_mixin());
    assert_eq!(factory.model_name(), Some("flaggable"));
}

#[test]
fn does_type_exist_registers_mixin_models() {
    let (owner, schema) = blog_schema();
    assert!(!owner.is_registered(&QualifiedName::model("commentable")).unwrap());

    assert!(schema.does_type_exist("Commentable").unwrap());
    assert!(owner.is_registered(&QualifiedName::model("commentable")).unwrap());
}

#[test]
fn mixin_fallback_disabled_by_config() {
    let config = SchemaConfig::from_json(r#"{ "mixin_fallback": false }"#).unwrap();
    let schema = SchemaDefinitionService::with_config(blog_owner(), config);

    assert!(!schema.does_type_exist("flaggable").unwrap());
    assert!(matches!(
        schema.relationships_definition_for("flaggable"),
        Err(SchemaError::NoModelFound(_))
    ));
}

#[test]
fn base_model_declarations_flow_into_mixin_models() {
    let schema = SchemaDefinitionService::new(blog_owner()).with_base_model(
        ModelClass::model().attribute(AttributeMeta::new("createdAt", "date")),
    );

    let attributes = schema.attributes_definition_for("commentable").unwrap();
    assert_eq!(attributes.keys().collect::<Vec<_>>(), vec!["createdAt"]);
}

#[test]
fn identifiers_resolve_by_type() {
    let (_owner, schema) = blog_schema();
    let identifier = RecordIdentifier::new("post", "1");

    let by_identifier = schema.attributes_definition_for(&identifier).unwrap();
    let by_name = schema.attributes_definition_for("post").unwrap();
    assert!(Arc::ptr_eq(&by_identifier, &by_name));
}

#[test]
fn resolution_stamps_model_name() {
    let (_owner, schema) = blog_schema();
    let factory = schema.model_for("post").unwrap();
    assert!(!factory.is_mixin());
    assert_eq!(factory.model_name(), Some("post"));
}

#[test]
fn attributes_keep_declaration_order() {
    let owner = InMemoryOwner::new();
    let class = ModelClass::from_json(
        r#"{
            "attributes": [
                { "name": "zeta", "type": "string" },
                { "name": "alpha", "type": "number" },
                { "name": "mid" }
            ],
            "relationships": [
                { "name": "owner", "kind": "belongsTo", "type": "user" }
            ]
        }"#,
    )
    .unwrap();
    owner.register_model("widget", class).unwrap();
    let schema = SchemaDefinitionService::new(owner);

    let attributes = schema.attributes_definition_for("widget").unwrap();
    assert_eq!(
        attributes.keys().collect::<Vec<_>>(),
        vec!["zeta", "alpha", "mid"]
    );
    assert_eq!(
        schema.relationship_definition_for("widget", "owner").unwrap(),
        Some(RelationshipMeta::belongs_to("owner", "user"))
    );
}

#[test]
fn owner_failures_propagate() {
    struct BrokenOwner;

    impl Owner for BrokenOwner {
        fn factory_for(
            &self,
            name: &QualifiedName,
        ) -> record_schema::Result<Option<Factory>> {
            Err(SchemaError::Owner(format!("cannot resolve {}", name)))
        }

        fn register(&self, _name: QualifiedName, _factory: Factory) -> record_schema::Result<()> {
            Ok(())
        }
    }

    let schema = SchemaDefinitionService::new(BrokenOwner);
    let err = schema.does_type_exist("post").unwrap_err();
    assert_eq!(err.to_string(), "owner error: cannot resolve model:post");
}

#[test]
fn polymorphic_inverse_resolves_through_mixin() {
    let (owner, schema) = blog_schema();

    let inverse = schema.inverse_for("post", "comments").unwrap().unwrap();
    assert_eq!(inverse.type_name, "comment");
    assert_eq!(inverse.name, "owner");
    assert_eq!(inverse.kind, RelationshipKind::BelongsTo);

    // Matching went through the mixin, which is now registered as a model.
    assert!(owner
        .factory_for(&QualifiedName::model("commentable"))
        .unwrap()
        .is_some());
}
