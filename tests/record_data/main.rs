//! Integration tests for RecordDataAccessor and implicit relationship state.

use record_schema::{
    implicit_relationship_key, HasRelationshipState, InMemoryOwner, InMemoryRecordDataStore,
    ModelClass, NoRecordData, Record, RecordData, RecordDataAccessor, RecordIdentifier,
    RelationshipMeta, RelationshipState, SchemaDefinitionService,
};

fn blog_schema() -> SchemaDefinitionService<InMemoryOwner> {
    let owner = InMemoryOwner::new();
    owner
        .register_model(
            "post",
            ModelClass::model()
                .relationship(RelationshipMeta::has_many("comments", "comment"))
                .relationship(RelationshipMeta::has_many("tags", "tag")),
        )
        .unwrap();
    owner
        .register_model(
            "comment",
            ModelClass::model().relationship(RelationshipMeta::belongs_to("post", "post")),
        )
        .unwrap();
    owner.register_model("tag", ModelClass::model()).unwrap();
    SchemaDefinitionService::new(owner)
}

#[test]
fn accessor_returns_record_data_state_by_handle() {
    let schema = blog_schema();
    let store = InMemoryRecordDataStore::new();
    let post_id = RecordIdentifier::new("post", "1");
    store
        .insert(RecordData::from_schema(post_id.clone(), &schema).unwrap())
        .unwrap();
    let post = Record::new(post_id);
    let accessor = RecordDataAccessor::new(store.clone());

    // Mutations through the returned handle land on the stored record data.
    accessor
        .relationships_for(&post)
        .unwrap()
        .update("comments", |state| {
            state.add_member(RecordIdentifier::new("comment", "10"))
        })
        .unwrap();

    let comments = accessor
        .relationship_state_for(&post, "comments")
        .unwrap()
        .unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments.inverse_key(), Some("post"));

    // The instance's own container was never touched.
    assert!(post.relationships().is_empty().unwrap());
}

#[test]
fn instance_without_record_data_uses_its_own_state() {
    let post = Record::new(RecordIdentifier::new("post", "1"));
    post.relationships()
        .insert(RelationshipState::for_definition(
            &RelationshipMeta::has_many("comments", "comment"),
            None,
        ))
        .unwrap();
    let accessor = RecordDataAccessor::new(InMemoryRecordDataStore::new());

    let relationships = accessor.relationships_for(&post).unwrap();
    assert!(relationships.ptr_eq(post.relationships()));
    assert!(accessor
        .relationship_state_for(&post, "comments")
        .unwrap()
        .is_some());
    assert!(accessor
        .relationship_state_for(&post, "missing")
        .unwrap()
        .is_none());
}

#[test]
fn record_data_can_be_its_own_instance() {
    let record_data = RecordData::new(RecordIdentifier::new("tag", "1"));
    let accessor = RecordDataAccessor::new(NoRecordData);

    assert!(accessor
        .implicit_relationships_for(&record_data)
        .unwrap()
        .ptr_eq(record_data.implicit_relationships()));
}

#[test]
fn undeclared_inverse_goes_to_implicit_namespace() {
    let schema = blog_schema();
    let store = InMemoryRecordDataStore::new();
    let post_id = RecordIdentifier::new("post", "1");
    let tag_id = RecordIdentifier::new("tag", "7");
    let post = store
        .insert(RecordData::from_schema(post_id.clone(), &schema).unwrap())
        .unwrap();
    let tag = store
        .insert(RecordData::from_schema(tag_id.clone(), &schema).unwrap())
        .unwrap();

    // post.tags has no inverse on tag, so the tag tracks it implicitly.
    assert!(schema.inverse_for("post", "tags").unwrap().is_none());
    post.relationships()
        .update("tags", |state| state.add_member(tag_id.clone()))
        .unwrap();
    tag.add_implicit_inverse(&post_id, "tags").unwrap();

    let accessor = RecordDataAccessor::new(store);
    let tag_instance = Record::new(tag_id);
    let key = implicit_relationship_key("post", "tags");

    let implicit = accessor
        .implicit_relationship_state_for(&tag_instance, &key)
        .unwrap()
        .unwrap();
    assert!(implicit.is_implicit());
    assert!(implicit.contains(&post_id));

    // Declared namespace stays separate.
    assert!(accessor
        .relationship_state_for(&tag_instance, &key)
        .unwrap()
        .is_none());
    assert!(accessor
        .relationships_for(&tag_instance)
        .unwrap()
        .is_empty()
        .unwrap());
}

#[test]
fn record_data_seeds_before_related_type_is_registered() {
    let owner = InMemoryOwner::new();
    owner
        .register_model(
            "post",
            ModelClass::model().relationship(RelationshipMeta::has_many("comments", "comment")),
        )
        .unwrap();
    let schema = SchemaDefinitionService::new(owner);
    let post_id = RecordIdentifier::new("post", "1");

    assert!(schema.inverse_for("post", "comments").unwrap().is_none());
    let post = RecordData::from_schema(post_id.clone(), &schema).unwrap();
    let comments = post.relationships().get("comments").unwrap().unwrap();
    assert_eq!(comments.inverse_key(), None);

    // The comment side records the membership implicitly.
    let comment = RecordData::new(RecordIdentifier::new("comment", "10"));
    comment.add_implicit_inverse(&post_id, "comments").unwrap();
    let accessor = RecordDataAccessor::new(NoRecordData);
    assert!(accessor
        .implicit_relationship_state_for(&comment, &implicit_relationship_key("post", "comments"))
        .unwrap()
        .unwrap()
        .contains(&post_id));
}
