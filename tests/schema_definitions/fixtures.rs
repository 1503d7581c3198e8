//! Blog models shared by the schema definition tests.

use record_schema::{
    AttributeMeta, InMemoryOwner, Mixin, ModelClass, RelationshipMeta, SchemaDefinitionService,
};

pub fn post() -> ModelClass {
    ModelClass::model()
        .attribute(AttributeMeta::new("title", "string"))
        .relationship(RelationshipMeta::has_many("comments", "comment"))
}

pub fn comment() -> ModelClass {
    ModelClass::model()
        .attribute(AttributeMeta::new("body", "string"))
        .relationship(RelationshipMeta::belongs_to("owner", "commentable").polymorphic())
}

pub fn tag() -> ModelClass {
    ModelClass::model()
}

pub fn commentable() -> Mixin {
    Mixin::new("commentable").relationship(RelationshipMeta::has_many("comments", "comment"))
}

pub fn flaggable() -> Mixin {
    Mixin::new("flaggable").relationship(RelationshipMeta::has_many("flag", "flag"))
}

/// Owner with `post`, `comment`, `tag` models and the `commentable` and
/// `flaggable` mixins registered.
pub fn blog_owner() -> InMemoryOwner {
    let owner = InMemoryOwner::new();
    owner.register_model("post", post()).unwrap();
    owner.register_model("comment", comment()).unwrap();
    owner.register_model("tag", tag()).unwrap();
    owner.register_mixin("commentable", commentable()).unwrap();
    owner.register_mixin("flaggable", flaggable()).unwrap();
    owner
}

pub fn blog_schema() -> (InMemoryOwner, SchemaDefinitionService<InMemoryOwner>) {
    let owner = blog_owner();
    let schema = SchemaDefinitionService::new(owner.clone());
    (owner, schema)
}
