mod config;
mod error;
mod identifier;
mod model;
mod name;
mod owner;
mod record_data;
mod schema;

pub use config::SchemaConfig;
pub use error::{Result, SchemaError};
pub use identifier::{RecordIdentifier, TypeRef};
pub use model::{lookup_model_factory, Mixin, ModelClass, ModelFactory, ModelFactoryCache};
pub use name::{normalize_model_name, Dasherize, NameNormalizer};
pub use owner::{Factory, FactoryKind, InMemoryOwner, Owner, QualifiedName};
pub use record_data::{
    implicit_relationship_key, HasRelationshipState, InMemoryRecordDataStore, NoRecordData,
    Record, RecordData, RecordDataAccessor, RecordDataProvider, RecordInstance, RelationshipState,
    RelationshipStates,
};
pub use schema::{
    AttributeMeta, AttributesSchema, InverseDefinition, RelationshipKind, RelationshipMeta,
    RelationshipOptions, RelationshipsSchema, SchemaDefinitionService,
};

// Schema maps are IndexMaps
pub use indexmap::IndexMap;
