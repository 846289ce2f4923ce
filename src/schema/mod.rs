//! # Schema Metadata
//!
//! The upload middleware needs to know which arguments a resolver's field declares and what
//! types they're declared with. The `graphql_upload::schema` module contains a [Schema] model
//! that holds exactly this information, and a reader that builds it from type definitions
//! written in the GraphQL Schema Definition Language.
//!
//! All schema types are allocated into a [SchemaContext](crate::context::SchemaContext)'s arena
//! and are immutable once read:
//!
//! ```
//! use graphql_upload::{context::SchemaContext, schema::*};
//!
//! let ctx = SchemaContext::new();
//! let schema = Schema::parse(&ctx, "
//!     scalar Upload
//!     type Mutation { test(nonUpload: String!, upload: Upload!): Boolean }
//! ").unwrap();
//!
//! let field = schema.get_field("Mutation", "test").unwrap();
//! assert_eq!(field.get_argument("upload").unwrap().input_type.named_type(), "Upload");
//! ```
//!
//! [More information on the Schema struct.](Schema)

#[allow(clippy::module_inception)]
pub mod schema;
pub mod sdl;

pub use schema::*;
pub use sdl::parser::ParseSdl;
