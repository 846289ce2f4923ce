//! `graphql_upload`
//! =========
//!
//! _Resolve GraphQL file uploads before they reach your resolvers._
//!
//! Files sent along with a GraphQL multipart request are passed to resolvers as arguments of the
//! `Upload` scalar. Every resolver accepting files would have to wait for them and store them
//! somewhere before it can do its actual work. The **`graphql_upload`** library moves this into
//! a middleware that runs in front of resolvers:
//!
//! - It finds the arguments that a field declares as `Upload`, `[Upload!]!` and the like
//! - It runs every file passed to them through a single upload handler, concurrently
//! - It calls the resolver with the handler's results in place of the files
//!
//! To know which arguments are uploads, the middleware needs some metadata about the schema.
//! The crate ships a small schema model and a reader for type definitions written in the
//! GraphQL Schema Definition Language, which is kept in an arena for as long as the server runs.
//!
//! [A good place to start learning more about this crate is the `upload` module...](upload)

pub mod context;
pub mod error;
pub mod schema;
pub mod upload;

pub use bumpalo;
