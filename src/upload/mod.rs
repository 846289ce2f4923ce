//! # Processing Upload Arguments
//!
//! Files sent with a GraphQL multipart request arrive at resolvers as arguments declared with the
//! `Upload` scalar. The host framework only hands out [DeferredUpload]s for them, so every
//! resolver accepting files would otherwise have to wait for and store them by itself.
//!
//! The [upload] middleware sits in front of a resolver and does this for all of them:
//!
//! 1. It looks up the resolver's field in the [Schema](crate::schema::Schema) and finds the
//!    arguments whose named type is `Upload`, e.g. `file: Upload!` or `files: [Upload!]!`.
//! 2. It awaits every file passed to those arguments and runs it through the configured
//!    [UploadHandler], concurrently.
//! 3. It calls the resolver with the handler's outputs in place of the files. All other
//!    arguments are passed on untouched.
//!
//! ```
//! use graphql_upload::{context::SchemaContext, error::Result, schema::*, upload::*};
//! use futures_util::io::Cursor;
//!
//! async fn store(upload: FileUpload) -> Result<String> {
//!     Ok(format!("uploads/{}", upload.filename))
//! }
//!
//! async fn run() -> Result<()> {
//!     let ctx = SchemaContext::new();
//!     let schema = Schema::parse(&ctx, "
//!         scalar Upload
//!         type Mutation { avatar(file: Upload!): String }
//!     ")?;
//!
//!     let mut args = Arguments::new();
//!     let file = FileUpload::new(Cursor::new(b"...".to_vec()), "me.png", "image/png", "7bit");
//!     args.insert("file", DeferredUpload::ready(file));
//!
//!     let middleware = upload(UploadConfig { upload_handler: store });
//!     let info = ResolveInfo::new(schema, "Mutation", "avatar");
//!     let path = middleware
//!         .resolve(
//!             |_parent: (), args: Arguments<String>, _ctx: (), _info| async move {
//!                 args.get("file").and_then(|file| file.processed()).cloned()
//!             },
//!             (),
//!             args,
//!             (),
//!             info,
//!         )
//!         .await?;
//!
//!     assert_eq!(path.as_deref(), Some("uploads/me.png"));
//!     Ok(())
//! }
//! ```

mod arguments;
mod file;
mod introspect;
mod middleware;
mod processor;


pub use arguments::{ArgumentValue, Arguments};
pub use file::{DeferredUpload, FileUpload};
pub use introspect::{
    filter_map_field_arguments, get_field_arguments, get_resolver_field, is_argument_type,
    is_upload_type, ResolveInfo, UPLOAD_SCALAR,
};
pub use middleware::{upload, UploadConfig, UploadMiddleware};
pub use processor::{
    extract_upload_arguments, merge_arguments, normalise_arguments, process_upload_argument,
    ProcessedUpload, ProcessedUploadArgument, UploadArgument, UploadArgumentPair, UploadHandler,
};
