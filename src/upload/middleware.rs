use super::{
    arguments::Arguments,
    introspect::ResolveInfo,
    processor::{
        extract_upload_arguments, merge_arguments, normalise_arguments, process_upload_argument,
        UploadHandler,
    },
};
use crate::error::Result;
use futures_util::future::try_join_all;
use std::future::Future;
use tracing::debug;

/// Options for the [upload] middleware.
#[derive(Debug, Clone)]
pub struct UploadConfig<H> {
    /// Called with every file passed to an `Upload` argument.
    pub upload_handler: H,
}

/// Creates a middleware that processes the files passed to a resolver before calling it.
///
/// ```
/// use graphql_upload::{error::Result, upload::*};
///
/// async fn store(upload: FileUpload) -> Result<String> {
///     Ok(format!("uploads/{}", upload.filename))
/// }
///
/// let middleware = upload(UploadConfig { upload_handler: store });
/// ```
pub fn upload<H: UploadHandler>(config: UploadConfig<H>) -> UploadMiddleware<H> {
    UploadMiddleware {
        upload_handler: config.upload_handler,
    }
}

#[derive(Debug, Clone)]
pub struct UploadMiddleware<H> {
    upload_handler: H,
}

impl<H: UploadHandler> UploadMiddleware<H> {
    /// Runs a resolver, passing it `args` with every `Upload` argument replaced by the handler's
    /// output.
    ///
    /// All files are handled concurrently. If any file or handler fails, the resolver isn't
    /// called and the error is returned instead. The resolver's own output is returned as is.
    pub async fn resolve<'a, P, C, R, N, Fut>(
        &self,
        next: N,
        parent: P,
        args: Arguments<H::Output>,
        ctx: C,
        info: ResolveInfo<'a>,
    ) -> Result<R>
    where
        N: FnOnce(P, Arguments<H::Output>, C, ResolveInfo<'a>) -> Fut,
        Fut: Future<Output = R>,
    {
        let mut args = args;
        let files = extract_upload_arguments(&info, &mut args)?;
        let uploads: Vec<_> = files
            .into_iter()
            .filter_map(|file| process_upload_argument(&self.upload_handler, file))
            .collect();

        if !uploads.is_empty() {
            debug!(
                "Processing {} upload argument(s) for `{}.{}`",
                uploads.len(),
                info.parent_type,
                info.field_name
            );
        }

        let uploaded = try_join_all(uploads).await?;
        let args = merge_arguments(args, normalise_arguments(uploaded));

        Ok(next(parent, args, ctx, info).await)
    }
}
