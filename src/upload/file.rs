use crate::error::Result;
use futures_util::{future::BoxFuture, io::AsyncRead, FutureExt};
use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

/// A file that was sent along with a GraphQL request.
///
/// The metadata is read from the multipart request by the host framework. The contents are
/// exposed as a stream, which is moved into the upload handler and closed once it's dropped.
pub struct FileUpload {
    pub stream: Pin<Box<dyn AsyncRead + Send>>,
    pub filename: String,
    pub mimetype: String,
    pub encoding: String,
}

impl FileUpload {
    pub fn new<R>(
        stream: R,
        filename: impl Into<String>,
        mimetype: impl Into<String>,
        encoding: impl Into<String>,
    ) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        FileUpload {
            stream: Box::pin(stream),
            filename: filename.into(),
            mimetype: mimetype.into(),
            encoding: encoding.into(),
        }
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("filename", &self.filename)
            .field("mimetype", &self.mimetype)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

/// An upload that isn't available yet.
///
/// The host framework hands these out for `Upload` arguments before the multipart body has been
/// read to the respective file. Awaiting it yields the [FileUpload] or the error that prevented
/// the file from being received.
pub struct DeferredUpload(BoxFuture<'static, Result<FileUpload>>);

impl DeferredUpload {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<FileUpload>> + Send + 'static,
    {
        DeferredUpload(future.boxed())
    }

    /// Wraps a file that has already been received.
    pub fn ready(upload: FileUpload) -> Self {
        Self::new(futures_util::future::ready(Ok(upload)))
    }
}

impl Future for DeferredUpload {
    type Output = Result<FileUpload>;

    #[inline]
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.0.poll_unpin(cx)
    }
}

impl fmt::Debug for DeferredUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeferredUpload")
    }
}
