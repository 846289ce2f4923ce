use super::{
    arguments::{ArgumentValue, Arguments},
    file::{DeferredUpload, FileUpload},
    introspect::{filter_map_field_arguments, is_upload_type, ResolveInfo},
};
use crate::error::{Error, ErrorType, Result};
use futures_util::future::{try_join_all, Either};
use serde_json::Value;
use std::future::Future;
use tracing::trace;

/// Turns received files into the values a resolver should see in their place, e.g. a reference
/// to where the file has been stored.
///
/// Any `Fn(FileUpload) -> impl Future<Output = Result<T>>` is an upload handler.
pub trait UploadHandler {
    type Output;
    type Future: Future<Output = Result<Self::Output>>;

    fn handle(&self, upload: FileUpload) -> Self::Future;
}

impl<F, Fut, T> UploadHandler for F
where
    F: Fn(FileUpload) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    type Output = T;
    type Future = Fut;

    #[inline]
    fn handle(&self, upload: FileUpload) -> Fut {
        self(upload)
    }
}

/// The runtime value of an argument that's declared as an upload.
#[derive(Debug)]
pub enum UploadArgument {
    Single(DeferredUpload),
    List(Vec<DeferredUpload>),
    /// The argument wasn't passed or was `null`
    Absent,
}

impl UploadArgument {
    fn from_value<T>(name: &str, value: ArgumentValue<T>) -> Result<Self> {
        match value {
            ArgumentValue::Upload(upload) => Ok(UploadArgument::Single(upload)),
            ArgumentValue::List(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    ArgumentValue::Upload(upload) => Some(Ok(upload)),
                    // Files can only be handled one list level deep
                    ArgumentValue::List(_) => Some(Err(Error::new(
                        format!("Argument `{}` was passed a nested list of uploads.", name),
                        Some(ErrorType::Upload),
                    ))),
                    _ => None,
                })
                .collect::<Result<_>>()
                .map(UploadArgument::List),
            // A JSON list can't hold any uploads
            ArgumentValue::Value(Value::Array(_)) => Ok(UploadArgument::List(Vec::new())),
            other => Err(Error::new(
                format!(
                    "Argument `{}` is declared as `Upload` but was passed {}.",
                    name,
                    other.describe()
                ),
                Some(ErrorType::Upload),
            )),
        }
    }
}

/// An upload argument's name paired with its runtime value.
#[derive(Debug)]
pub struct UploadArgumentPair {
    pub argument_name: String,
    pub upload: UploadArgument,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ProcessedUpload<T> {
    Single(T),
    List(Vec<T>),
}

/// An upload argument's name paired with the handler's output for its files.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ProcessedUploadArgument<T> {
    pub argument_name: String,
    pub upload: ProcessedUpload<T>,
}

/// Takes the values of all arguments that the current field declares as uploads out of `args`.
///
/// Arguments that weren't passed or are `null` are paired with [`UploadArgument::Absent`] and a
/// `null` stays in the bag. Elements of a list that aren't uploads are dropped, while a list nested
/// in a list is an error. Any other value passed to an upload argument is an error.
pub fn extract_upload_arguments<T>(
    info: &ResolveInfo<'_>,
    args: &mut Arguments<T>,
) -> Result<Vec<UploadArgumentPair>> {
    let names = filter_map_field_arguments(
        |definition, _| is_upload_type(definition.input_type).then(|| definition.name),
        info,
        args,
    )?;

    names
        .into_iter()
        .map(|name| {
            let upload = match args.remove(name) {
                None => UploadArgument::Absent,
                Some(value) if value.is_null() => {
                    args.insert(name, value);
                    UploadArgument::Absent
                }
                Some(value) => UploadArgument::from_value(name, value)?,
            };

            if let UploadArgument::Absent = upload {
                trace!(
                    "No upload passed to `{}.{}({})`",
                    info.parent_type,
                    info.field_name,
                    name
                );
            }

            Ok(UploadArgumentPair {
                argument_name: name.to_string(),
                upload,
            })
        })
        .collect()
}

/// Resolves the files of one upload argument and runs each of them through `handler`.
///
/// All files of a list are handled concurrently and their outputs keep the list's order. The
/// first failure fails the whole argument. Returns `None` for an absent argument, in which case
/// the handler isn't called.
pub fn process_upload_argument<'h, H: UploadHandler>(
    handler: &'h H,
    pair: UploadArgumentPair,
) -> Option<impl Future<Output = Result<ProcessedUploadArgument<H::Output>>> + 'h> {
    let UploadArgumentPair {
        argument_name,
        upload,
    } = pair;

    match upload {
        UploadArgument::List(uploads) => Some(Either::Left(async move {
            let processed = try_join_all(
                uploads
                    .into_iter()
                    .map(move |upload| async move { handler.handle(upload.await?).await }),
            )
            .await?;

            Ok::<_, Error>(ProcessedUploadArgument {
                argument_name,
                upload: ProcessedUpload::List(processed),
            })
        })),
        UploadArgument::Single(upload) => Some(Either::Right(async move {
            let processed = handler.handle(upload.await?).await?;

            Ok::<_, Error>(ProcessedUploadArgument {
                argument_name,
                upload: ProcessedUpload::Single(processed),
            })
        })),
        UploadArgument::Absent => None,
    }
}

/// Collects processed upload arguments into an argument bag.
pub fn normalise_arguments<T>(uploaded: Vec<ProcessedUploadArgument<T>>) -> Arguments<T> {
    uploaded
        .into_iter()
        .map(|ProcessedUploadArgument { argument_name, upload }| {
            let value = match upload {
                ProcessedUpload::Single(processed) => ArgumentValue::Processed(processed),
                ProcessedUpload::List(processed) => ArgumentValue::List(
                    processed.into_iter().map(ArgumentValue::Processed).collect(),
                ),
            };
            (argument_name, value)
        })
        .collect()
}

/// Returns `args` with the value of every argument in `uploaded` replaced.
pub fn merge_arguments<T>(args: Arguments<T>, uploaded: Arguments<T>) -> Arguments<T> {
    let mut merged = args;
    merged.extend(uploaded);
    merged
}
