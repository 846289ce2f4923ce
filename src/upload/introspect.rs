use super::arguments::{ArgumentValue, Arguments};
use crate::error::Result;
use crate::schema::{Schema, SchemaField, SchemaInputField, TypeRef};

/// Name of the scalar that file arguments are declared with.
pub const UPLOAD_SCALAR: &str = "Upload";

/// Describes the field whose resolver is currently being executed.
#[derive(Debug, Clone, Copy)]
pub struct ResolveInfo<'a> {
    pub schema: &'a Schema<'a>,
    pub parent_type: &'a str,
    pub field_name: &'a str,
}

impl<'a> ResolveInfo<'a> {
    #[inline]
    pub fn new(schema: &'a Schema<'a>, parent_type: &'a str, field_name: &'a str) -> Self {
        ResolveInfo {
            schema,
            parent_type,
            field_name,
        }
    }

    /// Looks up the definition of the field being resolved.
    #[inline]
    pub fn field(&self) -> Result<&'a SchemaField<'a>> {
        self.schema.get_field(self.parent_type, self.field_name)
    }
}

/// Returns the schema field of the current resolver.
pub fn get_resolver_field<'a>(info: &ResolveInfo<'a>) -> Result<&'a SchemaField<'a>> {
    info.field()
}

/// Returns the argument declarations of a field in the order they were declared.
#[inline]
pub fn get_field_arguments<'a>(field: &'a SchemaField<'a>) -> &'a [SchemaInputField<'a>] {
    &field.arguments
}

/// Checks whether a declared type is the upload scalar, regardless of any list and non-null
/// wrappers around it.
#[inline]
pub fn is_upload_type(type_ref: &TypeRef) -> bool {
    type_ref.named_type() == UPLOAD_SCALAR
}

/// Checks whether an argument is declared with the named type `type_name`, regardless of any list
/// and non-null wrappers around it.
#[inline]
pub fn is_argument_type(type_name: &str, argument: &SchemaInputField) -> bool {
    argument.input_type.named_type() == type_name
}

/// Calls `f` with every argument declaration of the current resolver's field and the value it was
/// passed, if any, and collects the results that aren't `None`.
///
/// Results keep the order of the field's argument declarations.
pub fn filter_map_field_arguments<'a, T, U, F>(
    mut f: F,
    info: &ResolveInfo<'a>,
    args: &Arguments<T>,
) -> Result<Vec<U>>
where
    F: FnMut(&'a SchemaInputField<'a>, Option<&ArgumentValue<T>>) -> Option<U>,
{
    let field = get_resolver_field(info)?;
    Ok(get_field_arguments(field)
        .iter()
        .filter_map(|definition| f(definition, args.get(definition.name)))
        .collect())
}
