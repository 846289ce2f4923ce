use crate::context::{DefaultIn, SchemaContext};
use crate::error::{Error, ErrorType, Result};
use bumpalo::collections::Vec;
use bumpalo::Bump;
use hashbrown::hash_map::DefaultHashBuilder;
use hashbrown::{HashMap, HashSet};

/// Schema Definition
///
/// A schema is created from root types for each kind of operation and is then consulted by the
/// upload middleware to find out which arguments a resolver's field declares. In this library the
/// schema is never executable and serves only for metadata and type information.
/// [Reference](https://spec.graphql.org/October2021/#sec-Schema)
#[derive(Debug, Clone, PartialEq)]
pub struct Schema<'a> {
    pub(crate) query_type: Option<&'a SchemaObject<'a>>,
    pub(crate) mutation_type: Option<&'a SchemaObject<'a>>,
    pub(crate) subscription_type: Option<&'a SchemaObject<'a>>,
    pub(crate) types: HashMap<&'a str, &'a SchemaType<'a>, DefaultHashBuilder, &'a Bump>,
}

impl<'a> DefaultIn<'a> for Schema<'a> {
    fn default_in(arena: &'a Bump) -> Self {
        Schema {
            query_type: None,
            mutation_type: None,
            subscription_type: None,
            types: HashMap::new_in(arena),
        }
    }
}

impl<'a> Schema<'a> {
    /// Returns whether the schema is a default, empty schema
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.query_type.is_none()
            && self.mutation_type.is_none()
            && self.subscription_type.is_none()
    }

    /// Returns the root object type for query operations
    #[inline]
    pub fn query_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.query_type
    }

    /// Returns the root object type for mutation operations
    #[inline]
    pub fn mutation_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.mutation_type
    }

    /// Returns the root object type for subscription operations
    #[inline]
    pub fn subscription_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.subscription_type
    }

    /// Retrieves a kind by name from known schema types.
    #[inline]
    pub fn get_type(&self, name: &str) -> Option<&'a SchemaType<'a>> {
        self.types.get(name).copied()
    }

    /// Adds a named type to the schema, replacing any previous type of the same name.
    pub fn add_type(&mut self, ctx: &'a SchemaContext, schema_type: SchemaType<'a>) {
        self.types.insert(schema_type.name(), ctx.alloc(schema_type));
    }

    /// Finds the field definition of `field_name` on the object or interface type `parent_type`.
    ///
    /// A resolver can only ever run for a field the schema declares, so a failed lookup means the
    /// schema and the resolvers are out of sync.
    pub fn get_field(&self, parent_type: &str, field_name: &str) -> Result<&'a SchemaField<'a>> {
        let fields = match self.get_type(parent_type) {
            Some(SchemaType::Object(object)) => &object.fields,
            Some(SchemaType::Interface(interface)) => &interface.fields,
            Some(other) => {
                return Err(Error::new(
                    format!("Type `{}` is not an object or interface type.", other.name()),
                    Some(ErrorType::Schema),
                ))
            }
            None => {
                return Err(Error::new(
                    format!("Type `{}` does not exist in the schema.", parent_type),
                    Some(ErrorType::Schema),
                ))
            }
        };

        fields.get(field_name).copied().ok_or_else(|| {
            Error::new(
                format!("Field `{}` does not exist on type `{}`.", field_name, parent_type),
                Some(ErrorType::Schema),
            )
        })
    }
}

/// Generic trait for any schema type that implements fields
pub trait SchemaFields<'a>: Sized {
    /// Add a new [SchemaField] to the list of fields
    fn add_field(&mut self, ctx: &'a SchemaContext, field: SchemaField<'a>);

    /// Get a [Map] of all fields
    fn get_fields(&self) -> &HashMap<&'a str, &'a SchemaField<'a>, DefaultHashBuilder, &'a Bump>;

    /// Get a known field by name
    fn get_field(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        self.get_fields().get(name).copied()
    }
}

/// Generic trait for any schema type that implements interfaces
pub trait SchemaInterfaces<'a>: Sized {
    /// Add a new [SchemaInterface] to the list of implemented interfaces
    fn add_interface(&mut self, ctx: &'a SchemaContext, interface: &'a str);

    /// Get list of implemented [SchemaInterface]s
    fn get_interfaces(&self) -> &Vec<'a, &'a str>;

    /// Checks whether the type implements an interface of the given name
    #[inline]
    fn implements_interface(&self, interface: &str) -> bool {
        self.get_interfaces().iter().any(|name| *name == interface)
    }
}

/// An Object type definition.
///
/// Most types in GraphQL are objects and define a set of fields and the interfaces they implement.
/// [Reference](https://spec.graphql.org/October2021/#sec-Objects)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaObject<'a> {
    pub name: &'a str,
    pub(crate) fields: HashMap<&'a str, &'a SchemaField<'a>, DefaultHashBuilder, &'a Bump>,
    pub(crate) interfaces: Vec<'a, &'a str>,
}

impl<'a> SchemaObject<'a> {
    #[inline]
    pub fn new(ctx: &'a SchemaContext, name: &'a str) -> Self {
        SchemaObject {
            name,
            fields: HashMap::new_in(&ctx.arena),
            interfaces: Vec::new_in(&ctx.arena),
        }
    }
}

impl<'a> SchemaFields<'a> for SchemaObject<'a> {
    fn add_field(&mut self, ctx: &'a SchemaContext, field: SchemaField<'a>) {
        self.fields.insert(field.name, ctx.alloc(field));
    }

    #[inline]
    fn get_fields(&self) -> &HashMap<&'a str, &'a SchemaField<'a>, DefaultHashBuilder, &'a Bump> {
        &self.fields
    }
}

impl<'a> SchemaInterfaces<'a> for SchemaObject<'a> {
    fn add_interface(&mut self, _ctx: &'a SchemaContext, interface: &'a str) {
        self.interfaces.push(interface);
    }

    #[inline]
    fn get_interfaces(&self) -> &Vec<'a, &'a str> {
        &self.interfaces
    }
}

/// An Interface type definition.
///
/// Resolvers may be attached to interface fields as well, which is why they're searched for
/// field definitions just like objects.
/// [Reference](https://spec.graphql.org/October2021/#sec-Interfaces)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaInterface<'a> {
    pub name: &'a str,
    pub(crate) fields: HashMap<&'a str, &'a SchemaField<'a>, DefaultHashBuilder, &'a Bump>,
    pub(crate) interfaces: Vec<'a, &'a str>,
}

impl<'a> SchemaInterface<'a> {
    #[inline]
    pub fn new(ctx: &'a SchemaContext, name: &'a str) -> Self {
        SchemaInterface {
            name,
            fields: HashMap::new_in(&ctx.arena),
            interfaces: Vec::new_in(&ctx.arena),
        }
    }
}

impl<'a> SchemaFields<'a> for SchemaInterface<'a> {
    fn add_field(&mut self, ctx: &'a SchemaContext, field: SchemaField<'a>) {
        self.fields.insert(field.name, ctx.alloc(field));
    }

    #[inline]
    fn get_fields(&self) -> &HashMap<&'a str, &'a SchemaField<'a>, DefaultHashBuilder, &'a Bump> {
        &self.fields
    }
}

impl<'a> SchemaInterfaces<'a> for SchemaInterface<'a> {
    fn add_interface(&mut self, _ctx: &'a SchemaContext, interface: &'a str) {
        self.interfaces.push(interface);
    }

    #[inline]
    fn get_interfaces(&self) -> &Vec<'a, &'a str> {
        &self.interfaces
    }
}

/// An object Field type definition.
///
/// A field is like a function that given its arguments as input values produces an output value.
/// Arguments are kept in the order they're declared in.
/// [Reference](https://spec.graphql.org/October2021/#FieldsDefinition)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField<'a> {
    pub name: &'a str,
    pub arguments: Vec<'a, SchemaInputField<'a>>,
    pub output_type: &'a TypeRef<'a>,
}

impl<'a> SchemaField<'a> {
    #[inline]
    pub fn new(ctx: &'a SchemaContext, name: &'a str, output_type: &'a TypeRef<'a>) -> Self {
        SchemaField {
            name,
            arguments: Vec::new_in(&ctx.arena),
            output_type,
        }
    }

    /// Adds an argument declaration. A redeclared name replaces the earlier declaration in place.
    pub fn add_argument(&mut self, _ctx: &'a SchemaContext, arg: SchemaInputField<'a>) {
        match self.arguments.iter_mut().find(|existing| existing.name == arg.name) {
            Some(existing) => *existing = arg,
            None => self.arguments.push(arg),
        }
    }

    #[inline]
    pub fn get_argument(&self, name: &str) -> Option<&SchemaInputField<'a>> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

/// A Union type definition.
///
/// A union contains a list of possible types that can be returned in its stead when its defined as
/// an output type.
/// [Reference](https://spec.graphql.org/October2021/#sec-Unions)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaUnion<'a> {
    pub name: &'a str,
    pub(crate) possible_types: Vec<'a, &'a str>,
}

impl<'a> SchemaUnion<'a> {
    #[inline]
    pub fn new(ctx: &'a SchemaContext, name: &'a str) -> Self {
        SchemaUnion {
            name,
            possible_types: Vec::new_in(&ctx.arena),
        }
    }

    pub fn add_possible_type(&mut self, _ctx: &'a SchemaContext, object: &'a str) {
        self.possible_types.push(object);
    }

    #[inline]
    pub fn get_possible_types(&self) -> &Vec<'a, &'a str> {
        &self.possible_types
    }
}

/// A Scalar type definition.
///
/// Scalars represent primitive leaf values. The `Upload` scalar is a scalar like any other as far
/// as the schema is concerned; only the upload middleware gives it meaning.
/// [Reference](https://spec.graphql.org/October2021/#sec-Scalars)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaScalar<'a> {
    pub name: &'a str,
}

impl<'a> SchemaScalar<'a> {
    #[inline]
    pub fn new(name: &'a str) -> Self {
        SchemaScalar { name }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct SchemaEnum<'a> {
    pub name: &'a str,
    pub values: HashSet<&'a str, DefaultHashBuilder, &'a Bump>,
}

impl<'a> SchemaEnum<'a> {
    #[inline]
    pub fn new(ctx: &'a SchemaContext, name: &'a str) -> Self {
        SchemaEnum {
            name,
            values: HashSet::new_in(&ctx.arena),
        }
    }

    pub fn add_value(&mut self, _ctx: &'a SchemaContext, value: &'a str) {
        self.values.insert(value);
    }
}

/// An Input Object type definition.
///
/// Inputs, such as arguments, may sometimes be nested and accept objects that must adhere to the
/// shape of an Input Object definition.
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Objects)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaInputObject<'a> {
    pub name: &'a str,
    pub fields: HashMap<&'a str, SchemaInputField<'a>, DefaultHashBuilder, &'a Bump>,
}

impl<'a> SchemaInputObject<'a> {
    #[inline]
    pub fn new(ctx: &'a SchemaContext, name: &'a str) -> Self {
        SchemaInputObject {
            name,
            fields: HashMap::new_in(&ctx.arena),
        }
    }

    pub fn add_field(&mut self, _ctx: &'a SchemaContext, field: SchemaInputField<'a>) {
        self.fields.insert(field.name, field);
    }
}

/// An argument or input object field declaration: a name and the type it accepts.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SchemaInputField<'a> {
    pub name: &'a str,
    pub input_type: &'a TypeRef<'a>,
}

impl<'a> SchemaInputField<'a> {
    #[inline]
    pub fn new(name: &'a str, input_type: &'a TypeRef<'a>) -> Self {
        SchemaInputField { name, input_type }
    }
}

/// A named type enum that represents all possible GraphQL definition types.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Types)
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SchemaType<'a> {
    InputObject(&'a SchemaInputObject<'a>),
    Object(&'a SchemaObject<'a>),
    Union(&'a SchemaUnion<'a>),
    Interface(&'a SchemaInterface<'a>),
    Scalar(&'a SchemaScalar<'a>),
    Enum(&'a SchemaEnum<'a>),
}

impl<'a> SchemaType<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            SchemaType::InputObject(x) => x.name,
            SchemaType::Object(x) => x.name,
            SchemaType::Union(x) => x.name,
            SchemaType::Interface(x) => x.name,
            SchemaType::Scalar(x) => x.name,
            SchemaType::Enum(x) => x.name,
        }
    }

    pub fn object(&self) -> Option<&'a SchemaObject<'a>> {
        match self {
            SchemaType::Object(x) => Some(x),
            _ => None,
        }
    }

    pub fn interface(&self) -> Option<&'a SchemaInterface<'a>> {
        match self {
            SchemaType::Interface(x) => Some(x),
            _ => None,
        }
    }

    pub fn scalar(&self) -> Option<&'a SchemaScalar<'a>> {
        match self {
            SchemaType::Scalar(x) => Some(x),
            _ => None,
        }
    }

    /// Whether values of this type may be passed as arguments
    #[inline]
    pub fn is_input_type(&self) -> bool {
        matches!(
            self,
            SchemaType::Scalar(_) | SchemaType::Enum(_) | SchemaType::InputObject(_)
        )
    }

    /// Whether fields may return values of this type
    #[inline]
    pub fn is_output_type(&self) -> bool {
        !matches!(self, SchemaType::InputObject(_))
    }
}

impl<'a> From<&'a SchemaObject<'a>> for SchemaType<'a> {
    #[inline]
    fn from(schema_object: &'a SchemaObject<'a>) -> Self {
        SchemaType::Object(schema_object)
    }
}

impl<'a> From<&'a SchemaScalar<'a>> for SchemaType<'a> {
    #[inline]
    fn from(schema_scalar: &'a SchemaScalar<'a>) -> Self {
        SchemaType::Scalar(schema_scalar)
    }
}

/// A reference to a named type, possibly wrapped in list and non-null modifiers.
///
/// `[Upload!]!` is represented as `NonNullType(ListType(NonNullType(Type("Upload"))))`.
#[derive(Clone, Copy)]
pub enum TypeRef<'a> {
    Type(&'a str),
    ListType(&'a TypeRef<'a>),
    NonNullType(&'a TypeRef<'a>),
}

impl<'a> TypeRef<'a> {
    /// Strips all list and non-null wrappers and returns the innermost type name.
    #[inline]
    pub fn named_type(&self) -> &'a str {
        match self {
            TypeRef::Type(name) => name,
            TypeRef::ListType(of_type) | TypeRef::NonNullType(of_type) => of_type.named_type(),
        }
    }

    /// Looks up the innermost named type in the schema.
    #[inline]
    pub fn of_type(&self, schema: &Schema<'a>) -> Option<&'a SchemaType<'a>> {
        schema.get_type(self.named_type())
    }

    /// Whether the outermost modifier is a non-null wrapper
    #[inline]
    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNullType(_))
    }

    /// Whether the type is a list, ignoring an outer non-null wrapper
    #[inline]
    pub fn is_list(&self) -> bool {
        match self {
            TypeRef::ListType(_) => true,
            TypeRef::NonNullType(of_type) => of_type.is_list(),
            TypeRef::Type(_) => false,
        }
    }
}

/// Prints type references the way they're written in SDL, e.g. `[Upload!]!`.
impl<'a> std::fmt::Debug for TypeRef<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type(name) => write!(f, "{}", name),
            Self::ListType(of_type) => write!(f, "[{:?}]", of_type),
            Self::NonNullType(of_type) => write!(f, "{:?}!", of_type),
        }
    }
}

/// Only type names and wrappers are compared, never the types they refer to.
impl<'a> PartialEq for TypeRef<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Type(left), Self::Type(right)) => left == right,
            (Self::ListType(left), Self::ListType(right)) => left == right,
            (Self::NonNullType(left), Self::NonNullType(right)) => left == right,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_named_types() {
        let upload = TypeRef::Type("Upload");
        let non_null = TypeRef::NonNullType(&upload);
        let list = TypeRef::ListType(&non_null);
        let non_null_list = TypeRef::NonNullType(&list);

        assert_eq!(non_null_list.named_type(), "Upload");
        assert_eq!(format!("{:?}", non_null_list), "[Upload!]!");
        assert!(non_null_list.is_list());
        assert!(non_null_list.is_non_null());
        assert!(!non_null.is_list());
        assert!(!list.is_non_null());
    }

    #[test]
    fn looks_up_fields() {
        let ctx = SchemaContext::new();
        let mut schema = Schema::default_in(&ctx.arena);

        let boolean = ctx.alloc(TypeRef::Type("Boolean"));
        let upload = ctx.alloc(TypeRef::Type("Upload"));
        let mut field = SchemaField::new(&ctx, "test", boolean);
        field.add_argument(&ctx, SchemaInputField::new("file", upload));
        let mut mutation = SchemaObject::new(&ctx, "Mutation");
        mutation.add_field(&ctx, field);

        schema.add_type(&ctx, SchemaType::Object(ctx.alloc(mutation)));
        schema.add_type(&ctx, SchemaType::Scalar(ctx.alloc(SchemaScalar::new("Upload"))));

        let field = schema.get_field("Mutation", "test").unwrap();
        assert_eq!(field.get_argument("file").unwrap().input_type, upload);

        let error = schema.get_field("Mutation", "missing").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Schema);
        assert_eq!(error.message(), "Field `missing` does not exist on type `Mutation`.");

        let error = schema.get_field("Upload", "test").unwrap_err();
        assert_eq!(error.message(), "Type `Upload` is not an object or interface type.");

        let error = schema.get_field("Query", "test").unwrap_err();
        assert_eq!(error.message(), "Type `Query` does not exist in the schema.");
    }

    #[test]
    fn keeps_argument_order() {
        let ctx = SchemaContext::new();
        let string = ctx.alloc(TypeRef::Type("String"));
        let mut field = SchemaField::new(&ctx, "test", string);
        for name in ["c", "a", "b"] {
            field.add_argument(&ctx, SchemaInputField::new(name, string));
        }
        field.add_argument(&ctx, SchemaInputField::new("a", string));

        let names: std::vec::Vec<&str> = field.arguments.iter().map(|arg| arg.name).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }
}
