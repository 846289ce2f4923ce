use super::{
    error::{syntax, syntax_err, validation, SchemaError},
    lexer::Token,
};
use crate::{
    context::{DefaultIn, SchemaContext},
    error::{get_location, print_span, Error, ErrorType, Result},
    schema::{
        Schema, SchemaEnum, SchemaField, SchemaFields, SchemaInputField, SchemaInputObject,
        SchemaInterface, SchemaObject, SchemaScalar, SchemaType, SchemaUnion, TypeRef,
    },
};
use bumpalo::collections::Vec;
use logos::{Lexer, Logos, Span};

pub type ParseResult<T> = std::result::Result<T, SchemaError>;

pub(crate) mod private {
    use super::*;

    /// Private Parser context state that's kept to keep track of the current parser's progress and
    /// state. This contains the schema context and a [Lexer].
    pub struct ParserContext<'a> {
        pub(crate) ctx: &'a SchemaContext,
        pub(crate) peek: Option<Token<'a>>,
        pub(crate) iter: Lexer<'a, Token<'a>>,
    }

    impl<'a> ParserContext<'a> {
        /// Create a new Parser context for a given schema context and initialize it with an input
        /// source string to parse from.
        pub(crate) fn new(ctx: &'a SchemaContext, source: &'a str) -> Self {
            ParserContext {
                ctx,
                peek: None,
                iter: Token::lexer(source),
            }
        }

        #[inline]
        pub(crate) fn next(&mut self) -> Token<'a> {
            match self.peek.take() {
                Some(token) => token,
                None => self.iter.next().unwrap_or(Token::End),
            }
        }

        #[inline]
        pub(crate) fn peek(&mut self) -> Token<'a> {
            let iter = &mut self.iter;
            *self
                .peek
                .get_or_insert_with(|| iter.next().unwrap_or(Token::End))
        }

        #[inline]
        pub(crate) fn source(&self) -> &str {
            self.iter.source()
        }

        #[inline]
        pub(crate) fn span(&self) -> Span {
            self.iter.span()
        }

        #[inline]
        pub(crate) fn name(&mut self, expected: &str) -> ParseResult<&'a str> {
            match self.next() {
                Token::Name(name) => Ok(name),
                t => syntax_err!("Expected {}, got {:?}", expected, t),
            }
        }

        #[inline]
        pub(crate) fn expect(&mut self, token: Token<'a>, display: &str) -> ParseResult<()> {
            let next = self.next();
            if next == token {
                Ok(())
            } else {
                syntax_err!("Expected `{}`, got {:?}", display, next)
            }
        }

        /// Steps over a description string if one precedes the next definition.
        #[inline]
        pub(crate) fn skip_description(&mut self) {
            if let Token::String(_) | Token::BlockString(_) = self.peek() {
                self.next();
            }
        }

        /// Steps over any directive applications, e.g. `@deprecated(reason: "...")`.
        pub(crate) fn skip_directives(&mut self) -> ParseResult<()> {
            while let Token::DirectiveName(_) = self.peek() {
                self.next();
                if self.peek() == Token::ParenOpen {
                    self.next();
                    while !matches!(self.peek(), Token::ParenClose | Token::End) {
                        self.name("argument name")?;
                        self.expect(Token::Colon, ":")?;
                        self.skip_value()?;
                    }
                    self.expect(Token::ParenClose, ")")?;
                }
            }
            Ok(())
        }

        /// Steps over a value literal, as found in default values and directive arguments.
        pub(crate) fn skip_value(&mut self) -> ParseResult<()> {
            match self.next() {
                Token::Name(_)
                | Token::Integer(_)
                | Token::Float(_)
                | Token::String(_)
                | Token::BlockString(_)
                | Token::Variable(_) => Ok(()),
                Token::BracketOpen => {
                    while !matches!(self.peek(), Token::BracketClose | Token::End) {
                        self.skip_value()?;
                    }
                    self.expect(Token::BracketClose, "]")
                }
                Token::BraceOpen => {
                    while !matches!(self.peek(), Token::BraceClose | Token::End) {
                        self.name("object field name")?;
                        self.expect(Token::Colon, ":")?;
                        self.skip_value()?;
                    }
                    self.expect(Token::BraceClose, "}")
                }
                t => syntax_err!("Expected a value, got {:?}", t),
            }
        }

        pub(crate) fn implements_interfaces(&mut self) -> ParseResult<Vec<'a, &'a str>> {
            let mut interfaces = Vec::new_in(&self.ctx.arena);
            if self.peek() == Token::Name("implements") {
                self.next();

                // Skip optional leading `&`
                if self.peek() == Token::Ampersand {
                    self.next();
                }

                interfaces.push(self.name("interface name")?);
                while self.peek() == Token::Ampersand {
                    self.next();
                    interfaces.push(self.name("interface name")?);
                }
            }

            Ok(interfaces)
        }

        /// Reads a parenthesized list of argument declarations, if present.
        pub(crate) fn arguments_definition(
            &mut self,
        ) -> ParseResult<Vec<'a, SchemaInputField<'a>>> {
            let mut arguments: Vec<'a, SchemaInputField<'a>> = Vec::new_in(&self.ctx.arena);
            if self.peek() != Token::ParenOpen {
                return Ok(arguments);
            }

            self.next();
            while !matches!(self.peek(), Token::ParenClose | Token::End) {
                let argument = SchemaInputField::parse_from_ctx(self)?;
                if arguments.iter().any(|arg| arg.name == argument.name) {
                    return syntax_err!("Argument `{}` is declared more than once.", argument.name);
                }
                arguments.push(argument);
            }
            self.expect(Token::ParenClose, ")")?;
            Ok(arguments)
        }

        /// Reads the braced field list of an object or interface type into `target`.
        pub(crate) fn fields_definition<T: SchemaFields<'a>>(
            &mut self,
            type_name: &str,
            target: &mut T,
        ) -> ParseResult<()> {
            if self.peek() != Token::BraceOpen {
                return Ok(());
            }

            self.next();
            while !matches!(self.peek(), Token::BraceClose | Token::End) {
                let field = SchemaField::parse_from_ctx(self)?;
                if target.get_fields().contains_key(field.name) {
                    return syntax_err!(
                        "Field `{}` is defined more than once on `{}`.",
                        field.name,
                        type_name
                    );
                }
                target.add_field(self.ctx, field);
            }
            self.expect(Token::BraceClose, "}")
        }
    }

    /// (Private) Trait for parsing schema nodes from a Parser Context.
    /// The [`super::ParseSdl`] trait implements the public `parse` method instead.
    pub trait ParseFromCtx<'a>: Sized {
        fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self>;
    }
}

impl<'a, T: private::ParseFromCtx<'a>> ParseSdl<'a> for T {}

/// Trait for parsing schema nodes from SDL source text using recursive descent and a lexer.
///
/// This is mostly used via `Schema::parse`, but type references may be read on their own too.
pub trait ParseSdl<'a>: private::ParseFromCtx<'a> {
    /// Parse an input source text into the implementor's structure and allocate the result into
    /// the context arena.
    fn parse<T: ToString>(ctx: &'a SchemaContext, source: T) -> Result<&'a Self> {
        let source = ctx.alloc_string(source.to_string());
        let mut parser_ctx = private::ParserContext::new(ctx, source);
        match Self::parse_from_ctx(&mut parser_ctx) {
            Ok(value) => Ok(ctx.alloc(value)),
            Err(error @ SchemaError::ValidationError(_)) => {
                Err(Error::new(error.to_string(), Some(ErrorType::Schema)))
            }
            Err(error) => {
                let span = print_span(parser_ctx.source(), parser_ctx.span());
                let location = get_location(parser_ctx.source(), parser_ctx.span());
                Err(Error::new_with_context(
                    error.to_string(),
                    Some(location),
                    span,
                    Some(ErrorType::Syntax),
                ))
            }
        }
    }
}

const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

const DIRECTIVE_LOCATIONS: [&str; 19] = [
    "QUERY",
    "MUTATION",
    "SUBSCRIPTION",
    "FIELD",
    "FRAGMENT_DEFINITION",
    "FRAGMENT_SPREAD",
    "INLINE_FRAGMENT",
    "VARIABLE_DEFINITION",
    "SCHEMA",
    "SCALAR",
    "OBJECT",
    "FIELD_DEFINITION",
    "ARGUMENT_DEFINITION",
    "INTERFACE",
    "UNION",
    "ENUM",
    "ENUM_VALUE",
    "INPUT_OBJECT",
    "INPUT_FIELD_DEFINITION",
];

/// Root operation type names given by a `schema { ... }` definition.
#[derive(Debug, Clone, Copy, Default)]
struct SchemaDefinition<'a> {
    query: Option<&'a str>,
    mutation: Option<&'a str>,
    subscription: Option<&'a str>,
}

impl<'a> private::ParseFromCtx<'a> for Schema<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        let mut schema = Schema::default_in(&ctx.ctx.arena);
        for scalar in BUILTIN_SCALARS {
            schema.add_type(ctx.ctx, SchemaType::Scalar(ctx.ctx.alloc(SchemaScalar::new(scalar))));
        }

        let mut schema_def = None;
        loop {
            ctx.skip_description();
            match ctx.peek() {
                Token::End => break,
                Token::Name("schema") => {
                    if schema_def.is_some() {
                        return syntax_err!("Must not specify more than one Schema Definition.");
                    }
                    schema_def = Some(SchemaDefinition::parse_from_ctx(ctx)?);
                }
                Token::Name("directive") => skip_directive_definition(ctx)?,
                Token::Name("extend") => {
                    return syntax_err!("Type system extensions are not supported.");
                }
                _ => {
                    let schema_type = SchemaType::parse_from_ctx(ctx)?;
                    let name = schema_type.name();
                    let redefines_builtin = BUILTIN_SCALARS.contains(&name)
                        && matches!(schema_type, SchemaType::Scalar(_));
                    if schema.types.contains_key(name) && !redefines_builtin {
                        return syntax_err!("Type `{}` is defined more than once.", name);
                    }
                    schema.types.insert(name, ctx.ctx.alloc(schema_type));
                }
            }
        }

        validate_types(&schema)?;

        let schema_def = schema_def.unwrap_or(SchemaDefinition {
            query: Some("Query"),
            mutation: Some("Mutation"),
            subscription: Some("Subscription"),
        });
        schema.query_type = root_type(&schema, schema_def.query, "Query")?;
        schema.mutation_type = root_type(&schema, schema_def.mutation, "Mutation")?;
        schema.subscription_type = root_type(&schema, schema_def.subscription, "Subscription")?;

        Ok(schema)
    }
}

fn root_type<'a>(
    schema: &Schema<'a>,
    name: Option<&'a str>,
    kind: &str,
) -> ParseResult<Option<&'a SchemaObject<'a>>> {
    match name.and_then(|name| schema.get_type(name)) {
        Some(root_type) => match root_type.object() {
            Some(object) => Ok(Some(object)),
            None => syntax_err!(
                "{} root type `{}` must be an object type.",
                kind,
                root_type.name()
            ),
        },
        None => Ok(None),
    }
}

/// Checks that every type referenced by a field, argument, interface list or union exists and
/// is usable in its position.
fn validate_types<'a>(schema: &Schema<'a>) -> ParseResult<()> {
    let check_field = |type_name: &str, field: &SchemaField<'a>| -> ParseResult<()> {
        let output_type = field.output_type.of_type(schema);
        if !output_type.map_or(false, |t| t.is_output_type()) {
            return Err(validation!(
                "Field `{}` of type `{}` has an invalid type.",
                field.name,
                type_name
            ));
        }

        for argument in field.arguments.iter() {
            let input_type = argument.input_type.of_type(schema);
            if !input_type.map_or(false, |t| t.is_input_type()) {
                return Err(validation!(
                    "Argument `{}` of field `{}.{}` has an invalid type.",
                    argument.name,
                    type_name,
                    field.name
                ));
            }
        }
        Ok(())
    };

    let check_interfaces = |type_name: &str, interfaces: &Vec<'a, &'a str>| -> ParseResult<()> {
        for interface in interfaces.iter() {
            if schema.get_type(interface).and_then(|t| t.interface()).is_none() {
                return Err(validation!(
                    "Interface `{}` on type `{}` does not exist.",
                    interface,
                    type_name
                ));
            }
        }
        Ok(())
    };

    for (name, schema_type) in schema.types.iter() {
        match schema_type {
            SchemaType::Object(object) => {
                for field in object.fields.values() {
                    check_field(*name, *field)?;
                }
                check_interfaces(*name, &object.interfaces)?;
            }
            SchemaType::Interface(interface) => {
                for field in interface.fields.values() {
                    check_field(*name, *field)?;
                }
                check_interfaces(*name, &interface.interfaces)?;
            }
            SchemaType::InputObject(input) => {
                for field in input.fields.values() {
                    let input_type = field.input_type.of_type(schema);
                    if !input_type.map_or(false, |t| t.is_input_type()) {
                        return Err(validation!(
                            "Field `{}` of type `{}` has an invalid type.",
                            field.name,
                            name
                        ));
                    }
                }
            }
            SchemaType::Union(union_type) => {
                for member in union_type.possible_types.iter() {
                    if schema.get_type(member).and_then(|t| t.object()).is_none() {
                        return Err(validation!(
                            "Type `{}` on union `{}` is not a valid type.",
                            member,
                            name
                        ));
                    }
                }
            }
            SchemaType::Scalar(_) | SchemaType::Enum(_) => {}
        }
    }

    Ok(())
}

/// Directive definitions carry no information about resolver arguments and are discarded.
fn skip_directive_definition(ctx: &mut private::ParserContext<'_>) -> ParseResult<()> {
    ctx.next(); // Skip `directive`
    match ctx.next() {
        Token::DirectiveName(_) => {}
        t => return syntax_err!("Expected directive name, got {:?}", t),
    }

    ctx.arguments_definition()?;
    if ctx.peek() == Token::Name("repeatable") {
        ctx.next();
    }
    if ctx.next() != Token::Name("on") {
        return syntax_err!("Expected `on`");
    }
    if ctx.peek() == Token::Pipe {
        ctx.next();
    }

    loop {
        match ctx.next() {
            Token::Name(location) if DIRECTIVE_LOCATIONS.contains(&location) => {}
            t => return syntax_err!("Expected directive location, got {:?}", t),
        }
        if ctx.peek() == Token::Pipe {
            ctx.next();
        } else {
            return Ok(());
        }
    }
}

impl<'a> private::ParseFromCtx<'a> for SchemaDefinition<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        ctx.next(); // Skip `schema`
        ctx.skip_directives()?;
        ctx.expect(Token::BraceOpen, "{")?;

        let mut defs = SchemaDefinition::default();
        while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
            let operation_type = match ctx.next() {
                Token::Name(op @ ("query" | "mutation" | "subscription")) => op,
                t => return syntax_err!("Expected operation type, got {:?}", t),
            };
            ctx.expect(Token::Colon, ":")?;
            let type_name = ctx.name("named type")?;

            match operation_type {
                "query" => defs.query = Some(type_name),
                "mutation" => defs.mutation = Some(type_name),
                _ => defs.subscription = Some(type_name),
            }
        }

        ctx.expect(Token::BraceClose, "}")?;
        Ok(defs)
    }
}

impl<'a> private::ParseFromCtx<'a> for SchemaType<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        let keyword = match ctx.next() {
            Token::Name(
                keyword @ ("type" | "interface" | "input" | "enum" | "scalar" | "union"),
            ) => keyword,
            t => return syntax_err!("Expected valid type definition, got {:?}.", t),
        };

        let name = ctx.name("type name")?;
        let arena = ctx.ctx;
        let schema_type = match keyword {
            "type" => {
                let mut object = SchemaObject::new(arena, name);
                object.interfaces = ctx.implements_interfaces()?;
                ctx.skip_directives()?;
                ctx.fields_definition(name, &mut object)?;
                SchemaType::Object(arena.alloc(object))
            }
            "interface" => {
                let mut interface = SchemaInterface::new(arena, name);
                interface.interfaces = ctx.implements_interfaces()?;
                ctx.skip_directives()?;
                ctx.fields_definition(name, &mut interface)?;
                SchemaType::Interface(arena.alloc(interface))
            }
            "input" => {
                let mut input = SchemaInputObject::new(arena, name);
                ctx.skip_directives()?;
                if ctx.peek() == Token::BraceOpen {
                    ctx.next();
                    while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
                        let field = SchemaInputField::parse_from_ctx(ctx)?;
                        input.add_field(arena, field);
                    }
                    ctx.expect(Token::BraceClose, "}")?;
                }
                SchemaType::InputObject(arena.alloc(input))
            }
            "enum" => {
                let mut schema_enum = SchemaEnum::new(arena, name);
                ctx.skip_directives()?;
                if ctx.peek() == Token::BraceOpen {
                    ctx.next();
                    while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
                        ctx.skip_description();
                        let value = ctx.name("enum value")?;
                        ctx.skip_directives()?;
                        schema_enum.add_value(arena, value);
                    }
                    ctx.expect(Token::BraceClose, "}")?;
                }
                SchemaType::Enum(arena.alloc(schema_enum))
            }
            "union" => {
                let mut union_type = SchemaUnion::new(arena, name);
                ctx.skip_directives()?;
                if ctx.peek() == Token::Equal {
                    ctx.next();

                    // Skip optional leading `|`
                    if ctx.peek() == Token::Pipe {
                        ctx.next();
                    }

                    union_type.add_possible_type(arena, ctx.name("type name")?);
                    while ctx.peek() == Token::Pipe {
                        ctx.next();
                        union_type.add_possible_type(arena, ctx.name("type name")?);
                    }
                }
                SchemaType::Union(arena.alloc(union_type))
            }
            _ => {
                ctx.skip_directives()?;
                SchemaType::Scalar(arena.alloc(SchemaScalar::new(name)))
            }
        };

        Ok(schema_type)
    }
}

impl<'a> private::ParseFromCtx<'a> for SchemaField<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        ctx.skip_description();
        let name = ctx.name("field name")?;
        let arguments = ctx.arguments_definition()?;
        ctx.expect(Token::Colon, ":")?;
        let output_type = ctx.ctx.alloc(TypeRef::parse_from_ctx(ctx)?);
        ctx.skip_directives()?;

        Ok(SchemaField {
            name,
            arguments,
            output_type,
        })
    }
}

impl<'a> private::ParseFromCtx<'a> for SchemaInputField<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        ctx.skip_description();
        let name = ctx.name("input field name")?;
        ctx.expect(Token::Colon, ":")?;
        let input_type = ctx.ctx.alloc(TypeRef::parse_from_ctx(ctx)?);

        // Default values don't change which type an argument accepts
        if ctx.peek() == Token::Equal {
            ctx.next();
            ctx.skip_value()?;
        }
        ctx.skip_directives()?;

        Ok(SchemaInputField { name, input_type })
    }
}

impl<'a> private::ParseFromCtx<'a> for TypeRef<'a> {
    fn parse_from_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Self> {
        let type_ref = match ctx.next() {
            Token::Name(name) => TypeRef::Type(name),
            Token::BracketOpen => {
                let of_type = ctx.ctx.alloc(TypeRef::parse_from_ctx(ctx)?);
                if ctx.next() != Token::BracketClose {
                    return syntax_err!("Unterminated list");
                }
                TypeRef::ListType(of_type)
            }
            t => return syntax_err!("Expected type name or list type start `[`, got {:?}", t),
        };

        if ctx.peek() == Token::Exclam {
            ctx.next();
            Ok(TypeRef::NonNullType(ctx.ctx.alloc(type_ref)))
        } else {
            Ok(type_ref)
        }
    }
}
