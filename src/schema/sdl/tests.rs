use super::parser::ParseSdl;
use crate::{
    context::SchemaContext,
    error::ErrorType,
    schema::{Schema, SchemaFields, SchemaInterfaces, SchemaType, TypeRef},
};
use indoc::indoc;

const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

#[test]
fn empty_schema() {
    let ctx = SchemaContext::new();
    let schema = Schema::parse(&ctx, "").unwrap();

    assert_eq!(schema.types.len(), BUILTIN_SCALARS.len());
    for scalar in BUILTIN_SCALARS {
        assert!(matches!(schema.get_type(scalar), Some(SchemaType::Scalar(_))));
    }
    assert!(schema.query_type().is_none());
    assert!(schema.mutation_type().is_none());
}

#[test]
fn upload_mutation() {
    let ctx = SchemaContext::new();
    let source = indoc! {"
        scalar Upload

        type Query {
            foo: String
        }

        type Mutation {
            test(nonUpload: String!, upload: Upload!): Boolean
            many(files: [Upload!]!): [String]
        }
    "};

    let schema = Schema::parse(&ctx, source).unwrap();
    assert!(matches!(schema.get_type("Upload"), Some(SchemaType::Scalar(_))));
    assert_eq!(schema.query_type().unwrap().name, "Query");

    let mutation = schema.mutation_type().unwrap();
    let test = mutation.get_field("test").unwrap();
    let names: Vec<&str> = test.arguments.iter().map(|arg| arg.name).collect();
    assert_eq!(names, ["nonUpload", "upload"]);
    assert_eq!(
        test.get_argument("upload").unwrap().input_type,
        &TypeRef::NonNullType(&TypeRef::Type("Upload"))
    );
    assert_eq!(test.output_type, &TypeRef::Type("Boolean"));

    let many = mutation.get_field("many").unwrap();
    assert_eq!(format!("{:?}", many.get_argument("files").unwrap().input_type), "[Upload!]!");
    assert_eq!(format!("{:?}", many.output_type), "[String]");
}

#[test]
fn schema_definition() {
    let ctx = SchemaContext::new();
    let source = indoc! {"
        schema {
            query: Foo
            mutation: Bar
        }

        type Foo {
            foo: String
        }

        type Bar {
            bar: String
        }
    "};

    let schema = Schema::parse(&ctx, source).unwrap();
    assert_eq!(schema.query_type().unwrap().name, "Foo");
    assert_eq!(schema.mutation_type().unwrap().name, "Bar");
    assert!(schema.subscription_type().is_none());
}

#[test]
fn schema_definition_repeated() {
    let ctx = SchemaContext::new();
    let source = indoc! {"
        schema {
            query: Foo
        }

        schema {
            query: Bar
        }

        type Foo {
            foo: String
        }
    "};

    let error = Schema::parse(&ctx, source).unwrap_err();
    assert_eq!(error.message, "Must not specify more than one Schema Definition.");
    assert_eq!(error.error_type, ErrorType::Syntax);
}

#[test]
fn schema_definition_invalid_operation_type() {
    let ctx = SchemaContext::new();
    let source = indoc! {"
        schema {
            query: Foo
            doesNotExist: Foo
        }

        type Foo {
            foo: String
        }
    "};

    assert_eq!(
        Schema::parse(&ctx, source).unwrap_err().message,
        "Expected operation type, got Name(\"doesNotExist\")"
    );
}

#[test]
fn schema_definition_non_object_type() {
    let ctx = SchemaContext::new();
    let source = indoc! {"
        schema {
            query: Foo
        }

        scalar Foo
    "};

    assert_eq!(
        Schema::parse(&ctx, source).unwrap_err().message,
        "Query root type `Foo` must be an object type."
    );
}

#[test]
fn schema_definition_non_object_non_root_type() {
    let ctx = SchemaContext::new();
    let source = indoc! {"
        schema {
            query: Foo
        }

        type Foo {
            foo: String
        }

        # Only `Foo` is a root type once a schema definition is given
        interface Mutation {
            foo: String
        }
    "};

    assert!(Schema::parse(&ctx, source).is_ok());
}

#[test]
fn descriptions_defaults_and_directives() {
    let ctx = SchemaContext::new();
    let source = indoc! {r#"
        directive @auth(requires: [String!] = ["USER"]) repeatable on FIELD_DEFINITION | OBJECT

        """
        Files sent along with a multipart request.
        """
        scalar Upload @specifiedBy(url: "https://github.com/jaydenseric/graphql-multipart-request-spec")

        "Where a file ends up"
        enum Bucket {
            "Public files"
            PUBLIC
            PRIVATE @deprecated
        }

        input FileInput {
            file: Upload!
            bucket: Bucket = PUBLIC
            tags: [String!] = ["a", "b"]
            meta: FileMeta = { name: "x", size: 1.5, nested: { ok: true } }
        }

        input FileMeta {
            name: String
            size: Float
        }

        type Query {
            "A single file"
            file(id: ID! @deprecated(reason: "use files"), limit: Int = 10): String @auth(requires: ["ADMIN"])
        }
    "#};

    let schema = Schema::parse(&ctx, source).unwrap();
    let file = schema.get_field("Query", "file").unwrap();
    let names: Vec<&str> = file.arguments.iter().map(|arg| arg.name).collect();
    assert_eq!(names, ["id", "limit"]);

    match schema.get_type("Bucket") {
        Some(SchemaType::Enum(bucket)) => {
            assert!(bucket.values.contains("PUBLIC"));
            assert!(bucket.values.contains("PRIVATE"));
        }
        other => panic!("expected an enum, got {:?}", other),
    }

    match schema.get_type("FileInput") {
        Some(SchemaType::InputObject(input)) => {
            assert_eq!(input.fields.len(), 4);
            assert_eq!(input.fields.get("file").unwrap().input_type.named_type(), "Upload");
        }
        other => panic!("expected an input object, got {:?}", other),
    }
}

#[test]
fn interfaces_and_unions() {
    let ctx = SchemaContext::new();
    let source = indoc! {"
        scalar Upload

        interface Node {
            id: ID!
        }

        interface Attachment implements Node {
            id: ID!
            replace(file: Upload!): Attachment
        }

        type Image implements & Node & Attachment {
            id: ID!
            replace(file: Upload!): Attachment
        }

        type Video implements Node {
            id: ID!
        }

        union Media = | Image | Video

        type Query {
            media: [Media!]!
        }
    "};

    let schema = Schema::parse(&ctx, source).unwrap();
    let image = schema.get_type("Image").and_then(|t| t.object()).unwrap();
    assert!(image.implements_interface("Node"));
    assert!(image.implements_interface("Attachment"));

    let replace = schema.get_field("Attachment", "replace").unwrap();
    assert_eq!(replace.get_argument("file").unwrap().input_type.named_type(), "Upload");

    match schema.get_type("Media") {
        Some(SchemaType::Union(media)) => {
            assert_eq!(media.get_possible_types()[..], ["Image", "Video"]);
        }
        other => panic!("expected a union, got {:?}", other),
    }
}

#[test]
fn undefined_argument_type() {
    let ctx = SchemaContext::new();
    let source = indoc! {"
        type Mutation {
            test(upload: Upload!): Boolean
        }
    "};

    let error = Schema::parse(&ctx, source).unwrap_err();
    assert_eq!(error.error_type, ErrorType::Schema);
    assert_eq!(
        error.message,
        "Validation error: Argument `upload` of field `Mutation.test` has an invalid type."
    );
}

#[test]
fn output_type_as_argument() {
    let ctx = SchemaContext::new();
    let source = indoc! {"
        type File {
            name: String
        }

        type Mutation {
            test(file: File): Boolean
        }
    "};

    assert_eq!(
        Schema::parse(&ctx, source).unwrap_err().message,
        "Validation error: Argument `file` of field `Mutation.test` has an invalid type."
    );
}

#[test]
fn undefined_interface() {
    let ctx = SchemaContext::new();
    let source = indoc! {"
        type Foo implements Bar {
            foo: String
        }
    "};

    assert_eq!(
        Schema::parse(&ctx, source).unwrap_err().message,
        "Validation error: Interface `Bar` on type `Foo` does not exist."
    );
}

#[test]
fn duplicate_definitions() {
    let ctx = SchemaContext::new();
    let source = indoc! {"
        scalar Upload
        scalar Upload
    "};
    assert_eq!(
        Schema::parse(&ctx, source).unwrap_err().message,
        "Type `Upload` is defined more than once."
    );

    let source = indoc! {"
        type Mutation {
            test(upload: String, upload: String): Boolean
        }
    "};
    assert_eq!(
        Schema::parse(&ctx, source).unwrap_err().message,
        "Argument `upload` is declared more than once."
    );

    // Redeclaring a built-in scalar is allowed
    assert!(Schema::parse(&ctx, "scalar String").is_ok());
}

#[test]
fn syntax_error_location() {
    let ctx = SchemaContext::new();
    let source = indoc! {"
        type Mutation {
            test(upload Upload): Boolean
        }
    "};

    let error = Schema::parse(&ctx, source).unwrap_err();
    assert_eq!(error.error_type, ErrorType::Syntax);
    assert_eq!(error.message, "Expected `:`, got Name(\"Upload\")");
    assert_eq!(error.location().as_ref().map(|location| location.line), Some(2));
    assert!(error.print(true).contains("test(upload Upload)"));
}

#[test]
fn unterminated_list_type() {
    let ctx = SchemaContext::new();
    assert_eq!(
        TypeRef::parse(&ctx, "[Upload!").unwrap_err().message,
        "Unterminated list"
    );
    assert_eq!(
        *TypeRef::parse(&ctx, "[Upload!]!").unwrap(),
        TypeRef::NonNullType(&TypeRef::ListType(&TypeRef::NonNullType(&TypeRef::Type("Upload"))))
    );
}

#[test]
fn type_extensions_unsupported() {
    let ctx = SchemaContext::new();
    assert_eq!(
        Schema::parse(&ctx, "extend type Query { foo: String }").unwrap_err().message,
        "Type system extensions are not supported."
    );
}
