#[macro_use]
extern crate bencher;

use bencher::Bencher;
use futures_util::io::Cursor;
use graphql_upload::{context::SchemaContext, error::Result, schema::*, upload::*};
use serde_json::json;

fn file(name: &str) -> DeferredUpload {
    let stream = Cursor::new(b"GIF89a".to_vec());
    DeferredUpload::ready(FileUpload::new(stream, name, "image/gif", "7bit"))
}

fn arguments() -> Arguments<String> {
    let mut args = Arguments::new();
    args.insert("input", json!({ "title": "Holiday" }));
    args.insert("cover", file("cover.gif"));
    args.insert(
        "images",
        ArgumentValue::List(
            (0..8)
                .map(|n| ArgumentValue::Upload(file(&format!("{}.gif", n))))
                .collect(),
        ),
    );
    args
}

async fn store(upload: FileUpload) -> Result<String> {
    Ok(format!("uploads/{}", upload.filename))
}

fn graphql_sdl_parse(bench: &mut Bencher) {
    bench.iter(|| {
        let ctx = SchemaContext::new();
        Schema::parse(&ctx, SDL).ok();
    });
}

fn graphql_upload_extract(bench: &mut Bencher) {
    let ctx = SchemaContext::new();
    let schema = Schema::parse(&ctx, SDL).unwrap();
    let info = ResolveInfo::new(schema, "Mutation", "createAlbum");
    bench.iter(|| {
        let mut args = arguments();
        extract_upload_arguments(&info, &mut args).unwrap()
    });
}

fn graphql_upload_resolve(bench: &mut Bencher) {
    let ctx = SchemaContext::new();
    let schema = Schema::parse(&ctx, SDL).unwrap();
    let info = ResolveInfo::new(schema, "Mutation", "createAlbum");
    let middleware = upload(UploadConfig {
        upload_handler: store,
    });

    bench.iter(|| {
        async_std::task::block_on(middleware.resolve(
            |_parent: (), args: Arguments<String>, _ctx: (), _info| async move { args.len() },
            (),
            arguments(),
            (),
            info,
        ))
        .unwrap()
    });
}

benchmark_group!(
    upload_benches,
    graphql_sdl_parse,
    graphql_upload_extract,
    graphql_upload_resolve
);

benchmark_main!(upload_benches);

static SDL: &str = include_str!("../fixture/uploads.graphql");
