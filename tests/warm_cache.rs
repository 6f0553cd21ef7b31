//! Startup warm-cache behaviour seen through the middleware factory.

use std::io::Read;

use axum::http::{Method, StatusCode};
use flate2::read::GzDecoder;

use sass_middleware::compile::persist;
use sass_middleware::{SassMiddleware, SassOptions};

mod common;
use common::{app, send, was_delegated, wait_for_file, Fixture, LogSink};

#[tokio::test]
async fn test_init_compiles_whole_tree() {
    let fixture = Fixture::new();
    fixture.write_source("site.scss", "body { margin: 0; }");
    fixture.write_source("pages/about.scss", "h1 { color: red; }");
    fixture.write_source("readme.md", "# not a stylesheet");

    let _sass = SassMiddleware::new(SassOptions {
        init: true,
        css: Some(fixture.css()),
        ..SassOptions::new(fixture.src())
    })
    .unwrap();

    wait_for_file(&fixture.css().join("site.css")).await;
    wait_for_file(&fixture.css().join("pages/about.css")).await;
    assert!(!fixture.css().join("readme.css").exists());
    assert_eq!(
        std::fs::read_to_string(fixture.css().join("pages/about.css")).unwrap(),
        "h1{color:red}"
    );
}

#[tokio::test]
async fn test_init_writes_gzip_variants() {
    let fixture = Fixture::new();
    fixture.write_source("site.scss", "body { margin: 0; }");

    let _sass = SassMiddleware::new(SassOptions {
        init: true,
        gzip: true,
        css: Some(fixture.css()),
        ..SassOptions::new(fixture.src())
    })
    .unwrap();

    let gz = persist::gz_path(&fixture.css().join("site.css"));
    wait_for_file(&gz).await;
    let mut css = String::new();
    GzDecoder::new(std::fs::read(gz).unwrap().as_slice())
        .read_to_string(&mut css)
        .unwrap();
    assert_eq!(css, "body{margin:0}");
}

#[tokio::test]
async fn test_broken_file_does_not_stop_walk() {
    let fixture = Fixture::new();
    fixture.write_source("broken.scss", "body { color: ");
    fixture.write_source("ok.scss", "p { color: red; }");
    let sink = LogSink::default();

    let _sass = SassMiddleware::builder(SassOptions {
        init: true,
        css: Some(fixture.css()),
        ..SassOptions::new(fixture.src())
    })
    .log(sink.hook())
    .build()
    .unwrap();

    wait_for_file(&fixture.css().join("ok.css")).await;
    assert!(!fixture.css().join("broken.css").exists());

    // Both tasks report to the hook without a request attached.
    for _ in 0..250 {
        if sink.entries().len() == 2 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    let entries = sink.entries();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|(had_request, _, _)| !had_request));
    let failed: Vec<_> = entries.iter().filter(|(_, _, err)| err.is_some()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].1, fixture.src().join("broken.scss"));
}

#[tokio::test]
async fn test_warmed_output_is_served_by_next_handler() {
    let fixture = Fixture::new();
    fixture.write_source("site.scss", "body { margin: 0; }");
    let sass = SassMiddleware::new(SassOptions {
        init: true,
        css: Some(fixture.css()),
        ..SassOptions::new(fixture.src())
    })
    .unwrap();

    wait_for_file(&fixture.css().join("site.css")).await;

    let response = send(&app(sass), Method::GET, "/site.css").await;
    assert_ne!(response.status(), StatusCode::OK);
    assert!(was_delegated(response).await);
}
