
use reqwest::{header::CONTENT_TYPE, multipart::Form, StatusCode};
use test_utils::*;

#[actix_rt::test]
async fn single_upload_accepts_every_allowed_extension() {
    let app = TestApp::spawn().await;

    for ext in ["png", "jpg", "jpeg", "bmp", "webp", "gif"] {
        let response = app.upload_single(&format!("photo.{}", ext), image_bytes(512)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let envelope = TestApp::single_envelope(response).await;
        assert_eq!(envelope.code, 200, "extension {ext}");
        assert_eq!(envelope.message, "ok");

        let url = envelope.data.expect("url missing");
        assert!(url.starts_with(&format!("http://127.0.0.1:{}/img/", app.config.port)));
        assert!(url.ends_with(&format!(".{}", ext)));
    }

    assert_eq!(app.stored_images().len(), 6);
}

#[actix_rt::test]
async fn single_upload_rejects_names_without_exactly_one_dot() {
    let app = TestApp::spawn().await;

    for name in ["photo", "my.photo.png", "archive.tar.gif"] {
        let response = app.upload_single(name, image_bytes(16)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let envelope = TestApp::single_envelope(response).await;
        assert_eq!(envelope.code, 400, "name {name}");
        assert_eq!(envelope.message, "malformed image name");
        assert!(envelope.data.is_none());
    }

    assert!(app.stored_images().is_empty());
}

#[actix_rt::test]
async fn single_upload_extension_check_is_case_sensitive() {
    let app = TestApp::spawn().await;

    let envelope = TestApp::single_envelope(app.upload_single("photo.PNG", image_bytes(16)).await).await;

    assert_eq!(envelope.code, 400);
    assert_eq!(envelope.message, "unsupported image type: PNG");
}

#[actix_rt::test]
async fn single_upload_accepts_ceiling_and_rejects_one_byte_more() {
    let app = TestApp::spawn().await;
    let ceiling = app.config.max_file_size as usize;

    let at_limit = TestApp::single_envelope(app.upload_single("edge.png", image_bytes(ceiling)).await).await;
    assert_eq!(at_limit.code, 200);

    let over_limit = TestApp::single_envelope(app.upload_single("edge.png", image_bytes(ceiling + 1)).await).await;
    assert_eq!(over_limit.code, 400);
    assert_eq!(
        over_limit.message,
        format!("image too large, please keep it within {} bytes", ceiling)
    );
    assert!(over_limit.data.is_none());
}

#[actix_rt::test]
async fn single_upload_without_file_field_reports_missing_file() {
    let app = TestApp::spawn().await;

    let form = Form::new().text("note", "no image here");
    let envelope = TestApp::single_envelope(app.post_form("/api/upload/singleImage", form).await).await;

    assert_eq!(envelope.code, 400);
    assert_eq!(envelope.message, "no file detected");
}

#[actix_rt::test]
async fn non_multipart_request_still_gets_an_envelope() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(&format!("{}/api/upload/singleImage", app.address))
        .json(&serde_json::json!({"file": "photo.png"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let envelope = TestApp::single_envelope(response).await;
    assert_eq!(envelope.code, 400);
    assert_eq!(envelope.message, "no file detected");
    assert!(envelope.data.is_none());
}

#[actix_rt::test]
async fn requests_without_body_get_missing_file_envelope_on_both_routes() {
    let app = TestApp::spawn().await;

    for path in ["/api/upload/singleImage", "/api/upload/multiImages"] {
        let response = app.client
            .post(&format!("{}{}", app.address, path))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "route {path}");
        let envelope: serde_json::Value = response.json().await.unwrap();
        assert_eq!(envelope["code"], 400);
        assert_eq!(envelope["message"], "no file detected");
        assert!(envelope["data"].is_null());
    }
}

#[actix_rt::test]
async fn temp_file_creation_failure_reports_save_error() {
    let app = TestApp::spawn_with(|config| {
        config.temp_dir = format!("{}/does-not-exist", config.temp_dir);
    }).await;

    let response = app.upload_single("a.png", image_bytes(64)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let envelope = TestApp::single_envelope(response).await;
    assert_eq!(envelope.code, 400);
    assert_eq!(envelope.message, "image save error");
    assert!(app.stored_images().is_empty());
}

#[actix_rt::test]
async fn stored_image_is_served_back_from_static_route() {
    let app = TestApp::spawn().await;
    let bytes = image_bytes(2048);

    let envelope = TestApp::single_envelope(app.upload_single("cat.gif", bytes.clone()).await).await;
    let url = envelope.data.expect("url missing");

    let response = app.client.get(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.bytes().await.unwrap().to_vec(), bytes);
}

#[actix_rt::test]
async fn same_name_uploaded_twice_yields_two_retrievable_urls() {
    let app = TestApp::spawn().await;

    let first = TestApp::single_envelope(app.upload_single("dup.png", vec![1; 64]).await).await;
    let second = TestApp::single_envelope(app.upload_single("dup.png", vec![2; 64]).await).await;

    let first_url = first.data.expect("first url");
    let second_url = second.data.expect("second url");
    assert_ne!(first_url, second_url);

    let first_body = app.client.get(&first_url).send().await.unwrap().bytes().await.unwrap();
    let second_body = app.client.get(&second_url).send().await.unwrap().bytes().await.unwrap();
    assert_eq!(first_body.to_vec(), vec![1; 64]);
    assert_eq!(second_body.to_vec(), vec![2; 64]);
}

#[actix_rt::test]
async fn batch_keeps_order_and_reports_per_file_errors() {
    let app = TestApp::spawn().await;

    let response = app.upload_multi(vec![
        ("first.png", image_bytes(128)),
        ("second.txt", image_bytes(128)),
        ("third.jpeg", image_bytes(128)),
    ]).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "application/json; charset=utf-8"
    );

    let envelope = TestApp::batch_envelope(response).await;
    assert_eq!(envelope.code, 200);

    let items = envelope.data.expect("batch results missing");
    assert_eq!(items.len(), 3);

    assert_eq!(items[0].name, "first.png");
    assert!(items[0].url.ends_with(".png"));
    assert!(items[0].err.is_empty());

    assert_eq!(items[1].name, "second.txt");
    assert!(items[1].url.is_empty());
    assert_eq!(items[1].err, "unsupported image type: txt");

    assert_eq!(items[2].name, "third.jpeg");
    assert!(items[2].url.ends_with(".jpeg"));
    assert!(items[2].err.is_empty());

    assert_eq!(app.stored_images().len(), 2);
}

#[actix_rt::test]
async fn batch_checks_extension_before_size() {
    let app = TestApp::spawn().await;
    let too_big = app.config.max_file_size as usize + 1;

    let envelope = TestApp::batch_envelope(
        app.upload_multi(vec![("huge.tiff", image_bytes(too_big)), ("huge.png", image_bytes(too_big))]).await
    ).await;

    let items = envelope.data.expect("batch results missing");
    assert_eq!(items[0].err, "unsupported image type: tiff");
    assert!(items[1].err.starts_with("image too large"));
}

#[actix_rt::test]
async fn empty_batch_is_a_top_level_error() {
    let app = TestApp::spawn().await;

    let form = Form::new().text("note", "nothing attached");
    let envelope = TestApp::batch_envelope(app.post_form("/api/upload/multiImages", form).await).await;

    assert_eq!(envelope.code, 400);
    assert_eq!(envelope.message, "no files detected");
    assert!(envelope.data.is_none());
}

#[actix_rt::test]
async fn batch_over_file_limit_is_rejected_as_a_whole() {
    let app = TestApp::spawn().await;

    let files = (0..10).map(|_| ("many.png", image_bytes(32))).collect();
    let envelope = TestApp::batch_envelope(app.upload_multi(files).await).await;

    assert_eq!(envelope.code, 400);
    assert_eq!(envelope.message, "too many files, at most 9 per request");
    assert!(app.stored_images().is_empty());
    assert!(app.temp_files().is_empty());
}

#[actix_rt::test]
async fn temp_directory_is_empty_after_every_request() {
    let app = TestApp::spawn().await;
    assert!(app.temp_files().is_empty());

    app.upload_single("ok.png", image_bytes(64)).await;
    assert!(app.temp_files().is_empty(), "after successful single upload");

    app.upload_single("bad.name.png", image_bytes(64)).await;
    assert!(app.temp_files().is_empty(), "after rejected single upload");

    app.upload_single("big.png", image_bytes(app.config.max_file_size as usize + 1)).await;
    assert!(app.temp_files().is_empty(), "after oversized single upload");

    app.upload_multi(vec![
        ("a.png", image_bytes(64)),
        ("b.exe", image_bytes(64)),
        ("c", image_bytes(64)),
    ]).await;
    assert!(app.temp_files().is_empty(), "after mixed batch");
}

#[actix_rt::test]
async fn health_endpoint_reports_storage() {
    let app = TestApp::spawn().await;

    let response = app.client.get(&format!("{}/health", app.address)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "OK");
}
