use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use intake_pipeline::{ImageFetcher, PipelineError};

fn fetcher() -> ImageFetcher {
    ImageFetcher::new(5, "intake-test/0.1", 3, 0).expect("fetcher construction should not fail")
}

#[tokio::test]
async fn fetch_returns_bytes_and_normalised_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photo"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "Image/PNG; charset=binary")
                .set_body_bytes(vec![0x89, 0x50, 0x4E, 0x47]),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetched = fetcher()
        .fetch_image(&format!("{}/photo", server.uri()))
        .await
        .expect("fetch should succeed");

    assert_eq!(fetched.bytes, vec![0x89, 0x50, 0x4E, 0x47]);
    assert_eq!(fetched.mime_type, "image/png");
}

#[tokio::test]
async fn fetch_defaults_missing_content_type_to_jpeg() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photo"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .mount(&server)
        .await;

    let fetched = fetcher()
        .fetch_image(&format!("{}/photo", server.uri()))
        .await
        .unwrap();
    assert_eq!(fetched.mime_type, "image/jpeg");
}

#[tokio::test]
async fn fetch_retries_after_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/webp")
                .set_body_bytes(b"ok".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetched = fetcher()
        .fetch_image(&format!("{}/flaky", server.uri()))
        .await
        .expect("third attempt should succeed");
    assert_eq!(fetched.bytes, b"ok");
    assert_eq!(fetched.mime_type, "image/webp");
}

#[tokio::test]
async fn fetch_retries_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"late".to_vec()))
        .mount(&server)
        .await;

    let fetched = fetcher()
        .fetch_image(&format!("{}/empty", server.uri()))
        .await
        .unwrap();
    assert_eq!(fetched.bytes, b"late");
}

#[tokio::test]
async fn fetch_gives_up_after_configured_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    let url = format!("{}/gone", server.uri());
    let err = fetcher().fetch_image(&url).await.unwrap_err();

    match err {
        PipelineError::Fetch {
            url: failed_url,
            attempts,
            reason,
        } => {
            assert_eq!(failed_url, url);
            assert_eq!(attempts, 3);
            assert!(reason.contains("404"), "reason: {reason}");
        }
        other => panic!("expected Fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn single_attempt_fetcher_does_not_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/once"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ImageFetcher::new(5, "intake-test/0.1", 1, 0).unwrap();
    let result = fetcher.fetch_image(&format!("{}/once", server.uri())).await;
    assert!(result.is_err());
}
