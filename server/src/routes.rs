use std::sync::Arc;

use app::{app::ClipApp, clip};
use axum::{
    body::Body,
    extract::State,
    http::{header, Method, StatusCode},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use cliptube_core::request::ClipRequest;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{body::ClipBody, error::ApiError};

pub fn router(app: Arc<ClipApp>) -> Router {
    Router::new()
        .route("/api/clip", post(handle_clip))
        .route("/health", get(handle_health))
        .with_state(app)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any),
        )
}

async fn handle_health() -> &'static str {
    "ok"
}

async fn handle_clip(
    State(app): State<Arc<ClipApp>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    // validation runs before any scratch path is allocated
    let request = ClipRequest::parse(&body)?;

    let output = clip::produce_clip(app.as_ref(), &request)
        .await
        .map_err(|e| {
            log::error!("error producing clip for {}: {:?}", request.video_id, e);
            ApiError::Processing
        })?;

    let filename = request.attachment_filename();
    let len = output.len();
    let (file, session) = output.open().await.map_err(|e| {
        log::error!("could not open clip output: {}", e);
        ApiError::Processing
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(header::CONTENT_LENGTH, len)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from_stream(ClipBody::new(file, session)))
        .map_err(|e| {
            log::error!("could not build clip response: {}", e);
            ApiError::Processing
        })
}

#[cfg(test)]
mod test {
    use std::path::{Path, PathBuf};

    use app::{app::ConfigBuilder, workspace::Workspace};
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    /// Fake tools write to their final argument, which is where both
    /// stage contracts put the destination path.
    const WRITE_DEST: &str = "for last; do :; done\nprintf 'FAKEVIDEO' > \"$last\"";

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    struct TestServer {
        router: Router,
        scratch: PathBuf,
        _dir: tempfile::TempDir,
    }

    fn test_server(fetch_body: &str, trim_body: &str) -> TestServer {
        let dir = tempfile::TempDir::new().unwrap();
        let fetch = write_script(dir.path(), "fake-fetch", fetch_body);
        let trim = write_script(dir.path(), "fake-trim", trim_body);
        let scratch = dir.path().join("scratch");

        let config = ConfigBuilder::new()
            .unwrap()
            .scratch_root(Some(scratch.as_path()))
            .unwrap()
            .fetch_override(Some(&fetch))
            .unwrap()
            .trim_override(Some(&trim))
            .unwrap()
            .build()
            .unwrap();
        let workspace = Workspace::new(config.scratch_root()).unwrap();
        let app = ClipApp { config, workspace };

        TestServer {
            router: router(Arc::new(app)),
            scratch: scratch.canonicalize().unwrap(),
            _dir: dir,
        }
    }

    fn clip_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/clip")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn scratch_entries(scratch: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(scratch)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    async fn error_body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_answers() {
        let srv = test_server("exit 1", "exit 1");
        let response = srv
            .router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn reversed_range_rejected_without_side_effects() {
        // tools would leave a marker if they ever ran
        let srv = test_server("touch \"$0.ran\"", "touch \"$0.ran\"");
        let response = srv
            .router
            .clone()
            .oneshot(clip_request(
                r#"{"videoId":"abc123","startTime":20,"endTime":10}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = error_body(response).await;
        assert_eq!(body["error"], "Invalid time range values");
        assert!(scratch_entries(&srv.scratch).is_empty());
    }

    #[tokio::test]
    async fn missing_video_id_rejected() {
        let srv = test_server(WRITE_DEST, WRITE_DEST);
        let response = srv
            .router
            .oneshot(clip_request(r#"{"startTime":1,"endTime":2}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = error_body(response).await;
        assert_eq!(body["error"], "Invalid videoId");
    }

    #[tokio::test]
    async fn non_numeric_times_rejected() {
        let srv = test_server(WRITE_DEST, WRITE_DEST);
        let response = srv
            .router
            .oneshot(clip_request(
                r#"{"videoId":"abc123","startTime":"1","endTime":2}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = error_body(response).await;
        assert_eq!(body["error"], "Invalid time range");
    }

    #[tokio::test]
    async fn successful_clip_streams_attachment_and_cleans_up() {
        let srv = test_server(WRITE_DEST, WRITE_DEST);
        let response = srv
            .router
            .clone()
            .oneshot(clip_request(
                r#"{"videoId":"abc123","startTime":10,"endTime":20}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "video/mp4"
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains("abc123-10-20"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"FAKEVIDEO");

        // the body has been consumed and dropped; both scratch files are gone
        assert!(scratch_entries(&srv.scratch).is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_maps_to_generic_server_error() {
        let srv = test_server("echo no such video >&2\nexit 1", WRITE_DEST);
        let response = srv
            .router
            .clone()
            .oneshot(clip_request(
                r#"{"videoId":"abc123","startTime":10,"endTime":20}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = error_body(response).await;
        assert_eq!(body["error"], "Failed to process video clip");
        assert!(scratch_entries(&srv.scratch).is_empty());
    }

    #[tokio::test]
    async fn zero_byte_output_maps_to_generic_server_error() {
        let srv = test_server(WRITE_DEST, "for last; do :; done\n: > \"$last\"");
        let response = srv
            .router
            .clone()
            .oneshot(clip_request(
                r#"{"videoId":"abc123","startTime":10,"endTime":20}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = error_body(response).await;
        assert_eq!(body["error"], "Failed to process video clip");
        assert!(scratch_entries(&srv.scratch).is_empty());
    }

    #[tokio::test]
    async fn identical_concurrent_requests_are_independent() {
        let srv = test_server(WRITE_DEST, WRITE_DEST);
        let raw = r#"{"videoId":"abc123","startTime":10,"endTime":20}"#;

        let (a, b) = tokio::join!(
            srv.router.clone().oneshot(clip_request(raw)),
            srv.router.clone().oneshot(clip_request(raw)),
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.status(), StatusCode::OK);
        assert_eq!(b.status(), StatusCode::OK);

        let a_bytes = a.into_body().collect().await.unwrap().to_bytes();
        let b_bytes = b.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&a_bytes[..], b"FAKEVIDEO");
        assert_eq!(&b_bytes[..], b"FAKEVIDEO");
        assert!(scratch_entries(&srv.scratch).is_empty());
    }
}
