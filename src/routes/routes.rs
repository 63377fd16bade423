//! Defines routes for the sculpture and file endpoints.
//!
//! ## Structure
//! - **Sculpture endpoints**
//!   - `GET  /sculptures/{id}` — sculpture view with a fresh signed model URL
//!   - `POST /sculptures` — multipart create-with-upload
//!
//! - **File endpoints**
//!   - `POST   /files/upload` — store a file, respond with key + signed URL
//!   - `GET    /files/download/{*file_name}` — full contents, octet-stream
//!   - `DELETE /files/{*file_name}` — remove a blob
//!   - `GET    /files/url/{*file_name}` — fresh signed URL
//!
//! The wildcard `*file_name` allows folder-qualified keys like
//! `models/{token}_{name}`.

use crate::{
    handlers::{
        file_handlers::{delete_file, download_file, file_url, upload_file},
        health_handlers::{healthz, readyz},
        sculpture_handlers::{create_sculpture, get_sculpture},
    },
    state::AppState,
};
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Build and return the router for all sculpture and file routes.
///
/// The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Sculpture routes
        .route("/sculptures", post(create_sculpture))
        .route("/sculptures/{id}", get(get_sculpture))
        // File routes
        .route("/files/upload", post(upload_file))
        .route("/files/download/{*file_name}", get(download_file))
        .route("/files/url/{*file_name}", get(file_url))
        .route("/files/{*file_name}", delete(delete_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory_store::MemoryObjectStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "sculpture-test-boundary";

    async fn test_app() -> (Arc<MemoryObjectStore>, Router) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        for stmt in include_str!("../../migrations/0001_init.sql")
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            sqlx::query(stmt).execute(&pool).await.unwrap();
        }

        let store = Arc::new(MemoryObjectStore::new());
        let state = AppState::new(Arc::new(pool), store.clone(), "ar-content".into());
        (store, routes().with_state(state))
    }

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn file_part(name: &str, file_name: &str, contents: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: model/gltf-binary\r\n\r\n{contents}\r\n"
        )
    }

    fn multipart_body(parts: &[String]) -> Body {
        let mut body = parts.concat();
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        Body::from(body)
    }

    fn multipart_request(uri: &str, parts: &[String]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(multipart_body(parts))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get_request(app: &Router, uri: &str) -> axum::response::Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_then_get_end_to_end() {
        let (_, app) = test_app().await;

        let response = app
            .clone()
            .oneshot(multipart_request(
                "/sculptures",
                &[
                    text_part("name", "Statue"),
                    text_part("description", "Test"),
                    file_part("model", "model.glb", "0123456789"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        assert!(location.starts_with("/sculptures/"));

        let created = body_json(response).await;
        assert_eq!(created["name"], "Statue");
        assert_eq!(created["description"], "Test");
        let key = created["modelUrl"].as_str().unwrap().to_string();
        assert!(key.starts_with("models/"));
        assert!(key.ends_with("_model.glb"));

        // read back through the Location URL
        let response = get_request(&app, &location).await;
        assert_eq!(response.status(), StatusCode::OK);
        let view = body_json(response).await;
        assert_eq!(view["name"], "Statue");
        assert_eq!(view["arContent"]["animations"], serde_json::json!([]));
        let model_url = view["arContent"]["modelUrl"].as_str().unwrap();
        assert!(model_url.contains(&key));

        // the referenced blob holds the original bytes
        let response = get_request(&app, &format!("/files/download/{key}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.as_ref(), b"0123456789");
    }

    #[tokio::test]
    async fn create_with_empty_name_is_rejected_without_touching_the_store() {
        let (store, app) = test_app().await;

        let response = app
            .oneshot(multipart_request(
                "/sculptures",
                &[
                    text_part("name", ""),
                    file_part("model", "model.glb", "0123456789"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.put_count(), 0);
    }

    #[tokio::test]
    async fn create_preserves_animation_order() {
        let (_, app) = test_app().await;

        let response = app
            .clone()
            .oneshot(multipart_request(
                "/sculptures",
                &[
                    text_part("name", "Statue"),
                    text_part("animations", "wave"),
                    text_part("animations", "spin"),
                    file_part("model", "model.glb", "x"),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();

        let response = get_request(&app, &format!("/sculptures/{id}")).await;
        let view = body_json(response).await;
        assert_eq!(
            view["arContent"]["animations"],
            serde_json::json!(["wave", "spin"])
        );
    }

    #[tokio::test]
    async fn get_unknown_sculpture_is_404() {
        let (_, app) = test_app().await;
        let response = get_request(
            &app,
            &format!("/sculptures/{}", uuid::Uuid::new_v4()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn file_upload_download_delete_flow() {
        let (_, app) = test_app().await;

        let response = app
            .clone()
            .oneshot(multipart_request(
                "/files/upload",
                &[file_part("file", "asset.glb", "glb-bytes")],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let info = body_json(response).await;
        let key = info["fileName"].as_str().unwrap().to_string();
        assert!(key.starts_with("models/"));
        assert!(info["url"].as_str().unwrap().contains(&key));
        assert_eq!(info["size"], 9);
        assert_eq!(info["contentType"], "model/gltf-binary");

        let response = get_request(&app, &format!("/files/download/{key}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/octet-stream")
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.as_ref(), b"glb-bytes");

        // first delete succeeds, the repeat reports 404, never 500
        let delete_request = |key: &str| {
            Request::builder()
                .method("DELETE")
                .uri(format!("/files/{key}"))
                .body(Body::empty())
                .unwrap()
        };
        let response = app.clone().oneshot(delete_request(&key)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = app.clone().oneshot(delete_request(&key)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = get_request(&app, &format!("/files/download/{key}")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn upload_with_empty_file_is_400() {
        let (_, app) = test_app().await;
        let response = app
            .oneshot(multipart_request(
                "/files/upload",
                &[file_part("file", "empty.glb", "")],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn file_url_resolves_fresh_urls() {
        let (_, app) = test_app().await;
        let response = app
            .clone()
            .oneshot(multipart_request(
                "/files/upload",
                &[file_part("file", "asset.glb", "x")],
            ))
            .await
            .unwrap();
        let key = body_json(response).await["fileName"]
            .as_str()
            .unwrap()
            .to_string();

        let first = get_request(&app, &format!("/files/url/{key}")).await;
        assert_eq!(first.status(), StatusCode::OK);
        let first_url = body_json(first).await["url"].as_str().unwrap().to_string();
        assert!(first_url.contains(&key));

        let second = get_request(&app, &format!("/files/url/{key}")).await;
        let second_url = body_json(second).await["url"].as_str().unwrap().to_string();
        assert_ne!(first_url, second_url);
    }

    #[tokio::test]
    async fn health_endpoints_respond() {
        let (_, app) = test_app().await;
        let response = get_request(&app, "/healthz").await;
        assert_eq!(response.status(), StatusCode::OK);
        let response = get_request(&app, "/readyz").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
