//! API endpoints.

pub mod resource;

use axum::{Json, Router, routing::get};
use entities::{Entity, Product, Task, User};
use resource_store::ResourceRepository;
use serde_json::{Value, json};

use crate::state::{AppState, SharedState};

/// Creates the API router with all endpoints.
pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(root))
        // Collection endpoints
        .merge(collection_router::<User>())
        .merge(collection_router::<Product>())
        .merge(collection_router::<Task>())
        // Health check
        .route("/health", get(health_check))
}

/// Routes `/{collection}` and `/{collection}/:id` to the CRUD handlers.
fn collection_router<E>() -> Router<SharedState>
where
    E: Entity,
    AppState: AsRef<ResourceRepository<E>>,
{
    let collection = format!("/{}", E::COLLECTION);
    let item = format!("/{}/:id", E::COLLECTION);

    let collection_methods = get(resource::list::<E>).post(resource::create::<E>);

    Router::new()
        .route(&collection, collection_methods.clone())
        .route(&format!("{collection}/"), collection_methods)
        .route(
            &item,
            get(resource::get::<E>)
                .put(resource::update::<E>)
                .delete(resource::delete::<E>),
        )
}

/// Welcome endpoint.
async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the CRUD API server",
        "collections": [User::COLLECTION, Product::COLLECTION, Task::COLLECTION],
    }))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, StorageKind};
    use crate::{create_app, create_state};

    async fn app(storage: StorageKind) -> Router {
        let config = Config {
            storage,
            ..Config::in_memory()
        };
        create_app(create_state(&config).await.unwrap())
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    #[tokio::test]
    async fn test_task_lifecycle() {
        for storage in [StorageKind::Memory, StorageKind::Sqlite] {
            let app = app(storage).await;

            let (status, body) = send(
                &app,
                "POST",
                "/tasks/",
                Some(json!({"title": "Buy milk", "completed": false})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(
                body,
                json!({"id": 1, "title": "Buy milk", "description": null, "completed": false})
            );

            let (status, body) = send(&app, "PUT", "/tasks/1", Some(json!({"completed": true}))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                body,
                json!({"id": 1, "title": "Buy milk", "description": null, "completed": true})
            );

            let (status, body) = send(&app, "DELETE", "/tasks/1", None).await;
            assert_eq!(status, StatusCode::NO_CONTENT);
            assert_eq!(body, Value::Null);

            let (status, body) = send(&app, "GET", "/tasks/1", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["error"]["message"], "Task not found");
            assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
        }
    }

    #[tokio::test]
    async fn test_list_empty_collection() {
        let app = app(StorageKind::Memory).await;

        let (status, body) = send(&app, "GET", "/users/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        // Same collection without the trailing slash.
        let (status, body) = send(&app, "GET", "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_missing_ids_return_404() {
        let app = app(StorageKind::Memory).await;

        let (status, body) = send(&app, "GET", "/users/5", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "User not found");

        let (status, _) = send(&app, "PUT", "/users/5", Some(json!({"name": "x"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/products/5", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let app = app(StorageKind::Memory).await;

        let (status, _) = send(&app, "POST", "/users/", Some(json!({"name": "Ada"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, body) = send(&app, "GET", "/users/", None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_product_partial_update() {
        let app = app(StorageKind::Sqlite).await;

        let (status, created) = send(
            &app,
            "POST",
            "/products/",
            Some(json!({"name": "Lamp", "price": 19.5, "description": "Desk lamp"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/products/{id}"),
            Some(json!({"price": 15.0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"id": id, "name": "Lamp", "price": 15.0, "description": "Desk lamp"})
        );

        let (_, listed) = send(&app, "GET", "/products/", None).await;
        assert_eq!(listed, json!([body]));
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let app = app(StorageKind::Memory).await;

        let (status, body) = send(&app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["collections"], json!(["users", "products", "tasks"]));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
