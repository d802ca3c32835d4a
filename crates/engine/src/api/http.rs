//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

use pantry_domain::Quantity;
use pantry_shared::{
    AddItemRequest, ErrorCode, ErrorResponse, InventoryDto, ListItemsQuery, UpdateItemRequest,
};

use crate::app::App;
use crate::use_cases::InventoryError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/items", get(list_items).post(add_item))
        .route("/api/items/{name}", put(update_item).delete(remove_item))
        .route("/api/inventory/refresh", post(refresh_inventory))
}

async fn health() -> &'static str {
    "OK"
}

/// Current display list, narrowed by `?search=`. Never touches the store.
async fn list_items(
    State(app): State<Arc<App>>,
    Query(query): Query<ListItemsQuery>,
) -> Json<InventoryDto> {
    let list = app.use_cases.inventory.display_list();
    let term = query.search.unwrap_or_default();
    Json(InventoryDto::filtered(&list, &term))
}

async fn add_item(
    State(app): State<Arc<App>>,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<InventoryDto>, ApiError> {
    let list = app
        .use_cases
        .inventory
        .add(&body.name, body.quantity.map(Quantity::new))
        .await?;
    Ok(Json(InventoryDto::from_list(&list)))
}

async fn update_item(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
    Json(body): Json<UpdateItemRequest>,
) -> Result<Json<InventoryDto>, ApiError> {
    let list = app
        .use_cases
        .inventory
        .update(&name, Quantity::new(body.quantity))
        .await?;
    Ok(Json(InventoryDto::from_list(&list)))
}

async fn remove_item(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
) -> Result<Json<InventoryDto>, ApiError> {
    let list = app.use_cases.inventory.remove(&name).await?;
    Ok(Json(InventoryDto::from_list(&list)))
}

async fn refresh_inventory(State(app): State<Arc<App>>) -> Result<Json<InventoryDto>, ApiError> {
    let list = app.use_cases.inventory.refresh().await?;
    Ok(Json(InventoryDto::from_list(&list)))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    InvalidInput(String),
    RemoteUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::InvalidInput(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::InvalidInput, msg),
            ),
            ApiError::RemoteUnavailable(msg) => {
                tracing::warn!(error = %msg, "Remote store unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(ErrorCode::RemoteUnavailable, "Remote store unavailable"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<InventoryError> for ApiError {
    fn from(e: InventoryError) -> Self {
        match e {
            InventoryError::InvalidInput(inner) => ApiError::InvalidInput(inner.to_string()),
            InventoryError::RemoteUnavailable(inner) => {
                ApiError::RemoteUnavailable(inner.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use pantry_domain::{Item, ItemName};
    use tower::ServiceExt;

    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::memory_store::InMemoryItemStore;
    use crate::infrastructure::ports::{ItemStore, MockItemStore, StoreError};

    fn item(name: &str, quantity: i64) -> Item {
        Item::new(ItemName::new(name).unwrap(), Quantity::new(quantity))
    }

    fn router_with(store: Arc<dyn ItemStore>) -> (Router, Arc<App>) {
        let app = Arc::new(App::new(store, Arc::new(SystemClock::new())));
        (routes().with_state(app.clone()), app)
    }

    async fn send(router: Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = router.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    fn quantities(value: &serde_json::Value) -> Vec<(String, i64)> {
        let mut rows: Vec<(String, i64)> = value["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| (i["name"].as_str().unwrap().to_string(), i["quantity"].as_i64().unwrap()))
            .collect();
        rows.sort();
        rows
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (router, _) = router_with(Arc::new(InMemoryItemStore::new()));
        let response = router
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn add_merges_and_returns_inventory() {
        let store = Arc::new(InMemoryItemStore::with_items([item("apple", 2)]));
        let (router, _) = router_with(store);

        let (status, body) = send(
            router,
            Method::POST,
            "/api/items",
            Some(r#"{"name":"apple","quantity":3}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(quantities(&body), vec![("apple".to_string(), 5)]);
        assert_eq!(body["items"][0]["label"], "Apple");
    }

    #[tokio::test]
    async fn add_without_quantity_adds_one() {
        let (router, _) = router_with(Arc::new(InMemoryItemStore::new()));
        let (status, body) = send(router, Method::POST, "/api/items", Some(r#"{"name":"rice"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(quantities(&body), vec![("rice".to_string(), 1)]);
    }

    #[tokio::test]
    async fn update_overwrites_by_path_name() {
        let store = Arc::new(InMemoryItemStore::with_items([item("green beans", 2)]));
        let (router, _) = router_with(store);

        let (status, body) = send(
            router,
            Method::PUT,
            "/api/items/green%20beans",
            Some(r#"{"quantity":10}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(quantities(&body), vec![("green beans".to_string(), 10)]);
    }

    #[tokio::test]
    async fn delete_of_absent_item_is_ok() {
        let store = Arc::new(InMemoryItemStore::with_items([item("banana", 1)]));
        let (router, _) = router_with(store);

        let (status, body) = send(router, Method::DELETE, "/api/items/ghost", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(quantities(&body), vec![("banana".to_string(), 1)]);
    }

    #[tokio::test]
    async fn blank_name_is_bad_request() {
        let (router, _) = router_with(Arc::new(MockItemStore::new()));
        let (status, body) = send(router, Method::POST, "/api/items", Some(r#"{"name":"  "}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn store_failure_is_bad_gateway() {
        let mut store = MockItemStore::new();
        store
            .expect_list()
            .returning(|| Err(StoreError::request("list", "connection refused")));
        let (router, _) = router_with(Arc::new(store));

        let (status, body) = send(router, Method::POST, "/api/inventory/refresh", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "REMOTE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn list_filters_display_without_remote_call() {
        let store = Arc::new(InMemoryItemStore::with_items([item("apple", 2), item("banana", 1)]));
        let (router, app) = router_with(store.clone());
        app.use_cases.inventory.refresh().await.unwrap();

        // Writes behind the synchronizer's back are invisible until refresh.
        store.put(&ItemName::new("mango").unwrap(), Quantity::new(1)).await.unwrap();

        let (status, body) = send(router.clone(), Method::GET, "/api/items?search=AN", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["search"], "AN");
        assert_eq!(quantities(&body), vec![("banana".to_string(), 1)]);

        let (_, body) = send(router, Method::GET, "/api/items", None).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn refresh_picks_up_external_writes() {
        let store = Arc::new(InMemoryItemStore::new());
        let (router, _) = router_with(store.clone());
        store.put(&ItemName::new("flour").unwrap(), Quantity::new(3)).await.unwrap();

        let (status, body) = send(router, Method::POST, "/api/inventory/refresh", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(quantities(&body), vec![("flour".to_string(), 3)]);
    }
}
