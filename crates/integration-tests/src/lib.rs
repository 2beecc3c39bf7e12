//! Integration tests for Chaikart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p chaikart-integration-tests
//! ```
//!
//! # Architecture
//!
//! [`StubApi`] is an in-process axum rendition of the Fake Store API, bound
//! to an ephemeral port. Each test starts its own instance, points a
//! [`Store`] at it, and drives real HTTP through the real client. The stub
//! serves fixed documents shaped like the real API's, echoes writes back
//! the way the real API does, and has behavior switches for error-path
//! tests: one turns every route into a 500, one makes login answer 200
//! with an empty token.
//!
//! [`Store`]: chaikart_storefront::store::Store

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use serde_json::{Value, json};

use chaikart_storefront::config::StoreConfig;

/// Credentials the stub accepts.
pub const VALID_USERNAME: &str = "mor_2314";
/// Password for [`VALID_USERNAME`].
pub const VALID_PASSWORD: &str = "83r5^_";
/// Token the stub issues on a successful login.
pub const STUB_TOKEN: &str = "stub-token-123";

/// Switches every route handler consults.
#[derive(Default)]
struct StubState {
    /// Answer 500 on every route.
    fail: AtomicBool,
    /// Answer a valid login with an empty token.
    empty_token: AtomicBool,
}

type SharedState = Arc<StubState>;

/// An in-process stand-in for the Fake Store API.
pub struct StubApi {
    addr: SocketAddr,
    state: SharedState,
}

impl StubApi {
    /// Start a stub server on an ephemeral port.
    ///
    /// The server task is dropped with the test runtime; no explicit
    /// shutdown is needed.
    ///
    /// # Panics
    ///
    /// Panics when the listener cannot bind.
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = listener.local_addr().expect("Failed to read stub address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Stub server error");
        });

        Self { addr, state }
    }

    /// The stub's base URL.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Build a store configuration pointing at this stub.
    ///
    /// # Panics
    ///
    /// Panics when the stub address does not form a valid URL (it always
    /// does).
    #[must_use]
    pub fn config(&self, session_file: &Path) -> StoreConfig {
        StoreConfig {
            api_base_url: self
                .base_url()
                .parse()
                .expect("stub address is a valid URL"),
            http_timeout: Duration::from_secs(5),
            session_file: session_file.to_path_buf(),
        }
    }

    /// Make every route answer 500 until reset.
    pub fn set_failing(&self, failing: bool) {
        self.state.fail.store(failing, Ordering::SeqCst);
    }

    /// Make a valid login answer 200 with an empty token until reset.
    pub fn set_empty_token(&self, empty: bool) {
        self.state.empty_token.store(empty, Ordering::SeqCst);
    }
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/categories", get(list_categories))
        .route("/products/category/{name}", get(products_in_category))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/carts", get(list_carts).post(create_cart))
        .route("/carts/user/{user_id}", get(user_carts))
        .route(
            "/carts/{id}",
            get(get_cart).put(update_cart).delete(delete_cart),
        )
        .route("/auth/login", post(login))
        .with_state(state)
}

fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "something went wrong").into_response()
}

fn failing(state: &StubState) -> bool {
    state.fail.load(Ordering::SeqCst)
}

// =============================================================================
// Fixtures
// =============================================================================

/// The products the stub serves, shaped like real API documents.
fn products_fixture() -> Value {
    json!([
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 9,
            "title": "WD 2TB Elements Portable External Hard Drive",
            "price": 64.0,
            "description": "USB 3.0 and USB 2.0 compatibility",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/61IBBVJvSDL._AC_SY879_.jpg",
            "rating": { "rate": 3.3, "count": 203 }
        }
    ])
}

fn categories_fixture() -> Value {
    json!(["electronics", "jewelery", "men's clothing", "women's clothing"])
}

fn users_fixture() -> Value {
    json!([
        {
            "id": 1,
            "email": "john@gmail.com",
            "username": "johnd",
            "password": "m38rmF$",
            "name": { "firstname": "john", "lastname": "doe" },
            "address": {
                "city": "kilcoole",
                "street": "new road",
                "number": 7682,
                "zipcode": "12926-3874",
                "geolocation": { "lat": "-37.3159", "long": "81.1496" }
            },
            "phone": "1-570-236-7033"
        },
        {
            "id": 2,
            "email": "morrison@gmail.com",
            "username": "mor_2314",
            "password": "83r5^_",
            "name": { "firstname": "david", "lastname": "morrison" }
        }
    ])
}

fn carts_fixture() -> Value {
    json!([
        {
            "id": 1,
            "userId": 1,
            "date": "2020-03-02T00:00:00.000Z",
            "products": [
                { "productId": 1, "quantity": 4 },
                { "productId": 9, "quantity": 1 }
            ]
        },
        {
            "id": 2,
            "userId": 1,
            "date": "2020-01-02T00:00:00.000Z",
            "products": [
                { "productId": 9, "quantity": 2 }
            ]
        },
        {
            "id": 3,
            "userId": 2,
            "date": "2020-03-01T00:00:00.000Z",
            "products": [
                { "productId": 1, "quantity": 1 }
            ]
        }
    ])
}

/// Pick one document out of a fixture array by its `id` field.
///
/// Unknown IDs yield `null`, which is what the real API serves for them.
fn find_by_id(collection: Value, id: i64) -> Value {
    let Value::Array(items) = collection else {
        return Value::Null;
    };
    items
        .into_iter()
        .find(|item| item.get("id").and_then(Value::as_i64) == Some(id))
        .unwrap_or(Value::Null)
}

/// Merge the submitted fields over a base document, the way the API echoes
/// stored records back complete.
fn merge_echo(mut base: Value, body: &Value) -> Value {
    if let (Some(target), Some(source)) = (base.as_object_mut(), body.as_object()) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }
    base
}

// =============================================================================
// Product Routes
// =============================================================================

async fn list_products(State(state): State<SharedState>) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(products_fixture()).into_response()
}

async fn get_product(State(state): State<SharedState>, UrlPath(id): UrlPath<i64>) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(find_by_id(products_fixture(), id)).into_response()
}

async fn list_categories(State(state): State<SharedState>) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(categories_fixture()).into_response()
}

async fn products_in_category(
    State(state): State<SharedState>,
    UrlPath(name): UrlPath<String>,
) -> Response {
    if failing(&state) {
        return server_error();
    }
    // The path segment arrives percent-decoded
    let Value::Array(products) = products_fixture() else {
        return Json(Value::Array(Vec::new())).into_response();
    };
    let filtered: Vec<Value> = products
        .into_iter()
        .filter(|product| product.get("category").and_then(Value::as_str) == Some(name.as_str()))
        .collect();
    Json(Value::Array(filtered)).into_response()
}

async fn create_product(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(merge_echo(json!({ "id": 21 }), &body)).into_response()
}

async fn update_product(
    State(state): State<SharedState>,
    UrlPath(id): UrlPath<i64>,
    Json(body): Json<Value>,
) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(merge_echo(json!({ "id": id }), &body)).into_response()
}

async fn delete_product(State(state): State<SharedState>, UrlPath(id): UrlPath<i64>) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(find_by_id(products_fixture(), id)).into_response()
}

// =============================================================================
// User Routes
// =============================================================================

async fn list_users(State(state): State<SharedState>) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(users_fixture()).into_response()
}

async fn get_user(State(state): State<SharedState>, UrlPath(id): UrlPath<i64>) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(find_by_id(users_fixture(), id)).into_response()
}

async fn create_user(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    if failing(&state) {
        return server_error();
    }
    // Signup payloads carry no name; the stored record gets a default one
    let base = json!({
        "id": 11,
        "name": { "firstname": "new", "lastname": "user" }
    });
    Json(merge_echo(base, &body)).into_response()
}

async fn update_user(
    State(state): State<SharedState>,
    UrlPath(id): UrlPath<i64>,
    Json(body): Json<Value>,
) -> Response {
    if failing(&state) {
        return server_error();
    }
    let base = json!({
        "id": id,
        "name": { "firstname": "new", "lastname": "user" }
    });
    Json(merge_echo(base, &body)).into_response()
}

async fn delete_user(State(state): State<SharedState>, UrlPath(id): UrlPath<i64>) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(find_by_id(users_fixture(), id)).into_response()
}

// =============================================================================
// Cart Routes
// =============================================================================

async fn list_carts(State(state): State<SharedState>) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(carts_fixture()).into_response()
}

async fn get_cart(State(state): State<SharedState>, UrlPath(id): UrlPath<i64>) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(find_by_id(carts_fixture(), id)).into_response()
}

async fn user_carts(State(state): State<SharedState>, UrlPath(user_id): UrlPath<i64>) -> Response {
    if failing(&state) {
        return server_error();
    }
    let Value::Array(carts) = carts_fixture() else {
        return Json(Value::Array(Vec::new())).into_response();
    };
    let owned: Vec<Value> = carts
        .into_iter()
        .filter(|cart| cart.get("userId").and_then(Value::as_i64) == Some(user_id))
        .collect();
    Json(Value::Array(owned)).into_response()
}

async fn create_cart(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(merge_echo(json!({ "id": 11 }), &body)).into_response()
}

async fn update_cart(
    State(state): State<SharedState>,
    UrlPath(id): UrlPath<i64>,
    Json(body): Json<Value>,
) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(merge_echo(json!({ "id": id }), &body)).into_response()
}

async fn delete_cart(State(state): State<SharedState>, UrlPath(id): UrlPath<i64>) -> Response {
    if failing(&state) {
        return server_error();
    }
    Json(find_by_id(carts_fixture(), id)).into_response()
}

// =============================================================================
// Auth Routes
// =============================================================================

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login(State(state): State<SharedState>, Json(body): Json<LoginBody>) -> Response {
    if failing(&state) {
        return server_error();
    }
    if body.username == VALID_USERNAME && body.password == VALID_PASSWORD {
        let token = if state.empty_token.load(Ordering::SeqCst) {
            ""
        } else {
            STUB_TOKEN
        };
        Json(json!({ "token": token })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "username or password is incorrect" })),
        )
            .into_response()
    }
}
