//! Test harness: an in-process mock of the Aurelia backend.
//!
//! [`TestBackend`] serves the same wire contract the real backend speaks
//! (`/auth/*`, `/products`, `/orders`, the snapshot mirror) on an ephemeral
//! port, backed by an in-memory database the tests can seed and inspect.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

type Db = Arc<Mutex<MockDb>>;

#[derive(Debug, Clone)]
struct MockUser {
    name: String,
    email: String,
    password: String,
    token: String,
}

#[derive(Debug, Default)]
struct MockDb {
    /// Users keyed by email.
    users: HashMap<String, MockUser>,
    /// Orders in creation order, in wire shape.
    orders: Vec<Value>,
    /// Mirrored snapshots keyed by user key.
    snapshots: HashMap<String, Value>,
    order_seq: u32,
    /// When set, order creation is rejected with this message.
    order_rejection: Option<String>,
}

fn lock(db: &Db) -> MutexGuard<'_, MockDb> {
    db.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Install a subscriber so `RUST_LOG` surfaces client logs while tests run.
/// Later calls are no-ops.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aurelia_client=warn".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// A running mock backend.
pub struct TestBackend {
    /// Base API URL (`http://127.0.0.1:<port>/api`).
    pub url: String,
    db: Db,
}

impl TestBackend {
    /// Bind an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        init_tracing();
        let db: Db = Arc::new(Mutex::new(MockDb::default()));
        let app = router(db.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });

        Self {
            url: format!("http://{addr}/api"),
            db,
        }
    }

    /// Seed a registered user.
    pub fn seed_user(&self, name: &str, email: &str, password: &str) {
        lock(&self.db).users.insert(
            email.to_owned(),
            MockUser {
                name: name.to_owned(),
                email: email.to_owned(),
                password: password.to_owned(),
                token: format!("tok-{email}"),
            },
        );
    }

    /// Number of orders the backend has accepted.
    #[must_use]
    pub fn order_count(&self) -> usize {
        lock(&self.db).orders.len()
    }

    /// Make order creation fail with `400` and the given message.
    pub fn reject_orders(&self, message: &str) {
        lock(&self.db).order_rejection = Some(message.to_owned());
    }

    /// The snapshot last mirrored for `user_key`, if any.
    #[must_use]
    pub fn snapshot_for(&self, user_key: &str) -> Option<Value> {
        lock(&self.db).snapshots.get(user_key).cloned()
    }
}

fn router(db: Db) -> Router {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/social-login", post(social_login))
        .route("/auth/profile", get(profile))
        .route("/auth/change-password", put(change_password))
        .route("/products", get(products))
        .route("/products/{id}", get(product_by_id))
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/{id}", get(order_by_id))
        .route("/orders/{id}/pay", put(pay_order))
        .route("/users/{key}/data", put(put_snapshot))
        .with_state(db);
    Router::new().nest("/api", api)
}

fn rejection(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

fn user_json(user: &MockUser) -> Value {
    json!({ "name": user.name, "email": user.email })
}

fn bearer_user(db: &MockDb, headers: &HeaderMap) -> Option<MockUser> {
    let token = headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    db.users.values().find(|u| u.token == token).cloned()
}

// =============================================================================
// Auth
// =============================================================================

async fn login(State(db): State<Db>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let identifier = body["identifier"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let db = lock(&db);
    match db.users.get(identifier) {
        Some(user) if user.password == password => (
            StatusCode::OK,
            Json(json!({ "token": user.token, "user": user_json(user) })),
        ),
        _ => rejection(StatusCode::UNAUTHORIZED, "Invalid email or password"),
    }
}

async fn register(State(db): State<Db>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let name = body["name"].as_str().unwrap_or_default().to_owned();
    let email = body["email"].as_str().unwrap_or_default().to_owned();
    let password = body["password"].as_str().unwrap_or_default().to_owned();

    let mut db = lock(&db);
    if db.users.contains_key(&email) {
        return rejection(StatusCode::CONFLICT, "User already exists");
    }
    let user = MockUser {
        name,
        email: email.clone(),
        password,
        token: format!("tok-{email}"),
    };
    let response = json!({ "token": user.token, "user": user_json(&user) });
    db.users.insert(email, user);
    (StatusCode::CREATED, Json(response))
}

async fn social_login(State(db): State<Db>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let name = body["userData"]["name"].as_str().unwrap_or_default().to_owned();
    let email = body["userData"]["email"].as_str().unwrap_or_default().to_owned();
    let token = body["accessToken"].as_str().unwrap_or_default().to_owned();

    let mut db = lock(&db);
    let user = MockUser {
        name,
        email: email.clone(),
        password: String::new(),
        token,
    };
    let response = json!({ "token": user.token, "user": user_json(&user) });
    db.users.insert(email, user);
    (StatusCode::OK, Json(response))
}

async fn profile(State(db): State<Db>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let db = lock(&db);
    match bearer_user(&db, &headers) {
        Some(user) => (StatusCode::OK, Json(user_json(&user))),
        None => rejection(StatusCode::UNAUTHORIZED, "Not authorized"),
    }
}

async fn change_password(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let current = body["currentPassword"].as_str().unwrap_or_default();
    let new = body["newPassword"].as_str().unwrap_or_default().to_owned();

    let mut db = lock(&db);
    let Some(user) = bearer_user(&db, &headers) else {
        return rejection(StatusCode::UNAUTHORIZED, "Not authorized");
    };
    if user.password != current {
        return rejection(StatusCode::BAD_REQUEST, "Current password is incorrect");
    }
    if let Some(stored) = db.users.get_mut(&user.email) {
        stored.password = new;
    }
    (StatusCode::OK, Json(json!({ "message": "Password updated" })))
}

// =============================================================================
// Products
// =============================================================================

fn server_products() -> Value {
    json!([
        {
            "id": "p1",
            "name": "Seraphina Necklace (Server Edition)",
            "price": 450,
            "category": "Necklaces",
            "imageUrl": "/images/Necklace/necklace.jpg"
        },
        {
            "id": "p7",
            "name": "Nova Pendant",
            "price": 520,
            "category": "Necklaces",
            "imageUrl": "/images/Necklace/pendant.jpg"
        }
    ])
}

async fn products() -> Json<Value> {
    Json(json!({ "products": server_products() }))
}

async fn product_by_id(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    let found = server_products()
        .as_array()
        .and_then(|list| list.iter().find(|p| p["id"] == id.as_str()).cloned());
    match found {
        Some(product) => (StatusCode::OK, Json(json!({ "product": product }))),
        None => rejection(StatusCode::NOT_FOUND, "Product not found"),
    }
}

// =============================================================================
// Orders
// =============================================================================

async fn create_order(State(db): State<Db>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut db = lock(&db);
    if let Some(message) = db.order_rejection.clone() {
        return rejection(StatusCode::BAD_REQUEST, &message);
    }
    db.order_seq += 1;
    let order = json!({
        "id": format!("srv-{}", db.order_seq),
        "orderItems": body["items"],
        "itemsPrice": body["itemsPrice"],
        "shippingPrice": body["shippingPrice"],
        "deliveryFee": body["deliveryFee"],
        "totalPrice": body["totalPrice"],
        "payment": body["payment"],
        "customerEmail": body["customerEmail"],
    });
    db.orders.push(order.clone());
    (StatusCode::CREATED, Json(json!({ "order": order })))
}

async fn list_orders(State(db): State<Db>) -> Json<Value> {
    Json(json!({ "orders": lock(&db).orders }))
}

async fn order_by_id(State(db): State<Db>, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    let db = lock(&db);
    match db.orders.iter().find(|o| o["id"] == id.as_str()) {
        Some(order) => (StatusCode::OK, Json(json!({ "order": order }))),
        None => rejection(StatusCode::NOT_FOUND, "Order not found"),
    }
}

async fn pay_order(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(result): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut db = lock(&db);
    match db.orders.iter_mut().find(|o| o["id"] == id.as_str()) {
        Some(order) => {
            order["isPaid"] = json!(true);
            order["paymentResult"] = result;
            (StatusCode::OK, Json(json!({ "order": order.clone() })))
        }
        None => rejection(StatusCode::NOT_FOUND, "Order not found"),
    }
}

// =============================================================================
// Snapshot mirror
// =============================================================================

async fn put_snapshot(
    State(db): State<Db>,
    Path(key): Path<String>,
    Json(snapshot): Json<Value>,
) -> Json<Value> {
    lock(&db).snapshots.insert(key, snapshot);
    Json(json!({ "message": "ok" }))
}
