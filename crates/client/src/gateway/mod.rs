//! Remote data gateway.
//!
//! Authenticated HTTP calls to the Aurelia backend, each with a defined
//! behavior when the network call fails:
//!
//! - a non-success HTTP status becomes [`ApiError::Rejected`] carrying the
//!   status code and the server-provided message - an authoritative "no"
//!   that is never papered over;
//! - a transport failure (no response at all) triggers the operation's
//!   fallback where one is defined: the static catalog for product reads,
//!   the offline order log for order history, a derived mock session for
//!   login. Operations without a meaningful fallback propagate the
//!   transport error unchanged.
//!
//! Product reads are cached via `moka` (5-minute TTL).

pub mod catalog;

mod cache;

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use moka::future::Cache;
use reqwest::Method;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use aurelia_core::{CartItem, Order, OrderId, PaymentInfo, Product, ProductId, UserProfile, UserSnapshot};

use crate::config::ClientConfig;
use crate::store::LocalStore;

use cache::CacheValue;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by gateway operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or a generic one if the body had none.
        message: String,
    },

    /// A response body could not be decoded.
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The requested resource does not exist (locally or remotely).
    #[error("not found: {0}")]
    NotFound(String),

    /// The local fallback store failed.
    #[error("local store error: {0}")]
    Store(#[from] crate::store::StoreError),
}

impl ApiError {
    /// Whether this error is a transport-level failure, i.e. the class of
    /// error that fallbacks are allowed to recover from.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

// =============================================================================
// Wire types
// =============================================================================

/// A provider-supplied identity used for social login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialUser {
    /// Provider name (`google`, `facebook`).
    pub provider: String,
    /// Provider-side user id, when known.
    pub provider_id: Option<String>,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Avatar URL, when known.
    pub avatar: Option<String>,
    /// Provider access token, when the provider handed one out.
    pub access_token: Option<String>,
}

/// Result of an authentication exchange.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The session token, if the backend issued one.
    pub token: Option<String>,
    /// The profile returned alongside the token, if any.
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, alias = "profile")]
    user: Option<UserProfile>,
}

impl From<AuthResponse> for AuthSession {
    fn from(r: AuthResponse) -> Self {
        Self {
            token: r.token,
            profile: r.user,
        }
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SocialLoginRequest<'a> {
    provider: &'a str,
    access_token: &'a str,
    user_data: SocialUserData<'a>,
}

#[derive(Serialize)]
struct SocialUserData<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderRequest<'a> {
    items: &'a [CartItem],
    payment: &'a PaymentInfo,
    items_price: Decimal,
    tax_price: Decimal,
    shipping_price: Decimal,
    delivery_fee: Decimal,
    total_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_email: Option<&'a str>,
}

/// Payment confirmation forwarded to `PUT /orders/:id/pay`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaymentResult {
    /// Processor-side transaction id.
    #[serde(default)]
    pub id: String,
    /// Processor status label.
    #[serde(default)]
    pub status: String,
    /// Processor timestamp.
    #[serde(default)]
    pub update_time: String,
    /// Payer email.
    #[serde(default)]
    pub email_address: String,
}

/// An order as the backend reports it.
///
/// Every field is optional: the normalization step prefers these values but
/// fills any missing one from the locally computed order, never dropping a
/// field silently.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOrder {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, alias = "orderItems")]
    pub items: Option<Vec<RemoteOrderItem>>,
    #[serde(default, alias = "itemsPrice")]
    pub subtotal: Option<Decimal>,
    #[serde(default, alias = "shippingPrice")]
    pub shipping: Option<Decimal>,
    #[serde(default)]
    pub delivery_fee: Option<Decimal>,
    #[serde(default)]
    pub payment: Option<PaymentInfo>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default, alias = "totalPrice")]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub customer_email: Option<String>,
}

/// A line item as the backend reports it (`orderItems` shape).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOrderItem {
    #[serde(default, alias = "productId", alias = "id")]
    pub product: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
    #[serde(default, alias = "quantity")]
    pub qty: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
}

impl RemoteOrderItem {
    fn into_cart_item(self) -> CartItem {
        CartItem {
            product_id: ProductId::new(self.product.unwrap_or_default()),
            name: self.name.unwrap_or_else(|| "Item".to_owned()),
            price: self.price.unwrap_or(Decimal::ZERO),
            image_url: self.image.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            quantity: self.qty.unwrap_or(1).max(1),
        }
    }
}

impl RemoteOrder {
    /// Normalize into a full [`Order`], preferring remote values and filling
    /// any missing field from `local` (the locally computed order), when one
    /// exists.
    ///
    /// The total is re-checked against the sum of its components; a
    /// mismatching remote total is replaced by the recomputed sum.
    #[must_use]
    pub fn into_order(self, local: Option<&Order>) -> Order {
        let items: Vec<CartItem> = match self.items {
            Some(remote_items) => remote_items
                .into_iter()
                .map(RemoteOrderItem::into_cart_item)
                .collect(),
            None => local.map(|o| o.items.clone()).unwrap_or_default(),
        };

        let subtotal = self
            .subtotal
            .or_else(|| local.map(|o| o.subtotal))
            .unwrap_or_else(|| items.iter().map(CartItem::line_total).sum());
        let shipping = self
            .shipping
            .or_else(|| local.map(|o| o.shipping))
            .unwrap_or(Decimal::ZERO);
        let delivery_fee = self
            .delivery_fee
            .or_else(|| local.map(|o| o.delivery_fee))
            .unwrap_or(Decimal::ZERO);

        let payment = self
            .payment
            .or_else(|| self.payment_method.map(PaymentInfo::new))
            .or_else(|| local.map(|o| o.payment.clone()))
            .unwrap_or_default();

        let computed_total = subtotal + shipping + delivery_fee;
        let total = self
            .total
            .or_else(|| local.map(|o| o.total))
            .unwrap_or(computed_total);
        let total = if total == computed_total {
            total
        } else {
            warn!(%total, %computed_total, "order total mismatch, using recomputed sum");
            computed_total
        };

        Order {
            id: self
                .id
                .map(OrderId::new)
                .or_else(|| local.map(|o| o.id.clone()))
                .unwrap_or_else(|| OrderId::new(format!("o{}", Utc::now().timestamp_millis()))),
            date: self
                .date
                .or_else(|| local.map(|o| o.date))
                .unwrap_or_else(Utc::now),
            items,
            subtotal,
            shipping,
            delivery_fee,
            payment,
            total,
            customer_email: self
                .customer_email
                .or_else(|| local.and_then(|o| o.customer_email.clone())),
        }
    }
}

// =============================================================================
// ApiGateway
// =============================================================================

/// Client for the Aurelia backend API.
///
/// Cheaply cloneable; all clones share the HTTP client, the bearer token,
/// and the catalog cache.
#[derive(Clone)]
pub struct ApiGateway {
    inner: Arc<ApiGatewayInner>,
}

struct ApiGatewayInner {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
    store: LocalStore,
    cache: Cache<String, CacheValue>,
}

impl ApiGateway {
    /// Create a new gateway.
    ///
    /// `store` backs the offline fallbacks (order log) and is shared with
    /// the rest of the client.
    #[must_use]
    pub fn new(config: &ClientConfig, store: LocalStore) -> Self {
        let cache = Cache::builder()
            .max_capacity(100)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(ApiGatewayInner {
                client: reqwest::Client::new(),
                base_url: config.api_url.clone(),
                token: RwLock::new(None),
                store,
                cache,
            }),
        }
    }

    /// The bearer token currently attached to requests, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace (or clear) the bearer token. The session manager is the only
    /// caller.
    pub fn set_token(&self, token: Option<String>) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Send a request, attaching the bearer token when present, and decode
    /// the JSON response body.
    ///
    /// Non-success statuses become [`ApiError::Rejected`] carrying the
    /// server's `message` field when the body has one.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let mut request = self.inner.client.request(method, self.url(path));
        if let Some(token) = self.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v.get("message")?.as_str().map(ToOwned::to_owned))
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Get the product listing.
    ///
    /// Falls back to the built-in catalog when the backend is unreachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the request or the response
    /// cannot be decoded.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let cache_key = "products".to_owned();
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for products");
            return Ok(products);
        }

        let result: Result<serde_json::Value, ApiError> =
            self.send(Method::GET, "/products", None).await;
        let products = match result {
            Ok(value) => parse_products(value)?,
            Err(err) if err.is_transport() => {
                warn!(error = %err, "backend unreachable, serving static catalog");
                return Ok(catalog::products());
            }
            Err(err) => return Err(err),
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Get a single product by id.
    ///
    /// Falls back to the built-in catalog when the backend is unreachable;
    /// returns [`ApiError::NotFound`] if the product is unknown there too.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the request, the response
    /// cannot be decoded, or the product does not exist.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn fetch_product_by_id(&self, id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{id}");
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for product");
            return Ok(*product);
        }

        let result: Result<serde_json::Value, ApiError> = self
            .send(Method::GET, &format!("/products/{id}"), None)
            .await;
        let product = match result {
            Ok(value) => parse_product(value)?,
            Err(err) if err.is_transport() => {
                warn!(error = %err, "backend unreachable, serving static product");
                return catalog::find(id)
                    .ok_or_else(|| ApiError::NotFound(format!("product {id}")));
            }
            Err(err) => return Err(err),
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Log in with an identifier (email) and password.
    ///
    /// When the backend is unreachable, derives a mock offline session: the
    /// token is the base64-encoded identifier and the profile name is the
    /// email's local part. A rejected login (bad credentials) is propagated
    /// unchanged - there is no local credential check.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the credentials or the
    /// response cannot be decoded.
    #[instrument(skip(self, password), fields(identifier = %identifier))]
    pub async fn login(&self, identifier: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = serde_json::to_value(LoginRequest {
            identifier,
            password,
        })?;
        let result: Result<AuthResponse, ApiError> =
            self.send(Method::POST, "/auth/login", Some(body)).await;

        match result {
            Ok(response) => Ok(response.into()),
            Err(err) if err.is_transport() => {
                warn!(error = %err, "backend unreachable, deriving offline session");
                Ok(offline_session(identifier))
            }
            Err(err) => Err(err),
        }
    }

    /// Create an account. No offline fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the registration (duplicate
    /// email, validation failure) or cannot be reached.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ApiError> {
        let body = serde_json::to_value(RegisterRequest {
            name,
            email,
            password,
        })?;
        let response: AuthResponse = self.send(Method::POST, "/auth/register", Some(body)).await?;
        Ok(response.into())
    }

    /// Exchange a provider-supplied identity for a session token.
    ///
    /// When the backend is unreachable, simulates the exchange locally using
    /// the provider token (or a time-based one).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the identity or the response
    /// cannot be decoded.
    #[instrument(skip(self, user), fields(provider = %user.provider, email = %user.email))]
    pub async fn social_login(&self, user: &SocialUser) -> Result<AuthSession, ApiError> {
        let body = serde_json::to_value(SocialLoginRequest {
            provider: &user.provider,
            access_token: user.access_token.as_deref().unwrap_or("mock_access_token"),
            user_data: SocialUserData {
                id: user.provider_id.as_deref(),
                name: &user.name,
                email: &user.email,
                avatar: user.avatar.as_deref(),
            },
        })?;
        let result: Result<AuthResponse, ApiError> = self
            .send(Method::POST, "/auth/social-login", Some(body))
            .await;

        match result {
            Ok(response) => Ok(response.into()),
            Err(err) if err.is_transport() => {
                warn!(error = %err, "backend unreachable, simulating social login");
                let token = user
                    .access_token
                    .clone()
                    .unwrap_or_else(|| format!("social_{}", Utc::now().timestamp_millis()));
                Ok(AuthSession {
                    token: Some(token),
                    profile: Some(UserProfile {
                        id: None,
                        name: user.name.clone(),
                        email: user.email.clone(),
                        shipping_address: None,
                        billing_address: None,
                    }),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Fetch the profile for the current bearer token.
    ///
    /// When the backend is unreachable, attempts to decode the token as a
    /// base64 email (the offline-login format); an undecodable token
    /// propagates the transport error - restoring from it must fail closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected, the response cannot be
    /// decoded, or no offline profile can be derived.
    #[instrument(skip(self))]
    pub async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let result: Result<UserProfile, ApiError> =
            self.send(Method::GET, "/auth/profile", None).await;

        match result {
            Ok(profile) => Ok(profile),
            Err(err) if err.is_transport() => match self.token().and_then(decode_offline_token) {
                Some(profile) => {
                    warn!("backend unreachable, using offline-derived profile");
                    Ok(profile)
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    /// Change the current user's password. No fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if the current password is wrong, the token is
    /// rejected, or the backend cannot be reached.
    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_value(ChangePasswordRequest {
            current_password,
            new_password,
        })?;
        let _: serde_json::Value = self
            .send(Method::PUT, "/auth/change-password", Some(body))
            .await?;
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Create an order remotely.
    ///
    /// Transport errors propagate unchanged: the order placement workflow
    /// owns the durable local fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the order, cannot be
    /// reached, or the response cannot be decoded.
    #[instrument(skip(self, draft), fields(total = %draft.total))]
    pub async fn create_order(&self, draft: &Order) -> Result<RemoteOrder, ApiError> {
        let body = serde_json::to_value(CreateOrderRequest {
            items: &draft.items,
            payment: &draft.payment,
            items_price: draft.subtotal,
            tax_price: Decimal::ZERO,
            shipping_price: draft.shipping,
            delivery_fee: draft.delivery_fee,
            total_price: draft.total,
            customer_email: draft.customer_email.as_deref(),
        })?;
        let value: serde_json::Value = self.send(Method::POST, "/orders", Some(body)).await?;
        Ok(parse_order(value)?)
    }

    /// Fetch the current user's order history.
    ///
    /// Falls back to the offline order log when the backend is unreachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the request, the response
    /// cannot be decoded, or the offline log cannot be read.
    #[instrument(skip(self))]
    pub async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        let result: Result<serde_json::Value, ApiError> =
            self.send(Method::GET, "/orders", None).await;

        match result {
            Ok(value) => {
                let remote = parse_orders(value)?;
                Ok(remote.into_iter().map(|o| o.into_order(None)).collect())
            }
            Err(err) if err.is_transport() => {
                warn!(error = %err, "backend unreachable, reading offline order log");
                Ok(self.inner.store.local_orders()?)
            }
            Err(err) => Err(err),
        }
    }

    /// Fetch a single order. Propagates every error unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist, the token is rejected,
    /// or the backend cannot be reached.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn fetch_order_by_id(&self, id: &OrderId) -> Result<Order, ApiError> {
        let value: serde_json::Value = self
            .send(Method::GET, &format!("/orders/{id}"), None)
            .await?;
        Ok(parse_order(value)?.into_order(None))
    }

    /// Mark an order as paid. Propagates every error unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist, the token is rejected,
    /// or the backend cannot be reached.
    #[instrument(skip(self, result), fields(id = %id))]
    pub async fn update_order_payment(
        &self,
        id: &OrderId,
        result: &PaymentResult,
    ) -> Result<Order, ApiError> {
        let body = serde_json::to_value(result)?;
        let value: serde_json::Value = self
            .send(Method::PUT, &format!("/orders/{id}/pay"), Some(body))
            .await?;
        Ok(parse_order(value)?.into_order(None))
    }

    // =========================================================================
    // Snapshot mirror
    // =========================================================================

    /// Mirror a user snapshot to the backend (best-effort; the caller logs
    /// failures and keeps the local copy authoritative).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write or cannot be
    /// reached.
    #[instrument(skip(self, snapshot), fields(user = %user_key))]
    pub async fn persist_snapshot(
        &self,
        user_key: &str,
        snapshot: &UserSnapshot,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_value(snapshot)?;
        let _: serde_json::Value = self
            .send(Method::PUT, &format!("/users/{user_key}/data"), Some(body))
            .await?;
        Ok(())
    }
}

// =============================================================================
// Response parsing
// =============================================================================

/// The backend wraps listings (`{"products": [...]}`) but older deployments
/// returned bare arrays; accept both.
fn parse_products(value: serde_json::Value) -> Result<Vec<Product>, serde_json::Error> {
    match value {
        serde_json::Value::Object(mut map) => match map.remove("products") {
            Some(products) => serde_json::from_value(products),
            None => serde_json::from_value(serde_json::Value::Object(map)),
        },
        other => serde_json::from_value(other),
    }
}

fn parse_product(value: serde_json::Value) -> Result<Product, serde_json::Error> {
    match value {
        serde_json::Value::Object(mut map) => match map.remove("product") {
            Some(product) => serde_json::from_value(product),
            None => serde_json::from_value(serde_json::Value::Object(map)),
        },
        other => serde_json::from_value(other),
    }
}

fn parse_orders(value: serde_json::Value) -> Result<Vec<RemoteOrder>, serde_json::Error> {
    match value {
        serde_json::Value::Object(mut map) => match map.remove("orders") {
            Some(orders) => serde_json::from_value(orders),
            None => serde_json::from_value(serde_json::Value::Object(map)),
        },
        other => serde_json::from_value(other),
    }
}

fn parse_order(value: serde_json::Value) -> Result<RemoteOrder, serde_json::Error> {
    match value {
        serde_json::Value::Object(mut map) => match map.remove("order") {
            Some(order) => serde_json::from_value(order),
            None => serde_json::from_value(serde_json::Value::Object(map)),
        },
        other => serde_json::from_value(other),
    }
}

/// Derive the mock session used when logging in with the backend down.
fn offline_session(identifier: &str) -> AuthSession {
    let name = aurelia_core::Email::parse(identifier)
        .map_or_else(|_| identifier.to_owned(), |e| e.local_part().to_owned());
    AuthSession {
        token: Some(BASE64.encode(identifier)),
        profile: Some(UserProfile {
            id: None,
            name,
            email: identifier.to_owned(),
            shipping_address: None,
            billing_address: None,
        }),
    }
}

/// Decode an offline-login token (base64 email) back into a profile.
fn decode_offline_token(token: String) -> Option<UserProfile> {
    let bytes = BASE64.decode(token).ok()?;
    let email = String::from_utf8(bytes).ok()?;
    let parsed = aurelia_core::Email::parse(&email).ok()?;
    Some(UserProfile {
        id: None,
        name: parsed.local_part().to_owned(),
        email,
        shipping_address: None,
        billing_address: None,
    })
}
