//! Integration test harness for FaithWear.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p faithwear-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart engine over real file storage, including restarts
//! - `storefront_routes` - HTTP routes driven through the router in-process

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use faithwear_core::{CartStorage, Catalog, MemoryStorage};
use faithwear_storefront::config::{RazorpayConfig, SentryConfig};
use faithwear_storefront::{AppState, StorefrontConfig, app};
use tower::ServiceExt;

/// Razorpay test-mode key id used by every test context.
pub const TEST_KEY_ID: &str = "rzp_test_1DP5mmOlF5G5ag";

/// Configuration pointing at `data_dir`, with Sentry disabled.
#[must_use]
pub fn test_config(data_dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        data_dir: data_dir.to_path_buf(),
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static")),
        store_name: "FaithWear Co.".to_string(),
        razorpay: RazorpayConfig {
            key_id: TEST_KEY_ID.to_string(),
        },
        sentry: SentryConfig::default(),
    }
}

/// A response collected into memory.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }

    /// Value of a response header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A storefront router plus the state behind it.
pub struct TestContext {
    pub state: AppState,
    router: Router,
    _data_dir: tempfile::TempDir,
}

impl TestContext {
    /// Storefront with an empty in-memory cart.
    ///
    /// # Panics
    ///
    /// Panics if the temporary data directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(MemoryStorage::new())
    }

    /// Storefront whose cart is restored from `storage`.
    ///
    /// # Panics
    ///
    /// Panics if the temporary data directory cannot be created.
    #[must_use]
    pub fn with_storage(storage: impl CartStorage + Send + 'static) -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let state = AppState::new(
            test_config(data_dir.path()),
            Catalog::default(),
            Box::new(storage),
        );
        Self {
            router: app(state.clone()),
            state,
            _data_dir: data_dir,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Send a form-encoded POST request.
    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Send an arbitrary request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
