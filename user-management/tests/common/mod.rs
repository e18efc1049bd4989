#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;
use user_management::account::models::AccountStatus;
use user_management::account::models::EmailAddress;
use user_management::account::models::NewAccount;
use user_management::account::models::Role;
use user_management::account::models::Username;
use user_management::account::ports::AccountRepository;
use user_management::account::service::AuthService;
use user_management::inbound::http::router::create_router;
use user_management::inbound::http::router::AppState;
use user_management::outbound::repositories::InMemoryStore;
use user_management::subscription_type::service::SubscriptionTypeService;
use user_management::user::service::UserService;
use user_management::user_type::service::UserTypeService;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_PASSWORD: &str = "Secret123!";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryStore>,
    pub api_client: reqwest::Client,
    pub token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::new());
        let authenticator = Arc::new(Authenticator::from_parts(
            fast_hasher(),
            token_issuer(),
        ));

        let state = AppState {
            auth_service: Arc::new(AuthService::new(Arc::clone(&store), authenticator)),
            user_service: Arc::new(UserService::new(Arc::clone(&store))),
            user_type_service: Arc::new(UserTypeService::new(Arc::clone(&store))),
            subscription_type_service: Arc::new(SubscriptionTypeService::new(Arc::clone(
                &store,
            ))),
        };
        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            api_client: reqwest::Client::new(),
            token_issuer: token_issuer(),
        }
    }

    /// Store an account directly, bypassing registration so any role can be used
    pub async fn seed_account(&self, username: &str, role: Role) {
        let password_hash = fast_hasher()
            .hash(TEST_PASSWORD)
            .expect("Failed to hash password");

        AccountRepository::save(
            self.store.as_ref(),
            NewAccount {
                username: Username::new(username.to_string()).unwrap(),
                email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
                password_hash,
                role,
                status: AccountStatus::active(),
            },
        )
        .await
        .expect("Failed to seed account");
    }

    /// Seed an account with `role` and log it in, returning its access token
    pub async fn token_for(&self, username: &str, role: Role) -> String {
        self.seed_account(username, role).await;

        let body = self.login(username, TEST_PASSWORD).await;
        body["accessToken"]
            .as_str()
            .expect("Login response without access token")
            .to_string()
    }

    /// Register through the API and return the parsed response body
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Value {
        self.post("/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response")
    }

    /// Log in through the API and return the parsed response body
    pub async fn login(&self, username_or_email: &str, password: &str) -> Value {
        self.post("/auth/login")
            .json(&json!({
                "usernameOrEmail": username_or_email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}

pub fn token_issuer() -> TokenIssuer {
    TokenIssuer::new(TEST_SECRET, Duration::hours(24), Duration::days(7))
}

/// Minimal Argon2 cost so tests do not spend seconds hashing
pub fn fast_hasher() -> PasswordHasher {
    PasswordHasher::with_params(1024, 1, 1).expect("Invalid Argon2 parameters")
}
