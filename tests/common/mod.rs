// Shared harness: the full router over an in-memory database, driven with oneshot.
#![allow(dead_code)]

use argon2::Params;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use daigyo::{
    bootstrap,
    config::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD},
    db, session,
    store::Hasher,
    AppState,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct Reply {
    pub status: StatusCode,
    pub cookie: Option<String>,
    pub body: Value,
}

pub async fn spawn() -> TestApp {
    let db_pool = db::connect("sqlite::memory:", 1).await.unwrap();
    db::migrate(&db_pool).await.unwrap();

    let state = AppState::new(db_pool, Hasher::new(Params::new(1024, 1, 1, None).unwrap()));
    bootstrap::seed_admin(&state.accounts, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
        .await
        .unwrap();

    let router = daigyo::app(state.clone(), session::layer(time::Duration::minutes(5), false));
    TestApp { router, state }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Reply {
        match body {
            Some(body) => self.send(method, uri, cookie, Some(("application/json", body.to_string()))).await,
            None => self.send(method, uri, cookie, None).await,
        }
    }

    /// Raw body with an explicit content type, for bodies that aren't valid JSON.
    pub async fn send(&self, method: Method, uri: &str, cookie: Option<&str>, body: Option<(&str, String)>) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some((content_type, body)) => builder.header(header::CONTENT_TYPE, content_type).body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(str::to_owned);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        Reply { status, cookie, body }
    }

    pub async fn get(&self, uri: &str, cookie: &str) -> Reply {
        self.request(Method::GET, uri, Some(cookie), None).await
    }

    pub async fn post(&self, uri: &str, cookie: &str, body: Value) -> Reply {
        self.request(Method::POST, uri, Some(cookie), Some(body)).await
    }

    pub async fn put(&self, uri: &str, cookie: &str, body: Value) -> Reply {
        self.request(Method::PUT, uri, Some(cookie), Some(body)).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Reply {
        self.request(Method::POST, "/login", None, Some(json!({ "email": email, "password": password })))
            .await
    }

    /// Cookie of a fresh administrator session.
    pub async fn admin(&self) -> String {
        let reply = self.login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD).await;
        assert_eq!(reply.body["success"], true);
        reply.cookie.unwrap()
    }

    /// Creates a member through the admin API and signs them in.
    pub async fn member(&self, email: &str) -> String {
        let admin = self.admin().await;
        let reply = self
            .post(
                "/admin/accounts",
                &admin,
                json!({ "name": "Ana", "email": email, "password": "kiai" }),
            )
            .await;
        assert_eq!(reply.body["success"], true);

        let reply = self.login(email, "kiai").await;
        assert_eq!(reply.body["role"], "member");
        reply.cookie.unwrap()
    }
}
