//! Journal service routes

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::{
    auth::{self, AuthUser},
    error::{ApiError, ApiResult},
    middleware::auth_middleware,
    models::{
        CredentialsRequest, DateItem, DatesResponse, LogQuery, LogResponse, MessageResponse,
        NewEntry, NewEntryRequest, NewUser,
        entry::{self, MAX_TITLE_LEN},
    },
    password,
    state::AppState,
};

/// Create the router for the journal service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/savetoday", post(save_today))
        .route("/api/dates", get(list_dates))
        .route("/api/logs", get(get_log))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "journal-service"
    }))
}

/// Treat an absent field like an empty one
fn required(value: Option<String>, field: &'static str) -> ApiResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingField(field))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let username = required(payload.username, "Username")?;
    let password = required(payload.password, "Password")?;

    info!("Registration request for user: {}", username);

    let new_user = NewUser {
        password_hash: password::hash_password(&password)?,
        username,
    };
    let user = state.users.create(&new_user).await?;

    Ok(Json(MessageResponse::new(format!(
        "User {} created successfully",
        user.username
    ))))
}

/// Check a username/password pair; no session is created
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    info!("Login attempt for user: {}", username);

    auth::verify_credentials(state.users.as_ref(), &username, &password).await?;

    Ok(Json(MessageResponse::new("Login Successful")))
}

/// Store a new journal entry for the authenticated user
pub async fn save_today(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewEntryRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let title = required(payload.title, "Title")?;
    let body = required(payload.body, "Body")?;

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ApiError::TitleTooLong);
    }

    let new_entry = NewEntry {
        owner_id: user.id,
        title,
        body,
        created_at: Utc::now(),
    };
    let entry = state.entries.create(&new_entry).await?;

    info!("User {} posted entry {}", user.username, entry.id);

    Ok(Json(MessageResponse::new(format!(
        "{} posted successfully",
        entry.title
    ))))
}

/// List the formatted creation dates of the authenticated user's entries
pub async fn list_dates(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<DatesResponse>> {
    let entries = state.entries.list_by_owner(user.id).await?;

    let response = entries
        .iter()
        .map(|entry| DateItem {
            day: entry.formatted_date(),
        })
        .collect();

    Ok(Json(DatesResponse { response }))
}

/// Fetch the entry whose formatted creation date equals `date` exactly
pub async fn get_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<LogQuery>,
) -> ApiResult<Json<LogResponse>> {
    let entries = state.entries.list_by_owner(user.id).await?;
    let mut by_date = entry::index_by_date(entries);

    let entry = query
        .date
        .and_then(|date| by_date.remove(&date))
        .ok_or(ApiError::EntryNotFound)?;

    Ok(Json(LogResponse {
        response: entry.body,
        title: entry.title,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use base64::{Engine, engine::general_purpose::STANDARD as B64};
    use chrono::TimeZone;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::repositories::{
        JournalStore,
        memory::{MemoryJournalStore, MemoryUserStore},
    };

    struct TestApp {
        router: Router,
        entries: Arc<MemoryJournalStore>,
    }

    fn test_app() -> TestApp {
        let entries = Arc::new(MemoryJournalStore::default());
        let state = AppState::new(Arc::new(MemoryUserStore::default()), entries.clone());
        TestApp {
            router: create_router(state),
            entries,
        }
    }

    fn credential(username: &str, password: &str) -> String {
        B64.encode(format!("{}:{}", username, password))
    }

    async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        auth: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn register(router: &Router, username: &str, password: &str) -> (StatusCode, Value) {
        send(
            router,
            "POST",
            "/api/register",
            None,
            Some(json!({"username": username, "password": password})),
        )
        .await
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app();
        let (status, body) = send(&app.router, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_register_twice_fails_with_duplicate_user() {
        let app = test_app();

        let (status, body) = register(&app.router, "alice", "pw1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "User alice created successfully");

        let (status, body) = register(&app.router, "alice", "other").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User alice is already registered");
    }

    #[tokio::test]
    async fn test_register_requires_username_then_password() {
        let app = test_app();

        let (status, body) = send(
            &app.router,
            "POST",
            "/api/register",
            None,
            Some(json!({"password": "pw1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Username is required");

        let (status, body) = register(&app.router, "", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Username is required");

        let (status, body) = register(&app.router, "alice", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Password is required");
    }

    #[tokio::test]
    async fn test_login() {
        let app = test_app();
        register(&app.router, "alice", "pw1").await;

        let login = |username: &'static str, password: &'static str| {
            let router = app.router.clone();
            async move {
                send(
                    &router,
                    "POST",
                    "/api/login",
                    None,
                    Some(json!({"username": username, "password": password})),
                )
                .await
            }
        };

        let (status, body) = login("alice", "pw1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Login Successful");

        for (username, password) in [("alice", "pw2"), ("alice", ""), ("bob", "pw1")] {
            let (status, body) = login(username, password).await;
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(body["error"], "Invalid credentials");
        }
    }

    #[tokio::test]
    async fn test_entry_round_trip() {
        let app = test_app();
        register(&app.router, "alice", "pw1").await;
        let auth = credential("alice", "pw1");

        let (status, body) = send(
            &app.router,
            "POST",
            "/api/savetoday",
            Some(&auth),
            Some(json!({"title": "Day1", "body": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Day1 posted successfully");

        let (status, body) = send(&app.router, "GET", "/api/dates", Some(&auth), None).await;
        assert_eq!(status, StatusCode::OK);
        let days = body["response"].as_array().unwrap();
        assert_eq!(days.len(), 1);
        let day = days[0]["day"].as_str().unwrap().to_string();
        assert_eq!(day.len(), "dd-mm-yy-HH:MM:SS".len());

        let (status, body) = send(
            &app.router,
            "GET",
            &format!("/api/logs?date={}", day),
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"response": "hello", "title": "Day1"}));
    }

    #[tokio::test]
    async fn test_logs_require_exact_timestamp() {
        let app = test_app();
        register(&app.router, "alice", "pw1").await;
        let auth = credential("alice", "pw1");

        app.entries
            .create(&NewEntry {
                owner_id: 1,
                title: "Morning".to_string(),
                body: "coffee".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 5, 4, 7, 15, 30).unwrap(),
            })
            .await
            .unwrap();

        for uri in [
            "/api/logs?date=04-05-24",
            "/api/logs?date=04-05-24-07:15:31",
            "/api/logs",
        ] {
            let (status, body) = send(&app.router, "GET", uri, Some(&auth), None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
            assert_eq!(body["error"], "No post found for the specified date");
        }

        let (status, body) = send(
            &app.router,
            "GET",
            "/api/logs?date=04-05-24-07:15:30",
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Morning");
        assert_eq!(body["response"], "coffee");
    }

    #[tokio::test]
    async fn test_dates_are_listed_in_insertion_order_per_user() {
        let app = test_app();
        register(&app.router, "alice", "pw1").await;
        register(&app.router, "bob", "pw2").await;

        for (owner_id, hour) in [(1, 10), (2, 11), (1, 9)] {
            app.entries
                .create(&NewEntry {
                    owner_id,
                    title: format!("at {}", hour),
                    body: "text".to_string(),
                    created_at: Utc.with_ymd_and_hms(2024, 2, 1, hour, 0, 0).unwrap(),
                })
                .await
                .unwrap();
        }

        let (status, body) = send(
            &app.router,
            "GET",
            "/api/dates",
            Some(&credential("alice", "pw1")),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"response": [{"day": "01-02-24-10:00:00"}, {"day": "01-02-24-09:00:00"}]})
        );

        // bob cannot see alice's entry
        let (status, _) = send(
            &app.router,
            "GET",
            "/api/logs?date=01-02-24-10:00:00",
            Some(&credential("bob", "pw2")),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_save_today_validation() {
        let app = test_app();
        register(&app.router, "alice", "pw1").await;
        let auth = credential("alice", "pw1");

        let cases = [
            (json!({"body": "hello"}), "Title is required"),
            (json!({"title": "", "body": "hello"}), "Title is required"),
            (json!({"title": "Day1"}), "Body is required"),
            (
                json!({"title": "x".repeat(MAX_TITLE_LEN + 1), "body": "hello"}),
                "Title must be at most 50 characters",
            ),
        ];

        for (payload, message) in cases {
            let (status, body) =
                send(&app.router, "POST", "/api/savetoday", Some(&auth), Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], message);
        }

        let (status, _) = send(
            &app.router,
            "POST",
            "/api/savetoday",
            Some(&auth),
            Some(json!({"title": "é".repeat(MAX_TITLE_LEN), "body": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_routes_reject_bad_headers() {
        let app = test_app();
        register(&app.router, "alice", "pw1").await;

        let wrong_password = credential("alice", "nope");
        let no_colon = B64.encode("alicepw1");
        let cases: [(Option<&str>, StatusCode, &str); 4] = [
            (None, StatusCode::FORBIDDEN, "No authorization header detected"),
            (Some("%%%"), StatusCode::BAD_REQUEST, "Invalid authorization format"),
            (Some(no_colon.as_str()), StatusCode::BAD_REQUEST, "Invalid authorization format"),
            (Some(wrong_password.as_str()), StatusCode::FORBIDDEN, "Invalid user"),
        ];

        for (auth, expected_status, message) in cases {
            for (method, uri) in [
                ("GET", "/api/dates"),
                ("GET", "/api/logs?date=01-01-24-00:00:00"),
                ("POST", "/api/savetoday"),
            ] {
                let body = (method == "POST").then(|| json!({"title": "t", "body": "b"}));
                let (status, response) = send(&app.router, method, uri, auth, body).await;
                assert_eq!(status, expected_status, "{} {} with {:?}", method, uri, auth);
                assert_eq!(response["error"], message);
            }
        }

        assert!(app.entries.list_by_owner(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_header_says_invalid_user_while_login_says_invalid_credentials() {
        let app = test_app();
        register(&app.router, "alice", "pw1").await;

        for auth in [credential("alice", "bad"), credential("mallory", "pw1")] {
            let (status, body) = send(&app.router, "GET", "/api/dates", Some(&auth), None).await;
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(body, json!({"error": "Invalid user"}));
        }

        let (status, body) = send(
            &app.router,
            "POST",
            "/api/login",
            None,
            Some(json!({"username": "alice", "password": "bad"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({"error": "Invalid credentials"}));
    }
}
