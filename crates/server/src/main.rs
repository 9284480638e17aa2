// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use campus_desk_api::{
    AddReplyRequest, ApiError, AssignComplaintRequest, AuthenticationService, ComplaintInfo,
    ComplaintResponse, CreateComplaintRequest, ListComplaintsResponse, ListUsersResponse,
    LoginRequest, LoginResponse, QuotaStatusResponse, RegisterProfessorRequest, RegisterResponse,
    RegisterStudentRequest, UpdateStatusRequest, UserStatusResponse, WeeklyCountResponse,
    WhoAmIResponse, add_reply, approve_user, assign_complaint, create_complaint, get_complaint,
    get_quota_status, get_weekly_count, list_complaints, list_pending_users,
    list_student_complaints, list_users, login, logout, register_professor, register_student,
    reject_user, update_status, whoami,
};
use campus_desk_domain::User;
use campus_desk_notify::{LogSink, NotificationSink};
use campus_desk_persistence::SqlitePersistence;

/// Campus Desk Server - HTTP server for the academic complaint portal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Email for the bootstrapped admin account. Created at startup if
    /// no account with this email exists yet.
    #[arg(long)]
    admin_email: Option<String>,

    /// Password for the bootstrapped admin account
    #[arg(long)]
    admin_password: Option<String>,

    /// Display name for the bootstrapped admin account
    #[arg(long, default_value = "Administrator")]
    admin_name: String,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex for safe concurrent
/// access; the notification sink is shared read-only.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for users, complaints, and sessions.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// The notification transport.
    sink: Arc<dyn NotificationSink>,
}

/// Response for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Service health indicator.
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::PendingApproval | ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Extracts the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Result<String, HttpError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned)
        .ok_or_else(|| HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Missing or malformed Authorization header"),
        })
}

/// Resolves the bearer token to an authenticated user.
async fn authenticate(app_state: &AppState, headers: &HeaderMap) -> Result<User, HttpError> {
    let token: String = bearer_token(headers)?;
    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::validate_session(&mut persistence, &token).map_err(|e| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: e.to_string(),
    })
}

/// Handler for POST `/api/register/student` endpoint.
async fn handle_register_student(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterStudentRequest>,
) -> Result<Json<RegisterResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterResponse = register_student(&mut persistence, req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/register/professor` endpoint.
async fn handle_register_professor(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterProfessorRequest>,
) -> Result<Json<RegisterResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterResponse = register_professor(&mut persistence, req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/login` endpoint.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = login(&mut persistence, req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/logout` endpoint.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    let token: String = bearer_token(&headers)?;
    let mut persistence = app_state.persistence.lock().await;
    logout(&mut persistence, &token)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/api/auth/me` endpoint.
async fn handle_whoami(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    Ok(Json(whoami(&actor)))
}

/// Handler for GET `/api/users` endpoint.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ListUsersResponse = list_users(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/users/pending` endpoint.
async fn handle_list_pending_users(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ListUsersResponse = list_pending_users(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/users/{user_id}/approve` endpoint.
async fn handle_approve_user(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<UserStatusResponse>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: UserStatusResponse =
        approve_user(&mut persistence, &actor, user_id, app_state.sink.as_ref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/users/{user_id}/reject` endpoint.
async fn handle_reject_user(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<UserStatusResponse>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: UserStatusResponse =
        reject_user(&mut persistence, &actor, user_id, app_state.sink.as_ref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/complaints` endpoint.
async fn handle_create_complaint(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateComplaintRequest>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ComplaintResponse =
        create_complaint(&mut persistence, &actor, req, app_state.sink.as_ref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/complaints` endpoint.
async fn handle_list_complaints(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListComplaintsResponse>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ListComplaintsResponse = list_complaints(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/complaints/{complaint_id}` endpoint.
async fn handle_get_complaint(
    AxumState(app_state): AxumState<AppState>,
    Path(complaint_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ComplaintInfo>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ComplaintInfo = get_complaint(&mut persistence, &actor, complaint_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/complaints/student/{student_id}` endpoint.
async fn handle_list_student_complaints(
    AxumState(app_state): AxumState<AppState>,
    Path(student_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ListComplaintsResponse>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ListComplaintsResponse =
        list_student_complaints(&mut persistence, &actor, student_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/complaints/{complaint_id}/reply` endpoint.
async fn handle_add_reply(
    AxumState(app_state): AxumState<AppState>,
    Path(complaint_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<AddReplyRequest>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ComplaintResponse = add_reply(
        &mut persistence,
        &actor,
        complaint_id,
        req,
        app_state.sink.as_ref(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/complaints/{complaint_id}/status` endpoint.
async fn handle_update_status(
    AxumState(app_state): AxumState<AppState>,
    Path(complaint_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ComplaintResponse = update_status(
        &mut persistence,
        &actor,
        complaint_id,
        req,
        app_state.sink.as_ref(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/complaints/{complaint_id}/assign` endpoint.
async fn handle_assign_complaint(
    AxumState(app_state): AxumState<AppState>,
    Path(complaint_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<AssignComplaintRequest>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ComplaintResponse = assign_complaint(
        &mut persistence,
        &actor,
        complaint_id,
        req,
        app_state.sink.as_ref(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/students/{student_id}/weekly-count` endpoint.
async fn handle_weekly_count(
    AxumState(app_state): AxumState<AppState>,
    Path(student_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<WeeklyCountResponse>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: WeeklyCountResponse = get_weekly_count(&mut persistence, &actor, student_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/students/{student_id}/quota-status` endpoint.
async fn handle_quota_status(
    AxumState(app_state): AxumState<AppState>,
    Path(student_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<QuotaStatusResponse>, HttpError> {
    let actor: User = authenticate(&app_state, &headers).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: QuotaStatusResponse = get_quota_status(&mut persistence, &actor, student_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async {
                Json(HealthResponse {
                    status: String::from("ok"),
                })
            }),
        )
        .route("/api/register/student", post(handle_register_student))
        .route("/api/register/professor", post(handle_register_professor))
        .route("/api/login", post(handle_login))
        .route("/api/logout", post(handle_logout))
        .route("/api/auth/me", get(handle_whoami))
        .route("/api/users", get(handle_list_users))
        .route("/api/users/pending", get(handle_list_pending_users))
        .route("/api/users/{user_id}/approve", post(handle_approve_user))
        .route("/api/users/{user_id}/reject", post(handle_reject_user))
        .route("/api/complaints", post(handle_create_complaint))
        .route("/api/complaints", get(handle_list_complaints))
        .route("/api/complaints/{complaint_id}", get(handle_get_complaint))
        .route(
            "/api/complaints/student/{student_id}",
            get(handle_list_student_complaints),
        )
        .route("/api/complaints/{complaint_id}/reply", post(handle_add_reply))
        .route(
            "/api/complaints/{complaint_id}/status",
            post(handle_update_status),
        )
        .route(
            "/api/complaints/{complaint_id}/assign",
            post(handle_assign_complaint),
        )
        .route(
            "/api/students/{student_id}/weekly-count",
            get(handle_weekly_count),
        )
        .route(
            "/api/students/{student_id}/quota-status",
            get(handle_quota_status),
        )
        .with_state(app_state)
}

/// Creates the admin account named by the CLI arguments if it does not
/// exist yet.
fn bootstrap_admin(
    persistence: &mut SqlitePersistence,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(email), Some(password)) = (&args.admin_email, &args.admin_password) else {
        warn!("No admin credentials provided; skipping admin bootstrap");
        return Ok(());
    };

    if persistence.get_user_by_email(email)?.is_some() {
        info!(email = %email, "Admin account already exists");
        return Ok(());
    }

    let admin: User = User::new_admin(args.admin_name.clone(), email.clone());
    let user_id: i64 = persistence.create_user(&admin, password)?;
    info!(user_id, email = %email, "Bootstrapped admin account");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Campus Desk Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    bootstrap_admin(&mut persistence, &args)?;

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        sink: Arc::new(LogSink),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Helper to create test app state with a seeded admin account.
    fn create_test_app_state() -> AppState {
        let mut persistence: SqlitePersistence =
            SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
        let admin: User = User::new_admin(
            String::from("Dana Admin"),
            String::from("dana@campus.edu"),
        );
        persistence
            .create_user(&admin, "admin-pass-1")
            .expect("Failed to seed admin");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            sink: Arc::new(LogSink),
        }
    }

    /// Sends a request and returns the status and parsed JSON body.
    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (HttpStatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request: Request<Body> = match body {
            Some(value) => builder
                .header("content-type", "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status: HttpStatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn login_token(app: &Router, email: &str, password: &str) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        body["token"].as_str().unwrap().to_owned()
    }

    /// Registers a student over HTTP and approves them with the admin
    /// token, returning the student's bearer token.
    async fn approved_student_token(app: &Router, admin_token: &str, email: &str) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/register/student",
            None,
            Some(json!({
                "name": "Sam Student",
                "email": email,
                "password": "hunter2!",
                "college_id": "C-1001",
                "course": "CS101",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let user_id: i64 = body["user_id"].as_i64().unwrap();

        let (status, _) = send(
            app,
            "POST",
            &format!("/api/users/{user_id}/approve"),
            Some(admin_token),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        login_token(app, email, "hunter2!").await
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app: Router = build_router(create_test_app_state());
        let (status, body) = send(&app, "GET", "/health", None, None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_registration_requires_approval_before_login() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "POST",
            "/api/register/student",
            None,
            Some(json!({
                "name": "Sam Student",
                "email": "sam@campus.edu",
                "password": "hunter2!",
                "college_id": "C-1001",
                "course": "CS101",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let user_id: i64 = body["user_id"].as_i64().unwrap();

        // Pending accounts may not log in.
        let (status, _) = send(
            &app,
            "POST",
            "/api/login",
            None,
            Some(json!({ "email": "sam@campus.edu", "password": "hunter2!" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);

        let admin_token: String = login_token(&app, "dana@campus.edu", "admin-pass-1").await;
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/users/{user_id}/approve"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let token: String = login_token(&app, "sam@campus.edu", "hunter2!").await;
        let (status, body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["user"]["email"], "sam@campus.edu");
        assert_eq!(body["user"]["role"], "student");
    }

    #[tokio::test]
    async fn test_protected_endpoints_require_a_token() {
        let app: Router = build_router(create_test_app_state());

        let (status, _) = send(&app, "GET", "/api/auth/me", None, None).await;
        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "GET", "/api/complaints", Some("session_bogus"), None).await;
        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_user_listing_is_forbidden_for_students() {
        let app: Router = build_router(create_test_app_state());
        let admin_token: String = login_token(&app, "dana@campus.edu", "admin-pass-1").await;
        let student_token: String =
            approved_student_token(&app, &admin_token, "sam@campus.edu").await;

        let (status, _) = send(&app, "GET", "/api/users", Some(&student_token), None).await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);

        let (status, _) = send(&app, "GET", "/api/users", Some(&admin_token), None).await;
        assert_eq!(status, HttpStatusCode::OK);
    }

    #[tokio::test]
    async fn test_complaint_lifecycle_over_http() {
        let app: Router = build_router(create_test_app_state());
        let admin_token: String = login_token(&app, "dana@campus.edu", "admin-pass-1").await;
        let student_token: String =
            approved_student_token(&app, &admin_token, "sam@campus.edu").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/complaints",
            Some(&student_token),
            Some(json!({
                "topic": "Broken projector",
                "description": "The projector in room 204 has been broken for a week.",
                "course": "CS101",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["complaint"]["status"], "submitted");
        let complaint_id: i64 = body["complaint"]["complaint_id"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/complaints/{complaint_id}/reply"),
            Some(&admin_token),
            Some(json!({ "message": "We are looking into it." })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["complaint"]["replies"].as_array().unwrap().len(), 1);

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/complaints/{complaint_id}/status"),
            Some(&admin_token),
            Some(json!({ "status": "solved" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["complaint"]["status"], "solved");

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/complaints/{complaint_id}"),
            Some(&student_token),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["status"], "solved");
    }

    #[tokio::test]
    async fn test_other_students_get_forbidden() {
        let app: Router = build_router(create_test_app_state());
        let admin_token: String = login_token(&app, "dana@campus.edu", "admin-pass-1").await;
        let student_token: String =
            approved_student_token(&app, &admin_token, "sam@campus.edu").await;
        let other_token: String =
            approved_student_token(&app, &admin_token, "other@campus.edu").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/complaints",
            Some(&student_token),
            Some(json!({
                "topic": "Broken projector",
                "description": "The projector in room 204 has been broken for a week.",
                "course": "CS101",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let complaint_id: i64 = body["complaint"]["complaint_id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/complaints/{complaint_id}"),
            Some(&other_token),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_quota_exhaustion_returns_too_many_requests() {
        let app: Router = build_router(create_test_app_state());
        let admin_token: String = login_token(&app, "dana@campus.edu", "admin-pass-1").await;
        let student_token: String =
            approved_student_token(&app, &admin_token, "sam@campus.edu").await;

        for n in 0..10 {
            let (status, _) = send(
                &app,
                "POST",
                "/api/complaints",
                Some(&student_token),
                Some(json!({
                    "topic": format!("Complaint {n}"),
                    "description": "Filed during a very frustrating week.",
                    "course": "CS101",
                })),
            )
            .await;
            assert_eq!(status, HttpStatusCode::OK);
        }

        let (status, body) = send(
            &app,
            "POST",
            "/api/complaints",
            Some(&student_token),
            Some(json!({
                "topic": "One too many",
                "description": "This one should not go through.",
                "course": "CS101",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::TOO_MANY_REQUESTS);
        assert!(body["message"].as_str().unwrap().contains("limit"));
    }

    #[tokio::test]
    async fn test_logout_invalidates_the_session() {
        let app: Router = build_router(create_test_app_state());
        let admin_token: String = login_token(&app, "dana@campus.edu", "admin-pass-1").await;

        let (status, _) = send(&app, "POST", "/api/logout", Some(&admin_token), None).await;
        assert_eq!(status, HttpStatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", "/api/auth/me", Some(&admin_token), None).await;
        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    }
}
