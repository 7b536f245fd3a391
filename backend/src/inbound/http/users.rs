//! Account registration and login handlers.
//!
//! ```text
//! POST /api/v1/auth/register {"email":"...","password":"...","fullName":"..."}
//! POST /api/v1/auth/login    {"email":"...","password":"..."}
//! ```
//!
//! Both endpoints are rate limited per caller network origin before any
//! registry work happens.

use actix_web::{HttpRequest, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::auth::{LoginCredentials, LoginValidationError};
use crate::domain::password::{Password, PasswordPolicyError};
use crate::domain::ports::RegistrationRequest;
use crate::domain::rate_limit::RateLimiter;
use crate::domain::user::{EmailAddress, FullName, Role, User, UserValidationError};
use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AuthContext, client_origin};
use crate::inbound::http::state::HttpState;

/// Registration request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestBody {
    /// Email address; unique across accounts, case-insensitive.
    pub email: String,
    /// Plaintext password; must satisfy the strength policy.
    pub password: String,
    /// Display name.
    pub full_name: String,
    /// `personnel` (default) or `admin`; the latter needs an admin token.
    #[serde(default)]
    pub role: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    /// Registered email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseBody {
    /// Bearer token for subsequent authenticated calls.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

fn enforce_rate_limit(limiter: &RateLimiter, req: &HttpRequest) -> Result<(), Error> {
    limiter.check(&client_origin(req)).map_err(|exceeded| {
        Error::rate_limited(format!(
            "too many attempts from this address; retry in {}s",
            exceeded.retry_after.as_secs()
        ))
    })
}

fn map_field_error(field: &'static str, error: &UserValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

fn map_password_error(error: &PasswordPolicyError) -> Error {
    // Never echo password material back, not even in details.
    Error::invalid_request(error.to_string()).with_details(json!({ "field": "password" }))
}

fn map_login_validation_error(error: &LoginValidationError) -> Error {
    match error {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

/// Register a new account.
///
/// Personnel accounts are open to anonymous callers; admin accounts require
/// a valid bearer token whose resolved user is an administrator.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequestBody,
    responses(
        (status = 200, description = "Account created", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid accompanying token", body = Error),
        (status = 403, description = "Admin provisioning denied", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 429, description = "Too many attempts", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security((), ("BearerToken" = []))
)]
#[post("/auth/register")]
pub async fn register(
    req: HttpRequest,
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<RegisterRequestBody>,
) -> ApiResult<web::Json<User>> {
    enforce_rate_limit(&state.registration_limiter, &req)?;

    let body = payload.into_inner();
    let email = EmailAddress::new(&body.email).map_err(|e| map_field_error("email", &e))?;
    let password = Password::new(body.password).map_err(|e| map_password_error(&e))?;
    let full_name = FullName::new(&body.full_name).map_err(|e| map_field_error("fullName", &e))?;
    let role = match body.role.as_deref() {
        None => Role::Personnel,
        Some(raw) => raw.parse().map_err(|e| map_field_error("role", &e))?,
    };

    let user = state
        .identity
        .register(
            RegistrationRequest {
                email,
                password,
                full_name,
                role,
            },
            auth.into_claims(),
        )
        .await?;
    Ok(web::Json(user))
}

/// Authenticate and mint a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Login success", body = LoginResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 429, description = "Too many attempts", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequestBody>,
) -> ApiResult<web::Json<LoginResponseBody>> {
    enforce_rate_limit(&state.login_limiter, &req)?;

    let body = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&body.email, &body.password)
        .map_err(|e| map_login_validation_error(&e))?;
    let outcome = state.identity.login(credentials).await?;
    Ok(web::Json(LoginResponseBody {
        token: outcome.token,
        user: outcome.user,
    }))
}
