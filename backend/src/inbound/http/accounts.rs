//! Account API handlers.
//!
//! ```text
//! POST /api/v1/registration {"login":"driver1","password":"secret1","name":"Ann","lastName":"Lee"}
//! POST /api/v1/login {"login":"driver1","password":"secret1"}
//! POST /api/v1/logout
//! GET /api/v1/profile
//! GET|PUT|DELETE /api/v1/profile/image
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{
    Error, LoginCredentials, Profile, Registration, RegistrationParts, SessionToken, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, ProfileSchema};
use crate::inbound::http::session::{
    AuthenticatedUser, expired_session_cookie, session_cookie, session_token_value,
};
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/v1/registration`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub login: String,
    pub password: String,
    pub name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
}

impl TryFrom<&RegistrationRequest> for Registration {
    type Error = Error;

    fn try_from(value: &RegistrationRequest) -> Result<Self, Self::Error> {
        Registration::try_from_parts(RegistrationParts {
            login: &value.login,
            password: &value.password,
            first_name: &value.name,
            last_name: &value.last_name,
            phone: &value.phone,
        })
        .map_err(Error::from)
    }
}

/// Identifier of a newly created resource.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    #[schema(value_type = i64, example = 1)]
    pub id: UserId,
}

/// Login body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Create a customer account.
#[utoipa::path(
    post,
    path = "/api/v1/registration",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Account created", body = CreatedResponse),
        (status = 400, description = "Invalid or duplicate registration", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/registration")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegistrationRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(&payload.into_inner())?;
    let id = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// Verify credentials and issue the `token` session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 204, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie `token`"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.login, &payload.password)?;
    let token = state.accounts.login(credentials).await?;
    Ok(HttpResponse::NoContent()
        .cookie(session_cookie(token, state.cookie_secure))
        .finish())
}

/// Revoke the caller's session and expire the cookie.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "No session cookie", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let raw = session_token_value(&req)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::unauthenticated("login required"))?;
    let token = SessionToken::parse(&raw)
        .ok_or_else(|| Error::invalid_session("session is not valid"))?;
    state.accounts.logout(token).await?;
    info!("session closed");
    Ok(HttpResponse::NoContent()
        .cookie(expired_session_cookie(state.cookie_secure))
        .finish())
}

/// Profile of the authenticated caller.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileSchema),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "profile"
)]
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Profile>> {
    state.accounts.profile(user.id()).await.map(web::Json)
}

/// Raw bytes of the caller's profile image.
#[utoipa::path(
    get,
    path = "/api/v1/profile/image",
    responses(
        (status = 200, description = "Image bytes", content_type = "application/octet-stream"),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 404, description = "No image stored", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "getProfileImage"
)]
#[get("/profile/image")]
pub async fn get_profile_image(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let bytes = state.accounts.profile_image(user.id()).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::octet_stream())
        .body(bytes))
}

/// Store the request body as the caller's profile image.
#[utoipa::path(
    put,
    path = "/api/v1/profile/image",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 204, description = "Image stored"),
        (status = 400, description = "Empty image", body = ErrorSchema),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 413, description = "Image too large")
    ),
    tags = ["accounts"],
    operation_id = "putProfileImage"
)]
#[put("/profile/image")]
pub async fn put_profile_image(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    state
        .accounts
        .save_profile_image(user.id(), body.to_vec())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove the caller's profile image.
#[utoipa::path(
    delete,
    path = "/api/v1/profile/image",
    responses(
        (status = 204, description = "Image removed"),
        (status = 401, description = "Unauthenticated", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "deleteProfileImage"
)]
#[delete("/profile/image")]
pub async fn delete_profile_image(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    state.accounts.delete_profile_image(user.id()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
