use crate::{
    auth::{middleware::AuthUser, validation},
    types::{
        ApiResponse, AppError, LoginRequest, ProfileResponse, RefreshRequest, RegisterRequest,
        Result, TokenPair,
    },
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

fn parse_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully"),
        (status = 400, description = "Invalid input or user already exists")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<()>>)> {
    let payload = parse_body(payload)?;
    validation::validate_register(&payload)?;

    state
        .issuer
        .register(&payload.email, &payload.username, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("User registered successfully")),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<TokenPair>),
        (status = 400, description = "Incorrect email or password")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TokenPair>>> {
    let payload = parse_body(payload)?;
    validation::validate_login(&payload)?;

    let tokens = state.issuer.login(&payload.email, &payload.password).await?;

    Ok(Json(ApiResponse::with_data("Login successful", tokens)))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/api/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Tokens refreshed successfully", body = ApiResponse<TokenPair>),
        (status = 401, description = "Invalid refresh token")
    ),
    tag = "auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TokenPair>>> {
    let payload = parse_body(payload)?;
    validation::validate_refresh(&payload)?;

    let tokens = state.issuer.refresh(&payload.refresh_token).await?;

    Ok(Json(ApiResponse::with_data(
        "Tokens refreshed successfully",
        tokens,
    )))
}

/// Identity of the authenticated caller
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Authenticated caller", body = ProfileResponse),
        (status = 401, description = "Missing, malformed, expired or invalid access token")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn profile(AuthUser(identity): AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        user_id: identity.subject_id,
        email: identity.email,
    })
}
