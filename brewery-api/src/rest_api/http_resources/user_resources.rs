/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! API resources proxying user management to the identity provider.

use crate::rest_api::AppState;
use crate::rest_api::common::ApiErrorMapper;
use crate::rest_api::common::JsonBody;
use actix_web::Error;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::delete;
use actix_web::get;
use actix_web::http::StatusCode;
use actix_web::post;
use actix_web::put;
use actix_web::web::Data;
use actix_web::web::Path;
use actix_web::web::Payload;
use brewery_core::catalog::AccessControl;
use brewery_core::identity::ProviderOutcome;
use brewery_core::util::LogScopeDuration;
use serde::Deserialize;

/// Username and password of a user.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UserCredentials {
    username: String,
    password: String,
}

/// New password of a user.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PasswordChange {
    password: String,
}

/// Respond with the provider's verdict.
fn relay(outcome: ProviderOutcome) -> HttpResponse {
    match outcome {
        ProviderOutcome::Ok(body) if body.is_null() => HttpResponse::build(StatusCode::OK).finish(),
        ProviderOutcome::Ok(body) => HttpResponse::build(StatusCode::OK).json(body),
        ProviderOutcome::Rejected { status, message } => HttpResponse::build(
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        )
        .body(message),
    }
}

/// Create a user with the username as email address.
#[utoipa::path(
    tag = "users",
    request_body(
        content = String,
        description = r#"`{"username":"alice@example.com","password":"..."}`"#,
        content_type = "application/json",
    ),
    responses(
        (
            status = 200,
            description = "Ok. The identity provider's response.",
            content_type = "application/json",
        ),
        (status = 400, description = "Bad Request. Malformed body."),
        (status = 415, description = "Unsupported Media Type. Use `application/json`."),
        (status = 500, description = "Internal server error. Identity provider unavailable."),
    ),
)]
#[post("/users")]
pub async fn user_create(
    app_state: Data<AppState>,
    payload: Payload,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope = LogScopeDuration::new(log::Level::Trace, module_path!(), "user_create", 0);
    let credentials = JsonBody::parse::<UserCredentials>(&http_request, payload).await?;
    let body = app_state
        .idp
        .user_create(&credentials.username, &credentials.password)
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    Ok(HttpResponse::build(StatusCode::OK).json(body))
}

/// Exchange username and password for tokens.
///
/// Use the `id_token` of the response as bearer token.
#[utoipa::path(
    tag = "users",
    request_body(
        content = String,
        description = r#"`{"username":"alice@example.com","password":"..."}`"#,
        content_type = "application/json",
    ),
    responses(
        (
            status = 200,
            description = "Ok. The identity provider's token response.",
            content_type = "application/json",
        ),
        (status = 400, description = "Bad Request. Malformed body."),
        (status = 415, description = "Unsupported Media Type. Use `application/json`."),
        (status = 500, description = "Internal server error. Identity provider unavailable."),
    ),
)]
#[post("/users/login")]
pub async fn user_login(
    app_state: Data<AppState>,
    payload: Payload,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope = LogScopeDuration::new(log::Level::Trace, module_path!(), "user_login", 0);
    let credentials = JsonBody::parse::<UserCredentials>(&http_request, payload).await?;
    let body = app_state
        .idp
        .user_login(&credentials.username, &credentials.password)
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    Ok(HttpResponse::build(StatusCode::OK).json(body))
}

/// List the email address of all users.
#[utoipa::path(
    tag = "users",
    responses(
        (
            status = 200,
            description = "Ok. The users known by the identity provider.",
            content_type = "application/json",
        ),
        (status = 500, description = "Internal server error. Identity provider unavailable."),
    ),
)]
#[get("/users")]
pub async fn users_list(app_state: Data<AppState>) -> Result<HttpResponse, Error> {
    let outcome = app_state
        .idp
        .users_list()
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    Ok(relay(outcome))
}

/// Change the password of the calling user.
#[utoipa::path(
    tag = "users",
    params(("username", description = "Username of the caller.")),
    request_body(
        content = String,
        description = r#"`{"password":"..."}`"#,
        content_type = "application/json",
    ),
    responses(
        (status = 200, description = "Ok. The password was changed."),
        (status = 400, description = "Bad Request. Malformed body or rejected by the identity provider."),
        (status = 401, description = "Unauthorized: Authentication failure."),
        (status = 403, description = "Forbidden: Users can only modify themselves."),
        (status = 415, description = "Unsupported Media Type. Use `application/json`."),
        (status = 500, description = "Internal server error. Identity provider unavailable."),
    ),
    security(("bearer_auth" = [])),
)]
#[put("/users/{username}")]
pub async fn user_password_update(
    app_state: Data<AppState>,
    path: Path<String>,
    payload: Payload,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope =
        LogScopeDuration::new(log::Level::Trace, module_path!(), "user_password_update", 0);
    let identity = app_state
        .auth
        .get_identity(&http_request)
        .map_err(ApiErrorMapper::from_catalog_error)?;
    AccessControl::assert_same_user(&identity, &path.into_inner())
        .map_err(ApiErrorMapper::from_catalog_error)?;
    let password_change = JsonBody::parse::<PasswordChange>(&http_request, payload).await?;
    let outcome = app_state
        .idp
        .user_password_update(identity.subject(), &password_change.password)
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    Ok(match outcome {
        ProviderOutcome::Ok(_) => HttpResponse::build(StatusCode::OK).finish(),
        rejected => relay(rejected),
    })
}

/// Delete the calling user.
#[utoipa::path(
    tag = "users",
    params(("username", description = "Username of the caller.")),
    responses(
        (status = 204, description = "No Content. The user was deleted."),
        (status = 401, description = "Unauthorized: Authentication failure."),
        (status = 403, description = "Forbidden: Users can only delete themselves."),
        (status = 500, description = "Internal server error. Identity provider unavailable."),
    ),
    security(("bearer_auth" = [])),
)]
#[delete("/users/{username}")]
pub async fn user_delete(
    app_state: Data<AppState>,
    path: Path<String>,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope = LogScopeDuration::new(log::Level::Trace, module_path!(), "user_delete", 0);
    let identity = app_state
        .auth
        .get_identity(&http_request)
        .map_err(ApiErrorMapper::from_catalog_error)?;
    AccessControl::assert_same_user(&identity, &path.into_inner())
        .map_err(ApiErrorMapper::from_catalog_error)?;
    app_state
        .idp
        .user_delete(identity.subject())
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    Ok(HttpResponse::build(StatusCode::NO_CONTENT).finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_relay_rejection() {
        let response = relay(
            ProviderOutcome::Rejected {
                status: 400,
                message: "PasswordStrengthError".to_string(),
            },
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_relay_success() {
        let response = relay(ProviderOutcome::Ok(json!([{"email": "alice@example.com"}])));
        assert_eq!(response.status(), StatusCode::OK);
        let response = relay(ProviderOutcome::Ok(serde_json::Value::Null));
        assert_eq!(response.status(), StatusCode::OK);
    }
}
