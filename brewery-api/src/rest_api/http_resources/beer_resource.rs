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

//! API resources for a single beer.

use crate::rest_api::AppState;
use crate::rest_api::common::ApiErrorMapper;
use crate::rest_api::common::JsonBody;
use crate::rest_api::common::Representation;
use actix_web::Error;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::delete;
use actix_web::get;
use actix_web::http::StatusCode;
use actix_web::put;
use actix_web::route;
use actix_web::web::Data;
use actix_web::web::Path;
use actix_web::web::Payload;
use brewery_core::catalog::BeerFields;
use brewery_core::catalog::CatalogErrorKind;
use brewery_core::util::LogScopeDuration;

/// Retrieve a beer.
#[utoipa::path(
    tag = "beer",
    params(("beer_id", description = "Beer identifier.")),
    responses(
        (status = 200, description = "Ok. The beer.", content_type = "application/json"),
        (status = 404, description = "Not Found."),
        (status = 406, description = "Not Acceptable. Only JSON and HTML are offered."),
        (status = 500, description = "Internal server error."),
    ),
)]
#[get("/beer/{beer_id}")]
pub async fn beer_by_id(
    app_state: Data<AppState>,
    path: Path<String>,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let representation = Representation::negotiate(&http_request)?;
    let beer = app_state
        .catalog
        .beer_by_id(&path.into_inner())
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?
        .ok_or_else(|| ApiErrorMapper::from_catalog_error(CatalogErrorKind::NotFound.error()))?;
    representation.respond(StatusCode::OK, &beer)
}

/// Replace all fields of a beer.
///
/// Copies of the beer already embedded in breweries are not updated.
#[utoipa::path(
    tag = "beer",
    params(("beer_id", description = "Beer identifier.")),
    request_body(
        content = String,
        description = r#"`{"name":"Punk IPA","type":"IPA","alcoholPercentage":5.4}`"#,
        content_type = "application/json",
    ),
    responses(
        (
            status = 303,
            description = "See other. The beer was updated.",
            headers(("Location" = String, description = "URL of the beer.")),
        ),
        (status = 400, description = "Bad Request. Malformed body."),
        (status = 404, description = "Not Found."),
        (status = 415, description = "Unsupported Media Type. Use `application/json`."),
        (status = 500, description = "Internal server error."),
    ),
)]
#[put("/beer/{beer_id}")]
pub async fn beer_replace(
    app_state: Data<AppState>,
    path: Path<String>,
    payload: Payload,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope = LogScopeDuration::new(log::Level::Trace, module_path!(), "beer_replace", 0);
    let beer_id = path.into_inner();
    let fields = JsonBody::parse::<BeerFields>(&http_request, payload).await?;
    app_state
        .catalog
        .beer_replace(&beer_id, fields)
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    Ok(HttpResponse::build(StatusCode::SEE_OTHER)
        .insert_header(("Location", app_state.catalog.beer_url(&beer_id)))
        .finish())
}

/// Delete a beer.
///
/// Copies of the beer already embedded in breweries are not removed.
#[utoipa::path(
    tag = "beer",
    params(("beer_id", description = "Beer identifier.")),
    responses(
        (status = 204, description = "No Content. The beer was deleted."),
        (status = 404, description = "Not Found."),
        (status = 500, description = "Internal server error."),
    ),
)]
#[delete("/beer/{beer_id}")]
pub async fn beer_delete(
    app_state: Data<AppState>,
    path: Path<String>,
) -> Result<HttpResponse, Error> {
    app_state
        .catalog
        .beer_delete(&path.into_inner())
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    Ok(HttpResponse::build(StatusCode::NO_CONTENT).finish())
}

/// A beer can only be retrieved, replaced or deleted.
#[route("/beer/{beer_id}", method = "POST")]
pub async fn beer_method_not_allowed() -> Result<HttpResponse, Error> {
    Err(ApiErrorMapper::method_not_allowed("GET, PUT, DELETE"))
}
