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

//! API resources for a single brewery.

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
use brewery_core::catalog::Beer;
use brewery_core::catalog::BreweryFields;
use brewery_core::catalog::CatalogErrorKind;
use brewery_core::util::LogScopeDuration;
use serde::Deserialize;

/// Full representation of a brewery supplied by the owner.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BreweryReplaceRequest {
    name: String,
    #[serde(rename = "yearFounded")]
    year_founded: i64,
    location: String,
    /// Embedded beer by identifier. Replaces the current list.
    #[serde(default)]
    beer: Vec<Beer>,
}

impl BreweryReplaceRequest {
    fn into_parts(self) -> (BreweryFields, Vec<Beer>) {
        (
            BreweryFields {
                name: self.name,
                year_founded: self.year_founded,
                location: self.location,
            },
            self.beer,
        )
    }
}

/// Retrieve a brewery.
#[utoipa::path(
    tag = "breweries",
    params(("brewery_id", description = "Brewery identifier.")),
    responses(
        (
            status = 200,
            description = "Ok. The brewery with its embedded beer.",
            content_type = "application/json",
        ),
        (status = 404, description = "Not Found."),
        (status = 406, description = "Not Acceptable. Only JSON and HTML are offered."),
        (status = 500, description = "Internal server error."),
    ),
)]
#[get("/breweries/{brewery_id}")]
pub async fn brewery_by_id(
    app_state: Data<AppState>,
    path: Path<String>,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope = LogScopeDuration::new(log::Level::Trace, module_path!(), "brewery_by_id", 0);
    let representation = Representation::negotiate(&http_request)?;
    let brewery_id = path.into_inner();
    let brewery = app_state
        .catalog
        .brewery_by_id(&brewery_id)
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?
        .ok_or_else(|| ApiErrorMapper::from_catalog_error(CatalogErrorKind::NotFound.error()))?;
    representation.respond(StatusCode::OK, &brewery)
}

/// Replace all fields of a brewery.
///
/// Only the owner of the brewery may do this. Omitting `beer` empties the list
/// of embedded beer. Beer already embedded keeps its snapshot while other beer is
/// embedded as currently stored.
#[utoipa::path(
    tag = "breweries",
    params(("brewery_id", description = "Brewery identifier.")),
    request_body(
        content = String,
        description = r#"`{"name":"Brewdog","yearFounded":2007,"location":"Ellon","beer":[]}`"#,
        content_type = "application/json",
    ),
    responses(
        (
            status = 303,
            description = "See other. The brewery was updated.",
            headers(("Location" = String, description = "URL of the brewery.")),
        ),
        (status = 400, description = "Bad Request. Malformed body."),
        (status = 401, description = "Unauthorized: Authentication failure."),
        (
            status = 403,
            description = "Forbidden: Only the owner may modify the brewery. Beer can only be listed once and belong to a single brewery."
        ),
        (status = 404, description = "Not Found. The brewery or a listed beer does not exist."),
        (status = 415, description = "Unsupported Media Type. Use `application/json`."),
        (status = 500, description = "Internal server error."),
    ),
    security(("bearer_auth" = [])),
)]
#[put("/breweries/{brewery_id}")]
pub async fn brewery_replace(
    app_state: Data<AppState>,
    path: Path<String>,
    payload: Payload,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope = LogScopeDuration::new(log::Level::Trace, module_path!(), "brewery_replace", 0);
    let identity = app_state
        .auth
        .get_identity(&http_request)
        .map_err(ApiErrorMapper::from_catalog_error)?;
    let brewery_id = path.into_inner();
    let (fields, beer) = JsonBody::parse::<BreweryReplaceRequest>(&http_request, payload)
        .await?
        .into_parts();
    app_state
        .catalog
        .brewery_replace(&identity, &brewery_id, fields, beer)
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    Ok(HttpResponse::build(StatusCode::SEE_OTHER)
        .insert_header(("Location", app_state.catalog.brewery_url(&brewery_id)))
        .finish())
}

/// Delete a brewery.
///
/// Only the owner of the brewery may do this. Beer embedded in the brewery is
/// not deleted.
#[utoipa::path(
    tag = "breweries",
    params(("brewery_id", description = "Brewery identifier.")),
    responses(
        (status = 204, description = "No Content. The brewery was deleted."),
        (status = 401, description = "Unauthorized: Authentication failure."),
        (status = 403, description = "Forbidden: Only the owner may delete the brewery."),
        (status = 404, description = "Not Found."),
        (status = 500, description = "Internal server error."),
    ),
    security(("bearer_auth" = [])),
)]
#[delete("/breweries/{brewery_id}")]
pub async fn brewery_delete(
    app_state: Data<AppState>,
    path: Path<String>,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope = LogScopeDuration::new(log::Level::Trace, module_path!(), "brewery_delete", 0);
    let identity = app_state
        .auth
        .get_identity(&http_request)
        .map_err(ApiErrorMapper::from_catalog_error)?;
    app_state
        .catalog
        .brewery_delete(&identity, &path.into_inner())
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    Ok(HttpResponse::build(StatusCode::NO_CONTENT).finish())
}

/// Delete a brewery without authentication.
///
/// Only available when `api.unsecuredelete` is enabled. Intended for cleaning
/// up after test runs.
#[utoipa::path(
    tag = "breweries",
    params(("brewery_id", description = "Brewery identifier.")),
    responses(
        (status = 204, description = "No Content. The brewery was deleted."),
        (status = 404, description = "Not Found. Unauthenticated deletion is disabled."),
        (status = 500, description = "Internal server error."),
    ),
)]
#[delete("/breweries/unsecure/{brewery_id}")]
pub async fn brewery_delete_unsecured(
    app_state: Data<AppState>,
    path: Path<String>,
) -> Result<HttpResponse, Error> {
    if !app_state.unsecure_delete {
        return Err(ApiErrorMapper::from_catalog_error(
            CatalogErrorKind::NotFound.error(),
        ));
    }
    app_state
        .catalog
        .brewery_delete_unchecked(&path.into_inner())
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    Ok(HttpResponse::build(StatusCode::NO_CONTENT).finish())
}

/// A brewery can only be retrieved, replaced or deleted.
#[route("/breweries/{brewery_id}", method = "POST")]
pub async fn brewery_method_not_allowed() -> Result<HttpResponse, Error> {
    Err(ApiErrorMapper::method_not_allowed("GET, PUT, DELETE"))
}
