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

//! API resources for beer embedded in a brewery.

use crate::rest_api::AppState;
use crate::rest_api::common::ApiErrorMapper;
use crate::rest_api::common::CursorQueryParams;
use crate::rest_api::common::Representation;
use actix_web::Error;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::delete;
use actix_web::get;
use actix_web::http::StatusCode;
use actix_web::put;
use actix_web::web::Data;
use actix_web::web::Path;
use actix_web::web::Query;
use brewery_core::catalog::BeerView;
use brewery_core::util::LogScopeDuration;
use serde::Serialize;

/// A page of the beer embedded in a brewery.
#[derive(Debug, Serialize)]
struct BeerInBreweryListResponse {
    beer: Vec<BeerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
    total_number_of_beers: u64,
}

/// List the beer of a brewery three at a time.
#[utoipa::path(
    tag = "breweries",
    params(
        ("brewery_id", description = "Brewery identifier."),
        (
            "cursor" = Option<String>,
            Query,
            description = "Opaque cursor from the `next` link of the previous page."
        ),
    ),
    responses(
        (
            status = 200,
            description = "Ok. A page of the beer embedded in the brewery.",
            content_type = "application/json",
        ),
        (status = 400, description = "Bad Request. Invalid cursor."),
        (status = 404, description = "Not Found."),
        (status = 406, description = "Not Acceptable. Only JSON and HTML are offered."),
        (status = 500, description = "Internal server error."),
    ),
)]
#[get("/breweries/{brewery_id}/beer")]
pub async fn beer_in_brewery_list(
    app_state: Data<AppState>,
    path: Path<String>,
    query: Query<CursorQueryParams>,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope =
        LogScopeDuration::new(log::Level::Trace, module_path!(), "beer_in_brewery_list", 0);
    let representation = Representation::negotiate(&http_request)?;
    let (beer, next_cursor, total_number_of_beers) = app_state
        .catalog
        .beer_in_brewery_list(&path.into_inner(), query.cursor())
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?
        .into_parts();
    representation.respond(
        StatusCode::OK,
        &BeerInBreweryListResponse {
            beer,
            next: CursorQueryParams::next_url(&http_request, next_cursor.as_deref()),
            total_number_of_beers,
        },
    )
}

/// Assign a beer to a brewery.
///
/// Only the owner of the brewery may do this. A beer can only belong to a
/// single brewery. The brewery gets a copy of the beer as it is right now.
#[utoipa::path(
    tag = "breweries",
    params(
        ("brewery_id", description = "Brewery identifier."),
        ("beer_id", description = "Beer identifier."),
    ),
    responses(
        (
            status = 303,
            description = "See other. The beer was added to the brewery.",
            headers(("Location" = String, description = "URL of the brewery.")),
        ),
        (status = 401, description = "Unauthorized: Authentication failure."),
        (
            status = 403,
            description = "Forbidden: Not the owner of the brewery or the beer already belongs to a brewery.",
        ),
        (status = 404, description = "Not Found. No such brewery or beer."),
        (status = 500, description = "Internal server error."),
    ),
    security(("bearer_auth" = [])),
)]
#[put("/breweries/{brewery_id}/beer/{beer_id}")]
pub async fn beer_associate(
    app_state: Data<AppState>,
    path: Path<(String, String)>,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope = LogScopeDuration::new(log::Level::Trace, module_path!(), "beer_associate", 0);
    let identity = app_state
        .auth
        .get_identity(&http_request)
        .map_err(ApiErrorMapper::from_catalog_error)?;
    let (brewery_id, beer_id) = path.into_inner();
    app_state
        .catalog
        .beer_associate(&identity, &brewery_id, &beer_id)
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    Ok(HttpResponse::build(StatusCode::SEE_OTHER)
        .insert_header(("Location", app_state.catalog.brewery_url(&brewery_id)))
        .finish())
}

/// Remove a beer from a brewery.
///
/// Only the owner of the brewery may do this. Beer added to the brewery after
/// the removed beer is removed as well.
#[utoipa::path(
    tag = "breweries",
    params(
        ("brewery_id", description = "Brewery identifier."),
        ("beer_id", description = "Beer identifier."),
    ),
    responses(
        (
            status = 303,
            description = "See other. The beer was removed from the brewery.",
            headers(("Location" = String, description = "URL of the brewery.")),
        ),
        (status = 401, description = "Unauthorized: Authentication failure."),
        (
            status = 403,
            description = "Forbidden: Not the owner of the brewery or the beer is not in this brewery.",
        ),
        (status = 404, description = "Not Found. No such brewery."),
        (status = 500, description = "Internal server error."),
    ),
    security(("bearer_auth" = [])),
)]
#[delete("/breweries/{brewery_id}/beer/{beer_id}")]
pub async fn beer_disassociate(
    app_state: Data<AppState>,
    path: Path<(String, String)>,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope =
        LogScopeDuration::new(log::Level::Trace, module_path!(), "beer_disassociate", 0);
    let identity = app_state
        .auth
        .get_identity(&http_request)
        .map_err(ApiErrorMapper::from_catalog_error)?;
    let (brewery_id, beer_id) = path.into_inner();
    app_state
        .catalog
        .beer_disassociate(&identity, &brewery_id, &beer_id)
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    Ok(HttpResponse::build(StatusCode::SEE_OTHER)
        .insert_header(("Location", app_state.catalog.brewery_url(&brewery_id)))
        .finish())
}
