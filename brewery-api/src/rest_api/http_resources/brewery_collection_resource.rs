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

//! API resources for the collection of breweries.

use crate::rest_api::AppState;
use crate::rest_api::common::ApiErrorMapper;
use crate::rest_api::common::CursorQueryParams;
use crate::rest_api::common::JsonBody;
use crate::rest_api::common::Representation;
use actix_web::Error;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::get;
use actix_web::http::StatusCode;
use actix_web::post;
use actix_web::route;
use actix_web::web::Data;
use actix_web::web::Payload;
use actix_web::web::Query;
use brewery_core::catalog::BreweryFields;
use brewery_core::catalog::BreweryView;
use brewery_core::util::LogScopeDuration;
use serde::Serialize;

/// A page of breweries.
#[derive(Debug, Serialize)]
struct BreweryListResponse {
    breweries: Vec<BreweryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
    total_number_of_breweries: u64,
}

/// Identifier of a created resource.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    id: String,
}

impl CreatedResponse {
    /// Return HTTP 201 with the identifier and a `Location` header.
    pub fn respond(id: String, location: &str) -> HttpResponse {
        HttpResponse::build(StatusCode::CREATED)
            .insert_header(("Location", location))
            .json(Self { id })
    }
}

/// List breweries five at a time.
///
/// Follow the `next` link to get the next page.
#[utoipa::path(
    tag = "breweries",
    params(
        (
            "cursor" = Option<String>,
            Query,
            description = "Opaque cursor from the `next` link of the previous page."
        ),
    ),
    responses(
        (
            status = 200,
            description = "Ok. A page of breweries.",
            content_type = "application/json",
        ),
        (status = 400, description = "Bad Request. Invalid cursor."),
        (status = 406, description = "Not Acceptable. Only JSON and HTML are offered."),
        (status = 500, description = "Internal server error."),
    ),
)]
#[get("/breweries")]
pub async fn breweries_list(
    app_state: Data<AppState>,
    query: Query<CursorQueryParams>,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope = LogScopeDuration::new(log::Level::Trace, module_path!(), "breweries_list", 0);
    let representation = Representation::negotiate(&http_request)?;
    let (breweries, next_cursor, total_number_of_breweries) = app_state
        .catalog
        .breweries_list(query.cursor())
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?
        .into_parts();
    representation.respond(
        StatusCode::OK,
        &BreweryListResponse {
            breweries,
            next: CursorQueryParams::next_url(&http_request, next_cursor.as_deref()),
            total_number_of_breweries,
        },
    )
}

/// Create a brewery.
///
/// The caller becomes the owner of the brewery.
#[utoipa::path(
    tag = "breweries",
    request_body(
        content = String,
        description = r#"`{"name":"Brewdog","yearFounded":2007,"location":"Ellon"}`"#,
        content_type = "application/json",
    ),
    responses(
        (
            status = 201,
            description = "Created. Body holds the identifier of the new brewery.",
            content_type = "application/json",
            headers(("Location" = String, description = "URL of the new brewery.")),
        ),
        (status = 400, description = "Bad Request. Malformed body."),
        (status = 401, description = "Unauthorized: Authentication failure."),
        (status = 415, description = "Unsupported Media Type. Use `application/json`."),
        (status = 500, description = "Internal server error."),
    ),
    security(("bearer_auth" = [])),
)]
#[post("/breweries")]
pub async fn brewery_create(
    app_state: Data<AppState>,
    payload: Payload,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope = LogScopeDuration::new(log::Level::Trace, module_path!(), "brewery_create", 0);
    let identity = app_state
        .auth
        .get_identity(&http_request)
        .map_err(ApiErrorMapper::from_catalog_error)?;
    let fields = JsonBody::parse::<BreweryFields>(&http_request, payload).await?;
    let brewery_id = app_state
        .catalog
        .brewery_create(&identity, fields)
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    let location = app_state.catalog.brewery_url(&brewery_id);
    Ok(CreatedResponse::respond(brewery_id, &location))
}

/// The collection can only be listed and appended to.
#[route("/breweries", method = "PUT", method = "DELETE")]
pub async fn breweries_method_not_allowed() -> Result<HttpResponse, Error> {
    Err(ApiErrorMapper::method_not_allowed("GET, POST"))
}
