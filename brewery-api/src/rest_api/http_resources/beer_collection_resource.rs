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

//! API resources for the collection of beer.

use super::brewery_collection_resource::CreatedResponse;
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
use brewery_core::catalog::BeerFields;
use brewery_core::catalog::BeerView;
use brewery_core::util::LogScopeDuration;
use serde::Serialize;

/// A page of beer.
#[derive(Debug, Serialize)]
struct BeerListResponse {
    beer: Vec<BeerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
    total_number_of_beers: u64,
}

/// List beer five at a time.
#[utoipa::path(
    tag = "beer",
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
            description = "Ok. A page of beer.",
            content_type = "application/json",
        ),
        (status = 400, description = "Bad Request. Invalid cursor."),
        (status = 406, description = "Not Acceptable. Only JSON and HTML are offered."),
        (status = 500, description = "Internal server error."),
    ),
)]
#[get("/beer")]
pub async fn beer_list(
    app_state: Data<AppState>,
    query: Query<CursorQueryParams>,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope = LogScopeDuration::new(log::Level::Trace, module_path!(), "beer_list", 0);
    let representation = Representation::negotiate(&http_request)?;
    let (beer, next_cursor, total_number_of_beers) = app_state
        .catalog
        .beer_list(query.cursor())
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?
        .into_parts();
    representation.respond(
        StatusCode::OK,
        &BeerListResponse {
            beer,
            next: CursorQueryParams::next_url(&http_request, next_cursor.as_deref()),
            total_number_of_beers,
        },
    )
}

/// Create a beer.
#[utoipa::path(
    tag = "beer",
    request_body(
        content = String,
        description = r#"`{"name":"Punk IPA","type":"IPA","alcoholPercentage":5.6}`"#,
        content_type = "application/json",
    ),
    responses(
        (
            status = 201,
            description = "Created. Body holds the identifier of the new beer.",
            content_type = "application/json",
            headers(("Location" = String, description = "URL of the new beer.")),
        ),
        (status = 400, description = "Bad Request. Malformed body."),
        (status = 415, description = "Unsupported Media Type. Use `application/json`."),
        (status = 500, description = "Internal server error."),
    ),
)]
#[post("/beer")]
pub async fn beer_create(
    app_state: Data<AppState>,
    payload: Payload,
    http_request: HttpRequest,
) -> Result<HttpResponse, Error> {
    let _log_scope = LogScopeDuration::new(log::Level::Trace, module_path!(), "beer_create", 0);
    let fields = JsonBody::parse::<BeerFields>(&http_request, payload).await?;
    let beer_id = app_state
        .catalog
        .beer_create(fields)
        .await
        .map_err(ApiErrorMapper::from_catalog_error)?;
    let location = app_state.catalog.beer_url(&beer_id);
    Ok(CreatedResponse::respond(beer_id, &location))
}

/// The collection can only be listed and appended to.
#[route("/beer", method = "PUT", method = "DELETE")]
pub async fn beer_collection_method_not_allowed() -> Result<HttpResponse, Error> {
    Err(ApiErrorMapper::method_not_allowed("GET, POST"))
}
