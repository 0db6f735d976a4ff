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

//! Selection of response representation from the `Accept` HTTP header.

use super::ApiErrorMapper;
use super::HtmlRenderer;
use actix_web::Error;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ACCEPT;
use actix_web::http::header::Accept;
use actix_web::http::header::ContentType;
use actix_web::http::header::Header;
use brewery_core::catalog::CatalogErrorKind;
use serde::Serialize;

/// Representation of a resource offered to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// `application/json`
    Json,
    /// `text/html`
    Html,
}

impl Representation {
    /// Pick the highest ranked representation accepted by the caller.
    ///
    /// A request without an `Accept` header gets JSON. Errors out with
    /// [CatalogErrorKind::NotAcceptable] (HTTP 406) when neither is
    /// acceptable.
    pub fn negotiate(http_request: &HttpRequest) -> Result<Self, Error> {
        if !http_request.headers().contains_key(ACCEPT) {
            return Ok(Self::Json);
        }
        let not_acceptable = || {
            ApiErrorMapper::from_catalog_error(
                CatalogErrorKind::NotAcceptable
                    .error_with_msg("Only application/json and text/html are offered."),
            )
        };
        let accept = Accept::parse(http_request).map_err(|_| not_acceptable())?;
        accept
            .ranked()
            .iter()
            .find_map(|mime| match (mime.type_().as_str(), mime.subtype().as_str()) {
                ("application", "json") | ("application", "*") | ("*", "*") => Some(Self::Json),
                ("text", "html") | ("text", "*") => Some(Self::Html),
                _ => None,
            })
            .ok_or_else(not_acceptable)
    }

    /// Return a response with the value in this representation.
    pub fn respond<T: Serialize>(&self, status: StatusCode, value: &T) -> Result<HttpResponse, Error> {
        let json_value = serde_json::to_value(value).map_err(|e| {
            ApiErrorMapper::from_catalog_error(
                CatalogErrorKind::Unspecified.error_with_msg(format!("Serialization failed: {e}")),
            )
        })?;
        Ok(match self {
            Self::Json => HttpResponse::build(status)
                .content_type(ContentType::json())
                .body(json_value.to_string()),
            Self::Html => HttpResponse::build(status)
                .content_type(ContentType::html())
                .body(HtmlRenderer::render_document(&json_value)),
        })
    }
}
