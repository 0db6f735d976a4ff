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

//! Mapper of app errors to Actix-web [Error].

use actix_web::Error;
use actix_web::HttpResponse;
use actix_web::error;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
pub use brewery_core::catalog::CatalogError;
use brewery_core::catalog::CatalogErrorKind;

/// Mapper of app errors to Actix-web [Error].
pub struct ApiErrorMapper {}

impl ApiErrorMapper {
    /// Return REST API [Error] from [CatalogError].
    pub fn from_catalog_error<E: AsRef<CatalogError>>(e: E) -> Error {
        let e = e.as_ref();
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Will respond with error. kind: {} msg: {e:?}", e.kind());
        }
        match e.kind() {
            CatalogErrorKind::MalformedIdentifier | CatalogErrorKind::MalformedRequest => {
                // HTTP 400
                error::ErrorBadRequest(e.to_string())
            }
            CatalogErrorKind::AuthenticationFailure => {
                // HTTP 401
                error::ErrorUnauthorized(e.to_string())
            }
            CatalogErrorKind::Forbidden
            | CatalogErrorKind::BeerAlreadyAssigned
            | CatalogErrorKind::BeerNotAssigned => {
                // HTTP 403
                error::ErrorForbidden(e.to_string())
            }
            CatalogErrorKind::NotFound => {
                // HTTP 404
                error::ErrorNotFound(e.to_string())
            }
            CatalogErrorKind::MethodNotAllowed => {
                // HTTP 405
                error::ErrorMethodNotAllowed(e.to_string())
            }
            CatalogErrorKind::NotAcceptable => {
                // HTTP 406
                error::ErrorNotAcceptable(e.to_string())
            }
            CatalogErrorKind::UnsupportedMediaType => {
                // HTTP 415
                error::ErrorUnsupportedMediaType(e.to_string())
            }
            CatalogErrorKind::UpstreamFailure | CatalogErrorKind::Unspecified => {
                // HTTP 500
                error::ErrorInternalServerError(e.to_string())
            }
        }
    }

    /// Return HTTP 405 with an `Accept` header listing the allowed methods.
    pub fn method_not_allowed(allowed_methods: &str) -> Error {
        InternalError::from_response(
            "Method not allowed.",
            HttpResponse::build(StatusCode::METHOD_NOT_ALLOWED)
                .insert_header(("Accept", allowed_methods))
                .finish(),
        )
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_by_kind() {
        for (kind, status) in [
            (CatalogErrorKind::MalformedIdentifier, StatusCode::BAD_REQUEST),
            (CatalogErrorKind::MalformedRequest, StatusCode::BAD_REQUEST),
            (CatalogErrorKind::AuthenticationFailure, StatusCode::UNAUTHORIZED),
            (CatalogErrorKind::Forbidden, StatusCode::FORBIDDEN),
            (CatalogErrorKind::BeerAlreadyAssigned, StatusCode::FORBIDDEN),
            (CatalogErrorKind::BeerNotAssigned, StatusCode::FORBIDDEN),
            (CatalogErrorKind::NotFound, StatusCode::NOT_FOUND),
            (CatalogErrorKind::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (CatalogErrorKind::NotAcceptable, StatusCode::NOT_ACCEPTABLE),
            (CatalogErrorKind::UnsupportedMediaType, StatusCode::UNSUPPORTED_MEDIA_TYPE),
            (CatalogErrorKind::UpstreamFailure, StatusCode::INTERNAL_SERVER_ERROR),
            (CatalogErrorKind::Unspecified, StatusCode::INTERNAL_SERVER_ERROR),
        ] {
            let e = ApiErrorMapper::from_catalog_error(kind.error());
            assert_eq!(e.as_response_error().status_code(), status, "{kind}");
        }
    }

    #[test]
    fn test_method_not_allowed_lists_methods() {
        let response = ApiErrorMapper::method_not_allowed("GET, POST").error_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get("Accept").unwrap(), "GET, POST");
    }
}
