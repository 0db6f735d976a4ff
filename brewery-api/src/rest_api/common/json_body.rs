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

//! Extraction of JSON request bodies.

use super::ApiErrorMapper;
use actix_web::Error;
use actix_web::HttpMessage;
use actix_web::HttpRequest;
use actix_web::web;
use actix_web::web::Payload;
use brewery_core::catalog::CatalogErrorKind;
use futures::StreamExt;
use serde::de::DeserializeOwned;

/// Parses request bodies into typed request records.
pub struct JsonBody {}

impl JsonBody {
    /// Largest accepted request body.
    const MAX_BODY_SIZE: usize = 64 * 1024;

    /// Deserialize the request body.
    ///
    /// The `Content-Type` must be `application/json` (HTTP 415 otherwise) and
    /// the body must match `T` (HTTP 400 otherwise).
    pub async fn parse<T: DeserializeOwned>(
        http_request: &HttpRequest,
        payload: Payload,
    ) -> Result<T, Error> {
        Self::assert_json_content_type(http_request)?;
        let content_length_estimate = Self::assert_declared_content_length(http_request)?;
        let body = Self::read_full_body(content_length_estimate, payload).await?;
        serde_json::from_slice::<T>(&body).map_err(|e| {
            ApiErrorMapper::from_catalog_error(
                CatalogErrorKind::MalformedRequest
                    .error_with_msg(format!("Invalid request body: {e}")),
            )
        })
    }

    fn assert_json_content_type(http_request: &HttpRequest) -> Result<(), Error> {
        if http_request.content_type() == "application/json" {
            Ok(())
        } else {
            Err(ApiErrorMapper::from_catalog_error(
                CatalogErrorKind::UnsupportedMediaType
                    .error_with_msg("Server only accepts application/json data."),
            ))
        }
    }

    fn assert_declared_content_length(http_request: &HttpRequest) -> Result<usize, Error> {
        let content_length_estimate = http_request
            .headers()
            .get("content-length")
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_value_str| header_value_str.parse::<usize>().ok())
            .unwrap_or(1024);
        if content_length_estimate > Self::MAX_BODY_SIZE {
            Err(Self::overflow())
        } else {
            Ok(content_length_estimate)
        }
    }

    async fn read_full_body(
        content_length_estimate: usize,
        mut payload: Payload,
    ) -> Result<web::Bytes, Error> {
        let mut body = web::BytesMut::with_capacity(content_length_estimate);
        while let Some(chunk) = payload.next().await {
            let chunk = chunk?;
            // limit max size of in-memory payload
            if (body.len() + chunk.len()) > Self::MAX_BODY_SIZE {
                Err(Self::overflow())?;
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body.freeze())
    }

    fn overflow() -> Error {
        ApiErrorMapper::from_catalog_error(
            CatalogErrorKind::MalformedRequest.error_with_msg("Request body is too large."),
        )
    }
}
