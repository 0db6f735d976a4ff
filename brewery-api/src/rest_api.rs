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

//! REST API server and resources.

mod http_resources {
    //! API resources

    pub mod beer_collection_resource;
    pub mod beer_resource;
    pub mod brewery_beer_resource;
    pub mod brewery_collection_resource;
    pub mod brewery_resource;
    pub mod user_resources;
}
mod common {
    //! Common REST API resources and utils.

    mod api_error_mapper;
    mod bearer_token_authentication_checker;
    mod content_negotiation;
    mod cursor_query_params;
    mod html_renderer;
    mod json_body;
    mod utoipa_security_scheme_modifier;

    pub use api_error_mapper::*;
    pub use bearer_token_authentication_checker::*;
    pub use content_negotiation::Representation;
    pub use cursor_query_params::CursorQueryParams;
    pub use html_renderer::HtmlRenderer;
    pub use json_body::JsonBody;
    pub use utoipa_security_scheme_modifier::*;
}

pub use self::common::BearerTokenAuthenticationChecker;
use self::common::UtopiaSecuritySchemeModifier;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::dev::HttpServiceFactory;
use actix_web::get;
use actix_web::http::header::ContentType;
use actix_web::web;
use brewery_core::Catalog;
use brewery_core::conf::AppConfig;
use brewery_core::identity::IdentityProviderClient;
use std::sync::Arc;
use tyst_api_rest_health::AppHealth;
use tyst_api_rest_health::health_resources;
use utoipa::OpenApi;

/// Number of parallel requests the can be served for each assigned CPU core.
const WORKERS_PER_CORE: usize = 1024;

/// Shared state between requests.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    auth: Arc<BearerTokenAuthenticationChecker>,
    idp: Arc<IdentityProviderClient>,
    unsecure_delete: bool,
}

impl AppState {
    /// Return a new instance.
    pub fn new(
        catalog: &Arc<Catalog>,
        auth: &Arc<BearerTokenAuthenticationChecker>,
        idp: &Arc<IdentityProviderClient>,
        unsecure_delete: bool,
    ) -> Self {
        Self {
            catalog: Arc::clone(catalog),
            auth: Arc::clone(auth),
            idp: Arc::clone(idp),
            unsecure_delete,
        }
    }
}

/// Simple health check that delegates to the catalog.
pub struct CatalogHealth {
    catalog: Arc<Catalog>,
}
impl CatalogHealth {
    fn with_app(catalog: &Arc<Catalog>) -> Arc<dyn AppHealth> {
        Arc::new(Self {
            catalog: Arc::clone(catalog),
        })
    }
}
impl AppHealth for CatalogHealth {
    fn is_health_started(&self) -> bool {
        self.catalog.is_health_started()
    }
    fn is_health_ready(&self) -> bool {
        self.catalog.is_health_ready()
    }
    fn is_health_live(&self) -> bool {
        self.catalog.is_health_live()
    }
}

/// Catalog, user and OpenAPI resources.
///
/// Resources sharing a path are registered with the allowed methods first.
pub fn api_services() -> impl HttpServiceFactory {
    (
        get_openapi,
        (
            http_resources::brewery_collection_resource::breweries_list,
            http_resources::brewery_collection_resource::brewery_create,
            http_resources::brewery_collection_resource::breweries_method_not_allowed,
            http_resources::brewery_resource::brewery_delete_unsecured,
            http_resources::brewery_resource::brewery_by_id,
            http_resources::brewery_resource::brewery_replace,
            http_resources::brewery_resource::brewery_delete,
            http_resources::brewery_resource::brewery_method_not_allowed,
        ),
        (
            http_resources::brewery_beer_resource::beer_in_brewery_list,
            http_resources::brewery_beer_resource::beer_associate,
            http_resources::brewery_beer_resource::beer_disassociate,
        ),
        (
            http_resources::beer_collection_resource::beer_list,
            http_resources::beer_collection_resource::beer_create,
            http_resources::beer_collection_resource::beer_collection_method_not_allowed,
            http_resources::beer_resource::beer_by_id,
            http_resources::beer_resource::beer_replace,
            http_resources::beer_resource::beer_delete,
            http_resources::beer_resource::beer_method_not_allowed,
        ),
        (
            http_resources::user_resources::user_login,
            http_resources::user_resources::user_create,
            http_resources::user_resources::users_list,
            http_resources::user_resources::user_password_update,
            http_resources::user_resources::user_delete,
        ),
    )
}

/// Run HTTP server.
pub async fn run_http_server(
    app_config: &Arc<AppConfig>,
    catalog: &Arc<Catalog>,
) -> Result<(), Box<dyn core::error::Error>> {
    let app_config = Arc::clone(app_config);
    let auth = BearerTokenAuthenticationChecker::new(
        &app_config.identity.issuer(),
        app_config.identity.audience(),
        app_config.identity.username_claim(),
    )
    .await?;
    let idp = IdentityProviderClient::new(&app_config)?;
    let workers = app_config.limits.available_parallelism();
    let max_connections = WORKERS_PER_CORE * workers;
    log::info!(
        "API described by http://{}:{}/openapi.json allows {max_connections} concurrent connections.",
        &app_config.api.bind_address(),
        &app_config.api.bind_port(),
    );
    if app_config.api.unsecure_delete_enabled() {
        log::warn!("Unauthenticated deletion of breweries is enabled.");
    }
    let app_state = AppState::new(
        catalog,
        &auth,
        &idp,
        app_config.api.unsecure_delete_enabled(),
    );
    let app_data = web::Data::<AppState>::new(app_state);
    let app_health = web::Data::<Arc<dyn AppHealth>>::new(CatalogHealth::with_app(catalog));

    HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .app_data(app_health.clone())
            .service(web::redirect("/openapi", "/openapi.json"))
            .service(api_services())
            .service(health_resources::health)
            .service(health_resources::health_live)
            .service(health_resources::health_ready)
            .service(health_resources::health_started)
    })
    .workers(workers)
    .backlog(u32::try_from(max_connections / 2).unwrap_or(2048))
    .worker_max_blocking_threads(max_connections)
    .max_connections(max_connections)
    .bind_auto_h2c((app_config.api.bind_address(), app_config.api.bind_port()))?
    .disable_signals()
    .shutdown_timeout(5) // Default 30
    .run()
    .await?;
    Ok(())
}

/// Serve Open API documentation.
#[get("/openapi.json")]
async fn get_openapi() -> impl Responder {
    match openapi_as_string() {
        Ok(openapi) => HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(openapi),
        Err(e) => {
            log::warn!("Failed to generate OpenAPI document: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Get the OpenAPI definition as a pretty JSON String.
pub fn openapi_as_string() -> Result<String, serde_json::Error> {
    #[derive(OpenApi)]
    #[openapi(
        // Use Cargo.toml as source for the "info" section
        modifiers(&UtopiaSecuritySchemeModifier),
        paths(
            http_resources::brewery_collection_resource::breweries_list,
            http_resources::brewery_collection_resource::brewery_create,
            http_resources::brewery_resource::brewery_by_id,
            http_resources::brewery_resource::brewery_replace,
            http_resources::brewery_resource::brewery_delete,
            http_resources::brewery_resource::brewery_delete_unsecured,
            http_resources::brewery_beer_resource::beer_in_brewery_list,
            http_resources::brewery_beer_resource::beer_associate,
            http_resources::brewery_beer_resource::beer_disassociate,
            http_resources::beer_collection_resource::beer_list,
            http_resources::beer_collection_resource::beer_create,
            http_resources::beer_resource::beer_by_id,
            http_resources::beer_resource::beer_replace,
            http_resources::beer_resource::beer_delete,
            http_resources::user_resources::user_create,
            http_resources::user_resources::user_login,
            http_resources::user_resources::users_list,
            http_resources::user_resources::user_password_update,
            http_resources::user_resources::user_delete,
            health_resources::health,
            health_resources::health_live,
            health_resources::health_ready,
            health_resources::health_started,
        )
    )]
    struct ApiDoc;
    ApiDoc::openapi().to_pretty_json()
}

#[cfg(test)]
mod tests;
