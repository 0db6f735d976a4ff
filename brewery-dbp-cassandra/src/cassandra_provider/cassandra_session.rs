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

//! Session (connection) to the Cassandra database.

use brewery_dbp::catalog::CatalogError;
use brewery_dbp::catalog::CatalogErrorKind;
use cdrs_tokio::authenticators::StaticPasswordAuthenticatorProvider;
use cdrs_tokio::cluster::NodeAddress;
use cdrs_tokio::cluster::NodeTcpConfigBuilder;
use cdrs_tokio::cluster::TcpConnectionManager;
use cdrs_tokio::cluster::session::Session;
use cdrs_tokio::cluster::session::SessionBuilder;
use cdrs_tokio::cluster::session::TcpSessionBuilder;
use cdrs_tokio::frame::events::ServerEvent;
use cdrs_tokio::frame::message_response::ResponseBody;
use cdrs_tokio::load_balancing::RoundRobinLoadBalancingStrategy;
use cdrs_tokio::query::QueryValues;
use cdrs_tokio::statement::StatementParamsBuilder;
use cdrs_tokio::transport::TransportTcp;
use std::sync::Arc;
use tokio::time::{Duration, sleep};

type TcpSession = Session<
    TransportTcp,
    TcpConnectionManager,
    RoundRobinLoadBalancingStrategy<TransportTcp, TcpConnectionManager>,
>;

/// Session (connection) to the Cassandra database.
pub struct CassandraSession {
    /// Connection to Cassandra.
    session: Arc<TcpSession>,
    replication_factor: usize,
}

impl CassandraSession {
    /// Open up a new session to the Cassandra database service and start
    /// logging of server side events.
    pub async fn connect(
        endpoints: &[String],
        username: &str,
        password: &str,
        replication_factor: usize,
    ) -> Result<Arc<Self>, CatalogError> {
        let session = Arc::new(Self::create_session(endpoints, username, password).await?);
        Ok(Arc::new(Self {
            session,
            replication_factor,
        })
        .init())
    }

    /// Initialize
    fn init(self: Arc<Self>) -> Arc<Self> {
        let self_clone = Arc::clone(&self);
        tokio::spawn(async move { self_clone.handle_server_events().await });
        self
    }

    /// Recieve and log server side events from Cassandra.
    async fn handle_server_events(&self) {
        let mut server_event_receiver = self.session.create_event_receiver();
        while let Ok(server_event) = server_event_receiver.recv().await {
            match server_event {
                ServerEvent::TopologyChange(toplogy_change) => {
                    log::debug!("TopologyChange: {toplogy_change:?}");
                }
                ServerEvent::StatusChange(status_change) => {
                    log::debug!("StatusChange: {status_change:?}");
                }
                ServerEvent::SchemaChange(schema_change) => {
                    log::debug!("SchemaChange: {schema_change:?}");
                }
                _ => {
                    log::debug!("Unsupported server event received: {server_event:?}");
                }
            }
        }
        log::debug!("handle_server_events terminated");
    }

    /// Open up a new session to the Cassandra database service.
    async fn create_session(
        endpoints: &[String],
        username: &str,
        password: &str,
    ) -> Result<TcpSession, CatalogError> {
        log::info!("Connecting to Cassandra cluster as '{username}'.");
        let endpoints: Vec<NodeAddress> = endpoints.iter().map(|x| x.into()).collect();
        let authenticator_provider =
            Arc::new(StaticPasswordAuthenticatorProvider::new(username, password));
        let cluster_config = NodeTcpConfigBuilder::new()
            .with_authenticator_provider(authenticator_provider)
            .with_contact_points(endpoints.clone())
            .with_version(cdrs_tokio::frame::Version::V5)
            .build()
            .await
            .map_err(|e| {
                CatalogErrorKind::UpstreamFailure
                    .error_with_msg(format!("Failed to connect to {endpoints:?}: {e:?}"))
            })?;
        let session = TcpSessionBuilder::new(RoundRobinLoadBalancingStrategy::new(), cluster_config)
            .build()
            .await
            .map_err(|e| {
                CatalogErrorKind::UpstreamFailure
                    .error_with_msg(format!("Failed to create session to {endpoints:?}: {e:?}"))
            })?;
        log::info!("Connected to Cassandra cluster.");
        Ok(session)
    }

    /// Execute raw keyspaced query using this session.
    pub async fn query_raw(
        &self,
        query_template: &str,
        keyspace: &str,
    ) -> Result<ResponseBody, CatalogError> {
        log::debug!("Running '{query_template}' with keyspace '{keyspace}'.");
        Arc::clone(&self.session)
            .query(&query_template.replace("{{ keyspace }}", keyspace))
            .await
            .and_then(|envelope| envelope.response_body())
            .map_err(|e| {
                CatalogErrorKind::UpstreamFailure.error_with_msg(format!(
                    "Failed to execute query '{query_template}' in keyspace '{keyspace}': {e:?}"
                ))
            })
    }

    /// Execute keyspaced query with value parameters using this session.
    pub async fn query_with_keyspace_and_values(
        &self,
        query_template: &str,
        keyspace: &str,
        values: QueryValues,
    ) -> Result<ResponseBody, CatalogError> {
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Running '{query_template}' in keyspace '{keyspace}'.");
        }
        let consistency = match self.replication_factor {
            1 => cdrs_tokio::consistency::Consistency::One,
            2 => cdrs_tokio::consistency::Consistency::Two,
            _ => cdrs_tokio::consistency::Consistency::Quorum,
        };
        loop {
            let mut parameters = StatementParamsBuilder::new().with_consistency(consistency);
            let query_template = if query_template.contains("{{ keyspace }}") {
                &query_template.replace("{{ keyspace }}", keyspace)
            } else {
                parameters = parameters.with_keyspace(keyspace.to_string());
                query_template
            };
            parameters = parameters.with_values(values.clone());
            let result = Arc::clone(&self.session)
                .query_with_params(query_template, parameters.build())
                .await;
            match result {
                Ok(envelope) => {
                    return envelope.response_body().map_err(|e| {
                        CatalogErrorKind::UpstreamFailure.error_with_msg(format!(
                            "Failed to parse response of '{query_template}' in keyspace '{keyspace}': {e:?}"
                        ))
                    });
                }
                Err(cdrs_tokio::error::Error::Server { body, addr })
                    // 0x2200 Invalid: The query is syntactically correct but invalid.
                    // This happens when the keyspace has not yet been propagated.
                    if body.ty.to_error_code() == 0x2200
                        && query_template.contains("CREATE TABLE") =>
                {
                    log::debug!(
                        "Unable to create table at this time via {addr} (will retry): {}",
                        body.message,
                    );
                    sleep(Duration::from_millis(250)).await;
                }
                Err(e) => {
                    log::info!(
                        "Failed to execute query '{query_template}' in keyspace '{keyspace}': {e:?}"
                    );
                    return Err(CatalogErrorKind::UpstreamFailure
                        .error_with_msg(format!("Datastore query failed: {e}")));
                }
            }
        }
    }
}
