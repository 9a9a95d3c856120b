use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    serve::Serve,
    Json, Router,
};

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::error::Error;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

use domain::{ProjectAPIError, RosterError};
pub mod routes;
use crate::utils::tracing::*;
use routes::projects::{
    add_member, get_member_list_for_project, get_project, get_project_list,
    new_project, remove_member, update_member, update_team,
};
pub mod app_state;
pub mod domain;
pub mod services;
use app_state::AppState;
pub mod utils;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl IntoResponse for ProjectAPIError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match &self {
            ProjectAPIError::AuthenticationError(auth_error) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::UNAUTHORIZED, format!("{auth_error}"), None)
            }
            ProjectAPIError::Forbidden(_) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::FORBIDDEN, format!("{self}"), None)
            }
            ProjectAPIError::IDNotFoundError(id) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, format!("{id}"), None)
            }
            ProjectAPIError::RosterError(roster_error) => {
                log_error_chain(&self, Level::DEBUG);
                let status = match roster_error {
                    RosterError::NotFound(_) => StatusCode::NOT_FOUND,
                    RosterError::DuplicateMember(_)
                    | RosterError::RoleConflict(_)
                    | RosterError::Conflict => StatusCode::CONFLICT,
                    RosterError::ProductOwnerRequired(_)
                    | RosterError::ScrumRoleRequired(_)
                    | RosterError::DeveloperRequired(_)
                    | RosterError::LastMemberViolation(_)
                    | RosterError::InvalidOperation(_) => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                };
                (
                    status,
                    format!("{roster_error}"),
                    Some(roster_error.code().to_string()),
                )
            }
            ProjectAPIError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                    None,
                )
            }
            ProjectAPIError::ValidationError(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, format!("{message}"), None)
            }
        };
        let body = Json(ErrorResponse {
            error: error_message,
            code,
        });
        (status, body).into_response()
    }
}

fn log_error_chain(e: &(dyn Error + 'static), debug_level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        let str = format!("Caused by:\n\n{:?}", cause);
        report = format!("{}\n{}", report, str);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match debug_level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(
        app_state: AppState,
        address: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let allowed_origins = [
            "http://localhost:3000".parse()?,
            "http://127.0.0.1:3000".parse()?,
        ];

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_credentials(true)
            .allow_origin(allowed_origins);

        let router = Router::new()
            .route("/projects/new", post(new_project))
            .route("/projects/list", get(get_project_list))
            .route("/projects/project", get(get_project))
            .route("/projects/get-members", get(get_member_list_for_project))
            .route("/projects/add-member", post(add_member))
            .route("/projects/remove-member", delete(remove_member))
            .route("/projects/update-member", put(update_member))
            .route("/projects/update-team", post(update_team))
            .with_state(app_state)
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await
}
