//! HTTP surfaces over [`WeatherCheckService`].
//!
//! Only one surface is mounted per process; see [`Surface`].

use anyhow::Context;
use axum::{
    Router,
    extract::{Path, Query, State, rejection::PathRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};
use weather_check_core::{CheckError, Surface, WeatherCheckService, WeatherResult};

pub const PATH_ROUTE: &str = "/api/v1/weather-check/{zipcode}";
pub const QUERY_ROUTE: &str = "/weather-check";

const ENCODE_FAILURE: &str = "error on encode response";

pub fn router(surface: Surface, service: WeatherCheckService) -> Router {
    let routes = match surface {
        Surface::Path => Router::new().route(PATH_ROUTE, get(check_by_path)),
        Surface::Query => Router::new().route(QUERY_ROUTE, get(check_by_query)),
    };

    routes.layer(TraceLayer::new_for_http()).with_state(service)
}

pub async fn serve(
    listen: &str,
    surface: Surface,
    service: WeatherCheckService,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind {listen}"))?;

    info!(%listen, %surface, "Web server running");
    axum::serve(listener, router(surface, service)).await.context("HTTP server failed")?;

    Ok(())
}

// An undecodable segment cannot be a zipcode, so it fails validation like any other.
async fn check_by_path(
    State(service): State<WeatherCheckService>,
    zipcode: Result<Path<String>, PathRejection>,
) -> Response {
    match zipcode {
        Ok(Path(zipcode)) => respond(service.check_weather(&zipcode).await),
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable zipcode segment");
            respond(Err(CheckError::InvalidZipcode))
        }
    }
}

// The first `cep` wins when the parameter is repeated; a missing one is empty.
async fn check_by_query(
    State(service): State<WeatherCheckService>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let cep = params.into_iter().find(|(key, _)| key == "cep").map(|(_, value)| value);
    respond(service.check_weather(cep.as_deref().unwrap_or_default()).await)
}

/// HTTP status reported for each failure kind.
pub fn status_for(err: CheckError) -> StatusCode {
    match err {
        CheckError::InvalidZipcode => StatusCode::UNPROCESSABLE_ENTITY,
        CheckError::ZipcodeNotFound => StatusCode::NOT_FOUND,
        CheckError::LocaleLookupFailed | CheckError::WeatherLookupFailed => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn respond(result: Result<WeatherResult, CheckError>) -> Response {
    match result {
        Ok(weather) => match serde_json::to_vec(&weather) {
            Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
            Err(err) => {
                error!(error = %err, "Failed to encode weather result");
                (StatusCode::INTERNAL_SERVER_ERROR, ENCODE_FAILURE).into_response()
            }
        },
        Err(err) => (status_for(err), err.to_string()).into_response(),
    }
}
