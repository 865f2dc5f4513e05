//! HTTP surface of the dealership record manager.
//!
//! # Responsibility
//! - Route list/create/edit/delete requests for the three entities.
//! - Run each request's storage work on its own scoped connection.
//! - Map coordinator output to HTML pages, redirects and error statuses.

pub mod error;
pub mod forms;
mod handlers;
pub mod render;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::{Html, Response};
use axum::routing::{get, post};
use axum::Router;
use concessionaria_core::Storage;
use error::{WebError, WebResult};
use log::info;
use rusqlite::Connection;
use std::future::Future;
use std::time::Instant;
use tokio::net::TcpListener;

/// Router state: the explicit storage handle.
#[derive(Debug, Clone)]
pub struct AppState {
    storage: Storage,
}

impl AppState {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Runs `work` on a blocking thread with a fresh connection that is
    /// dropped when `work` returns.
    pub(crate) async fn with_connection<T, F>(&self, work: F) -> WebResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> WebResult<T> + Send + 'static,
    {
        let storage = self.storage.clone();
        tokio::task::spawn_blocking(move || {
            let conn = storage.connect()?;
            work(&conn)
        })
        .await
        .map_err(|err| WebError::Task(err.to_string()))?
    }
}

/// Builds the application router over `storage`.
pub fn router(storage: Storage) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/montadoras", get(handlers::manufacturers::list))
        .route(
            "/montadoras/create",
            get(handlers::manufacturers::show_create).post(handlers::manufacturers::submit_create),
        )
        .route(
            "/montadoras/edit/{id}",
            get(handlers::manufacturers::show_edit).post(handlers::manufacturers::submit_edit),
        )
        .route(
            "/montadoras/delete/{id}",
            post(handlers::manufacturers::delete),
        )
        .route("/modelos_veiculo", get(handlers::vehicle_models::list))
        .route(
            "/modelos_veiculo/create",
            get(handlers::vehicle_models::show_create)
                .post(handlers::vehicle_models::submit_create),
        )
        .route(
            "/modelos_veiculo/edit/{id}",
            get(handlers::vehicle_models::show_edit).post(handlers::vehicle_models::submit_edit),
        )
        .route(
            "/modelos_veiculo/delete/{id}",
            post(handlers::vehicle_models::delete),
        )
        .route("/veiculos", get(handlers::vehicles::list))
        .route(
            "/veiculos/create",
            get(handlers::vehicles::show_create).post(handlers::vehicles::submit_create),
        )
        .route(
            "/veiculos/edit/{id}",
            get(handlers::vehicles::show_edit).post(handlers::vehicles::submit_edit),
        )
        .route("/veiculos/delete/{id}", post(handlers::vehicles::delete))
        .layer(middleware::from_fn(log_request))
        .with_state(AppState::new(storage))
}

async fn index() -> Html<String> {
    Html(render::index())
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=web status=done method={} path={} http_status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

/// Serves the application on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    storage: Storage,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(
        "event=http_serve module=web status=start addr={addr} database={}",
        storage.path().display()
    );
    axum::serve(listener, router(storage))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("event=http_serve module=web status=stopped addr={addr}");
    Ok(())
}
