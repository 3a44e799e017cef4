//! Server mode

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    http::{Method, header},
    middleware::{Compress, DefaultHeaders},
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use crate::config::{CorsConfig, StaticConfig};
use crate::runtime::lifetime;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors: &CorsConfig) {
    if cors.enabled && cors.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Set allowed_origins explicitly or use '[\"*\"]' for any origin."
        );
    }
}

/// Build CORS middleware from configuration
pub fn build_cors_middleware(cors: &CorsConfig) -> Cors {
    // 关闭时保持浏览器默认的同源策略
    if !cors.enabled {
        return Cors::default();
    }

    let mut middleware = Cors::default()
        .allowed_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allowed_header("X-Request-ID")
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(cors.max_age);

    if cors.allowed_origins.iter().any(|o| o == "*") {
        middleware = middleware.allow_any_origin();
    } else {
        for origin in &cors.allowed_origins {
            middleware = middleware.allowed_origin(origin);
        }
    }

    middleware
}

/// Run the HTTP server
///
/// **Note**: 调用前需要先初始化日志
pub async fn run_server(config: StaticConfig) -> Result<()> {
    let state = lifetime::prepare_server_startup(&config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    validate_cors_config(&config.cors);

    let workers = config.server.workers.max(1);
    warn!("Using {} workers for the server", workers);

    let cors_config = config.cors.clone();
    let slow_request_ms = config.server.slow_request_ms;
    let db_for_shutdown = state.storage.get_db().clone();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(TimingMiddleware::new(slow_request_ms)) // 记录请求延迟
            .wrap(RequestIdMiddleware)
            .wrap(build_cors_middleware(&cors_config))
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .configure(|cfg| state.configure(cfg))
    })
    .workers(workers)
    .disable_signals()
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    let handle = server.handle();

    tokio::select! {
        res = server => {
            res.context("HTTP server error")?;
        }
        _ = lifetime::shutdown::wait_for_signal() => {
            warn!("Shutdown signal received, draining in-flight requests");
            handle.stop(true).await;
            lifetime::shutdown::close_pool(db_for_shutdown).await;
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
