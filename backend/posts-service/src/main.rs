use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use posts_service::handlers;
use posts_service::repository::{PgPostRepository, PgUserRepository};
use posts_service::security::TokenKeys;
use posts_service::services::{PostService, UserService};
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Posts Service
///
/// HTTP backend for the Memories app.
///
/// # Routes
///
/// - `/posts/*` - List, search, create, update, delete, like and comment on posts
/// - `/user/*` - Sign up and sign in
/// - `/health` - Database round-trip check
///
/// Listens on `PORT` (default 5000). Migrations run before the server binds.
#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = match posts_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting posts-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let db_pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {:#}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("Failed to run database migrations: {e}"),
            )
        })?;

    tracing::info!("Database migrations applied");

    let token_keys = Arc::new(TokenKeys::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_secs,
    ));

    let post_service = web::Data::new(PostService::new(Arc::new(PgPostRepository::new(
        db_pool.clone(),
    ))));
    let user_service = web::Data::new(UserService::new(
        Arc::new(PgUserRepository::new(db_pool.clone())),
        token_keys.clone(),
    ));
    let token_keys_data = web::Data::from(token_keys);

    let bind_address = config.bind_address();
    tracing::info!("Starting HTTP server at {}", bind_address);

    let json_limit = config.app.json_limit_bytes;
    let allowed_origins = config.cors.allowed_origins.clone();

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(post_service.clone())
            .app_data(user_service.clone())
            .app_data(token_keys_data.clone())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut result = Ok(());
    tokio::select! {
        joined = server_task => {
            match joined {
                Ok(Ok(())) => tracing::info!("HTTP server stopped"),
                Ok(Err(e)) => {
                    tracing::error!("HTTP server error: {}", e);
                    result = Err(e);
                }
                Err(e) => {
                    tracing::error!("HTTP server task join error: {}", e);
                    result = Err(io::Error::new(io::ErrorKind::Other, e.to_string()));
                }
            }
        }
        _ = &mut shutdown => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
        }
    }

    db_pool.close().await;
    tracing::info!("Posts-service shutting down");

    result
}
