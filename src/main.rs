use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exercise_tracker::config::Config;
use exercise_tracker::handlers::{exercises, users};
use exercise_tracker::repositories::{ExerciseRepository, UserRepository};
use exercise_tracker::{db, migrations, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables first so RUST_LOG may come from .env
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "exercise_tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database: {}", config.database_url);
    let pool = db::create_pool(&config.database_url)?;
    migrations::run_migrations(&pool)?;

    let user_repo = UserRepository::new(pool.clone());
    let exercise_repo = ExerciseRepository::new(pool.clone());

    let users_state = users::UsersState {
        user_repo: user_repo.clone(),
    };
    let exercises_state = exercises::ExercisesState {
        user_repo,
        exercise_repo,
        filter_mode: config.filter_mode,
    };

    let app = routes::create_router(
        users_state,
        exercises_state,
        &config.public_dir,
        &config.views_dir,
    );

    let addr = config.server_addr();
    tracing::info!(
        "Starting server at http://{} (log filter: {})",
        addr,
        config.filter_mode.as_str()
    );

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing database pool");
    drop(pool);

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {},
                    _ = tokio::signal::ctrl_c() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Cannot listen for SIGTERM: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
}
