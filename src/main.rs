// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Extension;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use teamup::config::settings::Settings;
use teamup::domain::services::team_service::TeamService;
use teamup::domain::services::user_service::UserService;
use teamup::infrastructure::database::connection;
use teamup::infrastructure::repositories::member_repo_impl::MemberRepositoryImpl;
use teamup::infrastructure::repositories::project_repo_impl::ProjectRepositoryImpl;
use teamup::infrastructure::repositories::team_repo_impl::TeamRepositoryImpl;
use teamup::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use teamup::infrastructure::services::mail_service_impl::MailServiceImpl;
use teamup::presentation::middleware::session_middleware::{session_middleware, SessionState};
use teamup::presentation::routes;
use teamup::utils::telemetry;
use teamup::workers::expiration_worker::ExpirationWorker;
use tokio::net::TcpListener;
use tracing::info;

use migration::{Migrator, MigratorTrait};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting teamup...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // Initialize Prometheus Metrics
    let metrics_addr = SocketAddr::from(([0, 0, 0, 0], settings.metrics.port));
    teamup::infrastructure::metrics::init_metrics(metrics_addr);

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize Components
    let user_repo = Arc::new(UserRepositoryImpl::new(db.clone()));
    let team_repo = Arc::new(TeamRepositoryImpl::new(db.clone()));
    let member_repo = Arc::new(MemberRepositoryImpl::new(db.clone()));
    let project_repo = Arc::new(ProjectRepositoryImpl::new(db.clone()));
    let mail_service = Arc::new(MailServiceImpl::new(settings.mail.base_url.clone()));

    let team_service = Arc::new(TeamService::new(
        user_repo.clone(),
        team_repo,
        member_repo,
        project_repo,
        mail_service,
    ));
    let user_service = Arc::new(UserService::new(user_repo));

    // 5. Start the expiration sweep worker
    let worker = ExpirationWorker::new(
        team_service.clone(),
        Duration::from_secs(settings.sweep.interval_secs),
    );
    worker.start();

    // 6. Start HTTP server
    let session_state = SessionState { db: db.clone() };

    let app = routes::routes()
        .layer(axum::middleware::from_fn_with_state(
            session_state,
            session_middleware,
        ))
        .layer(Extension(team_service))
        .layer(Extension(user_service))
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
