//! Wellness Journal API server.

use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use wellness_journal::adapters::ai::{
    LlmChatCompanion, LlmEntryAnalyzer, OpenAIConfig, OpenAIProvider,
};
use wellness_journal::adapters::auth::{JwtConfig, JwtSessionValidator};
use wellness_journal::adapters::http::{api_router, ApiDependencies, ErrorPolicy, HttpSettings};
use wellness_journal::adapters::memory::{InMemoryChatSessionRepository, InMemoryJournalRepository};
use wellness_journal::adapters::postgres::{
    PostgresChatSessionRepository, PostgresJournalRepository,
};
use wellness_journal::application::handlers::ANALYSIS_TIMEOUT;
use wellness_journal::config::{AiConfig, AppConfig, DatabaseConfig, StorageBackend};
use wellness_journal::ports::{
    AIProvider, ChatCompanion, ChatSessionRepository, EntryAnalyzer, JournalRepository,
};

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "wellness-journal starting"
    );

    let (journal_repository, chat_repository) = build_repositories(&config.database).await?;
    let (entry_analyzer, chat_companion) = build_ai_adapters(&config.ai)?;

    let mut jwt = JwtConfig::new(config.auth.jwt_secret.clone()).with_leeway(config.auth.leeway_secs);
    if let Some(issuer) = &config.auth.jwt_issuer {
        jwt = jwt.with_issuer(issuer.clone());
    }

    let deps = ApiDependencies {
        journal_repository,
        chat_repository,
        session_validator: Arc::new(JwtSessionValidator::new(jwt)),
        entry_analyzer,
        chat_companion,
    };
    let settings = HttpSettings {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
        error_policy: if config.is_production() {
            ErrorPolicy::opaque()
        } else {
            ErrorPolicy::verbose()
        },
        model_timeout: ANALYSIS_TIMEOUT,
    };
    let app = api_router(deps, &settings);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` overrides
/// the configured filter.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

async fn build_repositories(
    database: &DatabaseConfig,
) -> Result<(Arc<dyn JournalRepository>, Arc<dyn ChatSessionRepository>), BoxError> {
    if database.backend()? == StorageBackend::InMemory {
        tracing::warn!("Using in-memory storage; data is lost on restart");
        let journal: Arc<dyn JournalRepository> = Arc::new(InMemoryJournalRepository::new());
        let chat: Arc<dyn ChatSessionRepository> = Arc::new(InMemoryChatSessionRepository::new());
        return Ok((journal, chat));
    }

    let pool = PgPoolOptions::new()
        .max_connections(database.pool_size)
        .acquire_timeout(database.connect_wait())
        .connect(&database.url)
        .await?;
    tracing::info!(pool_size = database.pool_size, "Database pool ready");

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let journal: Arc<dyn JournalRepository> = Arc::new(PostgresJournalRepository::new(pool.clone()));
    let chat: Arc<dyn ChatSessionRepository> = Arc::new(PostgresChatSessionRepository::new(pool));
    Ok((journal, chat))
}

type AiAdapters = (
    Option<Arc<dyn EntryAnalyzer>>,
    Option<Arc<dyn ChatCompanion>>,
);

/// Without an API key both adapters are absent and the fallbacks serve
/// every request.
fn build_ai_adapters(ai: &AiConfig) -> Result<AiAdapters, BoxError> {
    let Some(api_key) = ai.api_key() else {
        tracing::warn!("No AI API key configured; using heuristic analysis and canned replies");
        return Ok((None, None));
    };

    let provider_config = OpenAIConfig::new(api_key)
        .with_base_url(&ai.base_url)
        .with_referer(&ai.referer_url)
        .with_app_title(&ai.app_title)
        .with_timeout(ANALYSIS_TIMEOUT);
    let provider: Arc<dyn AIProvider> = Arc::new(OpenAIProvider::new(provider_config)?);

    let analyzer: Arc<dyn EntryAnalyzer> = Arc::new(
        LlmEntryAnalyzer::new(provider.clone())
            .with_model(&ai.analysis_model)
            .with_title(ai.analysis_title()),
    );
    let companion: Arc<dyn ChatCompanion> = Arc::new(
        LlmChatCompanion::new(provider)
            .with_model(&ai.chat_model)
            .with_title(ai.companion_title()),
    );

    tracing::info!(
        base_url = %ai.base_url,
        analysis_model = %ai.analysis_model,
        chat_model = %ai.chat_model,
        "External model enabled"
    );
    Ok((Some(analyzer), Some(companion)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
