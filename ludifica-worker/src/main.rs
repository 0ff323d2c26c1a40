mod events;

use std::env;

use tokio::io::{BufReader, stdin, stdout};
use tracing::{info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use ludifica_core::{Data, Lang, SiteAssets};
use ludifica_database::{CacheService, Database, MIGRATOR};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Event results go to stdout, so logs go to stderr.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter_fn(|metadata| {
            let within_info_level = *metadata.level() <= tracing::Level::INFO;
            within_info_level && !metadata.target().starts_with("sqlx::query")
        }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL")?;
    let max_connections = u32::try_from(env_u64("DATABASE_MAX_CONNECTIONS", 5)).unwrap_or(5);

    let db_pool = Database::connect(&database_url, max_connections).await?;
    info!(max_connections, "PostgreSQL connection established.");

    let redis_enabled = env_bool("REDIS_ENABLED", false);
    let redis_key_prefix =
        env::var("REDIS_KEY_PREFIX").unwrap_or_else(|_| "ludifica:prod".to_string());

    let cache = if redis_enabled {
        match env::var("REDIS_URL") {
            Ok(redis_url) => match CacheService::redis(&redis_url, redis_key_prefix.clone()) {
                Ok(cache) => {
                    info!(key_prefix = %redis_key_prefix, "Redis cache enabled.");
                    cache
                }
                Err(err) => {
                    warn!(?err, key_prefix = %redis_key_prefix, "Failed to initialize Redis cache; continuing with DB-only mode.");
                    CacheService::disabled(redis_key_prefix.clone())
                }
            },
            Err(_) => {
                warn!(key_prefix = %redis_key_prefix, "REDIS_ENABLED=true but REDIS_URL is missing; continuing with DB-only mode.");
                CacheService::disabled(redis_key_prefix.clone())
            }
        }
    } else {
        info!("Redis cache disabled (set REDIS_ENABLED=true to enable).");
        CacheService::disabled(redis_key_prefix.clone())
    };

    if cache.is_redis_enabled() {
        if let Err(err) = cache.ping().await {
            warn!(?err, "Redis cache ping failed; reads will fall back to the database.");
        } else {
            info!("Redis cache health check passed.");
        }
    }

    let db = Database::with_cache(db_pool, cache);

    if env_bool("AUTO_RUN_MIGRATIONS", true) {
        MIGRATOR.run(db.pool()).await?;
        info!("Database migrations applied.");
    } else {
        info!("Auto migrations disabled (set AUTO_RUN_MIGRATIONS=true to run at startup).");
    }

    let wwwroot = env::var("LUDIFICA_WWWROOT").unwrap_or_else(|_| "http://localhost".to_string());
    let lang = env::var("LUDIFICA_LANG")
        .map(|code| Lang::from_code(&code))
        .unwrap_or_default();

    let data = Data {
        db,
        assets: SiteAssets::new(wwwroot),
        lang,
    };

    info!(
        callbacks = ludifica_block::CALLBACKS.len(),
        lang = lang.code(),
        "Ludifica worker ready; reading events from stdin."
    );

    tokio::select! {
        result = events::stream::run(&data, BufReader::new(stdin()), stdout()) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested; stopping event stream.");
        }
    }

    Ok(())
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}
