use std::collections::HashMap;

use crate::cache::{CONFIG_CACHE_TTL, invalidate_settings, settings_key};
use crate::database::Database;
use crate::model::settings::LudificaSettings;

/// Load the site rules. Unset names fall back to [`LudificaSettings::default`].
pub async fn get_settings(db: &Database) -> anyhow::Result<LudificaSettings> {
    let cache_key = settings_key(db.cache());
    db.cache()
        .get_or_load_json(&cache_key, CONFIG_CACHE_TTL, || async {
            let rows: Vec<(String, String)> =
                sqlx::query_as("SELECT name, value FROM block_ludifica_settings")
                    .fetch_all(db.pool())
                    .await?;

            let pairs: HashMap<String, String> = rows.into_iter().collect();
            Ok(LudificaSettings::from_pairs(&pairs))
        })
        .await
}

pub async fn set_setting(db: &Database, name: &str, value: &str) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO block_ludifica_settings (name, value)
         VALUES ($1, $2)
         ON CONFLICT (name) DO UPDATE SET value = EXCLUDED.value",
    )
    .bind(name)
    .bind(value)
    .execute(db.pool())
    .await?;

    invalidate_settings(db.cache()).await?;

    Ok(())
}

pub async fn clear_setting(db: &Database, name: &str) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM block_ludifica_settings WHERE name = $1")
        .bind(name)
        .execute(db.pool())
        .await?;

    invalidate_settings(db.cache()).await?;

    Ok(())
}
