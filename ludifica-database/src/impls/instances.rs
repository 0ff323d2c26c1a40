use anyhow::Context as _;

use crate::cache::{CONFIG_CACHE_TTL, block_config_key, invalidate_block_config};
use crate::database::Database;
use crate::impls::now_unix_secs;
use crate::model::instances::{BlockConfig, BlockInstance};

#[derive(sqlx::FromRow)]
struct BlockInstanceRow {
    instance_id: i64,
    course_id: i64,
    config: String,
    updated_at: i64,
}

pub async fn save_block_config(
    db: &Database,
    instance_id: u64,
    course_id: u64,
    config: &BlockConfig,
) -> anyhow::Result<()> {
    let instance_id_i64 = i64::try_from(instance_id).context("instance_id out of i64 range")?;
    let course_id_i64 = i64::try_from(course_id).context("course_id out of i64 range")?;
    let now = i64::try_from(now_unix_secs()).context("now out of i64 range")?;
    let payload = serde_json::to_string(config).context("failed to encode block config")?;

    sqlx::query(
        "INSERT INTO block_ludifica_instances (instance_id, course_id, config, updated_at)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (instance_id) DO UPDATE
         SET course_id = EXCLUDED.course_id,
             config = EXCLUDED.config,
             updated_at = EXCLUDED.updated_at",
    )
    .bind(instance_id_i64)
    .bind(course_id_i64)
    .bind(payload)
    .bind(now)
    .execute(db.pool())
    .await?;

    invalidate_block_config(db.cache(), course_id).await?;

    Ok(())
}

pub async fn get_block_instance(
    db: &Database,
    instance_id: u64,
) -> anyhow::Result<Option<BlockInstance>> {
    let instance_id_i64 = i64::try_from(instance_id).context("instance_id out of i64 range")?;

    let row: Option<BlockInstanceRow> = sqlx::query_as(
        "SELECT instance_id, course_id, config, updated_at
         FROM block_ludifica_instances
         WHERE instance_id = $1",
    )
    .bind(instance_id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(to_block_instance).transpose()
}

/// Configuration of the course's block. With several instances in one course the
/// oldest one wins, matching which instance the course page shows first.
pub async fn get_course_block_config(
    db: &Database,
    course_id: u64,
) -> anyhow::Result<Option<BlockConfig>> {
    let cache_key = block_config_key(db.cache(), course_id);
    db.cache()
        .get_or_load_json(&cache_key, CONFIG_CACHE_TTL, || async {
            let course_id_i64 = i64::try_from(course_id).context("course_id out of i64 range")?;

            let payload: Option<String> = sqlx::query_scalar(
                "SELECT config FROM block_ludifica_instances
                 WHERE course_id = $1
                 ORDER BY instance_id ASC
                 LIMIT 1",
            )
            .bind(course_id_i64)
            .fetch_optional(db.pool())
            .await?;

            payload.as_deref().map(decode_config).transpose()
        })
        .await
}

pub async fn delete_block_instance(db: &Database, instance_id: u64) -> anyhow::Result<bool> {
    let instance_id_i64 = i64::try_from(instance_id).context("instance_id out of i64 range")?;

    let course_id: Option<i64> = sqlx::query_scalar(
        "DELETE FROM block_ludifica_instances WHERE instance_id = $1 RETURNING course_id",
    )
    .bind(instance_id_i64)
    .fetch_optional(db.pool())
    .await?;

    let Some(course_id) = course_id else {
        return Ok(false);
    };

    let course_id = u64::try_from(course_id).context("course_id row out of u64 range")?;
    invalidate_block_config(db.cache(), course_id).await?;

    Ok(true)
}

fn decode_config(payload: &str) -> anyhow::Result<BlockConfig> {
    serde_json::from_str(payload).context("stored block config is not valid JSON")
}

fn to_block_instance(row: BlockInstanceRow) -> anyhow::Result<BlockInstance> {
    Ok(BlockInstance {
        instance_id: u64::try_from(row.instance_id).context("instance_id row out of u64 range")?,
        course_id: u64::try_from(row.course_id).context("course_id row out of u64 range")?,
        config: decode_config(&row.config)?,
        updated_at: u64::try_from(row.updated_at).context("updated_at row out of u64 range")?,
    })
}
