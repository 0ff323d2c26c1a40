use anyhow::Context as _;

use crate::database::Database;
use crate::impls::now_unix_secs;
use crate::model::badges::{BadgeCriteria, BadgeCriteriaRecord};

#[derive(sqlx::FromRow)]
struct CriteriaRow {
    badge_id: i64,
    settings: String,
    updated_at: i64,
}

pub async fn save_criteria(
    db: &Database,
    badge_id: u64,
    criteria: &BadgeCriteria,
) -> anyhow::Result<()> {
    let badge_id_i64 = i64::try_from(badge_id).context("badge_id out of i64 range")?;
    let now = i64::try_from(now_unix_secs()).context("now out of i64 range")?;
    let settings = serde_json::to_string(criteria).context("failed to encode badge criteria")?;

    sqlx::query(
        "INSERT INTO block_ludifica_criteria (badge_id, criteria_type, settings, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $4)
         ON CONFLICT (badge_id) DO UPDATE
         SET criteria_type = EXCLUDED.criteria_type,
             settings = EXCLUDED.settings,
             updated_at = EXCLUDED.updated_at",
    )
    .bind(badge_id_i64)
    .bind(criteria.type_name())
    .bind(settings)
    .bind(now)
    .execute(db.pool())
    .await?;

    Ok(())
}

pub async fn get_criteria(db: &Database, badge_id: u64) -> anyhow::Result<Option<BadgeCriteriaRecord>> {
    let badge_id_i64 = i64::try_from(badge_id).context("badge_id out of i64 range")?;

    let row: Option<CriteriaRow> = sqlx::query_as(
        "SELECT badge_id, settings, updated_at FROM block_ludifica_criteria WHERE badge_id = $1",
    )
    .bind(badge_id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(to_criteria_record).transpose()
}

pub async fn delete_criteria(db: &Database, badge_id: u64) -> anyhow::Result<bool> {
    let badge_id_i64 = i64::try_from(badge_id).context("badge_id out of i64 range")?;

    let deleted = sqlx::query("DELETE FROM block_ludifica_criteria WHERE badge_id = $1")
        .bind(badge_id_i64)
        .execute(db.pool())
        .await?
        .rows_affected();

    Ok(deleted > 0)
}

/// Criteria of badges the user has not received yet.
pub async fn list_pending_criteria(
    db: &Database,
    user_id: u64,
) -> anyhow::Result<Vec<BadgeCriteriaRecord>> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let rows: Vec<CriteriaRow> = sqlx::query_as(
        "SELECT c.badge_id, c.settings, c.updated_at
         FROM block_ludifica_criteria c
         WHERE NOT EXISTS (
            SELECT 1 FROM block_ludifica_badges_issued bi
            WHERE bi.badge_id = c.badge_id AND bi.user_id = $1
         )
         ORDER BY c.badge_id",
    )
    .bind(user_id_i64)
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(to_criteria_record).collect()
}

/// Record that the host issued `badge_id` to `user_id`. Returns `false` if already recorded.
pub async fn mark_badge_issued(db: &Database, badge_id: u64, user_id: u64) -> anyhow::Result<bool> {
    let badge_id_i64 = i64::try_from(badge_id).context("badge_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let now = i64::try_from(now_unix_secs()).context("now out of i64 range")?;

    let inserted = sqlx::query(
        "INSERT INTO block_ludifica_badges_issued (badge_id, user_id, issued_at)
         VALUES ($1, $2, $3)
         ON CONFLICT (badge_id, user_id) DO NOTHING",
    )
    .bind(badge_id_i64)
    .bind(user_id_i64)
    .bind(now)
    .execute(db.pool())
    .await?
    .rows_affected();

    Ok(inserted > 0)
}

fn to_criteria_record(row: CriteriaRow) -> anyhow::Result<BadgeCriteriaRecord> {
    Ok(BadgeCriteriaRecord {
        badge_id: u64::try_from(row.badge_id).context("badge_id row out of u64 range")?,
        criteria: serde_json::from_str(&row.settings)
            .context("stored badge criteria is not valid JSON")?,
        updated_at: u64::try_from(row.updated_at).context("updated_at row out of u64 range")?,
    })
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::{
        delete_criteria, get_criteria, list_pending_criteria, mark_badge_issued, save_criteria,
    };
    use crate::database::Database;
    use crate::model::badges::BadgeCriteria;

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn issued_badges_leave_the_pending_list(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::new(pool);
        save_criteria(&db, 10, &BadgeCriteria::Ncourses { n: 1 }).await?;
        save_criteria(&db, 11, &BadgeCriteria::Ncourses { n: 3 }).await?;
        save_criteria(&db, 11, &BadgeCriteria::Ncourses { n: 2 }).await?;

        let stored = get_criteria(&db, 11).await?.expect("criteria");
        assert_eq!(stored.criteria, BadgeCriteria::Ncourses { n: 2 });

        assert!(mark_badge_issued(&db, 10, 4).await?);
        assert!(!mark_badge_issued(&db, 10, 4).await?);

        let pending: Vec<u64> = list_pending_criteria(&db, 4)
            .await?
            .into_iter()
            .map(|record| record.badge_id)
            .collect();
        assert_eq!(pending, vec![11]);

        assert!(delete_criteria(&db, 11).await?);
        assert!(!delete_criteria(&db, 11).await?);
        assert!(list_pending_criteria(&db, 4).await?.is_empty());
        Ok(())
    }
}
