use anyhow::Context as _;

use crate::database::Database;
use crate::impls::now_unix_secs;
use crate::impls::players::ensure_player_row;
use crate::model::avatars::{AvatarPurchaseOutcome, AvatarRecord, DEFAULT_AVATAR_TYPE, NewAvatar};

#[derive(sqlx::FromRow)]
struct AvatarRow {
    id: i64,
    name: String,
    description: String,
    avatar_type: String,
    sources: String,
    cost: i64,
    enabled: bool,
    created_at: i64,
}

const AVATAR_COLUMNS: &str =
    "id, name, description, avatar_type, sources, cost, enabled, created_at";

pub async fn create_avatar(db: &Database, avatar: NewAvatar<'_>) -> anyhow::Result<AvatarRecord> {
    let now = i64::try_from(now_unix_secs()).context("now out of i64 range")?;
    let cost_i64 = i64::try_from(avatar.cost).context("cost out of i64 range")?;

    let row: AvatarRow = sqlx::query_as(&format!(
        "INSERT INTO block_ludifica_avatars (name, description, avatar_type, sources, cost, enabled, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {AVATAR_COLUMNS}"
    ))
    .bind(avatar.name)
    .bind(avatar.description)
    .bind(DEFAULT_AVATAR_TYPE)
    .bind(avatar.sources)
    .bind(cost_i64)
    .bind(avatar.enabled)
    .bind(now)
    .fetch_one(db.pool())
    .await?;

    to_avatar(row)
}

pub async fn update_avatar(db: &Database, id: u64, avatar: NewAvatar<'_>) -> anyhow::Result<bool> {
    let id_i64 = i64::try_from(id).context("id out of i64 range")?;
    let cost_i64 = i64::try_from(avatar.cost).context("cost out of i64 range")?;

    let updated = sqlx::query(
        "UPDATE block_ludifica_avatars
         SET name = $1, description = $2, sources = $3, cost = $4, enabled = $5
         WHERE id = $6",
    )
    .bind(avatar.name)
    .bind(avatar.description)
    .bind(avatar.sources)
    .bind(cost_i64)
    .bind(avatar.enabled)
    .bind(id_i64)
    .execute(db.pool())
    .await?
    .rows_affected();

    Ok(updated > 0)
}

pub async fn get_avatar(db: &Database, id: u64) -> anyhow::Result<Option<AvatarRecord>> {
    let id_i64 = i64::try_from(id).context("id out of i64 range")?;

    let row: Option<AvatarRow> = sqlx::query_as(&format!(
        "SELECT {AVATAR_COLUMNS} FROM block_ludifica_avatars WHERE id = $1"
    ))
    .bind(id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(to_avatar).transpose()
}

pub async fn list_avatars(db: &Database, enabled_only: bool) -> anyhow::Result<Vec<AvatarRecord>> {
    let rows: Vec<AvatarRow> = sqlx::query_as(&format!(
        "SELECT {AVATAR_COLUMNS} FROM block_ludifica_avatars
         WHERE NOT $1 OR enabled = TRUE
         ORDER BY cost ASC, name ASC"
    ))
    .bind(enabled_only)
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(to_avatar).collect()
}

pub async fn delete_avatar(db: &Database, id: u64) -> anyhow::Result<bool> {
    let id_i64 = i64::try_from(id).context("id out of i64 range")?;

    let deleted = sqlx::query("DELETE FROM block_ludifica_avatars WHERE id = $1")
        .bind(id_i64)
        .execute(db.pool())
        .await?
        .rows_affected();

    Ok(deleted > 0)
}

pub async fn list_user_avatar_ids(db: &Database, user_id: u64) -> anyhow::Result<Vec<u64>> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let ids: Vec<i64> = sqlx::query_scalar(
        "SELECT avatar_id FROM block_ludifica_useravatars WHERE user_id = $1 ORDER BY created_at",
    )
    .bind(user_id_i64)
    .fetch_all(db.pool())
    .await?;

    ids.into_iter()
        .map(|id| u64::try_from(id).context("avatar_id out of u64 range"))
        .collect()
}

/// Buy an avatar with coins. The player row is locked for the balance check.
pub async fn buy_avatar(
    db: &Database,
    avatar_id: u64,
    user_id: u64,
) -> anyhow::Result<AvatarPurchaseOutcome> {
    let avatar_id_i64 = i64::try_from(avatar_id).context("avatar_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let now = i64::try_from(now_unix_secs()).context("now out of i64 range")?;

    let mut tx = db.begin().await?;
    ensure_player_row(&mut *tx, user_id_i64).await?;

    let avatar: Option<(i64, bool)> =
        sqlx::query_as("SELECT cost, enabled FROM block_ludifica_avatars WHERE id = $1")
            .bind(avatar_id_i64)
            .fetch_optional(&mut *tx)
            .await?;

    let Some((cost, true)) = avatar else {
        tx.rollback().await?;
        return Ok(AvatarPurchaseOutcome::NotAvailable);
    };

    let coins: i64 = sqlx::query_scalar(
        "SELECT coins FROM block_ludifica_general WHERE user_id = $1 FOR UPDATE",
    )
    .bind(user_id_i64)
    .fetch_one(&mut *tx)
    .await?;

    let inserted = sqlx::query(
        "INSERT INTO block_ludifica_useravatars (user_id, avatar_id, created_at)
         VALUES ($1, $2, $3)
         ON CONFLICT (user_id, avatar_id) DO NOTHING",
    )
    .bind(user_id_i64)
    .bind(avatar_id_i64)
    .bind(now)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if inserted == 0 {
        tx.rollback().await?;
        return Ok(AvatarPurchaseOutcome::AlreadyOwned);
    }

    if coins < cost {
        tx.rollback().await?;
        return Ok(AvatarPurchaseOutcome::InsufficientCoins);
    }

    sqlx::query("UPDATE block_ludifica_general SET coins = coins - $1 WHERE user_id = $2")
        .bind(cost)
        .bind(user_id_i64)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(AvatarPurchaseOutcome::Bought {
        coins_left: u64::try_from(coins - cost).context("coins left out of u64 range")?,
    })
}

/// Select the avatar a player shows. Allowed when the avatar is free or owned.
pub async fn use_avatar(db: &Database, avatar_id: u64, user_id: u64) -> anyhow::Result<bool> {
    let avatar_id_i64 = i64::try_from(avatar_id).context("avatar_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    ensure_player_row(db.pool(), user_id_i64).await?;

    let updated = sqlx::query(
        "UPDATE block_ludifica_general g
         SET avatar_id = a.id
         FROM block_ludifica_avatars a
         WHERE g.user_id = $1
           AND a.id = $2
           AND a.enabled = TRUE
           AND (
                a.cost = 0
                OR EXISTS (
                    SELECT 1 FROM block_ludifica_useravatars ua
                    WHERE ua.user_id = $1 AND ua.avatar_id = a.id
                )
           )",
    )
    .bind(user_id_i64)
    .bind(avatar_id_i64)
    .execute(db.pool())
    .await?
    .rows_affected();

    Ok(updated > 0)
}

fn to_avatar(row: AvatarRow) -> anyhow::Result<AvatarRecord> {
    Ok(AvatarRecord {
        id: u64::try_from(row.id).context("id row out of u64 range")?,
        name: row.name,
        description: row.description,
        avatar_type: row.avatar_type,
        sources: row.sources,
        cost: u64::try_from(row.cost).context("cost row out of u64 range")?,
        enabled: row.enabled,
        created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
    })
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::{
        buy_avatar, create_avatar, delete_avatar, get_avatar, list_avatars, list_user_avatar_ids,
        update_avatar, use_avatar,
    };
    use crate::database::Database;
    use crate::impls::players::get_player_by_user;
    use crate::model::avatars::{AvatarPurchaseOutcome, NewAvatar};

    fn avatar(name: &str, cost: u64) -> NewAvatar<'_> {
        NewAvatar {
            name,
            description: "",
            sources: "img/{name}-{level}.png",
            cost,
            enabled: true,
        }
    }

    async fn give_coins(db: &Database, user_id: i64, coins: i64) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO block_ludifica_general (user_id, coins, created_at) VALUES ($1, $2, 0)",
        )
        .bind(user_id)
        .bind(coins)
        .execute(db.pool())
        .await?;
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn avatar_is_bought_once_and_then_worn(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::new(pool);
        give_coins(&db, 1, 25).await?;
        let fox = create_avatar(&db, avatar("Fox", 20)).await?;

        assert!(!use_avatar(&db, fox.id, 1).await?);
        assert_eq!(
            buy_avatar(&db, fox.id, 1).await?,
            AvatarPurchaseOutcome::Bought { coins_left: 5 }
        );
        assert_eq!(
            buy_avatar(&db, fox.id, 1).await?,
            AvatarPurchaseOutcome::AlreadyOwned
        );
        assert_eq!(list_user_avatar_ids(&db, 1).await?, vec![fox.id]);

        assert!(use_avatar(&db, fox.id, 1).await?);
        let player = get_player_by_user(&db, 1).await?.expect("player");
        assert_eq!((player.avatar_id, player.coins), (Some(fox.id), 5));
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn purchase_refusals_leave_coins_alone(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::new(pool);
        give_coins(&db, 1, 10).await?;
        let owl = create_avatar(&db, avatar("Owl", 20)).await?;

        assert_eq!(
            buy_avatar(&db, owl.id, 1).await?,
            AvatarPurchaseOutcome::InsufficientCoins
        );
        assert!(list_user_avatar_ids(&db, 1).await?.is_empty());

        assert!(
            update_avatar(
                &db,
                owl.id,
                NewAvatar {
                    enabled: false,
                    ..avatar("Owl", 5)
                }
            )
            .await?
        );
        assert_eq!(
            buy_avatar(&db, owl.id, 1).await?,
            AvatarPurchaseOutcome::NotAvailable
        );
        assert!(list_avatars(&db, true).await?.is_empty());

        let player = get_player_by_user(&db, 1).await?.expect("player");
        assert_eq!(player.coins, 10);
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn free_avatar_is_worn_and_cleared_on_delete(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::new(pool);
        let cat = create_avatar(&db, avatar("Cat", 0)).await?;

        assert!(use_avatar(&db, cat.id, 3).await?);
        assert!(delete_avatar(&db, cat.id).await?);
        assert!(get_avatar(&db, cat.id).await?.is_none());

        let player = get_player_by_user(&db, 3).await?.expect("player");
        assert_eq!(player.avatar_id, None);
        Ok(())
    }
}
