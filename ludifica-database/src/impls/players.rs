use anyhow::Context as _;

use crate::database::Database;
use crate::impls::points::insert_award;
use crate::impls::{is_unique_violation, now_unix_secs};
use crate::model::players::{CoinTransferOutcome, LoginRecord, LoginStreak, PlayerProfile};
use crate::model::points::{AwardType, CoinConversion, NewAward};

#[derive(sqlx::FromRow)]
pub(crate) struct PlayerRow {
    id: i64,
    user_id: i64,
    nickname: String,
    points: i64,
    coins: i64,
    avatar_id: Option<i64>,
    streak_day: i64,
    streak_days: i64,
    created_at: i64,
}

const PLAYER_COLUMNS: &str =
    "id, user_id, nickname, points, coins, avatar_id, streak_day, streak_days, created_at";

/// Create the player record for `user_id` if it does not exist yet.
pub(crate) async fn ensure_player_row<'e, E>(executor: E, user_id: i64) -> anyhow::Result<()>
where
    E: sqlx::PgExecutor<'e>,
{
    let now = i64::try_from(now_unix_secs()).context("now out of i64 range")?;

    sqlx::query(
        "INSERT INTO block_ludifica_general (user_id, created_at)
         VALUES ($1, $2)
         ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}

/// Fetch the player record for `user_id`, creating an empty one on first use.
pub async fn ensure_player(db: &Database, user_id: u64) -> anyhow::Result<PlayerProfile> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    ensure_player_row(db.pool(), user_id_i64).await?;

    get_player_by_user(db, user_id)
        .await?
        .context("player record missing right after insert")
}

pub async fn get_player(db: &Database, id: u64) -> anyhow::Result<Option<PlayerProfile>> {
    let id_i64 = i64::try_from(id).context("id out of i64 range")?;

    let row: Option<PlayerRow> = sqlx::query_as(&format!(
        "SELECT {PLAYER_COLUMNS} FROM block_ludifica_general WHERE id = $1"
    ))
    .bind(id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(to_player_profile).transpose()
}

pub async fn get_player_by_user(
    db: &Database,
    user_id: u64,
) -> anyhow::Result<Option<PlayerProfile>> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let row: Option<PlayerRow> = sqlx::query_as(&format!(
        "SELECT {PLAYER_COLUMNS} FROM block_ludifica_general WHERE user_id = $1"
    ))
    .bind(user_id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(to_player_profile).transpose()
}

pub async fn find_player_by_nickname(
    db: &Database,
    nickname: &str,
) -> anyhow::Result<Option<PlayerProfile>> {
    let row: Option<PlayerRow> = sqlx::query_as(&format!(
        "SELECT {PLAYER_COLUMNS} FROM block_ludifica_general WHERE nickname = $1 LIMIT 1"
    ))
    .bind(nickname)
    .fetch_optional(db.pool())
    .await?;

    row.map(to_player_profile).transpose()
}

/// Store a new nickname. Returns `false` when another player already holds it;
/// the partial unique index catches renames that race past the caller's check.
pub async fn set_nickname(db: &Database, id: u64, nickname: &str) -> anyhow::Result<bool> {
    let id_i64 = i64::try_from(id).context("id out of i64 range")?;

    let result = sqlx::query("UPDATE block_ludifica_general SET nickname = $1 WHERE id = $2")
        .bind(nickname)
        .bind(id_i64)
        .execute(db.pool())
        .await;

    match result {
        Ok(_) => Ok(true),
        Err(err) if is_unique_violation(&err) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Next streak length for a login on `today`, or `None` when `today` was already counted.
pub fn next_streak(last_day: u64, streak_days: u64, today: u64) -> Option<u64> {
    if streak_days > 0 && today <= last_day {
        return None;
    }

    if streak_days > 0 && today == last_day + 1 {
        Some(streak_days + 1)
    } else {
        Some(1)
    }
}

/// Count a login on the UTC day `today` toward the player's streak and pay
/// `points_for(streak_days)` for it.
///
/// The streak update and the award share one transaction: when the award
/// fails the streak stays where it was, so replaying the login pays it.
pub async fn record_login<F>(
    db: &Database,
    user_id: u64,
    today: u64,
    points_for: F,
    conversion: CoinConversion,
) -> anyhow::Result<LoginRecord>
where
    F: FnOnce(u64) -> u64,
{
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let today_i64 = i64::try_from(today).context("today out of i64 range")?;

    let mut tx = db.begin().await?;
    ensure_player_row(&mut *tx, user_id_i64).await?;

    let (last_day, streak_days): (i64, i64) = sqlx::query_as(
        "SELECT streak_day, streak_days FROM block_ludifica_general
         WHERE user_id = $1
         FOR UPDATE",
    )
    .bind(user_id_i64)
    .fetch_one(&mut *tx)
    .await?;

    let last_day = u64::try_from(last_day).context("streak_day out of u64 range")?;
    let streak_days = u64::try_from(streak_days).context("streak_days out of u64 range")?;

    let Some(days) = next_streak(last_day, streak_days, today) else {
        tx.rollback().await?;
        return Ok(LoginRecord {
            streak: LoginStreak {
                days: streak_days,
                advanced: false,
            },
            award: None,
        });
    };

    sqlx::query(
        "UPDATE block_ludifica_general SET streak_day = $1, streak_days = $2 WHERE user_id = $3",
    )
    .bind(today_i64)
    .bind(i64::try_from(days).context("streak days out of i64 range")?)
    .bind(user_id_i64)
    .execute(&mut *tx)
    .await?;

    let points = points_for(days);
    let award = if points == 0 {
        None
    } else {
        let award = NewAward {
            user_id,
            course_id: 0,
            award_type: AwardType::RecurrentLogin,
            object_id: today,
            points,
        };
        Some(insert_award(&mut *tx, award, conversion).await?)
    };

    tx.commit().await?;

    Ok(LoginRecord {
        streak: LoginStreak {
            days,
            advanced: true,
        },
        award,
    })
}

/// Move coins between two players. Both rows are locked in user-id order.
pub async fn transfer_coins(
    db: &Database,
    from_user_id: u64,
    to_user_id: u64,
    amount: u64,
) -> anyhow::Result<CoinTransferOutcome> {
    let from_i64 = i64::try_from(from_user_id).context("from_user_id out of i64 range")?;
    let to_i64 = i64::try_from(to_user_id).context("to_user_id out of i64 range")?;
    let amount_i64 = i64::try_from(amount).context("amount out of i64 range")?;

    let mut tx = db.begin().await?;
    ensure_player_row(&mut *tx, from_i64).await?;
    ensure_player_row(&mut *tx, to_i64).await?;

    let locked: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT user_id, coins FROM block_ludifica_general
         WHERE user_id = ANY($1)
         ORDER BY user_id
         FOR UPDATE",
    )
    .bind(vec![from_i64, to_i64])
    .fetch_all(&mut *tx)
    .await?;

    let sender_coins = locked
        .iter()
        .find(|(user_id, _)| *user_id == from_i64)
        .map(|(_, coins)| *coins)
        .context("sender row missing after lock")?;

    if sender_coins < amount_i64 {
        tx.rollback().await?;
        return Ok(CoinTransferOutcome::InsufficientCoins);
    }

    sqlx::query("UPDATE block_ludifica_general SET coins = coins - $1 WHERE user_id = $2")
        .bind(amount_i64)
        .bind(from_i64)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE block_ludifica_general SET coins = coins + $1 WHERE user_id = $2")
        .bind(amount_i64)
        .bind(to_i64)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(CoinTransferOutcome::Transferred {
        sender_coins: u64::try_from(sender_coins - amount_i64)
            .context("sender coins out of u64 range")?,
    })
}

pub(crate) fn to_player_profile(row: PlayerRow) -> anyhow::Result<PlayerProfile> {
    Ok(PlayerProfile {
        id: u64::try_from(row.id).context("id row out of u64 range")?,
        user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
        nickname: row.nickname,
        points: u64::try_from(row.points).context("points row out of u64 range")?,
        coins: u64::try_from(row.coins).context("coins row out of u64 range")?,
        avatar_id: row
            .avatar_id
            .map(u64::try_from)
            .transpose()
            .context("avatar_id row out of u64 range")?,
        streak_day: u64::try_from(row.streak_day).context("streak_day row out of u64 range")?,
        streak_days: u64::try_from(row.streak_days)
            .context("streak_days row out of u64 range")?,
        created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
    })
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::{get_player_by_user, next_streak, record_login, transfer_coins};
    use crate::database::Database;
    use crate::impls::points::has_award;
    use crate::model::players::CoinTransferOutcome;
    use crate::model::points::{AwardOutcome, AwardType, CoinConversion};

    const NO_COINS: CoinConversion = CoinConversion {
        points_to_coins: 0,
        coins_by_points: 0,
    };

    #[test]
    fn first_login_starts_a_streak() {
        assert_eq!(next_streak(0, 0, 19_000), Some(1));
    }

    #[test]
    fn same_day_login_is_not_counted() {
        assert_eq!(next_streak(19_000, 2, 19_000), None);
    }

    #[test]
    fn consecutive_day_extends_streak() {
        assert_eq!(next_streak(19_000, 2, 19_001), Some(3));
    }

    #[test]
    fn gap_restarts_streak() {
        assert_eq!(next_streak(19_000, 5, 19_003), Some(1));
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn login_counts_once_per_day(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::new(pool);

        let first = record_login(&db, 5, 19_000, |_| 3, NO_COINS).await?;
        assert!(first.streak.advanced);
        assert_eq!(first.streak.days, 1);
        assert!(matches!(first.award, Some(AwardOutcome::Awarded { points: 3, .. })));

        let again = record_login(&db, 5, 19_000, |_| 3, NO_COINS).await?;
        assert!(!again.streak.advanced);
        assert_eq!(again.award, None);

        let next = record_login(&db, 5, 19_001, |days| days * 10, NO_COINS).await?;
        assert_eq!(next.streak.days, 2);
        assert!(matches!(next.award, Some(AwardOutcome::Awarded { points: 20, .. })));

        let player = get_player_by_user(&db, 5).await?.expect("player");
        assert_eq!((player.points, player.streak_day, player.streak_days), (23, 19_001, 2));
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn failed_login_award_keeps_the_streak_unchanged(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::new(pool);

        sqlx::query(
            "ALTER TABLE block_ludifica_userpoints
             ADD CONSTRAINT userpoints_small CHECK (points < 100)",
        )
        .execute(db.pool())
        .await?;

        let failed = record_login(&db, 5, 19_000, |_| 500, NO_COINS).await;
        assert!(failed.is_err());

        let player = get_player_by_user(&db, 5).await?;
        assert!(player.is_none_or(|player| player.streak_days == 0 && player.points == 0));
        assert!(!has_award(&db, 5, AwardType::RecurrentLogin, 19_000).await?);

        sqlx::query("ALTER TABLE block_ludifica_userpoints DROP CONSTRAINT userpoints_small")
            .execute(db.pool())
            .await?;

        let retry = record_login(&db, 5, 19_000, |_| 500, NO_COINS).await?;
        assert!(retry.streak.advanced);
        assert!(matches!(retry.award, Some(AwardOutcome::Awarded { points: 500, .. })));

        let player = get_player_by_user(&db, 5).await?.expect("player");
        assert_eq!((player.points, player.streak_days), (500, 1));
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn zero_point_login_still_advances_the_streak(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::new(pool);

        let login = record_login(&db, 5, 19_000, |_| 0, NO_COINS).await?;
        assert!(login.streak.advanced);
        assert_eq!(login.award, None);
        assert!(!has_award(&db, 5, AwardType::RecurrentLogin, 19_000).await?);
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn coin_transfer_checks_the_sender_balance(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::new(pool);
        sqlx::query("INSERT INTO block_ludifica_general (user_id, coins, created_at) VALUES (1, 30, 0)")
            .execute(db.pool())
            .await?;

        assert_eq!(
            transfer_coins(&db, 1, 2, 31).await?,
            CoinTransferOutcome::InsufficientCoins
        );
        assert_eq!(
            transfer_coins(&db, 1, 2, 20).await?,
            CoinTransferOutcome::Transferred { sender_coins: 10 }
        );

        let recipient = get_player_by_user(&db, 2).await?.expect("recipient");
        assert_eq!(recipient.coins, 20);
        Ok(())
    }
}
