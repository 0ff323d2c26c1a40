use anyhow::Context as _;
use sqlx::PgConnection;

use crate::database::Database;
use crate::impls::now_unix_secs;
use crate::impls::players::ensure_player_row;
use crate::model::points::{AwardOutcome, AwardType, CoinConversion, NewAward, PointsLogEntry};

#[derive(sqlx::FromRow)]
struct PointsLogRow {
    id: i64,
    user_id: i64,
    course_id: i64,
    award_type: String,
    object_id: i64,
    points: i64,
    created_at: i64,
}

/// Coins earned when a player's total moves from `previous_points` to `new_points`.
///
/// Coins are paid once per multiple of `points_to_coins` crossed, so splitting an
/// award into smaller ones never changes the total.
pub fn coins_for_points(previous_points: u64, new_points: u64, conversion: CoinConversion) -> u64 {
    if conversion.points_to_coins == 0 || new_points <= previous_points {
        return 0;
    }

    let crossed = new_points / conversion.points_to_coins
        - previous_points / conversion.points_to_coins;
    crossed.saturating_mul(conversion.coins_by_points)
}

/// Largest balance or award the `BIGINT` ledger columns hold.
const MAX_LEDGER_AMOUNT: u64 = i64::MAX as u64;

/// Log an award and pay its points and coins in one transaction.
///
/// A repeated `(user, type, object)` triple returns [`AwardOutcome::Duplicate`]
/// without touching the balances.
pub async fn award_points(
    db: &Database,
    award: NewAward,
    conversion: CoinConversion,
) -> anyhow::Result<AwardOutcome> {
    let user_id_i64 = i64::try_from(award.user_id).context("user_id out of i64 range")?;

    let mut tx = db.begin().await?;
    ensure_player_row(&mut *tx, user_id_i64).await?;
    let outcome = insert_award(&mut *tx, award, conversion).await?;
    tx.commit().await?;

    Ok(outcome)
}

/// Log `award` and update the player's balances on an open connection.
///
/// The player row must exist. Callers own the transaction, so the award
/// commits or rolls back together with whatever else they changed.
pub(crate) async fn insert_award(
    conn: &mut PgConnection,
    award: NewAward,
    conversion: CoinConversion,
) -> anyhow::Result<AwardOutcome> {
    let points = award.points.min(MAX_LEDGER_AMOUNT);
    let user_id_i64 = i64::try_from(award.user_id).context("user_id out of i64 range")?;
    let course_id_i64 = i64::try_from(award.course_id).context("course_id out of i64 range")?;
    let object_id_i64 = i64::try_from(award.object_id).context("object_id out of i64 range")?;
    let points_i64 = i64::try_from(points).context("points out of i64 range")?;
    let now = i64::try_from(now_unix_secs()).context("now out of i64 range")?;

    let inserted: Option<i64> = sqlx::query_scalar(
        "INSERT INTO block_ludifica_userpoints (
            user_id,
            course_id,
            award_type,
            object_id,
            points,
            created_at
         ) VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (user_id, award_type, object_id) DO NOTHING
         RETURNING id",
    )
    .bind(user_id_i64)
    .bind(course_id_i64)
    .bind(award.award_type.as_str())
    .bind(object_id_i64)
    .bind(points_i64)
    .bind(now)
    .fetch_optional(&mut *conn)
    .await?;

    if inserted.is_none() {
        return Ok(AwardOutcome::Duplicate);
    }

    let (previous_points, previous_coins): (i64, i64) = sqlx::query_as(
        "SELECT points, coins FROM block_ludifica_general WHERE user_id = $1 FOR UPDATE",
    )
    .bind(user_id_i64)
    .fetch_one(&mut *conn)
    .await?;

    let previous_points = u64::try_from(previous_points).context("points out of u64 range")?;
    let previous_coins = u64::try_from(previous_coins).context("coins out of u64 range")?;
    let total_points = previous_points.saturating_add(points).min(MAX_LEDGER_AMOUNT);
    let coins = coins_for_points(previous_points, total_points, conversion);
    let total_coins = previous_coins.saturating_add(coins).min(MAX_LEDGER_AMOUNT);

    sqlx::query("UPDATE block_ludifica_general SET points = $1, coins = $2 WHERE user_id = $3")
        .bind(i64::try_from(total_points).context("total points out of i64 range")?)
        .bind(i64::try_from(total_coins).context("total coins out of i64 range")?)
        .bind(user_id_i64)
        .execute(&mut *conn)
        .await?;

    Ok(AwardOutcome::Awarded {
        points,
        coins,
        total_points,
        total_coins,
    })
}

pub async fn has_award(
    db: &Database,
    user_id: u64,
    award_type: AwardType,
    object_id: u64,
) -> anyhow::Result<bool> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let object_id_i64 = i64::try_from(object_id).context("object_id out of i64 range")?;

    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT 1 FROM block_ludifica_userpoints
            WHERE user_id = $1 AND award_type = $2 AND object_id = $3
         )",
    )
    .bind(user_id_i64)
    .bind(award_type.as_str())
    .bind(object_id_i64)
    .fetch_one(db.pool())
    .await?;

    Ok(exists)
}

/// Number of distinct courses the user has been paid for completing.
pub async fn count_completed_courses(db: &Database, user_id: u64) -> anyhow::Result<u64> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM block_ludifica_userpoints WHERE user_id = $1 AND award_type = $2",
    )
    .bind(user_id_i64)
    .bind(AwardType::CourseCompleted.as_str())
    .fetch_one(db.pool())
    .await?;

    u64::try_from(count).context("completed course count out of u64 range")
}

pub async fn course_points(db: &Database, user_id: u64, course_id: u64) -> anyhow::Result<u64> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let course_id_i64 = i64::try_from(course_id).context("course_id out of i64 range")?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(points), 0)::BIGINT FROM block_ludifica_userpoints
         WHERE user_id = $1 AND course_id = $2",
    )
    .bind(user_id_i64)
    .bind(course_id_i64)
    .fetch_one(db.pool())
    .await?;

    u64::try_from(total).context("course points out of u64 range")
}

pub async fn list_user_awards(
    db: &Database,
    user_id: u64,
    limit: u32,
) -> anyhow::Result<Vec<PointsLogEntry>> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let limit_i64 = i64::from(limit.clamp(1, 500));

    let rows: Vec<PointsLogRow> = sqlx::query_as(
        "SELECT id, user_id, course_id, award_type, object_id, points, created_at
         FROM block_ludifica_userpoints
         WHERE user_id = $1
         ORDER BY created_at DESC, id DESC
         LIMIT $2",
    )
    .bind(user_id_i64)
    .bind(limit_i64)
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(to_points_log_entry).collect()
}

fn to_points_log_entry(row: PointsLogRow) -> anyhow::Result<PointsLogEntry> {
    Ok(PointsLogEntry {
        id: u64::try_from(row.id).context("id row out of u64 range")?,
        user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
        course_id: u64::try_from(row.course_id).context("course_id row out of u64 range")?,
        award_type: row.award_type.parse()?,
        object_id: u64::try_from(row.object_id).context("object_id row out of u64 range")?,
        points: u64::try_from(row.points).context("points row out of u64 range")?,
        created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
    })
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::{award_points, coins_for_points, has_award, list_user_awards};
    use crate::database::Database;
    use crate::impls::players::get_player_by_user;
    use crate::model::points::{AwardOutcome, AwardType, CoinConversion, NewAward};

    const RATE: CoinConversion = CoinConversion {
        points_to_coins: 100,
        coins_by_points: 10,
    };

    #[test]
    fn no_coins_below_threshold() {
        assert_eq!(coins_for_points(0, 99, RATE), 0);
    }

    #[test]
    fn crossing_one_threshold_pays_once() {
        assert_eq!(coins_for_points(95, 105, RATE), 10);
    }

    #[test]
    fn large_award_crosses_several_thresholds() {
        assert_eq!(coins_for_points(50, 350, RATE), 30);
    }

    #[test]
    fn split_awards_pay_the_same_total() {
        let whole = coins_for_points(0, 250, RATE);
        let split = coins_for_points(0, 120, RATE) + coins_for_points(120, 250, RATE);
        assert_eq!(whole, split);
    }

    #[test]
    fn zero_threshold_disables_coins() {
        let disabled = CoinConversion {
            points_to_coins: 0,
            coins_by_points: 10,
        };
        assert_eq!(coins_for_points(0, 1_000, disabled), 0);
    }

    fn course_award(points: u64) -> NewAward {
        NewAward {
            user_id: 7,
            course_id: 3,
            award_type: AwardType::CourseCompleted,
            object_id: 3,
            points,
        }
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn replayed_award_never_pays_twice(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::new(pool);

        let first = award_points(&db, course_award(150), RATE).await?;
        assert_eq!(
            first,
            AwardOutcome::Awarded {
                points: 150,
                coins: 10,
                total_points: 150,
                total_coins: 10,
            }
        );

        let replay = award_points(&db, course_award(150), RATE).await?;
        assert_eq!(replay, AwardOutcome::Duplicate);

        let player = get_player_by_user(&db, 7).await?.expect("player");
        assert_eq!((player.points, player.coins), (150, 10));
        assert!(has_award(&db, 7, AwardType::CourseCompleted, 3).await?);
        assert!(!has_award(&db, 7, AwardType::ModuleCompleted, 3).await?);

        let log = list_user_awards(&db, 7, 10).await?;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].award_type, AwardType::CourseCompleted);
        assert_eq!(log[0].points, 150);
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn concurrent_replays_pay_once(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::new(pool);

        let (a, b) = tokio::join!(
            award_points(&db, course_award(40), RATE),
            award_points(&db, course_award(40), RATE),
        );
        let outcomes = [a?, b?];
        let paid = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, AwardOutcome::Awarded { .. }))
            .count();
        assert_eq!(paid, 1);

        let player = get_player_by_user(&db, 7).await?.expect("player");
        assert_eq!(player.points, 40);
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn oversized_award_is_capped_to_the_column_range(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::new(pool);

        let outcome = award_points(&db, course_award(u64::MAX), RATE).await?;
        let AwardOutcome::Awarded { total_points, .. } = outcome else {
            panic!("expected an award, got {outcome:?}");
        };
        assert_eq!(total_points, i64::MAX as u64);
        Ok(())
    }
}
