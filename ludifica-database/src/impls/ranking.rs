use anyhow::Context as _;

use crate::cache::{RANKING_CACHE_TTL, ranking_key};
use crate::database::Database;
use crate::model::ranking::{PlayerTotal, RankingEntry, RankingScope};

#[derive(sqlx::FromRow)]
struct RankingRow {
    user_id: i64,
    nickname: Option<String>,
    points: i64,
}

/// Leaderboard for a scope, highest points first. Ties break by user id.
pub async fn top_players(
    db: &Database,
    scope: RankingScope,
    limit: u32,
) -> anyhow::Result<Vec<RankingEntry>> {
    let limit = limit.clamp(1, 100);
    let scope_key = match scope {
        RankingScope::Site => "site".to_owned(),
        RankingScope::Course(course_id) => format!("course:{course_id}"),
        RankingScope::Since(since) => format!("since:{since}"),
    };
    let cache_key = ranking_key(db.cache(), &scope_key, limit);

    db.cache()
        .get_or_load_json(&cache_key, RANKING_CACHE_TTL, || async {
            let limit_i64 = i64::from(limit);

            let rows: Vec<RankingRow> = match scope {
                RankingScope::Site => {
                    sqlx::query_as(
                        "SELECT user_id, nickname, points
                         FROM block_ludifica_general
                         WHERE points > 0
                         ORDER BY points DESC, user_id ASC
                         LIMIT $1",
                    )
                    .bind(limit_i64)
                    .fetch_all(db.pool())
                    .await?
                }
                RankingScope::Course(course_id) => {
                    let course_id_i64 =
                        i64::try_from(course_id).context("course_id out of i64 range")?;
                    sqlx::query_as(
                        "SELECT up.user_id, g.nickname, SUM(up.points)::BIGINT AS points
                         FROM block_ludifica_userpoints up
                         LEFT JOIN block_ludifica_general g ON g.user_id = up.user_id
                         WHERE up.course_id = $1
                         GROUP BY up.user_id, g.nickname
                         HAVING SUM(up.points) > 0
                         ORDER BY points DESC, up.user_id ASC
                         LIMIT $2",
                    )
                    .bind(course_id_i64)
                    .bind(limit_i64)
                    .fetch_all(db.pool())
                    .await?
                }
                RankingScope::Since(since) => {
                    let since_i64 = i64::try_from(since).context("since out of i64 range")?;
                    sqlx::query_as(
                        "SELECT up.user_id, g.nickname, SUM(up.points)::BIGINT AS points
                         FROM block_ludifica_userpoints up
                         LEFT JOIN block_ludifica_general g ON g.user_id = up.user_id
                         WHERE up.created_at >= $1
                         GROUP BY up.user_id, g.nickname
                         HAVING SUM(up.points) > 0
                         ORDER BY points DESC, up.user_id ASC
                         LIMIT $2",
                    )
                    .bind(since_i64)
                    .bind(limit_i64)
                    .fetch_all(db.pool())
                    .await?
                }
            };

            to_ranking(rows)
        })
        .await
}

/// Every player holding points, cached like the leaderboards.
pub async fn player_totals(db: &Database) -> anyhow::Result<Vec<PlayerTotal>> {
    let cache_key = ranking_key(db.cache(), "totals", 0);

    db.cache()
        .get_or_load_json(&cache_key, RANKING_CACHE_TTL, || async {
            let rows: Vec<(i64, i64)> = sqlx::query_as(
                "SELECT user_id, points FROM block_ludifica_general
                 WHERE points > 0
                 ORDER BY user_id ASC",
            )
            .fetch_all(db.pool())
            .await?;

            to_totals(rows)
        })
        .await
}

fn to_totals(rows: Vec<(i64, i64)>) -> anyhow::Result<Vec<PlayerTotal>> {
    let mut out = Vec::with_capacity(rows.len());
    for (user_id, points) in rows {
        out.push(PlayerTotal {
            user_id: u64::try_from(user_id).context("user_id row out of u64 range")?,
            points: u64::try_from(points).context("points row out of u64 range")?,
        });
    }
    Ok(out)
}

fn to_ranking(rows: Vec<RankingRow>) -> anyhow::Result<Vec<RankingEntry>> {
    let mut out = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        out.push(RankingEntry {
            position: u32::try_from(idx + 1).context("ranking position out of u32 range")?,
            user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
            nickname: row.nickname.unwrap_or_default(),
            points: u64::try_from(row.points).context("points row out of u64 range")?,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::{player_totals, top_players};
    use crate::database::Database;
    use crate::impls::points::award_points;
    use crate::model::points::{AwardType, CoinConversion, NewAward};
    use crate::model::ranking::{PlayerTotal, RankingScope};

    async fn pay(db: &Database, user_id: u64, course_id: u64, points: u64) -> anyhow::Result<()> {
        award_points(
            db,
            NewAward {
                user_id,
                course_id,
                award_type: AwardType::ModuleCompleted,
                object_id: user_id * 100 + course_id,
                points,
            },
            CoinConversion::default(),
        )
        .await?;
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn leaderboards_rank_by_scope(pool: PgPool) -> anyhow::Result<()> {
        let db = Database::new(pool);
        pay(&db, 1, 10, 30).await?;
        pay(&db, 2, 10, 50).await?;
        pay(&db, 1, 11, 40).await?;

        let site: Vec<(u64, u64)> = top_players(&db, RankingScope::Site, 10)
            .await?
            .into_iter()
            .map(|entry| (entry.user_id, entry.points))
            .collect();
        assert_eq!(site, vec![(1, 70), (2, 50)]);

        let course = top_players(&db, RankingScope::Course(10), 10).await?;
        assert_eq!(course[0].user_id, 2);
        assert_eq!(course[0].position, 1);
        assert_eq!(course[1].points, 30);

        assert_eq!(
            player_totals(&db).await?,
            vec![
                PlayerTotal { user_id: 1, points: 70 },
                PlayerTotal { user_id: 2, points: 50 },
            ]
        );
        Ok(())
    }
}
