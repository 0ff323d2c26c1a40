use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use ludifica_core::Result;
use ludifica_core::lang::{Lang, get_string_a};
use ludifica_core::profile_fields::ProfileFieldDirectory;
use ludifica_database::Database;
use ludifica_database::impls::ranking::{player_totals, top_players};
use ludifica_database::model::instances::BlockConfig;
use ludifica_database::model::ranking::{PlayerTotal, RankingEntry, RankingScope};
use ludifica_utils::parse::parse_csv_list;
use ludifica_utils::time::month_start_unix_secs;

pub const DEFAULT_RANKING_SIZE: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankingRow {
    pub position: u32,
    pub user_id: u64,
    pub nickname: String,
    pub points: u64,
}

/// Players without a nickname show as "Player <id>".
pub fn display_row(lang: Lang, entry: RankingEntry) -> RankingRow {
    let nickname = if entry.nickname.trim().is_empty() {
        get_string_a(lang, "nicknameunasined", &entry.user_id.to_string())
    } else {
        entry.nickname
    };

    RankingRow {
        position: entry.position,
        user_id: entry.user_id,
        nickname,
        points: entry.points,
    }
}

async fn ranking(db: &Database, lang: Lang, scope: RankingScope, limit: u32) -> Result<Vec<RankingRow>> {
    let entries = top_players(db, scope, limit).await?;
    Ok(entries
        .into_iter()
        .map(|entry| display_row(lang, entry))
        .collect())
}

pub async fn top_by_site(db: &Database, lang: Lang, limit: u32) -> Result<Vec<RankingRow>> {
    ranking(db, lang, RankingScope::Site, limit).await
}

pub async fn top_by_course(
    db: &Database,
    lang: Lang,
    course_id: u64,
    limit: u32,
) -> Result<Vec<RankingRow>> {
    ranking(db, lang, RankingScope::Course(course_id), limit).await
}

/// Points logged since the first day of the current UTC month.
pub async fn top_last_month(db: &Database, lang: Lang, now: u64, limit: u32) -> Result<Vec<RankingRow>> {
    ranking(db, lang, RankingScope::Since(month_start_unix_secs(now)), limit).await
}

/// User fields configured for extra rankings.
pub fn ranking_fields(config: &BlockConfig) -> Vec<String> {
    parse_csv_list(&config.user_fields_ranking)
}

/// One group of a profile-field ranking: every player sharing `value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldRankingRow {
    pub position: u32,
    pub value: String,
    pub players: u32,
    pub points: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldRanking {
    pub field: String,
    pub rows: Vec<FieldRankingRow>,
}

/// Sum player points per value of `field`, highest first. Ties sort by value;
/// players without a value are left out.
pub fn group_by_field(
    field: &str,
    totals: &[PlayerTotal],
    values: &HashMap<u64, String>,
    limit: u32,
) -> FieldRanking {
    let mut groups: BTreeMap<&str, (u32, u64)> = BTreeMap::new();
    for total in totals {
        let Some(value) = values.get(&total.user_id).map(|value| value.trim()) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }

        let (players, points) = groups.entry(value).or_default();
        *players = players.saturating_add(1);
        *points = points.saturating_add(total.points);
    }

    let mut ordered: Vec<_> = groups.into_iter().collect();
    ordered.sort_by(|(_, (_, a)), (_, (_, b))| b.cmp(a));

    let take = usize::try_from(limit.clamp(1, 100)).unwrap_or(usize::MAX);
    let rows = ordered
        .into_iter()
        .take(take)
        .zip(1u32..)
        .map(|((value, (players, points)), position)| FieldRankingRow {
            position,
            value: value.to_owned(),
            players,
            points,
        })
        .collect();

    FieldRanking {
        field: field.to_owned(),
        rows,
    }
}

/// One ranking per configured field, built from `totals`.
pub async fn rank_by_fields(
    directory: &dyn ProfileFieldDirectory,
    fields: &[String],
    totals: &[PlayerTotal],
    limit: u32,
) -> Result<Vec<FieldRanking>> {
    let user_ids: Vec<u64> = totals.iter().map(|total| total.user_id).collect();

    let mut rankings = Vec::with_capacity(fields.len());
    for field in fields {
        let values = directory.field_values(field, &user_ids).await?;
        rankings.push(group_by_field(field, totals, &values, limit));
    }

    Ok(rankings)
}

/// Rankings for the fields configured on a block instance.
pub async fn top_by_fields(
    db: &Database,
    directory: &dyn ProfileFieldDirectory,
    config: &BlockConfig,
    limit: u32,
) -> Result<Vec<FieldRanking>> {
    let fields = ranking_fields(config);
    if fields.is_empty() {
        return Ok(Vec::new());
    }

    let totals = player_totals(db).await?;
    rank_by_fields(directory, &fields, &totals, limit).await
}
