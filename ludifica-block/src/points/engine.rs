use serde::Serialize;
use tracing::{debug, info, warn};

use super::events::PlatformEvent;
use super::rules::{EmailRules, course_points, login_points, met_badges, module_points};
use crate::levels::{level_for_points, parse_levels};
use ludifica_core::Result;
use ludifica_database::Database;
use ludifica_database::impls::badges::{list_pending_criteria, mark_badge_issued};
use ludifica_database::impls::instances::get_course_block_config;
use ludifica_database::impls::players::{ensure_player, record_login};
use ludifica_database::impls::points::{award_points, count_completed_courses};
use ludifica_database::impls::settings::get_settings;
use ludifica_database::model::points::{AwardOutcome, AwardType, CoinConversion, NewAward};
use ludifica_database::model::settings::LudificaSettings;
use ludifica_utils::time::unix_day;

/// Object id of the one-time email award.
const EMAIL_AWARD_OBJECT: u64 = 0;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AwardSummary {
    pub award_type: AwardType,
    pub points: u64,
    pub coins: u64,
    pub total_points: u64,
    pub total_coins: u64,
    pub level: usize,
    pub level_up: bool,
}

/// What processing one event changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EventReport {
    pub award: Option<AwardSummary>,
    /// Badges the user now qualifies for; the host issues them.
    pub badges: Vec<u64>,
}

/// Apply one platform event. Replaying an event never pays twice.
pub async fn handle_event(db: &Database, event: &PlatformEvent, now: u64) -> Result<EventReport> {
    let settings = get_settings(db).await?;
    let mut report = EventReport::default();

    match event {
        PlatformEvent::UserCreated { user_id } => {
            ensure_player(db, *user_id).await?;
            report.award = award(
                db,
                &settings,
                *user_id,
                0,
                AwardType::UserCreated,
                *user_id,
                settings.points_by_new_user,
            )
            .await?;
        }
        PlatformEvent::UserLoggedin { user_id, time } => {
            let today = unix_day(time.unwrap_or(now));
            let login = record_login(
                db,
                *user_id,
                today,
                |days| login_points(days, &settings),
                coin_conversion(&settings),
            )
            .await?;
            if !login.streak.advanced {
                debug!(user_id, "login already counted today");
                return Ok(report);
            }

            report.award = login.award.and_then(|outcome| {
                summarize(&settings, *user_id, AwardType::RecurrentLogin, today, outcome)
            });
        }
        PlatformEvent::CourseCompleted {
            user_id,
            course_id,
            custom_fields,
        } => {
            // Completions are logged even when they pay nothing; badge criteria count them.
            report.award = award_logged(
                db,
                &settings,
                *user_id,
                *course_id,
                AwardType::CourseCompleted,
                *course_id,
                course_points(&settings, custom_fields),
            )
            .await?;
            report.badges = issue_badges(db, *user_id).await?;
        }
        PlatformEvent::CourseModuleCompleted {
            user_id,
            course_id,
            course_module_id,
        } => {
            let config = if settings.points_by_end_all_modules {
                None
            } else {
                get_course_block_config(db, *course_id).await?
            };

            report.award = award(
                db,
                &settings,
                *user_id,
                *course_id,
                AwardType::ModuleCompleted,
                *course_module_id,
                module_points(&settings, config.as_ref(), *course_module_id),
            )
            .await?;
        }
        PlatformEvent::UserUpdated { user_id, email } => {
            let Some(email) = email.as_deref() else {
                return Ok(report);
            };

            let rules = match EmailRules::compile(&settings) {
                Ok(rules) => rules,
                Err(source) => {
                    warn!(?source, "email pattern setting is not a valid regex");
                    return Ok(report);
                }
            };

            if !rules.accepts(email) {
                debug!(user_id, "email does not satisfy the award rules");
                return Ok(report);
            }

            report.award = award(
                db,
                &settings,
                *user_id,
                0,
                AwardType::EmailChanged,
                EMAIL_AWARD_OBJECT,
                settings.points_by_change_mail,
            )
            .await?;
        }
    }

    Ok(report)
}

async fn award(
    db: &Database,
    settings: &LudificaSettings,
    user_id: u64,
    course_id: u64,
    award_type: AwardType,
    object_id: u64,
    points: u64,
) -> Result<Option<AwardSummary>> {
    if points == 0 {
        return Ok(None);
    }

    award_logged(db, settings, user_id, course_id, award_type, object_id, points).await
}

async fn award_logged(
    db: &Database,
    settings: &LudificaSettings,
    user_id: u64,
    course_id: u64,
    award_type: AwardType,
    object_id: u64,
    points: u64,
) -> Result<Option<AwardSummary>> {
    let outcome = award_points(
        db,
        NewAward {
            user_id,
            course_id,
            award_type,
            object_id,
            points,
        },
        coin_conversion(settings),
    )
    .await?;

    Ok(summarize(settings, user_id, award_type, object_id, outcome))
}

fn coin_conversion(settings: &LudificaSettings) -> CoinConversion {
    CoinConversion {
        points_to_coins: settings.points_to_coins,
        coins_by_points: settings.coins_by_points,
    }
}

fn summarize(
    settings: &LudificaSettings,
    user_id: u64,
    award_type: AwardType,
    object_id: u64,
    outcome: AwardOutcome,
) -> Option<AwardSummary> {
    let AwardOutcome::Awarded {
        points,
        coins,
        total_points,
        total_coins,
    } = outcome
    else {
        debug!(user_id, %award_type, object_id, "award already logged");
        return None;
    };

    let levels = parse_levels(&settings.levels);
    let level = level_for_points(total_points, &levels);
    let level_up = level > level_for_points(total_points.saturating_sub(points), &levels);

    info!(
        user_id,
        %award_type,
        object_id,
        points,
        coins,
        total_points,
        level,
        "points awarded"
    );

    Some(AwardSummary {
        award_type,
        points,
        coins,
        total_points,
        total_coins,
        level,
        level_up,
    })
}

async fn issue_badges(db: &Database, user_id: u64) -> Result<Vec<u64>> {
    let pending = list_pending_criteria(db, user_id).await?;
    if pending.is_empty() {
        return Ok(Vec::new());
    }

    let completed = count_completed_courses(db, user_id).await?;
    let mut issued = Vec::new();
    for badge_id in met_badges(completed, &pending) {
        if mark_badge_issued(db, badge_id, user_id).await? {
            info!(user_id, badge_id, completed, "badge criteria met");
            issued.push(badge_id);
        }
    }

    Ok(issued)
}
