use serde::Serialize;

use crate::avatar::{Avatar, default_uri};
use crate::levels::{level_progress, parse_levels};
use ludifica_core::files::FileStore;
use ludifica_core::lang::{Lang, get_string_a, get_string_fields};
use ludifica_core::{Data, Error, Identity, Result};
use ludifica_database::impls::players::ensure_player;
use ludifica_database::impls::settings::get_settings;
use ludifica_database::model::leveling::LevelProgress;

/// Everything the profile tab shows about the acting user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerCard {
    pub player_id: u64,
    pub nickname: String,
    pub points: u64,
    pub coins: u64,
    pub level: Option<LevelProgress>,
    pub level_label: String,
    /// How many points the next level needs, when there is one.
    pub next_level_hint: Option<String>,
    pub avatar_uri: String,
}

pub fn level_texts(lang: Lang, progress: Option<&LevelProgress>) -> (String, Option<String>) {
    let Some(progress) = progress else {
        return (String::new(), None);
    };

    let label = get_string_a(lang, "labellevel", &progress.index.to_string());
    let hint = progress.next.as_ref().map(|next| {
        get_string_fields(
            lang,
            "overcomelevel",
            &[
                ("maxpoints", next.points_required.to_string().as_str()),
                ("name", next.name.as_str()),
            ],
        )
    });

    (label, hint)
}

pub async fn player_card(data: &Data, files: &dyn FileStore, identity: &Identity) -> Result<PlayerCard> {
    identity.require_login()?;

    let player = ensure_player(&data.db, identity.user_id).await?;
    let settings = get_settings(&data.db).await?;
    let levels = parse_levels(&settings.levels);
    let progress = level_progress(player.points, &levels);
    let level_index = progress.as_ref().map_or(settings.default_level, |p| p.index as u64);

    let avatar_uri = match player.avatar_id {
        Some(avatar_id) => match Avatar::load(&data.db, avatar_id).await {
            Ok(avatar) => {
                avatar
                    .uri(Some(level_index), &levels, files, &data.assets)
                    .await?
            }
            Err(Error::NotFound(_)) => default_uri(&data.assets),
            Err(err) => return Err(err),
        },
        None => default_uri(&data.assets),
    };

    let (level_label, next_level_hint) = level_texts(data.lang, progress.as_ref());
    let nickname = if player.nickname.is_empty() {
        identity.full_name.clone()
    } else {
        player.nickname
    };

    Ok(PlayerCard {
        player_id: player.id,
        nickname,
        points: player.points,
        coins: player.coins,
        level: progress,
        level_label,
        next_level_hint,
        avatar_uri,
    })
}

#[cfg(test)]
mod tests {
    use super::level_texts;
    use crate::levels::{level_progress, parse_levels};
    use ludifica_core::lang::Lang;

    #[test]
    fn level_texts_name_the_next_goal() {
        let levels = parse_levels("Bronze|100\nSilver|300\nGold");
        let progress = level_progress(150, &levels);
        let (label, hint) = level_texts(Lang::En, progress.as_ref());
        assert_eq!(label, "Level 1");
        assert_eq!(
            hint.as_deref(),
            Some("Get <strong>300 points</strong> to reach level <strong>Gold</strong>.")
        );
    }

    #[test]
    fn top_level_has_no_hint() {
        let levels = parse_levels("Bronze|100\nGold");
        let progress = level_progress(5000, &levels);
        let (label, hint) = level_texts(Lang::Es, progress.as_ref());
        assert_eq!(label, "Nivel 1");
        assert!(hint.is_none());
    }
}
