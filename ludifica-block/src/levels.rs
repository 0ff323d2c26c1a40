use ludifica_database::model::leveling::{Level, LevelProgress, NextLevel};
use ludifica_utils::parse::{leading_int, parse_pipe_lines};

/// Parse the `levels` setting: one `Name|maxpoints` per line. A missing
/// ceiling means the level is unlimited.
pub fn parse_levels(raw: &str) -> Vec<Level> {
    parse_pipe_lines(raw)
        .into_iter()
        .map(|(name, max_points)| Level {
            name,
            max_points: max_points.map(|value| leading_int(&value).max(0).unsigned_abs()),
        })
        .collect()
}

/// Index of the first level whose ceiling is above `points`, else the last level.
pub fn level_for_points(points: u64, levels: &[Level]) -> usize {
    levels
        .iter()
        .position(|level| level.max_points.is_none_or(|max| points < max))
        .unwrap_or_else(|| levels.len().saturating_sub(1))
}

pub fn level_progress(points: u64, levels: &[Level]) -> Option<LevelProgress> {
    let index = level_for_points(points, levels);
    let current = levels.get(index)?;

    let next = match (current.max_points, levels.get(index + 1)) {
        (Some(max_points), Some(next)) => Some(NextLevel {
            name: next.name.clone(),
            points_required: max_points,
        }),
        _ => None,
    };

    Some(LevelProgress {
        index,
        name: current.name.clone(),
        points,
        next,
    })
}

#[cfg(test)]
mod tests {
    use super::{level_for_points, level_progress, parse_levels};
    use ludifica_database::model::settings::DEFAULT_LEVELS;

    #[test]
    fn last_level_may_be_unlimited() {
        let levels = parse_levels("Bronze|100\n\nSilver|300\nGold");
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0].max_points, Some(100));
        assert_eq!(levels[2].name, "Gold");
        assert_eq!(levels[2].max_points, None);
    }

    #[test]
    fn points_map_to_first_level_above_them() {
        let levels = parse_levels(DEFAULT_LEVELS);
        assert_eq!(level_for_points(0, &levels), 0);
        assert_eq!(level_for_points(99, &levels), 0);
        assert_eq!(level_for_points(100, &levels), 1);
        assert_eq!(level_for_points(1_000_000, &levels), levels.len() - 1);
    }

    #[test]
    fn capped_ladder_stays_on_last_level() {
        let levels = parse_levels("One|10\nTwo|20");
        assert_eq!(level_for_points(500, &levels), 1);
        assert!(level_progress(500, &levels).is_some_and(|progress| progress.next.is_none()));
    }

    #[test]
    fn progress_names_the_next_level() {
        let levels = parse_levels("Bronze|100\nSilver|300\nGold");
        let progress = level_progress(120, &levels).expect("progress");
        assert_eq!(progress.name, "Silver");
        let next = progress.next.expect("next level");
        assert_eq!(next.name, "Gold");
        assert_eq!(next.points_required, 300);
    }

    #[test]
    fn empty_ladder_has_no_progress() {
        assert!(level_progress(10, &[]).is_none());
    }
}
