// Column catalogs for the two datasets whose schemas are wide and stable
// enough to list without a sample download.

pub const PLAY_BY_PLAY: &[&str] = &[
    "play_id",
    "game_id",
    "old_game_id",
    "home_team",
    "away_team",
    "season_type",
    "week",
    "posteam",
    "posteam_type",
    "defteam",
    "side_of_field",
    "yardline_100",
    "game_date",
    "quarter_seconds_remaining",
    "half_seconds_remaining",
    "game_seconds_remaining",
    "game_half",
    "quarter_end",
    "drive",
    "sp",
    "qtr",
    "down",
    "goal_to_go",
    "time",
    "yrdln",
    "ydstogo",
    "ydsnet",
    "desc",
    "play_type",
    "yards_gained",
    "shotgun",
    "no_huddle",
    "qb_dropback",
    "qb_kneel",
    "qb_spike",
    "qb_scramble",
    "pass_length",
    "pass_location",
    "air_yards",
    "yards_after_catch",
    "run_location",
    "run_gap",
    "field_goal_result",
    "kick_distance",
    "extra_point_result",
    "two_point_conv_result",
    "home_timeouts_remaining",
    "away_timeouts_remaining",
    "timeout",
    "timeout_team",
    "td_team",
    "td_player_name",
    "td_player_id",
    "posteam_timeouts_remaining",
    "defteam_timeouts_remaining",
    "total_home_score",
    "total_away_score",
    "posteam_score",
    "defteam_score",
    "score_differential",
    "posteam_score_post",
    "defteam_score_post",
    "score_differential_post",
    "no_score_prob",
    "opp_fg_prob",
    "opp_safety_prob",
    "opp_td_prob",
    "fg_prob",
    "safety_prob",
    "td_prob",
    "extra_point_prob",
    "two_point_conversion_prob",
    "ep",
    "epa",
    "total_home_epa",
    "total_away_epa",
    "wp",
    "def_wp",
    "home_wp",
    "away_wp",
    "wpa",
    "passer_player_id",
    "passer_player_name",
    "passing_yards",
    "receiver_player_id",
    "receiver_player_name",
    "receiving_yards",
    "rusher_player_id",
    "rusher_player_name",
    "rushing_yards",
    "touchdown",
    "pass_touchdown",
    "rush_touchdown",
    "return_touchdown",
    "interception",
    "fumble",
    "complete_pass",
    "incomplete_pass",
    "penalty",
    "penalty_team",
    "penalty_yards",
    "season",
];

pub const WEEKLY_STATS: &[&str] = &[
    "player_id",
    "player_name",
    "player_display_name",
    "position",
    "position_group",
    "headshot_url",
    "recent_team",
    "season",
    "week",
    "season_type",
    "opponent_team",
    "completions",
    "attempts",
    "passing_yards",
    "passing_tds",
    "interceptions",
    "sacks",
    "sack_yards",
    "sack_fumbles",
    "sack_fumbles_lost",
    "passing_air_yards",
    "passing_yards_after_catch",
    "passing_first_downs",
    "passing_epa",
    "passing_2pt_conversions",
    "pacr",
    "dakota",
    "carries",
    "rushing_yards",
    "rushing_tds",
    "rushing_fumbles",
    "rushing_fumbles_lost",
    "rushing_first_downs",
    "rushing_epa",
    "rushing_2pt_conversions",
    "receptions",
    "targets",
    "receiving_yards",
    "receiving_tds",
    "receiving_fumbles",
    "receiving_fumbles_lost",
    "receiving_air_yards",
    "receiving_yards_after_catch",
    "receiving_first_downs",
    "receiving_epa",
    "receiving_2pt_conversions",
    "racr",
    "target_share",
    "air_yards_share",
    "wopr",
    "special_teams_tds",
    "fantasy_points",
    "fantasy_points_ppr",
];

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalogs_have_no_duplicates() {
        let pbp: HashSet<_> = PLAY_BY_PLAY.iter().collect();
        assert_eq!(pbp.len(), PLAY_BY_PLAY.len());
        let weekly: HashSet<_> = WEEKLY_STATS.iter().collect();
        assert_eq!(weekly.len(), WEEKLY_STATS.len());
    }

    #[test]
    fn catalogs_cover_core_fields() {
        assert!(PLAY_BY_PLAY.contains(&"epa"));
        assert!(PLAY_BY_PLAY.contains(&"play_type"));
        assert!(WEEKLY_STATS.contains(&"passing_yards"));
        assert!(WEEKLY_STATS.contains(&"player_id"));
    }
}
