//! Rule-based entity extraction
//!
//! Every extractor returns `Option`; a kind that is not found is simply
//! left out of the resulting [`Entities`].

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use pitchside_core::{Entities, EntityKind, Intent};

use crate::names::{
    clean_name, is_likely_league_name, is_likely_player_name, is_likely_team_name, title_case,
};
use crate::patterns::{CompiledPattern, PatternTable};
use crate::vocabulary::{KNOWN_LEAGUES, KNOWN_TEAMS, POSITIONS, TEAM_MARKERS, WINDOW_SKIP_WORDS};

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\b").expect("number regex is valid"));

const COMPARISON_PATTERNS: &[&str] = &[
    r"(.+) vs (.+)",
    r"compare (.+) and (.+)",
    r"(.+) or (.+)",
    r"who is better (.+) or (.+)",
];

/// Extracts football entities from lower-cased text
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    /// `(marker, "<words> <marker>" regex)` in marker order
    team_markers: Vec<(&'static str, Regex)>,
    comparison: Vec<CompiledPattern>,
}

impl EntityExtractor {
    pub fn new() -> Self {
        let team_markers = TEAM_MARKERS
            .iter()
            .filter_map(|marker| {
                let pattern = format!(r"(\w+(?:\s+\w+)*)\s+{}", regex::escape(marker));
                match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                    Ok(regex) => Some((*marker, regex)),
                    Err(e) => {
                        warn!(marker, "Skipping team marker: {}", e);
                        None
                    }
                }
            })
            .collect();

        let comparison = COMPARISON_PATTERNS
            .iter()
            .filter_map(|source| match CompiledPattern::new(source) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Skipping comparison pattern: {}", e);
                    None
                }
            })
            .collect();

        Self {
            team_markers,
            comparison,
        }
    }

    /// Extract every entity kind relevant to `intent`
    pub fn extract(&self, text: &str, intent: Intent, table: &PatternTable) -> Entities {
        let mut entities = Entities::default();

        if let Some(player) = self.player_name(text, intent, table) {
            entities.set(EntityKind::PlayerName, player);
        }
        if let Some(team) = self.team_name(text, intent, table) {
            entities.set(EntityKind::TeamName, team);
        }
        if let Some(league) = self.league_name(text, intent, table) {
            entities.set(EntityKind::LeagueName, league);
        }
        if let Some(position) = self.position(text) {
            entities.set_position(position);
        }

        entities.numbers = self.numbers(text);

        if intent == Intent::Comparison {
            if let Some((left, right)) = self.comparison_pair(text) {
                entities.set_comparison(left, right);
            }
        }

        debug!(?entities, "Extracted entities");
        entities
    }

    /// Player name for intents that are about a player
    ///
    /// Tries the intent's own capture patterns first, then slides 2- and
    /// 3-word windows over the text.
    pub fn player_name(&self, text: &str, intent: Intent, table: &PatternTable) -> Option<String> {
        if !intent.expects_player_name() {
            return None;
        }

        table
            .patterns_for(intent)
            .iter()
            .filter_map(|pattern| pattern.first_group(text))
            .map(|capture| clean_name(capture.trim()))
            .find(|name| is_likely_player_name(name))
            .or_else(|| self.name_window(text))
    }

    /// First plausible 2- or 3-word window
    ///
    /// Title-cased so window hits read like pattern hits.
    pub fn name_window(&self, text: &str) -> Option<String> {
        let words: Vec<&str> = text.split_whitespace().collect();

        for (i, word) in words.iter().enumerate() {
            if WINDOW_SKIP_WORDS.contains(&word.to_lowercase().as_str()) {
                continue;
            }

            for width in [2, 3] {
                if let Some(window) = words.get(i..i + width) {
                    let candidate = window.join(" ");
                    if is_likely_player_name(&candidate) {
                        return Some(title_case(&candidate));
                    }
                }
            }
        }

        None
    }

    /// Club name from known clubs, team markers or the intent's captures
    pub fn team_name(&self, text: &str, intent: Intent, table: &PatternTable) -> Option<String> {
        let lower = text.to_lowercase();

        if let Some(team) = KNOWN_TEAMS.iter().find(|team| lower.contains(*team)) {
            return Some(title_case(team));
        }

        for (marker, regex) in &self.team_markers {
            if !lower.contains(marker) {
                continue;
            }
            if let Some(capture) = regex.captures(text).and_then(|caps| caps.get(1)) {
                return Some(title_case(capture.as_str().trim()));
            }
        }

        if !intent.expects_team_name() {
            return None;
        }

        table
            .patterns_for(intent)
            .iter()
            .filter_map(|pattern| pattern.first_group(text))
            .map(clean_name)
            .find(|name| is_likely_team_name(name))
    }

    /// Competition name from known competitions or the intent's captures
    pub fn league_name(&self, text: &str, intent: Intent, table: &PatternTable) -> Option<String> {
        let lower = text.to_lowercase();

        if let Some(league) = KNOWN_LEAGUES.iter().find(|league| lower.contains(*league)) {
            return Some(title_case(league));
        }

        if !intent.expects_league_name() {
            return None;
        }

        table
            .patterns_for(intent)
            .iter()
            .filter_map(|pattern| pattern.first_group(text))
            .map(clean_name)
            .find(|name| is_likely_league_name(name))
    }

    /// First playing position mentioned
    pub fn position(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();
        POSITIONS
            .iter()
            .find(|position| lower.contains(*position))
            .map(|position| title_case(position))
    }

    /// Every standalone digit run, in order
    pub fn numbers(&self, text: &str) -> Vec<String> {
        NUMBER
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Two cleaned comparison operands
    pub fn comparison_pair(&self, text: &str) -> Option<(String, String)> {
        self.comparison.iter().find_map(|pattern| {
            let (left, right) = pattern.two_groups(text)?;
            let left = clean_name(left);
            let right = clean_name(right);
            (!left.is_empty() && !right.is_empty()).then_some((left, right))
        })
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (EntityExtractor, PatternTable) {
        (EntityExtractor::new(), PatternTable::new())
    }

    #[test]
    fn test_player_name_from_capture() {
        let (extractor, table) = setup();
        assert_eq!(
            extractor.player_name("tell me about lionel messi", Intent::PlayerInfo, &table),
            Some("Lionel Messi".to_string())
        );
    }

    #[test]
    fn test_player_name_only_for_player_intents() {
        let (extractor, table) = setup();
        assert_eq!(
            extractor.player_name("tell me about lionel messi", Intent::TeamInfo, &table),
            None
        );
    }

    #[test]
    fn test_player_name_window_fallback() {
        let (extractor, _) = setup();
        assert_eq!(
            extractor.name_window("the erling haaland 2023"),
            Some("Erling Haaland".to_string())
        );
        assert_eq!(extractor.name_window("the information stats"), None);
        assert_eq!(extractor.name_window("messi"), None);
    }

    #[test]
    fn test_known_team_wins() {
        let (extractor, table) = setup();
        assert_eq!(
            extractor.team_name("real madrid vs barcelona", Intent::Comparison, &table),
            Some("Real Madrid".to_string())
        );
        assert_eq!(
            extractor.team_name("is psg good", Intent::GeneralQuestion, &table),
            Some("Psg".to_string())
        );
    }

    #[test]
    fn test_team_marker() {
        let (extractor, table) = setup();
        assert_eq!(
            extractor.team_name("celtic fc", Intent::GeneralQuestion, &table),
            Some("Celtic".to_string())
        );
    }

    #[test]
    fn test_team_from_intent_capture() {
        let (extractor, table) = setup();
        assert_eq!(
            extractor.team_name("how is napoli doing", Intent::TeamStats, &table),
            Some("Napoli".to_string())
        );
        assert_eq!(
            extractor.team_name("how is napoli doing", Intent::PlayerInfo, &table),
            None
        );
    }

    #[test]
    fn test_league_name() {
        let (extractor, table) = setup();
        assert_eq!(
            extractor.league_name("premier league table", Intent::LeagueTable, &table),
            Some("Premier League".to_string())
        );
        assert_eq!(
            extractor.league_name("eredivisie league standings", Intent::LeagueTable, &table),
            Some("Eredivisie League".to_string())
        );
        assert_eq!(
            extractor.league_name("eredivisie standings", Intent::LeagueTable, &table),
            None
        );
    }

    #[test]
    fn test_position_and_numbers() {
        let (extractor, _) = setup();
        assert_eq!(
            extractor.position("best left-back in 2024"),
            Some("Left-Back".to_string())
        );
        assert_eq!(
            extractor.numbers("top 10 scorers of 2023/24"),
            vec!["10", "2023", "24"]
        );
        assert!(extractor.numbers("no digits").is_empty());
    }

    #[test]
    fn test_comparison_pair() {
        let (extractor, _) = setup();
        assert_eq!(
            extractor.comparison_pair("compare messi and ronaldo"),
            Some(("Messi".to_string(), "Ronaldo".to_string()))
        );
        assert_eq!(extractor.comparison_pair("the vs stats"), None);
    }

    #[test]
    fn test_extract_omits_missing_kinds() {
        let (extractor, table) = setup();
        let entities = extractor.extract("hello", Intent::Greeting, &table);
        assert!(entities.is_empty());
    }
}
