//! Football vocabulary used by the entity extractors
//!
//! All entries are lower case; lookups run against lower-cased input.

/// Clubs recognised by plain substring match
pub const KNOWN_TEAMS: &[&str] = &[
    "real madrid",
    "barcelona",
    "manchester united",
    "manchester city",
    "liverpool",
    "chelsea",
    "arsenal",
    "tottenham",
    "bayern munich",
    "psg",
    "juventus",
    "ac milan",
    "inter milan",
    "atletico madrid",
    "borussia dortmund",
    "ajax",
    "porto",
    "benfica",
];

/// Words that follow a club name ("ajax fc", "dortmund team")
pub const TEAM_MARKERS: &[&str] = &["fc", "football club", "soccer club", "club", "team"];

/// Substrings that make a captured phrase look like a club
pub const TEAM_INDICATORS: &[&str] = &["fc", "club", "united", "city", "real", "athletic"];

/// Competitions recognised by plain substring match
pub const KNOWN_LEAGUES: &[&str] = &[
    "premier league",
    "la liga",
    "bundesliga",
    "serie a",
    "ligue 1",
    "champions league",
    "europa league",
    "world cup",
    "euros",
    "uefa",
    "fifa",
    "copa america",
    "conference league",
];

/// Substrings that make a captured phrase look like a competition
pub const LEAGUE_INDICATORS: &[&str] = &["league", "cup", "championship", "serie", "bundesliga", "liga"];

/// Playing positions, in lookup order
pub const POSITIONS: &[&str] = &[
    "goalkeeper",
    "defender",
    "midfielder",
    "forward",
    "striker",
    "winger",
    "centre-back",
    "center-back",
    "full-back",
    "fullback",
    "attacking midfielder",
    "defensive midfielder",
    "left-back",
    "right-back",
    "centre-forward",
    "center-forward",
];

/// Filler words dropped from captured names
pub const NAME_STOP_WORDS: &[&str] = &[
    "about",
    "info",
    "information",
    "details",
    "stats",
    "statistics",
    "the",
];

/// Words that never appear in a player name
pub const NON_NAME_WORDS: &[&str] = &[
    "stats", "info", "about", "player", "team", "club", "season", "football", "soccer",
];

/// Words a name window never starts with
pub const WINDOW_SKIP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
];

/// Known club names and team markers, for team plausibility
pub fn is_team_keyword(phrase: &str) -> bool {
    TEAM_MARKERS.contains(&phrase) || KNOWN_TEAMS.contains(&phrase)
}
