//! Name cleanup and plausibility heuristics

use once_cell::sync::Lazy;
use regex::Regex;

use crate::vocabulary::{
    is_team_keyword, LEAGUE_INDICATORS, NAME_STOP_WORDS, NON_NAME_WORDS, TEAM_INDICATORS,
};

/// Letters (ASCII and Latin-1/Latin Extended-A), whitespace, `-`, `.` and `'`
static PLAYER_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z\s\-\.'\u{00C0}-\u{017F}]+$").expect("player charset regex is valid")
});

/// Drop filler words and title-case what remains
pub fn clean_name(raw: &str) -> String {
    let kept: Vec<&str> = raw
        .split_whitespace()
        .filter(|word| !NAME_STOP_WORDS.contains(&word.to_lowercase().as_str()))
        .collect();
    title_case(&kept.join(" "))
}

/// Upper-case every letter that follows a non-letter, lower-case the rest
///
/// "o'neil" becomes "O'Neil" and "saint-maximin" becomes "Saint-Maximin".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }

    out
}

/// Whether a phrase could be a player's name
pub fn is_likely_player_name(name: &str) -> bool {
    if name.trim().chars().count() < 2 {
        return false;
    }

    if !PLAYER_CHARSET.is_match(name) {
        return false;
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    if words.is_empty() || words.len() > 4 {
        return false;
    }

    if words.iter().all(|word| word.chars().count() < 2) {
        return false;
    }

    !words
        .iter()
        .any(|word| NON_NAME_WORDS.contains(&word.to_lowercase().as_str()))
}

/// Whether a phrase could be a club name
pub fn is_likely_team_name(name: &str) -> bool {
    if name.trim().chars().count() < 2 {
        return false;
    }

    let word_count = name.split_whitespace().count();
    if word_count > 5 {
        return false;
    }

    let lower = name.to_lowercase();
    if TEAM_INDICATORS.iter().any(|indicator| lower.contains(indicator)) {
        return true;
    }

    is_team_keyword(&lower) || word_count <= 3
}

/// Whether a phrase could be a competition name
pub fn is_likely_league_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    LEAGUE_INDICATORS
        .iter()
        .any(|indicator| lower.contains(indicator))
}
