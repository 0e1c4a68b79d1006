//! Intent pattern table
//!
//! An ordered list of intents, each with an ordered list of
//! case-insensitive patterns. Classification is a linear scan: the first
//! intent with any matching pattern wins.

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use pitchside_core::{Intent, PitchsideError, Result};

/// Built-in rules, in classification order
///
/// `recent_transfers` is scanned before `transfers` so that
/// "recent transfers" is not read as the transfer history of "recent".
/// Any mention of "transfer news" is therefore a recent-transfers question.
const DEFAULT_RULES: &[(Intent, &[&str])] = &[
    (
        Intent::PlayerInfo,
        &[
            r"tell me about (.+)",
            r"who is (.+)",
            r"information about (.+)",
            r"details about (.+)",
            r"(.+) profile",
            r"(.+) bio",
            r"(.+) career",
        ],
    ),
    (
        Intent::PlayerStats,
        &[
            r"(.+) stats",
            r"(.+) statistics",
            r"(.+) goals",
            r"(.+) assists",
            r"(.+) performance",
            r"how many goals (.+)",
            r"(.+) season stats",
        ],
    ),
    (
        Intent::TeamInfo,
        &[
            r"tell me about (.+) team",
            r"(.+) club info",
            r"(.+) team details",
            r"information about (.+) fc",
            r"(.+) football club",
        ],
    ),
    (
        Intent::TeamStats,
        &[
            r"(.+) team stats",
            r"(.+) club statistics",
            r"(.+) performance this season",
            r"how is (.+) doing",
        ],
    ),
    (
        Intent::RecentTransfers,
        &[
            r"\brecent transfers?\b",
            r"\blatest transfers?\b",
            r"\btransfer news\b",
            r"who (?:has )?moved recently\??",
            r"who transferred recently\??",
            r"\bnew signings?\b",
            r"\brecent signings?\b",
            r"\blatest moves?\b",
        ],
    ),
    (
        Intent::Transfers,
        &[
            r"(.+) transfers",
            r"(.+) transfer history",
            r"where did (.+) play",
            r"(.+) clubs",
            r"(.+) career moves",
            r"who bought (.+)",
        ],
    ),
    (
        Intent::MarketValue,
        &[
            r"(.+) market value",
            r"(.+) worth",
            r"(.+) price",
            r"(.+) value",
            r"how much is (.+) worth",
        ],
    ),
    (
        Intent::Comparison,
        &[
            r"(.+) vs (.+)",
            r"compare (.+) and (.+)",
            r"(.+) or (.+)",
            r"who is better (.+) or (.+)",
        ],
    ),
    (
        Intent::LeagueTable,
        &[
            r"(.+) table",
            r"(.+) standings",
            r"(.+) league table",
            r"(.+) position",
            r"who is top of (.+)",
            r"(.+) league standings",
        ],
    ),
    (
        Intent::Greeting,
        &[
            r"\bhello\b",
            r"\bhi\b",
            r"\bhey\b",
            r"good morning",
            r"good afternoon",
            r"good evening",
            r"greetings",
        ],
    ),
    (
        Intent::Help,
        &[
            r"\bhelp\b",
            r"what can you do\??",
            r"how do(?:es)? (?:this|you) work\??",
            r"(?:show me )?(?:the )?commands\??",
            r"(?:what are my )?options\??",
            r"what are your capabilities\??",
            r"how to use (?:this|you)\??",
        ],
    ),
];

/// A compiled, case-insensitive search pattern
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compile a pattern
    pub fn new(source: &str) -> Result<Self> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map_err(|e| PitchsideError::InvalidPattern {
                pattern: source.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Pattern text as supplied
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the pattern occurs anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// First capture group of the first match, if the pattern has one and it took part
    pub fn first_group<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// First two capture groups of the first match
    pub fn two_groups<'t>(&self, text: &'t str) -> Option<(&'t str, &'t str)> {
        let caps = self.regex.captures(text)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }
}

/// Patterns for one intent
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: Intent,
    pub patterns: Vec<CompiledPattern>,
}

impl IntentRule {
    /// Compile a rule; malformed patterns are logged and skipped
    pub fn compile(intent: Intent, sources: &[&str]) -> Self {
        let patterns = sources
            .iter()
            .filter_map(|source| match CompiledPattern::new(source) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!(intent = %intent, "Skipping pattern: {}", e);
                    None
                }
            })
            .collect();

        Self { intent, patterns }
    }

    /// Pattern that matches `text`, if any
    pub fn find_match(&self, text: &str) -> Option<&CompiledPattern> {
        self.patterns.iter().find(|pattern| pattern.is_match(text))
    }
}

/// Ordered intent table
#[derive(Debug, Clone)]
pub struct PatternTable {
    rules: Vec<IntentRule>,
}

impl PatternTable {
    /// Table with the built-in football rules
    pub fn new() -> Self {
        Self::from_rules(DEFAULT_RULES)
    }

    /// Table from explicit rules, in the given order
    pub fn from_rules(rules: &[(Intent, &[&str])]) -> Self {
        Self {
            rules: rules
                .iter()
                .map(|(intent, sources)| IntentRule::compile(*intent, sources))
                .collect(),
        }
    }

    /// Classify lower-cased, trimmed text
    pub fn classify(&self, text: &str) -> Intent {
        for rule in &self.rules {
            if let Some(pattern) = rule.find_match(text) {
                debug!(
                    intent = %rule.intent,
                    pattern = pattern.source(),
                    "Matched intent"
                );
                return rule.intent;
            }
        }

        debug!("No intent matched");
        Intent::GeneralQuestion
    }

    /// Patterns declared for `intent` (empty if it has no rule)
    pub fn patterns_for(&self, intent: Intent) -> &[CompiledPattern] {
        self.rules
            .iter()
            .find(|rule| rule.intent == intent)
            .map(|rule| rule.patterns.as_slice())
            .unwrap_or(&[])
    }

    /// Append a pattern to an intent, adding the intent at the end if new
    pub fn add(&mut self, intent: Intent, source: &str) -> Result<()> {
        let pattern = CompiledPattern::new(source)?;

        match self.rules.iter_mut().find(|rule| rule.intent == intent) {
            Some(rule) => rule.patterns.push(pattern),
            None => self.rules.push(IntentRule {
                intent,
                patterns: vec![pattern],
            }),
        }

        Ok(())
    }

    /// Intents in classification order
    pub fn intents(&self) -> Vec<Intent> {
        self.rules.iter().map(|rule| rule.intent).collect()
    }

    /// Total number of compiled patterns
    pub fn pattern_count(&self) -> usize {
        self.rules.iter().map(|rule| rule.patterns.len()).sum()
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_compiles_every_pattern() {
        let table = PatternTable::new();
        let declared: usize = DEFAULT_RULES.iter().map(|(_, sources)| sources.len()).sum();
        assert_eq!(table.pattern_count(), declared);
        assert_eq!(table.intents().len(), 11);
        assert_eq!(table.intents()[0], Intent::PlayerInfo);
    }

    #[test]
    fn test_malformed_pattern_is_skipped() {
        let table = PatternTable::from_rules(&[(Intent::Greeting, &["(unclosed", r"\bhello\b"])]);
        assert_eq!(table.pattern_count(), 1);
        assert_eq!(table.classify("hello there"), Intent::Greeting);
    }

    #[test]
    fn test_classify_is_a_search() {
        let table = PatternTable::new();
        assert_eq!(table.classify("well hello"), Intent::Greeting);
        assert_eq!(table.classify("so who is top of la liga"), Intent::PlayerInfo);
        assert_eq!(table.classify("xyz"), Intent::GeneralQuestion);
    }

    #[test]
    fn test_case_insensitive_match() {
        let table = PatternTable::new();
        assert_eq!(table.classify("HELLO"), Intent::Greeting);
    }

    #[test]
    fn test_recent_transfers_precedes_transfers() {
        let table = PatternTable::new();
        assert_eq!(table.classify("recent transfers"), Intent::RecentTransfers);
        assert_eq!(table.classify("messi transfers"), Intent::Transfers);
    }

    #[test]
    fn test_capture_groups() {
        let pattern = CompiledPattern::new(r"compare (.+) and (.+)").unwrap();
        assert_eq!(
            pattern.two_groups("compare messi and ronaldo"),
            Some(("messi", "ronaldo"))
        );
        assert_eq!(pattern.first_group("nothing here"), None);

        let no_group = CompiledPattern::new(r"\bhello\b").unwrap();
        assert_eq!(no_group.first_group("hello"), None);
    }

    #[test]
    fn test_add_pattern_creates_rule_at_end() {
        let mut table = PatternTable::from_rules(&[(Intent::Greeting, &[r"\bhello\b"])]);
        table.add(Intent::Help, r"\bmanual\b").unwrap();
        table.add(Intent::Greeting, r"\byo\b").unwrap();

        assert_eq!(table.intents(), vec![Intent::Greeting, Intent::Help]);
        assert_eq!(table.patterns_for(Intent::Greeting).len(), 2);
        assert!(table.add(Intent::Help, "[").is_err());
        assert_eq!(table.pattern_count(), 3);
    }
}
