//! Follow-up suggestions shown after an answer

use pitchside_core::{Entities, Intent};

const MAX_SUGGESTIONS: usize = 3;

const DEFAULT_SUGGESTIONS: [&str; MAX_SUGGESTIONS] = [
    "Tell me about Messi",
    "Real Madrid info",
    "Recent transfers",
];

/// Up to three follow-up questions for the turn just answered
pub fn quick_replies(intent: Intent, entities: &Entities) -> Vec<String> {
    let replies = match (intent, &entities.player_name, &entities.team_name) {
        (Intent::PlayerInfo, Some(player), _) => vec![
            format!("{player} stats"),
            format!("{player} transfers"),
            format!("{player} market value"),
        ],
        (Intent::TeamInfo, _, Some(team)) => vec![
            format!("{team} squad"),
            format!("{team} recent transfers"),
            format!("{team} league position"),
        ],
        _ => DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    };

    replies.into_iter().take(MAX_SUGGESTIONS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchside_core::EntityKind;

    #[test]
    fn test_player_suggestions() {
        let mut entities = Entities::default();
        entities.set(EntityKind::PlayerName, "Lionel Messi");
        assert_eq!(
            quick_replies(Intent::PlayerInfo, &entities),
            vec![
                "Lionel Messi stats",
                "Lionel Messi transfers",
                "Lionel Messi market value"
            ]
        );
    }

    #[test]
    fn test_team_suggestions() {
        let mut entities = Entities::default();
        entities.set(EntityKind::TeamName, "Arsenal");
        assert_eq!(quick_replies(Intent::TeamInfo, &entities)[2], "Arsenal league position");
    }

    #[test]
    fn test_default_suggestions() {
        assert_eq!(
            quick_replies(Intent::PlayerInfo, &Entities::default()),
            DEFAULT_SUGGESTIONS
        );
        let mut entities = Entities::default();
        entities.set(EntityKind::PlayerName, "Messi");
        assert_eq!(quick_replies(Intent::Transfers, &entities).len(), 3);
        assert_eq!(quick_replies(Intent::Transfers, &entities)[0], "Tell me about Messi");
    }
}
