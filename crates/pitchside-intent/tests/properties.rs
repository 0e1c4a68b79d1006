//! Property-based tests for the intent processor using proptest

use pitchside_core::{ConversationContext, Entities, EntityKind, Intent};
use pitchside_intent::IntentProcessor;
use proptest::prelude::*;

/// Short lower-case phrases built from football-ish words
fn phrase_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "tell", "me", "about", "who", "is", "messi", "stats", "the", "vs", "or", "fc",
            "club", "team", "table", "league", "premier", "transfers", "worth", "hello",
            "help", "2022", "info", "madrid", "real", "striker", "and", "compare",
        ]),
        0..8,
    )
    .prop_map(|words| words.join(" "))
}

fn previous_intent_strategy() -> impl Strategy<Value = Intent> {
    prop::sample::select(Intent::ALL.to_vec())
}

proptest! {
    #[test]
    fn confidence_stays_in_unit_interval(input in "\\PC{0,120}") {
        let processor = IntentProcessor::new();
        let result = processor.process(&input, None);
        prop_assert!((0.0..=1.0).contains(&result.confidence));
    }

    #[test]
    fn processing_is_idempotent(input in phrase_strategy()) {
        let processor = IntentProcessor::new();
        prop_assert_eq!(processor.process(&input, None), processor.process(&input, None));
    }

    #[test]
    fn entity_values_are_never_blank(input in phrase_strategy()) {
        let processor = IntentProcessor::new();
        let result = processor.process(&input, None);
        let json = serde_json::to_value(&result.entities).unwrap();

        for (key, value) in json.as_object().unwrap() {
            match value {
                serde_json::Value::String(s) => prop_assert!(!s.trim().is_empty(), "{}", key),
                serde_json::Value::Array(items) => prop_assert!(!items.is_empty(), "{}", key),
                other => prop_assert!(false, "unexpected value for {}: {}", key, other),
            }
        }
    }

    #[test]
    fn success_keeps_normalised_text(input in phrase_strategy()) {
        let processor = IntentProcessor::new();
        let result = processor.process(&input, None);

        if result.success {
            prop_assert_eq!(result.original_text, input.trim().to_lowercase());
        } else {
            prop_assert_eq!(result.intent, Intent::GeneralQuestion);
            prop_assert!(result.entities.is_empty());
        }
    }

    #[test]
    fn context_never_lowers_confidence(
        input in phrase_strategy(),
        last_intent in previous_intent_strategy(),
    ) {
        let processor = IntentProcessor::new();

        let mut previous = Entities::default();
        previous.set(EntityKind::PlayerName, "Lionel Messi");
        previous.set(EntityKind::TeamName, "Arsenal");
        previous.set(EntityKind::LeagueName, "Serie A");
        let context = ConversationContext::after(last_intent, previous);

        let without = processor.process(&input, None);
        let with = processor.process(&input, Some(&context));

        prop_assert_eq!(without.intent, with.intent);
        prop_assert!(with.confidence >= without.confidence);
    }
}
