//! Football data payloads
//!
//! Records returned by a football data source. The upstream API schema is
//! not ours, so every field is optional and decoded leniently: strings and
//! numbers become text, arrays yield their first usable element and
//! objects yield their `name`, `main` or `value` member.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Data fetched for one chat turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum FootballData {
    Player(PlayerProfile),
    Club(ClubProfile),
    Transfers(Vec<TransferRecord>),
    MarketValue(MarketValueHistory),
    Table(LeagueTable),
    RecentTransfers(Vec<TransferRecord>),
    #[default]
    Absent,
}

impl FootballData {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Player(_) => "player",
            Self::Club(_) => "club",
            Self::Transfers(_) => "transfers",
            Self::MarketValue(_) => "market_value",
            Self::Table(_) => "table",
            Self::RecentTransfers(_) => "recent_transfers",
            Self::Absent => "absent",
        }
    }
}

/// Player profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerProfile {
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    /// Current club name
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,

    #[serde(
        alias = "citizenship",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub nationality: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub market_value: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub foot: Option<String>,
}

/// Club profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClubProfile {
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// League name
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,

    #[serde(
        alias = "foundedOn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub founded: Option<String>,

    #[serde(
        alias = "stadiumName",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub stadium: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub market_value: Option<String>,
}

/// One transfer between two clubs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransferRecord {
    /// Player name (filled for league-wide transfer lists)
    #[serde(
        alias = "playerName",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub player: Option<String>,

    #[serde(
        alias = "clubFrom",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub from: Option<String>,

    #[serde(
        alias = "clubTo",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub to: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
}

/// Market value history of a player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketValueHistory {
    #[serde(
        alias = "marketValue",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub current: Option<String>,

    #[serde(alias = "marketValueHistory", skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<MarketValuePoint>,
}

/// One valuation in a market value history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketValuePoint {
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(
        alias = "marketValue",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,

    #[serde(
        alias = "clubName",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub club: Option<String>,
}

/// League standings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeagueTable {
    /// Competition name
    #[serde(
        alias = "name",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub competition: Option<String>,

    #[serde(alias = "table", alias = "standings", skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<TableRow>,
}

/// One line of a league table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableRow {
    #[serde(
        alias = "rank",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<String>,

    #[serde(
        alias = "clubName",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub club: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub matches: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub goal_difference: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub points: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_text))
}

/// Best-effort text rendering of an arbitrary JSON value
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => items.iter().find_map(value_to_text),
        Value::Object(map) => ["name", "main", "value"]
            .iter()
            .find_map(|key| map.get(*key).and_then(value_to_text)),
        Value::Null => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_profile_lenient_decoding() {
        let profile: PlayerProfile = serde_json::from_value(json!({
            "id": 28003,
            "name": "Lionel Messi",
            "age": 37,
            "position": {"main": "Right Winger", "other": ["Centre-Forward"]},
            "club": {"id": "7131", "name": "Inter Miami"},
            "citizenship": ["Argentina", "Spain"],
            "marketValue": 18000000,
            "unknownField": true
        }))
        .unwrap();

        assert_eq!(profile.id.as_deref(), Some("28003"));
        assert_eq!(profile.age.as_deref(), Some("37"));
        assert_eq!(profile.position.as_deref(), Some("Right Winger"));
        assert_eq!(profile.club.as_deref(), Some("Inter Miami"));
        assert_eq!(profile.nationality.as_deref(), Some("Argentina"));
        assert_eq!(profile.market_value.as_deref(), Some("18000000"));
        assert!(profile.foot.is_none());
    }

    #[test]
    fn test_transfer_record_aliases() {
        let transfer: TransferRecord = serde_json::from_value(json!({
            "clubFrom": {"name": "Paris SG"},
            "clubTo": {"name": "Inter Miami"},
            "date": "2023-07-15",
            "fee": null
        }))
        .unwrap();

        assert_eq!(transfer.from.as_deref(), Some("Paris SG"));
        assert_eq!(transfer.to.as_deref(), Some("Inter Miami"));
        assert!(transfer.fee.is_none());
    }

    #[test]
    fn test_football_data_tagging() {
        let data = FootballData::Club(ClubProfile {
            name: Some("Ajax".to_string()),
            ..Default::default()
        });
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["kind"], "club");
        assert_eq!(json["data"]["name"], "Ajax");

        let back: FootballData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
        assert_eq!(FootballData::Absent.kind(), "absent");
    }

    #[test]
    fn test_value_to_text_skips_blank() {
        assert_eq!(value_to_text(&json!("  ")), None);
        assert_eq!(value_to_text(&json!(["", "Spain"])), Some("Spain".to_string()));
        assert_eq!(value_to_text(&json!({"other": "x"})), None);
    }
}
