//! Request bodies accepted by the HTTP API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/cards` and `PUT /api/cards/{id}`.
///
/// `type` selects the variant; stats that do not apply to it are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub rarity: String,
    pub elixir_cost: i32,
    pub level: i32,
    #[serde(default)]
    pub damage: Option<i32>,
    #[serde(default)]
    pub hp: Option<i32>,
    #[serde(default)]
    pub radius: Option<i32>,
    #[serde(default)]
    pub lifetime: Option<i32>,
}

/// Body of `POST /api/players` and `PUT /api/players/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    pub name: String,
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub trophies: Option<i32>,
}

/// Query string of `POST /api/players/{id}/trophies`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrophiesQuery {
    pub amount: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_request_reads_camel_case_and_type_key() {
        let json = r#"{"name":"Knight","type":"WARRIOR","rarity":"COMMON","elixirCost":3,"level":1,"hp":600,"damage":75}"#;
        let request: CardRequest = serde_json::from_str(json).expect("valid body");
        assert_eq!(request.card_type, "WARRIOR");
        assert_eq!(request.elixir_cost, 3);
        assert_eq!(request.hp, Some(600));
        assert_eq!(request.radius, None);
    }

    #[test]
    fn player_request_optional_fields_may_be_missing() {
        let request: PlayerRequest = serde_json::from_str(r#"{"name":"Alice"}"#).expect("valid");
        assert_eq!(request.level, None);
        assert_eq!(request.trophies, None);
    }
}
