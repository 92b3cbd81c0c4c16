use serde::{Deserialize, Serialize};

/// Phrase entity: one Japanese expression with its transliteration,
/// English gloss, hiragana reading and lesson category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Phrase {
    pub id: i64,
    pub japanese: String,
    pub romaji: String,
    pub english: String,
    pub hiragana: String,
    pub category: String,
}

/// Listing payload for `GET /phrases/:category`.
/// The category is already in the URL, so the rows are returned without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseSummary {
    pub id: i64,
    pub japanese: String,
    pub romaji: String,
    pub english: String,
    pub hiragana: String,
}

impl From<Phrase> for PhraseSummary {
    fn from(phrase: Phrase) -> Self {
        PhraseSummary {
            id: phrase.id,
            japanese: phrase.japanese,
            romaji: phrase.romaji,
            english: phrase.english,
            hiragana: phrase.hiragana,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_phrase() -> Phrase {
        Phrase {
            id: 1,
            japanese: "こんにちは".to_string(),
            romaji: "Konnichiwa".to_string(),
            english: "Hello".to_string(),
            hiragana: "こんにちは".to_string(),
            category: "greeting".to_string(),
        }
    }

    #[test]
    fn test_phrase_serialization() {
        let json = serde_json::to_string(&sample_phrase()).expect("Failed to serialize phrase");
        let expected = r#"{"id":1,"japanese":"こんにちは","romaji":"Konnichiwa","english":"Hello","hiragana":"こんにちは","category":"greeting"}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_phrase_deserialization() {
        let json = r#"{"id":4,"japanese":"お元気ですか？","romaji":"Ogenki desu ka?","english":"How are you?","hiragana":"おげんきですか","category":"greeting"}"#;

        let phrase: Phrase = serde_json::from_str(json).expect("Failed to deserialize phrase");

        assert_eq!(phrase.id, 4);
        assert_eq!(phrase.japanese, "お元気ですか？");
        assert_eq!(phrase.romaji, "Ogenki desu ka?");
        assert_eq!(phrase.english, "How are you?");
        assert_eq!(phrase.hiragana, "おげんきですか");
        assert_eq!(phrase.category, "greeting");
    }

    #[test]
    fn test_phrase_summary_omits_category() {
        let summary = PhraseSummary::from(sample_phrase());

        let json = serde_json::to_string(&summary).expect("Failed to serialize summary");
        let expected = r#"{"id":1,"japanese":"こんにちは","romaji":"Konnichiwa","english":"Hello","hiragana":"こんにちは"}"#;
        assert_eq!(json, expected);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("category").is_none());
    }
}
