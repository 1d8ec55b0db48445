use serde::{Deserialize, Serialize};

/// The recorded outcome of one question within a session.
///
/// `selected_answer_text` is `None` when the countdown expired before the
/// player picked anything.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerRecord {
    pub question_text: String,
    pub is_correct: bool,
    pub selected_answer_text: Option<String>,
    pub correct_answer_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_record_round_trips_with_null_selection() {
        let record = AnswerRecord {
            question_text: "Q?".to_string(),
            is_correct: false,
            selected_answer_text: None,
            correct_answer_text: "a".to_string(),
        };

        let json = serde_json::to_string(&record).expect("record should serialize");
        assert!(json.contains("\"selected_answer_text\":null"));

        let parsed: AnswerRecord = serde_json::from_str(&json).expect("record should deserialize");
        assert_eq!(parsed, record);
    }
}
