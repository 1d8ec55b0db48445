/// Starter quiz document shown in the setup screen before the user pastes,
/// loads or generates their own.
pub const SAMPLE_QUIZ_JSON: &str = r#"{
  "title": "Ultimate Mixed Knowledge Quiz",
  "questions": [
    {
      "question": "Which planet in our solar system has the most moons?",
      "answers": ["Jupiter", "Saturn", "Uranus", "Neptune"],
      "correctIndex": 1,
      "timeLimit": 20
    },
    {
      "question": "What is the capital of Australia?",
      "answers": ["Sydney", "Melbourne", "Canberra", "Perth"],
      "correctIndex": 2,
      "timeLimit": 15
    },
    {
      "question": "In which year was the first iPhone released?",
      "answers": ["2005", "2006", "2007", "2008"],
      "correctIndex": 2,
      "timeLimit": 15
    },
    {
      "question": "Which element has the chemical symbol 'Au'?",
      "answers": ["Silver", "Gold", "Aluminium", "Argon"],
      "correctIndex": 1,
      "timeLimit": 10
    },
    {
      "question": "What is the largest species of shark?",
      "answers": ["Great white shark", "Whale shark", "Tiger shark", "Hammerhead"],
      "correctIndex": 1,
      "timeLimit": 15
    }
  ]
}"#;
