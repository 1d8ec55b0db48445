use crate::errors::{AppError, AppResult};
use crate::models::domain::{AnswerRecord, Quiz, QuizQuestion};

/// Points awarded for a correct answer.
pub const CORRECT_ANSWER_POINTS: u32 = 1000;

/// Where a running session currently is.
///
/// `AwaitingAnswer` is the window in which exactly one answer event (a
/// selection or a timeout) may be recorded for the current question.
/// `Feedback` is the stretch between recording and advancing, during which
/// the presentation layer shows the outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStage {
    AwaitingAnswer,
    Feedback,
    Finished,
}

/// One run-through of a quiz, from the first question to the results.
///
/// This is the synchronous core of the player: every transition is an
/// explicit method call, and the countdown lives elsewhere. The session
/// exclusively owns its answer log, and the quiz document it was started
/// with is never modified.
#[derive(Clone, Debug)]
pub struct QuizSession {
    quiz: Quiz,
    current_index: usize,
    score: u32,
    answer_log: Vec<AnswerRecord>,
    stage: SessionStage,
}

impl QuizSession {
    /// Starts a session on the first question of `quiz`.
    ///
    /// The non-empty invariant is re-checked here even though the validator
    /// already enforced it, since a `Quiz` can also be constructed directly.
    pub fn begin(quiz: Quiz) -> AppResult<Self> {
        if quiz.questions.is_empty() {
            return Err(AppError::Schema(
                "questions array is required".to_string(),
            ));
        }

        Ok(Self {
            quiz,
            current_index: 0,
            score: 0,
            answer_log: Vec::new(),
            stage: SessionStage::AwaitingAnswer,
        })
    }

    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    pub fn is_finished(&self) -> bool {
        self.stage == SessionStage::Finished
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn answer_log(&self) -> &[AnswerRecord] {
        &self.answer_log
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.quiz.questions[self.current_index]
    }

    /// Records the outcome of the current question: a selected answer index,
    /// or `None` when the countdown expired without a selection.
    ///
    /// Appends exactly one `AnswerRecord` and moves the session into the
    /// feedback stage; a second call before `advance` is a `State` error and
    /// leaves the log untouched. A selected index outside the answers (which
    /// a well-behaved UI never produces) counts as a wrong answer.
    pub fn record_answer(&mut self, selected: Option<usize>) -> AppResult<&AnswerRecord> {
        if self.stage != SessionStage::AwaitingAnswer {
            return Err(AppError::State(
                "no question is awaiting an answer".to_string(),
            ));
        }

        let question = &self.quiz.questions[self.current_index];
        let is_correct = selected == Some(question.correct_index);

        let recorded_at = self.answer_log.len();
        self.answer_log.push(AnswerRecord {
            question_text: question.text.clone(),
            is_correct,
            selected_answer_text: selected
                .and_then(|index| question.answers.get(index))
                .cloned(),
            correct_answer_text: question.correct_answer().to_string(),
        });

        if is_correct {
            self.score += CORRECT_ANSWER_POINTS;
        }
        self.stage = SessionStage::Feedback;

        Ok(&self.answer_log[recorded_at])
    }

    /// Moves past the feedback stage: on to the next question, or into the
    /// finished stage when the recorded question was the last one.
    pub fn advance(&mut self) -> AppResult<SessionStage> {
        if self.stage != SessionStage::Feedback {
            return Err(AppError::State(
                "there is no recorded answer to advance past".to_string(),
            ));
        }

        if self.current_index + 1 < self.quiz.questions.len() {
            self.current_index += 1;
            self.stage = SessionStage::AwaitingAnswer;
        } else {
            self.stage = SessionStage::Finished;
        }

        Ok(self.stage)
    }

    /// Restarts the finished session on the same quiz, with a fresh score,
    /// index and answer log.
    pub fn replay(&mut self) -> AppResult<()> {
        if self.stage != SessionStage::Finished {
            return Err(AppError::State(
                "only a finished session can be replayed".to_string(),
            ));
        }

        self.current_index = 0;
        self.score = 0;
        self.answer_log.clear();
        self.stage = SessionStage::AwaitingAnswer;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{sample_quiz, single_question_quiz};

    fn play_through(session: &mut QuizSession, pick: impl Fn(&QuizQuestion) -> Option<usize>) {
        while !session.is_finished() {
            let choice = pick(session.current_question());
            session.record_answer(choice).expect("answer should record");
            session.advance().expect("session should advance");
        }
    }

    #[test]
    fn single_question_quiz_finishes_after_one_answer() {
        // start -> submitAnswer(1) -> advance on a one-question quiz
        let mut session = QuizSession::begin(single_question_quiz()).expect("session should start");

        let record = session.record_answer(Some(1)).expect("answer should record");
        assert!(record.is_correct);
        assert_eq!(session.score(), 1000);

        assert_eq!(
            session.advance().expect("session should advance"),
            SessionStage::Finished
        );
    }

    #[test]
    fn timeout_records_no_selection_and_no_points() {
        let mut session = QuizSession::begin(single_question_quiz()).expect("session should start");

        let record = session.record_answer(None).expect("timeout should record");
        assert!(!record.is_correct);
        assert_eq!(record.selected_answer_text, None);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn last_answer_index_can_be_the_correct_one() {
        let quiz = Quiz {
            title: "T".to_string(),
            questions: vec![QuizQuestion {
                text: "pick d".to_string(),
                answers: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_index: 3,
                time_limit_secs: 20,
            }],
        };
        let mut session = QuizSession::begin(quiz).expect("session should start");

        let record = session.record_answer(Some(3)).expect("answer should record");
        assert!(record.is_correct);
    }

    #[test]
    fn all_correct_run_scores_thousand_per_question() {
        let quiz = sample_quiz();
        let question_count = quiz.questions.len() as u32;
        let mut session = QuizSession::begin(quiz).expect("session should start");

        play_through(&mut session, |q| Some(q.correct_index));

        assert_eq!(session.score(), 1000 * question_count);
        assert_eq!(session.answer_log().len(), question_count as usize);
        assert!(session.answer_log().iter().all(|r| r.is_correct));
    }

    #[test]
    fn answer_log_preserves_question_order() {
        let quiz = sample_quiz();
        let texts: Vec<String> = quiz.questions.iter().map(|q| q.text.clone()).collect();
        let mut session = QuizSession::begin(quiz).expect("session should start");

        play_through(&mut session, |_| Some(0));

        for (record, text) in session.answer_log().iter().zip(&texts) {
            assert_eq!(&record.question_text, text);
        }
    }

    #[test]
    fn out_of_range_selection_counts_as_wrong() {
        let mut session = QuizSession::begin(single_question_quiz()).expect("session should start");

        let record = session.record_answer(Some(9)).expect("answer should record");
        assert!(!record.is_correct);
        assert_eq!(record.selected_answer_text, None);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn replay_resets_score_and_log_but_keeps_the_quiz() {
        let quiz = sample_quiz();
        let mut session = QuizSession::begin(quiz.clone()).expect("session should start");
        play_through(&mut session, |q| Some(q.correct_index));
        assert!(session.score() > 0);

        session.replay().expect("finished session should replay");

        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 0);
        assert!(session.answer_log().is_empty());
        assert_eq!(session.stage(), SessionStage::AwaitingAnswer);
        assert_eq!(session.quiz(), &quiz);
    }

    #[test]
    fn begin_rejects_empty_quiz() {
        let quiz = Quiz {
            title: "T".to_string(),
            questions: vec![],
        };

        assert!(QuizSession::begin(quiz).is_err());
    }

    #[test]
    fn double_record_is_a_state_error() {
        let mut session = QuizSession::begin(single_question_quiz()).expect("session should start");
        session.record_answer(Some(0)).expect("answer should record");

        let err = session
            .record_answer(None)
            .expect_err("second record must be rejected");
        assert!(matches!(err, AppError::State(_)));
        assert_eq!(session.answer_log().len(), 1);
    }

    #[test]
    fn advance_before_answer_is_a_state_error() {
        let mut session = QuizSession::begin(single_question_quiz()).expect("session should start");

        let err = session.advance().expect_err("advance must be rejected");
        assert!(matches!(err, AppError::State(_)));
    }

    #[test]
    fn replay_before_finish_is_a_state_error() {
        let mut session = QuizSession::begin(sample_quiz()).expect("session should start");

        let err = session.replay().expect_err("replay must be rejected");
        assert!(matches!(err, AppError::State(_)));
    }
}
