use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{AnswerRecord, Quiz, QuizQuestion};
use crate::services::session::{QuizSession, SessionStage};
use crate::services::timer::{self, TimerHandle};

/// The coarse lifecycle the UI renders against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Setup,
    Active,
    Finished,
}

/// Owns the session lifecycle: at most one session, at most one running
/// countdown, and a serialized stream of answer/expiry/navigation events.
///
/// The race between a player's answer and the countdown expiring is settled
/// here: both paths take the same lock, and every accepted answer bumps the
/// epoch so a late expiry for a superseded countdown is dropped instead of
/// double-recording the question.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Mutex<ControllerInner>>,
}

struct ControllerInner {
    session: Option<QuizSession>,
    timer: Option<TimerHandle>,
    epoch: u64,
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ControllerInner {
                session: None,
                timer: None,
                epoch: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerInner> {
        self.inner.lock().expect("session controller lock poisoned")
    }

    /// `Setup -> Active`: begins a session on question 0 and starts its
    /// countdown. Starting over a live session is a `State` error; go back
    /// to setup first.
    pub fn start(&self, quiz: Quiz) -> AppResult<()> {
        let mut inner = self.lock();
        if inner.session.is_some() {
            return Err(AppError::State(
                "a session is already in progress".to_string(),
            ));
        }

        inner.session = Some(QuizSession::begin(quiz)?);
        self.arm_timer(&mut inner);
        Ok(())
    }

    /// Records the player's selection for the current question and disarms
    /// the pending countdown so it cannot also fire.
    pub fn submit_answer(&self, selected: Option<usize>) -> AppResult<AnswerRecord> {
        let mut inner = self.lock();
        inner.disarm();

        let session = inner
            .session
            .as_mut()
            .ok_or_else(|| AppError::State("no session is active".to_string()))?;
        session.record_answer(selected).cloned()
    }

    /// Moves to the next question (restarting the countdown with its own
    /// time limit) or finishes the session after the last one. Called by the
    /// presentation layer once it is done showing feedback.
    pub fn advance(&self) -> AppResult<SessionPhase> {
        let mut inner = self.lock();
        inner.disarm();

        let session = inner
            .session
            .as_mut()
            .ok_or_else(|| AppError::State("no session is active".to_string()))?;
        let stage = session.advance()?;

        if stage == SessionStage::AwaitingAnswer {
            self.arm_timer(&mut inner);
        }
        Ok(phase_of(stage))
    }

    /// `Finished -> Active`: same quiz, fresh score, log and countdown.
    pub fn replay(&self) -> AppResult<()> {
        let mut inner = self.lock();
        inner.disarm();

        let session = inner
            .session
            .as_mut()
            .ok_or_else(|| AppError::State("no session is active".to_string()))?;
        session.replay()?;

        self.arm_timer(&mut inner);
        Ok(())
    }

    /// Any state `-> Setup`: discards the session and cancels any pending
    /// countdown. The caller keeps its quiz document for a future start.
    pub fn go_to_setup(&self) {
        let mut inner = self.lock();
        inner.disarm();
        inner.session = None;
    }

    pub fn phase(&self) -> SessionPhase {
        match self.lock().session.as_ref() {
            None => SessionPhase::Setup,
            Some(session) => phase_of(session.stage()),
        }
    }

    pub fn score(&self) -> u32 {
        self.lock().session.as_ref().map_or(0, QuizSession::score)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.lock().session.as_ref().map(QuizSession::current_index)
    }

    pub fn current_question(&self) -> Option<QuizQuestion> {
        self.lock()
            .session
            .as_ref()
            .filter(|session| !session.is_finished())
            .map(|session| session.current_question().clone())
    }

    pub fn answer_log(&self) -> Vec<AnswerRecord> {
        self.lock()
            .session
            .as_ref()
            .map(|session| session.answer_log().to_vec())
            .unwrap_or_default()
    }

    /// Remaining fraction of the current countdown, for progress rendering.
    pub fn fraction_remaining(&self) -> Option<f64> {
        self.lock()
            .timer
            .as_ref()
            .map(TimerHandle::fraction_remaining)
    }

    /// Starts the countdown for the current question. The expiry callback
    /// carries the epoch it was armed under; by the time it runs, a player
    /// answer may already have claimed the question, in which case the epoch
    /// no longer matches and the expiry is dropped.
    fn arm_timer(&self, inner: &mut ControllerInner) {
        inner.disarm();

        let session = match inner.session.as_ref() {
            Some(session) => session,
            None => return,
        };
        let duration = Duration::from_secs(session.current_question().time_limit_secs);

        let epoch = inner.epoch;
        let weak: Weak<Mutex<ControllerInner>> = Arc::downgrade(&self.inner);

        inner.timer = Some(timer::start(duration, move || {
            let Some(strong) = weak.upgrade() else {
                return;
            };
            let mut inner = strong.lock().expect("session controller lock poisoned");
            if inner.epoch != epoch {
                return;
            }
            inner.epoch += 1;
            inner.timer = None;

            if let Some(session) = inner.session.as_mut() {
                if let Err(err) = session.record_answer(None) {
                    log::warn!("dropping countdown expiry: {err}");
                }
            }
        }));
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerInner {
    /// Stops the running countdown and invalidates any expiry already in
    /// flight for it.
    fn disarm(&mut self) {
        self.epoch += 1;
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
    }
}

fn phase_of(stage: SessionStage) -> SessionPhase {
    match stage {
        SessionStage::Finished => SessionPhase::Finished,
        SessionStage::AwaitingAnswer | SessionStage::Feedback => SessionPhase::Active,
    }
}
