//! Module selection and quiz lifecycle orchestration.
//!
//! The controller owns the course outline and at most one active quiz
//! session. Selecting a module always discards the previous session.
//! Progress reports are spawned as detached tasks; their outcome is only
//! logged and never feeds back into the quiz.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::error::ClientError;
use crate::model::{CourseOutline, ModuleId, ProgressUpdate};
use crate::parser::load_module_quiz;
use crate::scoring::{completion_percent, ScoreResult};
use crate::session::{QuizSession, QuizView, SelectOutcome, SessionError};
use crate::traits::ProgressSink;

/// Errors from driving the controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("module {0} is not part of this course")]
    UnknownModule(ModuleId),

    #[error("the selected module has no quiz")]
    NoActiveQuiz,

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// What the page shows after a module is selected.
#[derive(Debug, Clone)]
pub struct ModuleSelection {
    pub module_id: ModuleId,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    /// Position-based completion reported for this module.
    pub completion: u8,
    /// The freshly rendered quiz, or `None` if the module has no usable quiz.
    pub quiz: Option<QuizView>,
}

struct ActiveModule {
    module_id: ModuleId,
    completion: u8,
    session: Option<QuizSession>,
}

/// Drives module selection, quiz answering, and progress reporting.
pub struct CourseController {
    course: CourseOutline,
    sink: Arc<dyn ProgressSink>,
    active: Option<ActiveModule>,
    in_flight: Vec<JoinHandle<()>>,
}

impl CourseController {
    pub fn new(course: CourseOutline, sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            course,
            sink,
            active: None,
            in_flight: Vec::new(),
        }
    }

    pub fn course(&self) -> &CourseOutline {
        &self.course
    }

    pub fn active_module(&self) -> Option<ModuleId> {
        self.active.as_ref().map(|a| a.module_id)
    }

    /// Select a module: replace any quiz state, render the module's quiz,
    /// and report position-based completion.
    pub fn select_module(&mut self, module_id: ModuleId) -> Result<ModuleSelection, ControllerError> {
        let position = self
            .course
            .position_of(module_id)
            .ok_or(ControllerError::UnknownModule(module_id))?;
        let module = &self.course.modules[position];
        let completion = completion_percent(position, self.course.modules.len());

        let mut session = load_module_quiz(self.course.id, module).map(QuizSession::new);
        let quiz = session.as_mut().map(QuizSession::render);

        let selection = ModuleSelection {
            module_id,
            title: module.title.clone(),
            content: module.content.clone(),
            video_url: module.video_url.clone(),
            completion,
            quiz,
        };

        if let Some(previous) = self.active.take() {
            tracing::debug!(
                from = previous.module_id,
                to = module_id,
                "discarding previous module state"
            );
        }
        self.active = Some(ActiveModule {
            module_id,
            completion,
            session,
        });

        self.dispatch(ProgressUpdate {
            course_id: self.course.id,
            module_id,
            completion,
            quiz_score: None,
        });

        Ok(selection)
    }

    /// Select `option` on `question` of the active quiz.
    pub fn select_option(
        &mut self,
        question: usize,
        option: usize,
    ) -> Result<SelectOutcome, ControllerError> {
        Ok(self.session_mut()?.select(question, option)?)
    }

    /// Submit the active quiz and report its score.
    ///
    /// Returns `Ok(None)` when the quiz was already submitted.
    pub fn submit(&mut self) -> Result<Option<ScoreResult>, ControllerError> {
        let Some(submission) = self.session_mut()?.submit()? else {
            tracing::debug!("quiz already submitted, ignoring");
            return Ok(None);
        };

        let course_id = self.course.id;
        let update = self.active.as_ref().map(|active| ProgressUpdate {
            course_id,
            module_id: active.module_id,
            completion: active.completion,
            quiz_score: Some(submission.score.percentage),
        });
        if let Some(update) = update {
            self.dispatch(update);
        }
        Ok(Some(submission.score))
    }

    /// The active quiz as currently rendered.
    pub fn view(&self) -> Option<QuizView> {
        self.active
            .as_ref()
            .and_then(|a| a.session.as_ref())
            .map(QuizSession::view)
    }

    /// Number of reports that have been spawned and not yet finished.
    pub fn pending_reports(&self) -> usize {
        self.in_flight.iter().filter(|h| !h.is_finished()).count()
    }

    /// Wait up to `timeout` for in-flight reports to finish.
    ///
    /// Reports still running at the deadline are left detached, not
    /// aborted. Returns `true` if every report finished in time.
    pub async fn settle(&mut self, timeout: Duration) -> bool {
        let pending: Vec<_> = self.in_flight.drain(..).collect();
        if pending.is_empty() {
            return true;
        }
        let count = pending.len();
        match tokio::time::timeout(timeout, futures::future::join_all(pending)).await {
            Ok(_) => true,
            Err(_) => {
                tracing::warn!(count, "progress reports still in flight at shutdown");
                false
            }
        }
    }

    fn session_mut(&mut self) -> Result<&mut QuizSession, ControllerError> {
        self.active
            .as_mut()
            .and_then(|a| a.session.as_mut())
            .ok_or(ControllerError::NoActiveQuiz)
    }

    fn dispatch(&mut self, update: ProgressUpdate) {
        self.in_flight.retain(|h| !h.is_finished());

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(
                module_id = update.module_id,
                "no async runtime, progress report dropped"
            );
            return;
        };

        let sink = Arc::clone(&self.sink);
        self.in_flight
            .push(runtime.spawn(async move { deliver(sink.as_ref(), &update).await }));
    }
}

/// Send one report and log the outcome.
async fn deliver(sink: &dyn ProgressSink, update: &ProgressUpdate) {
    match sink.report(update).await {
        Ok(ack) => {
            tracing::info!(
                sink = sink.name(),
                module_id = update.module_id,
                completion = update.completion,
                quiz_score = ?update.quiz_score,
                status = %ack.status,
                "progress updated"
            );
            if let Some(achievement) = ack.achievement {
                tracing::info!(
                    title = %achievement.title,
                    "achievement unlocked: {}",
                    achievement.description
                );
            }
        }
        Err(e) => {
            let status = e.downcast_ref::<ClientError>().and_then(ClientError::status);
            tracing::error!(
                sink = sink.name(),
                module_id = update.module_id,
                status = ?status,
                "error updating progress: {e:#}"
            );
        }
    }
}
