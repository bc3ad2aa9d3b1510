//! Modal dialog seam.
//!
//! The controller opens a dialog and blocks until the host returns exactly
//! one decision. A GUI host implements [`DialogHost`] on top of its own
//! windows; [`ScriptedDialogs`] answers from a queue for the CLI and tests.

use std::collections::VecDeque;

use crate::geo::Argb;
use crate::store::{Area, AreaStyle, Point};

/// The user closed a dialog without confirming.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cancelled;

/// Result of an edit dialog: the edited entity, or [`Cancelled`].
pub type DialogResult<T> = Result<T, Cancelled>;

/// A yes/no question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl Confirmation {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_text: "Yes".into(),
            cancel_text: "No".into(),
        }
    }
}

/// Host-provided modal dialogs.
pub trait DialogHost {
    /// Shows the point editor pre-filled with `draft`.
    fn edit_point(&mut self, draft: Point) -> DialogResult<Point>;

    /// Shows the area editor pre-filled with `draft`.
    fn edit_area(&mut self, draft: Area) -> DialogResult<Area>;

    /// Asks a yes/no question. Closing the dialog counts as "no".
    fn confirm(&mut self, request: &Confirmation) -> bool;
}

/// Field changes a scripted point editor applies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointEdits {
    pub name: Option<String>,
    pub color: Option<Argb>,
    pub size: Option<f64>,
}

/// Field changes a scripted area editor applies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AreaEdits {
    pub name: Option<String>,
    pub fill: Option<Argb>,
    pub border: Option<Argb>,
}

/// One scripted user decision.
#[derive(Clone, Debug, PartialEq)]
pub enum Answer {
    /// Confirm, leaving the draft untouched.
    Accept,
    /// Close the dialog.
    Cancel,
    EditPoint(PointEdits),
    EditArea(AreaEdits),
}

/// Which dialog was shown, recorded by [`ScriptedDialogs`].
#[derive(Clone, Debug, PartialEq)]
pub enum Prompt {
    PointEditor,
    AreaEditor,
    Confirmation(String),
}

/// Dialog host that replays queued answers.
///
/// When the queue runs dry every further dialog gets `fallback`.
#[derive(Clone, Debug)]
pub struct ScriptedDialogs {
    answers: VecDeque<Answer>,
    fallback: Answer,
    shown: Vec<Prompt>,
}

impl ScriptedDialogs {
    /// Accepts every dialog unchanged.
    pub fn accepting() -> Self {
        Self::with_fallback(Answer::Accept)
    }

    /// Cancels every dialog.
    pub fn cancelling() -> Self {
        Self::with_fallback(Answer::Cancel)
    }

    pub fn with_fallback(fallback: Answer) -> Self {
        Self {
            answers: VecDeque::new(),
            fallback,
            shown: Vec::new(),
        }
    }

    /// Queues the answer for the next dialog.
    pub fn then(mut self, answer: Answer) -> Self {
        self.answers.push_back(answer);
        self
    }

    pub fn push(&mut self, answer: Answer) {
        self.answers.push_back(answer);
    }

    /// Dialogs shown so far, oldest first.
    pub fn shown(&self) -> &[Prompt] {
        &self.shown
    }

    fn next_answer(&mut self, prompt: Prompt) -> Answer {
        self.shown.push(prompt);
        self.answers
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl DialogHost for ScriptedDialogs {
    fn edit_point(&mut self, mut draft: Point) -> DialogResult<Point> {
        match self.next_answer(Prompt::PointEditor) {
            Answer::Cancel => Err(Cancelled),
            Answer::EditPoint(edits) => {
                if let Some(name) = edits.name {
                    draft.name = name;
                }
                if let Some(color) = edits.color {
                    draft.color = color;
                }
                if let Some(size) = edits.size {
                    draft.size = size;
                }
                Ok(draft)
            }
            Answer::Accept | Answer::EditArea(_) => Ok(draft),
        }
    }

    fn edit_area(&mut self, mut draft: Area) -> DialogResult<Area> {
        match self.next_answer(Prompt::AreaEditor) {
            Answer::Cancel => Err(Cancelled),
            Answer::EditArea(edits) => {
                if let Some(name) = edits.name {
                    draft.name = name;
                }
                let AreaStyle { fill, border } = draft.style;
                draft.style = AreaStyle {
                    fill: edits.fill.unwrap_or(fill),
                    border: edits.border.unwrap_or(border),
                };
                Ok(draft)
            }
            Answer::Accept | Answer::EditPoint(_) => Ok(draft),
        }
    }

    fn confirm(&mut self, request: &Confirmation) -> bool {
        !matches!(
            self.next_answer(Prompt::Confirmation(request.message.clone())),
            Answer::Cancel
        )
    }
}
