//! Application state and its transitions.
//!
//! [`Session::update`] is a pure transition: it mutates the session and returns the
//! [`Effect`] the front-end must run. Completed effects come back as actions. The
//! session never talks to the gateway itself.

use tracing::{debug, warn};

use crate::{
    language::Language,
    types::{AnalysisResult, GeneratedArticle, VideoConcept},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppState {
    #[default]
    Idle,
    Analyzing,
    Complete,
    Error,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Dashboard,
    Article,
    Concept,
    Notes,
}

/// Local status of a secondary generation; never touches [`AppState`].
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    Empty,
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Panel::Empty
    }
}

impl<T> Panel<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Panel::Pending)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NotesStatus {
    #[default]
    Idle,
    Refining,
    Failed(String),
}

/// Interruptive message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Input rejected before any network activity.
    Validation(String),
    /// An operation failed.
    Alert(String),
}

/// Identifies one analysis request; results carrying an older ticket are stale.
pub type Ticket = u64;

#[derive(Debug, Clone)]
pub enum Action {
    UrlChanged(String),
    StartAnalysis,
    AnalysisFinished {
        ticket: Ticket,
        outcome: Result<AnalysisResult, String>,
    },
    SelectTab(Tab),
    GenerateArticle,
    ArticleFinished(Result<GeneratedArticle, String>),
    GenerateConcept,
    ConceptFinished(Result<VideoConcept, String>),
    NotesChanged(String),
    RefineNotes,
    NotesRefined(Result<String, String>),
    DismissNotice,
    Reset,
}

/// Work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Analyze { ticket: Ticket, url: String },
    Article { context: String },
    Concept { context: String },
    RefineNotes { notes: String, context: String },
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    language: Language,
    state: AppState,
    url_input: String,
    active_tab: Tab,
    analysis: Option<AnalysisResult>,
    article: Panel<GeneratedArticle>,
    concept: Panel<VideoConcept>,
    notes: String,
    notes_status: NotesStatus,
    notice: Option<Notice>,
    ticket: Ticket,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn article(&self) -> &Panel<GeneratedArticle> {
        &self.article
    }

    pub fn concept(&self) -> &Panel<VideoConcept> {
        &self.concept
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn notes_status(&self) -> &NotesStatus {
        &self.notes_status
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Secondary generations are only offered once an analysis is held.
    pub fn can_derive(&self) -> bool {
        self.state == AppState::Complete && self.analysis.is_some()
    }

    pub fn update(&mut self, action: Action) -> Effect {
        let phrases = self.language.phrases();

        match action {
            Action::UrlChanged(url) => {
                self.url_input = url;
                Effect::None
            }
            Action::StartAnalysis => {
                if self.state != AppState::Idle {
                    debug!(state = ?self.state, "Ignoring analysis request outside Idle");
                    return Effect::None;
                }
                let url = self.url_input.trim();
                if url.is_empty() {
                    self.notice = Some(Notice::Validation(phrases.url_required.to_string()));
                    return Effect::None;
                }
                let url = url.to_string();
                self.ticket += 1;
                self.state = AppState::Analyzing;
                self.notice = None;
                Effect::Analyze {
                    ticket: self.ticket,
                    url,
                }
            }
            Action::AnalysisFinished { ticket, outcome } => {
                if self.state != AppState::Analyzing || ticket != self.ticket {
                    debug!(ticket, current = self.ticket, "Discarding stale analysis result");
                    return Effect::None;
                }
                match outcome {
                    Ok(result) => {
                        self.analysis = Some(result);
                        self.state = AppState::Complete;
                        self.active_tab = Tab::Dashboard;
                    }
                    Err(message) => {
                        warn!(error = %message, "Analysis failed");
                        self.state = AppState::Error;
                        self.notice = Some(Notice::Alert(phrases.analysis_failed.to_string()));
                    }
                }
                Effect::None
            }
            Action::SelectTab(tab) => {
                if self.state == AppState::Complete {
                    self.active_tab = tab;
                }
                Effect::None
            }
            Action::GenerateArticle => {
                let Some(analysis) = self.derivable() else {
                    return Effect::None;
                };
                let context = format!("{}\n{}", analysis.summary, analysis.full_transcript);
                self.article = Panel::Pending;
                self.active_tab = Tab::Article;
                Effect::Article { context }
            }
            Action::ArticleFinished(outcome) => {
                if self.can_derive() {
                    self.article = match outcome {
                        Ok(article) => Panel::Ready(article),
                        Err(message) => {
                            warn!(error = %message, "Article generation failed");
                            Panel::Failed(phrases.article_error.to_string())
                        }
                    };
                }
                Effect::None
            }
            Action::GenerateConcept => {
                let Some(analysis) = self.derivable() else {
                    return Effect::None;
                };
                let context = analysis.summary.clone();
                self.concept = Panel::Pending;
                self.active_tab = Tab::Concept;
                Effect::Concept { context }
            }
            Action::ConceptFinished(outcome) => {
                if self.can_derive() {
                    self.concept = match outcome {
                        Ok(concept) => Panel::Ready(concept),
                        Err(message) => {
                            warn!(error = %message, "Concept generation failed");
                            Panel::Failed(phrases.concept_error.to_string())
                        }
                    };
                }
                Effect::None
            }
            Action::NotesChanged(notes) => {
                self.notes = notes;
                Effect::None
            }
            Action::RefineNotes => {
                if self.notes.trim().is_empty() {
                    return Effect::None;
                }
                let Some(analysis) = self.derivable() else {
                    return Effect::None;
                };
                let context = if analysis.full_transcript.is_empty() {
                    analysis.summary.clone()
                } else {
                    analysis.full_transcript.clone()
                };
                self.notes_status = NotesStatus::Refining;
                Effect::RefineNotes {
                    notes: self.notes.clone(),
                    context,
                }
            }
            Action::NotesRefined(outcome) => {
                if self.can_derive() {
                    match outcome {
                        Ok(notes) => {
                            self.notes = notes;
                            self.notes_status = NotesStatus::Idle;
                        }
                        Err(message) => {
                            warn!(error = %message, "Notes refinement failed");
                            self.notes_status = NotesStatus::Failed(phrases.notes_error.to_string());
                        }
                    }
                }
                Effect::None
            }
            Action::DismissNotice => {
                self.notice = None;
                Effect::None
            }
            Action::Reset => {
                // Keep the ticket counter so in-flight results stay stale.
                *self = Self {
                    language: self.language,
                    ticket: self.ticket + 1,
                    ..Self::default()
                };
                Effect::None
            }
        }
    }

    fn derivable(&self) -> Option<&AnalysisResult> {
        if self.state == AppState::Complete {
            self.analysis.as_ref()
        } else {
            None
        }
    }
}
