use std::sync::Arc;

use crate::{
    analysis::analyze_video,
    derived::{generate_article, generate_video_concept, refine_notes},
    gateway::Gateway,
    language::Language,
    session::{Action, Effect, Session},
};

/// Owns a [`Session`] and runs the effects its transitions request.
pub struct Controller {
    session: Session,
    gateway: Arc<dyn Gateway>,
}

impl Controller {
    pub fn new(gateway: Arc<dyn Gateway>, language: Language) -> Self {
        Self {
            session: Session::new(language),
            gateway,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Apply `action` without running the resulting effect.
    pub fn begin(&mut self, action: Action) -> Effect {
        self.session.update(action)
    }

    /// Run `effect` and feed completions back until the session settles.
    pub async fn complete(&mut self, mut effect: Effect) {
        while let Some(action) = self.run(effect).await {
            effect = self.session.update(action);
        }
    }

    pub async fn dispatch(&mut self, action: Action) {
        let effect = self.begin(action);
        self.complete(effect).await;
    }

    /// Execute one effect, returning the action that reports its outcome.
    pub async fn run(&self, effect: Effect) -> Option<Action> {
        let gateway = self.gateway.as_ref();
        let language = self.session.language();

        let action = match effect {
            Effect::None => return None,
            Effect::Analyze { ticket, url } => Action::AnalysisFinished {
                ticket,
                outcome: analyze_video(gateway, &url, language)
                    .await
                    .map_err(|e| e.to_string()),
            },
            Effect::Article { context } => Action::ArticleFinished(
                generate_article(gateway, &context, language)
                    .await
                    .map_err(|e| e.to_string()),
            ),
            Effect::Concept { context } => Action::ConceptFinished(
                generate_video_concept(gateway, &context, language)
                    .await
                    .map_err(|e| e.to_string()),
            ),
            Effect::RefineNotes { notes, context } => Action::NotesRefined(
                refine_notes(gateway, &notes, &context, language)
                    .await
                    .map_err(|e| e.to_string()),
            ),
        };
        Some(action)
    }
}
