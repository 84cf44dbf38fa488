use crate::{
    language::Language,
    session::{NotesStatus, Panel},
    types::{AnalysisResult, GeneratedArticle, VideoConcept},
};

/// Format an analysis as human-readable markdown
pub fn format_analysis_readable(analysis: &AnalysisResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "**Sentiment:** {} | **Themes:** {} | **Sources:** {}\n\n",
        analysis.sentiment.as_str(),
        analysis.themes.len(),
        analysis.sources.len()
    ));

    output.push_str("## Summary\n\n");
    output.push_str(&analysis.summary);
    output.push_str("\n\n");

    output.push_str("## Themes\n\n");
    for theme in &analysis.themes {
        output.push_str(&format!("• {}\n", theme));
    }
    output.push('\n');

    output.push_str("## Educational points\n\n");
    for (i, point) in analysis.educational_points.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, point));
    }
    output.push('\n');

    if !analysis.keywords.is_empty() {
        output.push_str("## Keywords\n\n");
        let tags: Vec<String> = analysis.keywords.iter().map(|k| format!("#{}", k)).collect();
        output.push_str(&tags.join(" "));
        output.push_str("\n\n");
    }

    if !analysis.sources.is_empty() {
        output.push_str("## Sources\n\n");
        for source in &analysis.sources {
            let title = if source.title.is_empty() {
                &source.uri
            } else {
                &source.title
            };
            output.push_str(&format!("• [{}]({})\n", title, source.uri));
        }
        output.push('\n');
    }

    output.push_str("## Full transcript\n\n");
    output.push_str(&analysis.full_transcript);
    output.push('\n');

    output
}

pub fn format_article_readable(article: &Panel<GeneratedArticle>, language: Language) -> String {
    let phrases = language.phrases();
    match article {
        Panel::Empty => String::new(),
        Panel::Pending => format!(
            "# {}\n\n{}\n",
            phrases.article_pending_title, phrases.article_pending
        ),
        Panel::Failed(message) => format!("# {}\n\n{}\n", phrases.article_error_title, message),
        // The body already starts with its own heading when the model followed the prompt.
        Panel::Ready(article) if article.content.contains(&format!("# {}", article.title)) => {
            format!("{}\n", article.content.trim_end())
        }
        Panel::Ready(article) => format!("# {}\n\n{}\n", article.title, article.content.trim_end()),
    }
}

pub fn format_concept_readable(concept: &Panel<VideoConcept>, language: Language) -> String {
    match concept {
        Panel::Empty => String::new(),
        Panel::Pending => format!("{}\n", language.phrases().concept_pending),
        Panel::Failed(message) => format!("{}\n", message),
        Panel::Ready(concept) => {
            let mut output = String::new();
            output.push_str(&format!("# {}\n\n", concept.title));
            output.push_str(&format!("**Hook:** {}\n\n", concept.hook));
            output.push_str(&format!("**Target audience:** {}\n\n", concept.target_audience));
            output.push_str("## Outline\n\n");
            for (i, step) in concept.outline.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, step));
            }
            output
        }
    }
}

pub fn format_notes_readable(notes: &str, status: &NotesStatus) -> String {
    match status {
        NotesStatus::Failed(message) => format!("{}\n\n{}\n", message, notes.trim_end()),
        _ => format!("{}\n", notes.trim_end()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Sentiment, Source};

    #[test]
    fn analysis_lists_points_and_sources() {
        let analysis = AnalysisResult {
            summary: "Summary text".into(),
            themes: vec!["Focus".into()],
            educational_points: vec!["Use a timer".into(), "Log distractions".into()],
            sentiment: Sentiment::Positive,
            keywords: vec!["focus".into()],
            sources: vec![Source {
                title: String::new(),
                uri: "https://example.com".into(),
            }],
            full_transcript: "Narrative".into(),
        };

        let text = format_analysis_readable(&analysis);
        assert!(text.contains("**Sentiment:** positive"));
        assert!(text.contains("1. Use a timer\n2. Log distractions"));
        assert!(text.contains("#focus"));
        assert!(text.contains("• [https://example.com](https://example.com)"));
        assert!(text.ends_with("Narrative\n"));
    }

    #[test]
    fn article_heading_is_not_duplicated() {
        let ready = Panel::Ready(GeneratedArticle {
            title: "Deep Work".into(),
            content: "# Deep Work\n\nBody".into(),
        });
        assert_eq!(
            format_article_readable(&ready, Language::English),
            "# Deep Work\n\nBody\n"
        );

        let untitled = Panel::Ready(GeneratedArticle {
            title: "Comprehensive Analytical Article".into(),
            content: "Body".into(),
        });
        assert_eq!(
            format_article_readable(&untitled, Language::English),
            "# Comprehensive Analytical Article\n\nBody\n"
        );
    }

    #[test]
    fn failed_article_shows_fixed_error() {
        let failed = Panel::Failed("Failed to generate article.".into());
        assert_eq!(
            format_article_readable(&failed, Language::English),
            "# Error\n\nFailed to generate article.\n"
        );
    }
}
