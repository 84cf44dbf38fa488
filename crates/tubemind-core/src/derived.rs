//! Content derived from a finished analysis: blog article, video concept and refined notes.

use tracing::info;

use crate::{
    error::StudioError,
    extract::decode,
    gateway::{Gateway, GenerateRequest, Schema},
    language::Language,
    types::{GeneratedArticle, VideoConcept},
};

/// Context budget for article and concept prompts, in characters.
pub const MAX_CONTEXT_CHARS: usize = 15_000;

/// Context budget for notes refinement, in characters.
pub const MAX_NOTES_CONTEXT_CHARS: usize = 5_000;

/// Hard character cut; may split a sentence.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// First `# ` heading of a markdown document.
pub fn article_title(markdown: &str) -> Option<&str> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .filter(|title| !title.is_empty())
}

pub async fn generate_article(
    gateway: &dyn Gateway,
    context: &str,
    language: Language,
) -> Result<GeneratedArticle, StudioError> {
    let prompt = format!(
        r#"Write a professional, SEO-optimized blog post in {lang} based on this video context.

Structure:
1. Catchy title as a level-1 markdown heading (# Title)
2. Engaging introduction
3. Deep-dive sections as level-2 headings (## Section)
4. Practical steps as bullet points
5. Conclusion

Length: long and detailed, about 1500 words.

Context: {context}"#,
        lang = language.name(),
        context = truncate_chars(context, MAX_CONTEXT_CHARS)
    );

    let request = GenerateRequest::new(prompt).with_system_instruction(format!(
        "You are a professional {} content writer and SEO expert.",
        language.name()
    ));
    let response = gateway.generate(request).await?;

    let phrases = language.phrases();
    let title = article_title(&response.text)
        .unwrap_or(phrases.default_article_title)
        .to_string();
    let content = if response.text.trim().is_empty() {
        phrases.empty_article.to_string()
    } else {
        response.text
    };

    info!(title = %title, content_chars = content.chars().count(), "Article generated");
    Ok(GeneratedArticle { title, content })
}

fn concept_schema() -> Schema {
    Schema::object([
        ("title", Schema::string()),
        ("hook", Schema::string()),
        ("outline", Schema::array(Schema::string())),
        ("targetAudience", Schema::string()),
    ])
    .all_required()
}

pub async fn generate_video_concept(
    gateway: &dyn Gateway,
    context: &str,
    language: Language,
) -> Result<VideoConcept, StudioError> {
    let prompt = format!(
        r#"Based on this deep analysis, create a viral, high-retention YouTube video concept in {lang}.

Context: {context}

The concept must be better than the original: more engaging and more structured.
The outline is a list of scenario steps. Output JSON only."#,
        lang = language.name(),
        context = truncate_chars(context, MAX_CONTEXT_CHARS)
    );

    let request = GenerateRequest::new(prompt).with_schema(concept_schema());
    let response = gateway.generate(request).await?;

    // Schema mode should yield bare JSON, but some replies still arrive fenced.
    let concept: VideoConcept = decode(&response.text)?;
    info!(title = %concept.title, steps = concept.outline.len(), "Video concept generated");
    Ok(concept)
}

/// Rewrite free-form notes as structured markdown, filling gaps from `context`.
///
/// Blank notes are returned unchanged without calling the model. An empty reply
/// leaves the notes as they were.
pub async fn refine_notes(
    gateway: &dyn Gateway,
    notes: &str,
    context: &str,
    language: Language,
) -> Result<String, StudioError> {
    if notes.trim().is_empty() {
        return Ok(notes.to_string());
    }

    let prompt = format!(
        "User notes ({lang}): \"{notes}\".\nVideo context: \"{context}\".\n\n\
         Refine these notes into a clean, structured {lang} markdown list. \
         Add relevant details from the context where a note is brief.",
        lang = language.name(),
        notes = notes,
        context = truncate_chars(context, MAX_NOTES_CONTEXT_CHARS)
    );

    let response = gateway.generate(GenerateRequest::new(prompt)).await?;
    if response.text.trim().is_empty() {
        return Ok(notes.to_string());
    }
    info!(chars = response.text.chars().count(), "Notes refined");
    Ok(response.text)
}
