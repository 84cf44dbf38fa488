use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    error::AnalysisError,
    extract::decode,
    gateway::{Gateway, GenerateRequest},
    language::Language,
    types::{AnalysisResult, Sentiment},
};

/// Low temperature keeps grounded analyses repeatable.
pub const ANALYSIS_TEMPERATURE: f32 = 0.5;

/// Transcripts shorter than this (in characters) are replaced by a synthesized one.
pub const MIN_TRANSCRIPT_CHARS: usize = 100;

static ANALYSIS_SYSTEM_INSTRUCTION: &str = "You are an expert video investigator. You never refuse \
a request because you cannot watch a video. You always use search grounding to find the context \
of the video and then write a professional analysis of its topic. Output must be a single JSON object.";

fn analysis_prompt(url: &str, language: Language) -> String {
    format!(
        r#"TASK: Perform a deep, forensic analysis of this YouTube video: {url}

STRATEGY:
1. INVESTIGATE: Use web search to find the video title, channel, description, comments and any
   transcripts or articles that discuss this video.
2. RECONSTRUCT: If a transcript is found, analyze it in depth. If no transcript can be found,
   do NOT give up: use the title and surrounding context to reconstruct the most probable content
   of the video and analyze that.

OUTPUT REQUIREMENTS (write ALL text in {lang}):
- summary: comprehensive, at least 300 words. Cover what the video is about, why it matters and how.
- educationalPoints: specific, actionable steps. No generic advice.
- fullTranscript: a long-form narrative of at least 1000 words that reads like the script of the video.

OUTPUT: Return ONLY valid JSON with this structure:
{{
  "summary": "...",
  "themes": ["theme 1", "theme 2", "theme 3", "theme 4", "theme 5"],
  "educationalPoints": ["point 1", "point 2", "point 3", "point 4", "point 5"],
  "sentiment": "positive" | "neutral" | "negative",
  "keywords": ["tag1", "tag2", "tag3", "tag4", "tag5"],
  "fullTranscript": "..."
}}"#,
        url = url,
        lang = language.name()
    )
}

/// Analysis as the model emits it. Only `summary` is mandatory.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisPayload {
    summary: String,
    #[serde(default)]
    themes: Vec<String>,
    #[serde(default)]
    educational_points: Vec<String>,
    #[serde(default)]
    sentiment: Sentiment,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    full_transcript: Option<String>,
}

/// Analyze the video behind `url`.
///
/// Fails only when the gateway call fails. Output that does not decode is replaced by
/// a fallback result carrying the raw response as its transcript.
pub async fn analyze_video(
    gateway: &dyn Gateway,
    url: &str,
    language: Language,
) -> Result<AnalysisResult, AnalysisError> {
    let request = GenerateRequest::new(analysis_prompt(url, language))
        .with_system_instruction(ANALYSIS_SYSTEM_INSTRUCTION)
        .with_temperature(ANALYSIS_TEMPERATURE)
        .with_search_grounding();

    let response = gateway.generate(request).await?;

    let mut result = match decode::<AnalysisPayload>(&response.text) {
        Ok(payload) => from_payload(payload, language),
        Err(err) => {
            warn!(error = %err, url, "Model output is not a valid analysis, using fallback");
            fallback_result(&response.text, language)
        }
    };
    result.sources = response.sources;

    info!(
        url,
        themes = result.themes.len(),
        sources = result.sources.len(),
        transcript_chars = result.full_transcript.chars().count(),
        "Video analysis complete"
    );
    Ok(result)
}

fn from_payload(payload: AnalysisPayload, language: Language) -> AnalysisResult {
    let full_transcript = match payload.full_transcript {
        Some(transcript) if transcript.chars().count() >= MIN_TRANSCRIPT_CHARS => transcript,
        _ => {
            warn!("Transcript missing or too short, synthesizing from summary");
            synthesize_transcript(&payload.summary, &payload.educational_points, language)
        }
    };

    AnalysisResult {
        summary: payload.summary,
        themes: payload.themes,
        educational_points: payload.educational_points,
        sentiment: payload.sentiment,
        keywords: dedupe(payload.keywords),
        sources: Vec::new(),
        full_transcript,
    }
}

fn fallback_result(raw: &str, language: Language) -> AnalysisResult {
    let phrases = language.phrases();
    let transcript = if raw.trim().is_empty() {
        phrases.transcript_placeholder.to_string()
    } else {
        raw.to_string()
    };

    AnalysisResult {
        summary: phrases.fallback_summary.to_string(),
        themes: to_owned(phrases.fallback_themes),
        educational_points: to_owned(phrases.fallback_points),
        sentiment: Sentiment::Neutral,
        keywords: Vec::new(),
        sources: Vec::new(),
        full_transcript: with_floor(transcript, language),
    }
}

/// Preamble, summary and the educational points as a markdown list.
fn synthesize_transcript(summary: &str, points: &[String], language: Language) -> String {
    let mut text = format!("{}\n\n{}", language.phrases().transcript_preamble, summary);
    if !points.is_empty() {
        text.push_str("\n\n");
        text.push_str(
            &points
                .iter()
                .map(|point| format!("- {}", point))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    with_floor(text, language)
}

fn with_floor(mut transcript: String, language: Language) -> String {
    if transcript.chars().count() < MIN_TRANSCRIPT_CHARS {
        transcript.push_str("\n\n");
        transcript.push_str(language.phrases().transcript_floor_note);
    }
    transcript
}

fn dedupe(keywords: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        if !unique.contains(&keyword) {
            unique.push(keyword);
        }
    }
    unique
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
