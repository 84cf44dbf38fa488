//! Output language and the fixed phrases shown when the model cannot be relied on.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Persian,
    English,
}

/// Fixed strings used in place of model output.
#[derive(Debug)]
pub struct Phrasebook {
    pub fallback_summary: &'static str,
    pub fallback_themes: &'static [&'static str],
    pub fallback_points: &'static [&'static str],
    pub transcript_placeholder: &'static str,
    pub transcript_preamble: &'static str,
    /// Appended when a synthesized transcript would still be too short to be useful.
    pub transcript_floor_note: &'static str,
    pub default_article_title: &'static str,
    pub empty_article: &'static str,
    pub article_error_title: &'static str,
    pub article_error: &'static str,
    pub concept_error: &'static str,
    pub notes_error: &'static str,
    pub article_pending_title: &'static str,
    pub article_pending: &'static str,
    pub concept_pending: &'static str,
    pub url_required: &'static str,
    pub analysis_failed: &'static str,
}

static PERSIAN: Phrasebook = Phrasebook {
    fallback_summary: "متاسفانه در استخراج داده‌ها مشکلی پیش آمد. اما بر اساس تحلیل اولیه، این ویدیو احتمالا حاوی نکات مهمی است که به دلیل محدودیت‌های دسترسی قابل استخراج نبود. لطفا لینک را بررسی کرده و مجددا تلاش کنید.",
    fallback_themes: &["خطای تحلیل", "نیاز به بررسی مجدد"],
    fallback_points: &["لطفا از لینک صحیح اطمینان حاصل کنید", "مجددا تلاش کنید"],
    transcript_placeholder: "متن قابل استخراج نبود.",
    transcript_preamble: "تحلیل عمیق محتوا:",
    transcript_floor_note: "این متن بر اساس خلاصه و نکات آموزشی استخراج‌شده بازسازی شده است، زیرا متن کامل ویدیو در پاسخ مدل موجود نبود یا بیش از حد کوتاه بود.",
    default_article_title: "مقاله جامع تحلیلی",
    empty_article: "خطا در تولید مقاله.",
    article_error_title: "خطا",
    article_error: "تولید مقاله با خطا مواجه شد.",
    concept_error: "طراحی سناریو با خطا مواجه شد. لطفا دوباره تلاش کنید.",
    notes_error: "پردازش یادداشت‌ها با خطا مواجه شد.",
    article_pending_title: "در حال نگارش...",
    article_pending: "هوش مصنوعی در حال نوشتن یک مقاله جامع است...",
    concept_pending: "در حال تحلیل ترندها...",
    url_required: "لطفا لینک ویدیو یوتیوب را وارد کنید.",
    analysis_failed: "خطا در تحلیل ویدیو. لطفا دوباره تلاش کنید.",
};

static ENGLISH: Phrasebook = Phrasebook {
    fallback_summary: "Unfortunately something went wrong while extracting the analysis. The video most likely contains valuable points that could not be recovered because of access limitations. Please check the link and try again.",
    fallback_themes: &["Analysis error", "Needs another look"],
    fallback_points: &["Make sure the link is correct", "Try again"],
    transcript_placeholder: "No text could be extracted.",
    transcript_preamble: "In-depth content analysis:",
    transcript_floor_note: "This text was reconstructed from the extracted summary and educational points because the full transcript was missing from the model response or was too short.",
    default_article_title: "Comprehensive Analytical Article",
    empty_article: "The article could not be generated.",
    article_error_title: "Error",
    article_error: "Failed to generate article.",
    concept_error: "Failed to generate a video concept. Please try again.",
    notes_error: "Failed to refine notes.",
    article_pending_title: "Writing...",
    article_pending: "The AI is writing a comprehensive article...",
    concept_pending: "Analyzing trends...",
    url_required: "Please enter a YouTube video link.",
    analysis_failed: "Video analysis failed. Please try again.",
};

impl Language {
    /// Language name as written into prompts.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Persian => "Persian (Farsi)",
            Language::English => "English",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Persian => "fa",
            Language::English => "en",
        }
    }

    pub fn phrases(&self) -> &'static Phrasebook {
        match self {
            Language::Persian => &PERSIAN,
            Language::English => &ENGLISH,
        }
    }
}
