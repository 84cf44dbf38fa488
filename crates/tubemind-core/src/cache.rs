use std::{
    hash::{DefaultHasher, Hash, Hasher},
    path::{Path, PathBuf},
};

use tokio::fs;

use crate::{error::CacheError, language::Language, types::AnalysisResult};

/// Get the cache directory for a given URL
pub fn get_cache_dir(url: &str) -> PathBuf {
    let mut hasher = DefaultHasher::new();
    url.trim().hash(&mut hasher);
    let url_hash = hasher.finish();

    get_root_cache_dir().join(url_hash.to_string())
}

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tubemind")
}

/// Get the path for a cached analysis (language aware)
pub fn get_analysis_path(cache_dir: &Path, language: Language) -> PathBuf {
    cache_dir.join(format!("analysis_{}.json", language.code()))
}

pub async fn load_analysis(path: &Path) -> Result<AnalysisResult, CacheError> {
    let json_content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json_content)?)
}

pub async fn save_analysis(analysis: &AnalysisResult, path: &Path) -> Result<(), CacheError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let pretty_json = serde_json::to_string_pretty(analysis)?;
    fs::write(path, pretty_json).await?;
    Ok(())
}
