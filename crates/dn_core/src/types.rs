use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

pub const DEFAULT_TITLE: &str = "Untitled Article";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

/// Identifier of an article as handed out by its source.
///
/// dev.to returns integers while state passed through the environment is always
/// text, so equality and hashing go through the textual form: `123 == "123"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Numeric(u64),
    Text(String),
}

impl ArticleId {
    /// Parses a user-supplied identifier. Blank input means "nothing seen yet".
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.parse::<u64>() {
            Ok(n) => ArticleId::Numeric(n),
            Err(_) => ArticleId::Text(raw.to_string()),
        })
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleId::Numeric(n) => write!(f, "{}", n),
            ArticleId::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for ArticleId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ArticleId::Numeric(a), ArticleId::Numeric(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for ArticleId {}

impl Hash for ArticleId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<u64> for ArticleId {
    fn from(id: u64) -> Self {
        ArticleId::Numeric(id)
    }
}

impl From<&str> for ArticleId {
    fn from(id: &str) -> Self {
        ArticleId::Text(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub url: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub source: String,
}

impl Article {
    /// Builds an article, applying the title and description fallbacks.
    pub fn new(
        id: ArticleId,
        title: Option<String>,
        url: Option<String>,
        description: Option<String>,
        cover_image: Option<String>,
        source: &str,
    ) -> Self {
        Self {
            id,
            title: non_blank(title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            url: url.unwrap_or_default(),
            description: non_blank(description).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            cover_image: non_blank(cover_image),
            source: source.to_string(),
        }
    }

    /// Plain-text announcement: title, blank line, description, blank line, url.
    pub fn plain_message(&self) -> String {
        format!("{}\n\n{}\n\n{}", self.title, self.description, self.url)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
