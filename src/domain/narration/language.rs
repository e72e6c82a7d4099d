use serde::{Deserialize, Serialize};

/// Opaque target-language code, e.g. `en` or `pt-BR`.
///
/// The pipeline never interprets the code; it only keys input and output
/// locations and log lines by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Build a code from raw input, trimming whitespace.
    ///
    /// Codes name files, so only ASCII letters, digits, `-` and `_` are
    /// accepted. Returns `None` for blank input or any other character.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a comma separated list, keeping configuration order.
    /// Blank entries and repeated codes are dropped; an entry that is not a
    /// valid code fails the whole list.
    pub fn parse_list(raw: &str) -> Result<Vec<LanguageCode>, String> {
        let mut languages: Vec<LanguageCode> = Vec::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let code = LanguageCode::new(entry)
                .ok_or_else(|| format!("Invalid language code: {:?}", entry))?;
            if !languages.contains(&code) {
                languages.push(code);
            }
        }
        Ok(languages)
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
