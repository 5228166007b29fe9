//! Core prompt template trait

use crate::{Language, PromptError, Result};

/// A prompt with one source per language
///
/// Variables are passed as `serde_json::Value` so the trait stays dyn-compatible.
pub trait PromptTemplate: Send + Sync {
    /// Template identifier
    fn name(&self) -> &str;

    /// Languages this template has a variant for
    fn languages(&self) -> Vec<Language>;

    fn supports_language(&self, lang: &Language) -> bool {
        self.languages().contains(lang)
    }

    /// Render the variant for `lang`; errors if the language is missing
    fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String>;

    /// Render `lang`, else English, else whichever variant exists
    fn render_with_fallback(&self, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        if self.supports_language(lang) {
            return self.render(lang, vars);
        }

        let fallback = self
            .default_language()
            .ok_or_else(|| PromptError::NoLanguageAvailable(self.name().to_string()))?;

        self.render(&fallback, vars)
    }

    /// English when available, otherwise the first variant
    fn default_language(&self) -> Option<Language> {
        let langs = self.languages();
        if langs.contains(&Language::English) {
            Some(Language::English)
        } else {
            langs.into_iter().next()
        }
    }
}
