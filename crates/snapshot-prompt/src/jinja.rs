//! MiniJinja-backed templates

use crate::{Language, PromptError, PromptTemplate, Result};
use minijinja::Environment;
use std::collections::HashMap;
use std::fmt;

/// Decimal places used by `fixed` when none are given
pub const DEFAULT_PLACES: usize = 2;

/// A prompt template with one Jinja source per language
///
/// Sources are parsed when the template is built, so rendering can only fail
/// on the variables passed in. Besides the MiniJinja builtins, templates get a
/// `fixed(places)` filter for numbers.
///
/// ```
/// use snapshot_prompt::{JinjaTemplate, Language, PromptTemplate};
/// use serde_json::json;
///
/// let template = JinjaTemplate::builder("price")
///     .english("Price: {{ price | fixed(4) }}")
///     .russian("Цена: {{ price | fixed(4) }}")
///     .build()
///     .unwrap();
///
/// let out = template.render(&Language::Russian, &json!({ "price": 1.27104 })).unwrap();
/// assert_eq!(out, "Цена: 1.2710");
/// ```
#[derive(Clone)]
pub struct JinjaTemplate {
    name: String,
    sources: HashMap<Language, String>,
}

impl JinjaTemplate {
    pub fn builder(name: impl Into<String>) -> JinjaTemplateBuilder {
        JinjaTemplateBuilder::new(name)
    }

    /// English-only template
    pub fn new(name: impl Into<String>, english: impl Into<String>) -> Result<Self> {
        Self::builder(name).english(english).build()
    }

    /// English and Russian variants of the same prompt
    pub fn bilingual(
        name: impl Into<String>,
        english: impl Into<String>,
        russian: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(name).english(english).russian(russian).build()
    }

    fn source(&self, lang: &Language) -> Result<&str> {
        self.sources
            .get(lang)
            .map(String::as_str)
            .ok_or_else(|| PromptError::TemplateNotFound {
                name: self.name.clone(),
                language: lang.code().to_string(),
            })
    }
}

/// Environment shared by parsing and rendering
fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.add_filter("fixed", |value: f64, places: Option<usize>| {
        format!("{:.*}", places.unwrap_or(DEFAULT_PLACES), value)
    });
    env
}

impl PromptTemplate for JinjaTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn languages(&self) -> Vec<Language> {
        self.sources.keys().cloned().collect()
    }

    fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        let source = self.source(lang)?;
        environment()
            .render_str(source, minijinja::Value::from_serialize(vars))
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }
}

impl fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codes: Vec<_> = self.sources.keys().map(Language::code).collect();
        codes.sort_unstable();
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .field("languages", &codes)
            .finish()
    }
}

/// Collects language variants and validates them in [`build`](Self::build)
pub struct JinjaTemplateBuilder {
    name: String,
    sources: HashMap<Language, String>,
}

impl JinjaTemplateBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: HashMap::new(),
        }
    }

    /// Set the variant for `lang`, replacing an earlier one
    pub fn template(mut self, lang: Language, source: impl Into<String>) -> Self {
        self.sources.insert(lang, source.into());
        self
    }

    pub fn english(self, source: impl Into<String>) -> Self {
        self.template(Language::English, source)
    }

    pub fn russian(self, source: impl Into<String>) -> Self {
        self.template(Language::Russian, source)
    }

    pub fn build(self) -> Result<JinjaTemplate> {
        if self.sources.is_empty() {
            return Err(PromptError::NoTemplatesProvided(self.name));
        }

        let env = environment();
        for (lang, source) in &self.sources {
            if let Err(e) = env.template_from_str(source) {
                return Err(PromptError::TemplateParseFailed {
                    name: self.name,
                    language: lang.code().to_string(),
                    detail: e.to_string(),
                });
            }
        }

        Ok(JinjaTemplate {
            name: self.name,
            sources: self.sources,
        })
    }
}
