//! Prompt templates for market-snapshot
//!
//! Renders the copy-paste prompt handed to an external AI assistant. A template
//! carries one Jinja2 source per [`Language`]; rendering falls back to English
//! when the requested language has no variant. Numbers are formatted inside the
//! template with the `fixed(places)` filter.
//!
//! # Quick Start
//!
//! ```
//! use snapshot_prompt::{JinjaTemplate, Language, PromptTemplate};
//! use serde_json::json;
//!
//! let template = JinjaTemplate::bilingual(
//!     "greeting",
//!     "Analysis {{ symbol }}",
//!     "Анализ {{ symbol }}",
//! ).unwrap();
//!
//! let en = template.render(&Language::English, &json!({ "symbol": "GC=F" })).unwrap();
//! assert_eq!(en, "Analysis GC=F");
//!
//! let ru = template.render(&Language::Russian, &json!({ "symbol": "GC=F" })).unwrap();
//! assert_eq!(ru, "Анализ GC=F");
//! ```

mod error;
mod jinja;
mod language;
mod template;

pub use error::{PromptError, Result};
pub use jinja::{DEFAULT_PLACES, JinjaTemplate, JinjaTemplateBuilder};
pub use language::Language;
pub use template::PromptTemplate;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basic_usage() {
        let template =
            JinjaTemplate::bilingual("test", "Price: {{ price }}", "Цена: {{ price }}").unwrap();

        let en = template
            .render(&Language::English, &json!({ "price": "1.2710" }))
            .unwrap();
        assert_eq!(en, "Price: 1.2710");

        let ru = template
            .render(&Language::Russian, &json!({ "price": "1.2710" }))
            .unwrap();
        assert_eq!(ru, "Цена: 1.2710");
    }

    #[test]
    fn test_fallback() {
        let template = JinjaTemplate::new("test", "English only").unwrap();

        let result = template
            .render_with_fallback(&Language::Russian, &json!({}))
            .unwrap();
        assert_eq!(result, "English only");
    }
}
