//! Template Locator
//!
//! Resolves the address of request-notification text for a locale. Locales
//! outside the configured set are replaced by the default locale; this never
//! fails.

use crate::config::RequestsConfig;

const TEMPLATE_EXTENSION: &str = ".txt";

#[derive(Debug, Clone)]
pub struct TemplateLocator {
    config: RequestsConfig,
}

impl TemplateLocator {
    pub fn new(config: RequestsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RequestsConfig {
        &self.config
    }

    /// The locale actually used for `locale`; `"DE"` and `"de-AT"` both
    /// resolve to `"de"`.
    pub fn resolve_locale(&self, locale: Option<&str>) -> String {
        self.config.resolve_locale(locale)
    }

    /// Address of `template` in `locale`, or of the locale's template
    /// directory when no template is given.
    ///
    /// `foo` and `foo.txt` name the same template.
    pub fn template_url(&self, locale: Option<&str>, template: Option<&str>) -> String {
        let locale = self.resolve_locale(locale);
        let file = match template {
            Some(name) if !name.is_empty() => {
                let stem = name.strip_suffix(TEMPLATE_EXTENSION).unwrap_or(name);
                format!("{}{}", stem, TEMPLATE_EXTENSION)
            }
            _ => String::new(),
        };
        format!("{}templates/{}/{}", self.config.base_url(), locale, file)
    }
}
