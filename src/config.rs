//! Process-wide request configuration.
//!
//! Loaded once at startup from environment variables, then passed explicitly
//! to the template locator and the label catalog.

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_BASE_URL: &str = "https://www.datarequests.org/";
pub const DEFAULT_SUPPORTED_LOCALES: &[&str] = &["de", "en", "es", "fr", "it", "nl", "pt"];

/// Default locale, supported locales and the document root address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestsConfig {
    default_locale: String,
    supported_locales: Vec<String>,
    base_url: Url,
}

impl RequestsConfig {
    pub fn new(
        default_locale: impl Into<String>,
        supported_locales: impl IntoIterator<Item = impl Into<String>>,
        base_url: &str,
    ) -> Result<Self, ConfigError> {
        let default_locale = normalize_locale(&default_locale.into());
        if default_locale.is_empty() {
            return Err(ConfigError::EmptyDefaultLocale);
        }

        let mut supported_locales: Vec<String> = supported_locales
            .into_iter()
            .map(|l| normalize_locale(&l.into()))
            .filter(|l| !l.is_empty())
            .collect();
        if !supported_locales.contains(&default_locale) {
            supported_locales.push(default_locale.clone());
        }

        Ok(Self {
            default_locale,
            supported_locales,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Read `DSR_DEFAULT_LOCALE`, `DSR_SUPPORTED_LOCALES` and `DSR_BASE_URL`,
    /// falling back to the built-in defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let default_locale =
            std::env::var("DSR_DEFAULT_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.into());
        let supported: Vec<String> = std::env::var("DSR_SUPPORTED_LOCALES")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| {
                DEFAULT_SUPPORTED_LOCALES
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            });
        let base_url = std::env::var("DSR_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let config = Self::new(default_locale, supported, &base_url)?;
        tracing::debug!(
            default_locale = %config.default_locale,
            base_url = %config.base_url,
            locales = config.supported_locales.len(),
            "Loaded request configuration"
        );
        Ok(config)
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn supported_locales(&self) -> &[String] {
        &self.supported_locales
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        let locale = normalize_locale(locale);
        self.supported_locales.iter().any(|l| *l == locale)
    }

    /// The locale actually used for `locale`: its normalized form when
    /// supported, the default locale otherwise.
    pub fn resolve_locale(&self, locale: Option<&str>) -> String {
        match locale.map(normalize_locale) {
            Some(l) if self.supported_locales.contains(&l) => l,
            _ => self.default_locale.clone(),
        }
    }

    /// Document root, always ending in `/`
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Default for RequestsConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            supported_locales: DEFAULT_SUPPORTED_LOCALES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }
}

/// Lowercase language subtag: `"en-GB"`, `"EN_gb"` and `" en "` all give `"en"`.
pub fn normalize_locale(locale: &str) -> String {
    locale
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::BaseUrlCannotBeABase(raw.to_string()));
    }
    // Template paths are appended to the base
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

pub(crate) fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
