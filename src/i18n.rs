//! Request-form label catalog
//!
//! Field labels are looked up through the [`Translator`] trait. Locales
//! outside the supported set, or without a label set, fall back to the
//! catalog's default locale and then to the key.

use crate::config::{normalize_locale, RequestsConfig};

/// Localized-string lookup
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, locale: &str) -> String;
}

type LabelSet = &'static [(&'static str, &'static str)];

const LABELS: &[(&str, LabelSet)] = &[
    (
        "de",
        &[
            ("name", "Name"),
            ("birthdate", "Geburtsdatum"),
            ("address", "Adresse"),
            ("email", "E-Mail-Adresse"),
        ],
    ),
    (
        "en",
        &[
            ("name", "Name"),
            ("birthdate", "Birth date"),
            ("address", "Address"),
            ("email", "Email address"),
        ],
    ),
    (
        "es",
        &[
            ("name", "Nombre"),
            ("birthdate", "Fecha de nacimiento"),
            ("address", "Dirección"),
            ("email", "Correo electrónico"),
        ],
    ),
    (
        "fr",
        &[
            ("name", "Nom"),
            ("birthdate", "Date de naissance"),
            ("address", "Adresse"),
            ("email", "Adresse e-mail"),
        ],
    ),
    (
        "it",
        &[
            ("name", "Nome"),
            ("birthdate", "Data di nascita"),
            ("address", "Indirizzo"),
            ("email", "Indirizzo e-mail"),
        ],
    ),
    (
        "nl",
        &[
            ("name", "Naam"),
            ("birthdate", "Geboortedatum"),
            ("address", "Adres"),
            ("email", "E-mailadres"),
        ],
    ),
    (
        "pt",
        &[
            ("name", "Nome"),
            ("birthdate", "Data de nascimento"),
            ("address", "Morada"),
            ("email", "Endereço de e-mail"),
        ],
    ),
];

/// Built-in catalog of request-form labels
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    default_locale: String,
    /// Restricts usable locales; `None` allows every locale with a label set
    supported: Option<Vec<String>>,
}

impl StaticCatalog {
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: normalize_locale(&default_locale.into()),
            supported: None,
        }
    }

    /// Same default and supported locales as the template locator
    pub fn from_config(config: &RequestsConfig) -> Self {
        Self {
            default_locale: config.default_locale().to_string(),
            supported: Some(config.supported_locales().to_vec()),
        }
    }

    /// Locales with a label set
    pub fn locales() -> impl Iterator<Item = &'static str> {
        LABELS.iter().map(|(locale, _)| *locale)
    }

    fn lookup(locale: &str, key: &str) -> Option<&'static str> {
        LABELS
            .iter()
            .find(|(l, _)| *l == locale)
            .and_then(|(_, labels)| labels.iter().find(|(k, _)| *k == key))
            .map(|(_, label)| *label)
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LOCALE)
    }
}

impl Translator for StaticCatalog {
    fn translate(&self, key: &str, locale: &str) -> String {
        let requested = normalize_locale(locale);
        let supported = self
            .supported
            .as_ref()
            .map_or(true, |locales| locales.contains(&requested));
        if supported {
            if let Some(label) = Self::lookup(&requested, key) {
                return label.to_string();
            }
        }
        if let Some(label) = Self::lookup(&self.default_locale, key) {
            return label.to_string();
        }
        tracing::warn!(key, locale, "Missing request label, using key");
        key.to_string()
    }
}
