//! Field templates for request forms
//!
//! Two fixed templates exist: the full set for legal data-subject requests
//! and a lighter one for the tracking-consent flow. Labels come from the
//! translator; a missing locale is the translator's concern.

use request_types::{FieldDescriptor, FieldKind};
use serde::{Deserialize, Serialize};

use crate::i18n::Translator;

/// Which form a template is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPurpose {
    /// Access, erasure and rectification requests
    Request,
    /// Tracking-consent flow
    Tracking,
}

/// Name, birth date and primary address, all optional.
pub fn default_fields(translator: &dyn Translator, locale: &str) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text(translator.translate("name", locale), FieldKind::Name, true),
        FieldDescriptor::text(
            translator.translate("birthdate", locale),
            FieldKind::Birthdate,
            true,
        ),
        FieldDescriptor::address(translator.translate("address", locale), true, true),
    ]
}

/// Name and e-mail address, both required.
pub fn tracking_fields(translator: &dyn Translator, locale: &str) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text(translator.translate("name", locale), FieldKind::Name, false),
        FieldDescriptor::text(translator.translate("email", locale), FieldKind::Input, false),
    ]
}

pub fn fields_for(
    purpose: FieldPurpose,
    translator: &dyn Translator,
    locale: &str,
) -> Vec<FieldDescriptor> {
    match purpose {
        FieldPurpose::Request => default_fields(translator, locale),
        FieldPurpose::Tracking => tracking_fields(translator, locale),
    }
}
