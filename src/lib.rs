//! Data-subject request forms
//!
//! Builds the editable fields of an access, erasure or rectification request
//! and, when the user's privacy settings allow it, fills them from saved
//! identity data.
//!
//! - [`fields`] - locale-specific field templates
//! - [`templates`] - addresses of request text templates
//! - [`initializer`] - privacy-gated autofill producing fields plus a signature
//!
//! The identity-data store, the consent gate and the label catalog are
//! traits ([`IdentityDataStore`], [`ConsentGate`], [`Translator`]); in-process
//! implementations are provided for each.

pub mod config;
pub mod error;
pub mod fields;
pub mod i18n;
pub mod id_data;
pub mod initializer;
pub mod privacy;
pub mod templates;

pub use config::RequestsConfig;
pub use error::{ConfigError, IdDataError, IdDataResult};
pub use fields::{default_fields, fields_for, tracking_fields, FieldPurpose};
pub use i18n::{StaticCatalog, Translator};
pub use id_data::{IdDataSnapshot, IdentityDataStore, InMemoryIdData, MergeOptions, Signature};
pub use initializer::{FieldsInitializationResult, FieldsInitializer};
pub use privacy::{ConsentGate, PrivacyAction, PrivacyControls};
pub use templates::TemplateLocator;

pub use request_types::{
    request_article, Address, FieldDescriptor, FieldKind, FieldValue, RequestType,
    REQUEST_ARTICLES,
};
