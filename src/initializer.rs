//! Privacy-gated field initialization
//!
//! Fills a request form's field template from the user's saved identity data
//! when the user allows keeping that data and has asked for forms to be
//! filled automatically. Otherwise the template comes back untouched.
//!
//! The fill path is strictly sequential: snapshot → merge → signature. The
//! snapshot value is handed to both merge and signature, so the signature
//! attests to exactly the data in `new_fields`.
//!
//! Store failures are returned as-is. There is no retry and no fallback to
//! the unfilled template; that decision belongs to the caller.

use request_types::FieldDescriptor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::IdDataResult;
use crate::id_data::{IdentityDataStore, MergeOptions, Signature};
use crate::privacy::{ConsentGate, PrivacyAction};

/// Fields for the form plus, if they were filled, the signature of the
/// snapshot they were filled from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsInitializationResult {
    pub new_fields: Vec<FieldDescriptor>,
    pub signature: Option<Signature>,
}

impl FieldsInitializationResult {
    fn unfilled(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            new_fields: fields,
            signature: None,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.signature.is_some()
    }
}

pub struct FieldsInitializer {
    consent: Arc<dyn ConsentGate>,
    id_data: Arc<dyn IdentityDataStore>,
    merge_options: MergeOptions,
}

impl FieldsInitializer {
    pub fn new(consent: Arc<dyn ConsentGate>, id_data: Arc<dyn IdentityDataStore>) -> Self {
        Self {
            consent,
            id_data,
            merge_options: MergeOptions::autofill(),
        }
    }

    pub fn with_merge_options(mut self, merge_options: MergeOptions) -> Self {
        self.merge_options = merge_options;
        self
    }

    pub fn merge_options(&self) -> MergeOptions {
        self.merge_options
    }

    /// Consent first; the store is not touched when saving identity data is
    /// not allowed.
    pub fn should_fill(&self) -> bool {
        self.consent.is_allowed(PrivacyAction::SaveIdData) && self.id_data.should_always_fill()
    }

    pub async fn initialize_fields(
        &self,
        fields: Vec<FieldDescriptor>,
    ) -> IdDataResult<FieldsInitializationResult> {
        if !self.should_fill() {
            tracing::debug!(field_count = fields.len(), "Autofill not permitted, keeping template");
            return Ok(FieldsInitializationResult::unfilled(fields));
        }

        let snapshot = self.id_data.get_all_fixed().await?;
        let new_fields = self
            .id_data
            .merge_fields(&fields, &snapshot, self.merge_options)
            .await?;
        let signature = self.id_data.signature(&snapshot).await?;

        tracing::debug!(
            field_count = new_fields.len(),
            generation = snapshot.generation,
            stored = snapshot.elements.len(),
            "Filled request fields from identity data"
        );

        Ok(FieldsInitializationResult {
            new_fields,
            signature: Some(signature),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdDataError;
    use crate::id_data::{self, IdDataSnapshot};
    use crate::privacy::PrivacyControls;
    use request_types::{FieldKind, FieldValue};
    use std::sync::Mutex;

    /// Stub store that records every call it receives.
    struct RecordingStore {
        always_fill: bool,
        snapshot: IdDataSnapshot,
        fail_on: Option<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingStore {
        fn new(always_fill: bool) -> Self {
            Self {
                always_fill,
                snapshot: IdDataSnapshot::new(
                    7,
                    vec![FieldDescriptor::text("Name", FieldKind::Name, false)
                        .with_value(FieldValue::Text("Jane Doe".into()))],
                ),
                fail_on: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(mut self, call: &'static str) -> Self {
            self.fail_on = Some(call);
            self
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl IdentityDataStore for RecordingStore {
        fn should_always_fill(&self) -> bool {
            self.always_fill
        }

        async fn get_all_fixed(&self) -> IdDataResult<IdDataSnapshot> {
            self.record("get_all_fixed".into());
            if self.fail_on == Some("get_all_fixed") {
                return Err(IdDataError::Unavailable("storage locked".into()));
            }
            Ok(self.snapshot.clone())
        }

        async fn merge_fields(
            &self,
            template: &[FieldDescriptor],
            snapshot: &IdDataSnapshot,
            options: MergeOptions,
        ) -> IdDataResult<Vec<FieldDescriptor>> {
            self.record(format!("merge_fields:{}", snapshot.generation));
            if self.fail_on == Some("merge_fields") {
                return Err(IdDataError::MergeFailed {
                    reason: "bad template".into(),
                });
            }
            Ok(id_data::merge_fields(template, &snapshot.elements, options))
        }

        async fn signature(&self, snapshot: &IdDataSnapshot) -> IdDataResult<Signature> {
            self.record(format!("signature:{}", snapshot.generation));
            if self.fail_on == Some("signature") {
                return Err(IdDataError::SignatureFailed("no key".into()));
            }
            Ok(Signature::new(format!("sig-{}", snapshot.generation)))
        }
    }

    fn template() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::text("Name", FieldKind::Name, false),
            FieldDescriptor::text("Email address", FieldKind::Input, false),
        ]
    }

    fn initializer(consent: PrivacyControls, store: Arc<RecordingStore>) -> FieldsInitializer {
        FieldsInitializer::new(Arc::new(consent), store)
    }

    #[tokio::test]
    async fn test_consent_denied_returns_template_untouched() {
        let store = Arc::new(RecordingStore::new(true));
        let init = initializer(
            PrivacyControls::new().with(PrivacyAction::SaveIdData, false),
            store.clone(),
        );

        let result = init.initialize_fields(template()).await.unwrap();

        assert_eq!(result.new_fields, template());
        assert_eq!(result.signature, None);
        assert!(!result.is_filled());
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_always_fill_off_returns_template_untouched() {
        let store = Arc::new(RecordingStore::new(false));
        let init = initializer(PrivacyControls::new(), store.clone());

        let result = init.initialize_fields(template()).await.unwrap();

        assert_eq!(result.new_fields, template());
        assert!(result.signature.is_none());
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fill_calls_store_once_each_in_order() {
        let store = Arc::new(RecordingStore::new(true));
        let init = initializer(PrivacyControls::new(), store.clone());

        let result = init.initialize_fields(template()).await.unwrap();

        assert_eq!(
            store.calls(),
            vec!["get_all_fixed", "merge_fields:7", "signature:7"]
        );
        assert_eq!(result.signature, Some(Signature::new("sig-7")));
        assert_eq!(result.new_fields.len(), 2);
        assert_eq!(result.new_fields[0].value.as_text(), Some("Jane Doe"));
        assert!(result.new_fields[1].is_empty());
    }

    #[tokio::test]
    async fn test_empty_snapshot_is_still_a_fill() {
        let mut store = RecordingStore::new(true);
        store.snapshot = IdDataSnapshot::new(3, vec![]);
        let store = Arc::new(store);
        let init = initializer(PrivacyControls::new(), store.clone());

        let result = init.initialize_fields(template()).await.unwrap();

        assert_eq!(result.new_fields, template());
        assert_eq!(result.signature, Some(Signature::new("sig-3")));
    }

    #[tokio::test]
    async fn test_store_failures_propagate() {
        for call in ["get_all_fixed", "merge_fields", "signature"] {
            let store = Arc::new(RecordingStore::new(true).failing_on(call));
            let init = initializer(PrivacyControls::new(), store.clone());

            let err = init.initialize_fields(template()).await.unwrap_err();
            match (call, err) {
                ("get_all_fixed", IdDataError::Unavailable(_)) => {}
                ("merge_fields", IdDataError::MergeFailed { .. }) => {}
                ("signature", IdDataError::SignatureFailed(_)) => {}
                (call, other) => panic!("Unexpected error for {}: {:?}", call, other),
            }
        }
    }

    #[tokio::test]
    async fn test_merge_failure_skips_signature() {
        let store = Arc::new(RecordingStore::new(true).failing_on("merge_fields"));
        let init = initializer(PrivacyControls::new(), store.clone());

        assert!(init.initialize_fields(template()).await.is_err());
        assert_eq!(store.calls(), vec!["get_all_fixed", "merge_fields:7"]);
    }

    #[tokio::test]
    async fn test_custom_merge_options_are_used() {
        let store = Arc::new(RecordingStore::new(true));
        let options = MergeOptions {
            fill_required: false,
            ..MergeOptions::autofill()
        };
        let init = initializer(PrivacyControls::new(), store).with_merge_options(options);
        assert_eq!(init.merge_options(), options);

        let result = init.initialize_fields(template()).await.unwrap();
        assert!(result.new_fields[0].is_empty());
        assert!(result.is_filled());
    }

    #[test]
    fn test_default_merge_options() {
        let init = initializer(
            PrivacyControls::new(),
            Arc::new(RecordingStore::new(true)),
        );
        let options = init.merge_options();
        assert!(options.keep_descriptions);
        assert!(options.keep_optionality);
        assert!(options.fill_optional);
        assert!(options.fill_required);
        assert!(!options.add_missing);
    }
}
