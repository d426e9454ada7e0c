//! Merge of stored identity data into a field template.

use request_types::{FieldDescriptor, FieldValue};

use super::MergeOptions;

/// Fill `template` from `stored`.
///
/// Each stored element is used at most once. Template order is kept; with
/// `add_missing` unmatched stored elements are appended after it.
pub fn merge_fields(
    template: &[FieldDescriptor],
    stored: &[FieldDescriptor],
    options: MergeOptions,
) -> Vec<FieldDescriptor> {
    let mut used = vec![false; stored.len()];
    let mut merged = Vec::with_capacity(template.len());

    for field in template {
        let mut field = field.clone();
        let Some(idx) = find_match(&field, stored, &used) else {
            merged.push(field);
            continue;
        };
        used[idx] = true;

        let wants_fill = if field.optional {
            options.fill_optional
        } else {
            options.fill_required
        };
        if wants_fill && field.is_empty() {
            apply(&mut field, &stored[idx], options);
        }
        merged.push(field);
    }

    if options.add_missing {
        merged.extend(
            stored
                .iter()
                .zip(&used)
                .filter(|(element, used)| !**used && !element.is_empty())
                .map(|(element, _)| element.clone()),
        );
    }

    merged
}

fn find_match(field: &FieldDescriptor, stored: &[FieldDescriptor], used: &[bool]) -> Option<usize> {
    stored
        .iter()
        .enumerate()
        .filter(|(i, _)| !used[*i])
        .find(|(_, element)| is_match(field, element))
        .map(|(i, _)| i)
}

fn is_match(field: &FieldDescriptor, element: &FieldDescriptor) -> bool {
    if field.kind != element.kind {
        return false;
    }
    if field.kind.is_composite() {
        // A primary slot only takes the primary stored address
        return !field.is_primary_address() || element.is_primary_address();
    }
    if field.kind.is_free_text() {
        return field.description.trim().to_lowercase()
            == element.description.trim().to_lowercase();
    }
    true
}

fn apply(field: &mut FieldDescriptor, element: &FieldDescriptor, options: MergeOptions) {
    field.value = match (&field.value, &element.value) {
        // The template decides which address slot this is
        (FieldValue::Address(slot), FieldValue::Address(stored)) => {
            let mut address = stored.clone();
            address.primary = slot.primary;
            FieldValue::Address(address)
        }
        (_, value) => value.clone(),
    };
    if !options.keep_descriptions {
        field.description = element.description.clone();
    }
    if !options.keep_optionality {
        field.optional = element.optional;
    }
}
