use super::validator::{shadow_validate, validate};
use super::{Collection, Field, FieldEdit};
use crate::error::FormError;
use crate::models::PropertyDraft;
use chrono::{Local, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use url::Url;

/// Draft values plus the visible validation state of the edit form.
///
/// Errors are only computed for touched fields, so nothing is reported while
/// the user is still typing into a field for the first time.
#[derive(Debug, Clone)]
pub struct FormState {
    draft: PropertyDraft,
    touched: BTreeSet<Field>,
    errors: BTreeMap<Field, String>,
    notice: Option<String>,
    today: NaiveDate,
}

impl FormState {
    pub fn new(draft: PropertyDraft) -> Self {
        Self::with_today(draft, Local::now().date_naive())
    }

    /// Pin the date used by the date rules
    pub fn with_today(draft: PropertyDraft, today: NaiveDate) -> Self {
        Self {
            draft,
            touched: BTreeSet::new(),
            errors: BTreeMap::new(),
            notice: None,
            today,
        }
    }

    pub fn draft(&self) -> &PropertyDraft {
        &self.draft
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Transient page-level message from the last image operation
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Errors for every field, touched or not
    pub fn shadow_errors(&self) -> BTreeMap<Field, String> {
        shadow_validate(&self.draft, self.today)
    }

    pub fn apply(&mut self, edit: FieldEdit) {
        let field = edit.field();
        self.draft.apply(edit);
        if self.touched.contains(&field) {
            self.revalidate(field);
        }
    }

    /// Blur: the field becomes touched and its error visible from now on
    pub fn mark_touched(&mut self, field: Field) {
        self.touched.insert(field);
        self.revalidate(field);
    }

    /// Add the item if missing, remove it if present. Returns whether the
    /// item is in the collection afterwards.
    pub fn toggle(&mut self, collection: Collection, item: &str) -> Result<bool, FormError> {
        let set = self.draft.collection_mut(collection);
        if set.remove(item) {
            return Ok(false);
        }
        if !collection.catalog().contains(&item) {
            return Err(FormError::UnknownCatalogItem {
                collection,
                item: item.to_string(),
            });
        }
        set.insert(item.to_string());
        Ok(true)
    }

    pub fn add_image(&mut self, raw: &str) -> Result<(), FormError> {
        let raw = raw.trim();
        match Url::parse(raw) {
            Ok(_) => {
                self.draft.images.push(raw.to_string());
                self.notice = None;
                Ok(())
            }
            Err(err) => {
                debug!("Rejected image URL {:?}: {}", raw, err);
                let err = FormError::InvalidImageUrl(raw.to_string());
                self.notice = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Remove the image at `index`; out-of-range indexes are ignored
    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        (index < self.draft.images.len()).then(|| self.draft.images.remove(index))
    }

    /// Submission-time validation: touches every required field and every
    /// populated optional field, then rebuilds the error map from scratch.
    /// Returns true when the form has no errors.
    pub fn validate_all(&mut self) -> bool {
        let populated = Field::OPTIONAL
            .into_iter()
            .filter(|&field| self.draft.has_value(field));
        let fields: Vec<Field> = Field::REQUIRED.into_iter().chain(populated).collect();

        self.touched.extend(fields.iter().copied());
        self.errors = fields
            .into_iter()
            .filter_map(|field| {
                validate(field, &self.draft.value(field), self.today).map(|msg| (field, msg))
            })
            .collect();

        self.errors.is_empty()
    }

    fn revalidate(&mut self, field: Field) {
        match validate(field, &self.draft.value(field), self.today) {
            Some(msg) => {
                self.errors.insert(field, msg);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryGateway;

    fn form() -> FormState {
        let record = MemoryGateway::sample_records().remove(0);
        FormState::with_today(
            PropertyDraft::from_record(&record),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        )
    }

    #[test]
    fn test_error_hidden_until_touched() {
        let mut form = form();
        form.apply(FieldEdit::Title("abc".to_string()));
        assert_eq!(form.error(Field::Title), None);
        assert!(form.shadow_errors().contains_key(&Field::Title));

        form.mark_touched(Field::Title);
        assert!(form.error(Field::Title).is_some());

        // Once touched, edits revalidate immediately
        form.apply(FieldEdit::Title("A proper title".to_string()));
        assert_eq!(form.error(Field::Title), None);
        form.apply(FieldEdit::Title("   ".to_string()));
        assert_eq!(form.error(Field::Title), Some("Title is required"));
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut form = form();
        let original = form.draft().amenities.clone();
        assert!(original.contains("Gym"));

        assert_eq!(form.toggle(Collection::Amenities, "Gym"), Ok(false));
        assert!(!form.draft().amenities.contains("Gym"));
        assert_eq!(form.toggle(Collection::Amenities, "Gym"), Ok(true));
        assert_eq!(form.draft().amenities, original);
    }

    #[test]
    fn test_toggle_rejects_unknown_items() {
        let mut form = form();
        let err = form.toggle(Collection::Utilities, "Moat").unwrap_err();
        assert!(matches!(err, FormError::UnknownCatalogItem { .. }));
        assert!(!form.draft().utilities.contains("Moat"));

        assert_eq!(form.toggle(Collection::Utilities, "Water"), Ok(true));
        assert!(form.draft().utilities.contains("Water"));
    }

    #[test]
    fn test_add_and_remove_images() {
        let mut form = form();
        let before = form.draft().images.clone();

        assert!(form.add_image("not a url").is_err());
        assert_eq!(form.draft().images, before);
        assert!(form.notice().is_some());

        form.add_image("https://x.test/a.jpg").unwrap();
        assert_eq!(form.draft().images.last().map(String::as_str), Some("https://x.test/a.jpg"));
        assert_eq!(form.draft().images.len(), before.len() + 1);
        assert_eq!(form.notice(), None);

        // Duplicates are allowed
        form.add_image("https://x.test/a.jpg").unwrap();
        assert_eq!(form.draft().images.len(), before.len() + 2);

        assert_eq!(form.remove_image(99), None);
        assert_eq!(form.remove_image(0), before.first().cloned());
        assert_eq!(form.draft().images.len(), before.len() + 1);
    }

    #[test]
    fn test_validate_all_touches_required_fields() {
        let mut form = form();
        form.apply(FieldEdit::Address(String::new()));
        form.apply(FieldEdit::YearBuilt("1700".to_string()));
        form.apply(FieldEdit::Parking(String::new()));

        assert!(!form.validate_all());
        for field in Field::REQUIRED {
            assert!(form.is_touched(field), "{field}");
        }
        assert!(form.is_touched(Field::YearBuilt));
        assert!(!form.is_touched(Field::Parking));
        assert!(form.error(Field::Address).unwrap().contains("required"));
        assert!(form.error(Field::YearBuilt).is_some());
        assert_eq!(form.errors().len(), 2);
    }
}
