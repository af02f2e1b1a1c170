//! In-memory mapping store.
//!
//! One [`MappingStore`] owns the available items and mappings of every
//! [`Domain`], the category catalog and the practice name. Every operation
//! validates first and mutates second, so a rejected call leaves the store as
//! it was.

pub mod category;
pub mod domain;
pub mod mapping;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::workbook::is_reserved_column;

use self::category::{Category, parse_values};
use self::domain::{Domain, MappingFlag};
use self::mapping::{Item, Mapping, MappingFlags, MappingPatch};

/// Available items and mappings for a single domain.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DomainState {
    pub available: Vec<Item>,
    pub mappings: Vec<Mapping>,
}

impl DomainState {
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.available.iter().find(|i| i.name == name)
    }

    pub fn mapping(&self, name: &str) -> Option<&Mapping> {
        self.mappings.iter().find(|m| m.item == name)
    }

    /// Mappings whose item is no longer in the available list.
    pub fn orphans(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.iter().filter(|m| self.item(&m.item).is_none())
    }

    fn remove(&mut self, name: &str) -> bool {
        let before = (self.available.len(), self.mappings.len());
        self.available.retain(|i| i.name != name);
        self.mappings.retain(|m| m.item != name);
        before != (self.available.len(), self.mappings.len())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainCount {
    pub domain: Domain,
    pub label: &'static str,
    pub available: usize,
    pub mappings: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationSummary {
    pub practice_name: String,
    pub total_mappings: usize,
    pub domains: Vec<DomainCount>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainSnapshot {
    pub domain: Domain,
    #[serde(flatten)]
    pub state: DomainState,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationSnapshot {
    pub practice_name: String,
    pub domains: Vec<DomainSnapshot>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Default)]
pub struct MappingStore {
    practice_name: String,
    domains: [DomainState; 4],
    categories: Vec<Category>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /* -------------------------
       Reads
    --------------------------*/

    pub fn practice_name(&self) -> &str {
        &self.practice_name
    }

    /// The trimmed practice name, or an error when it is blank.
    pub fn require_practice_name(&self) -> StoreResult<&str> {
        let name = self.practice_name.trim();
        if name.is_empty() {
            return Err(StoreError::PracticeNameRequired);
        }
        Ok(name)
    }

    pub fn domain(&self, domain: Domain) -> &DomainState {
        &self.domains[domain.index()]
    }

    pub fn available(&self, domain: Domain) -> &[Item] {
        &self.domain(domain).available
    }

    pub fn mappings(&self, domain: Domain) -> &[Mapping] {
        &self.domain(domain).mappings
    }

    pub fn mapping(&self, domain: Domain, item: &str) -> Option<&Mapping> {
        self.domain(domain).mapping(item)
    }

    pub fn is_mapped(&self, domain: Domain, item: &str) -> bool {
        self.mapping(domain, item).is_some()
    }

    pub fn orphaned_mappings(&self, domain: Domain) -> Vec<&Mapping> {
        self.domain(domain).orphans().collect()
    }

    pub fn total_mappings(&self) -> usize {
        self.domains.iter().map(|d| d.mappings.len()).sum()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn category_options(&self, name: &str) -> StoreResult<&[String]> {
        self.category(name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| StoreError::UnknownCategory(name.to_string()))
    }

    /* -------------------------
       Practice / import
    --------------------------*/

    pub fn set_practice_name(&mut self, name: impl Into<String>) {
        self.practice_name = name.into();
    }

    /// Replaces the available list of `domain`. Blank names are dropped and a
    /// repeated name is kept once. Existing mappings are left in place even
    /// when their item disappears; they show up as orphans.
    pub fn import_available(&mut self, domain: Domain, items: Vec<Item>) -> usize {
        let mut seen = HashSet::new();
        let mut available = Vec::with_capacity(items.len());
        for mut item in items {
            item.name = item.name.trim().to_string();
            if item.name.is_empty() {
                continue;
            }
            if !seen.insert(item.name.clone()) {
                tracing::warn!(%domain, item = %item.name, "dropping repeated item on import");
                continue;
            }
            available.push(item);
        }

        let state = &mut self.domains[domain.index()];
        state.available = available;
        let orphans = state.orphans().count();
        tracing::info!(
            %domain,
            available = state.available.len(),
            orphans,
            "imported available items"
        );
        state.available.len()
    }

    /// Replaces the whole catalog, keeping the first of any repeated name and
    /// skipping entries without a name or values.
    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        let mut catalog: Vec<Category> = Vec::with_capacity(categories.len());
        for category in categories {
            if category.name.is_empty() || category.values.is_empty() {
                continue;
            }
            if is_reserved_column(&category.name) {
                tracing::warn!(category = %category.name, "dropping category with a reserved column name");
                continue;
            }
            if catalog.iter().any(|c| c.name == category.name) {
                tracing::warn!(category = %category.name, "dropping repeated category on import");
                continue;
            }
            catalog.push(category);
        }
        tracing::info!(categories = catalog.len(), "replaced category catalog");
        self.categories = catalog;
    }

    /* -------------------------
       Mapping edits
    --------------------------*/

    /// Sets one category on one item. An empty `value` clears the entry; the
    /// mapping is still created if the item had none.
    pub fn set_category_value(
        &mut self,
        domain: Domain,
        item: &str,
        category: &str,
        value: &str,
    ) -> StoreResult<&Mapping> {
        self.ensure_available(domain, item)?;
        self.ensure_assignable(category, value)?;

        let mapping = self.upsert(domain, item);
        if value.is_empty() {
            mapping.categories.remove(category);
        } else {
            mapping
                .categories
                .insert(category.to_string(), value.to_string());
        }
        Ok(&*mapping)
    }

    /// Updates notes in place. Returns `None` when the item is unmapped and
    /// `notes` is empty, in which case nothing is created.
    pub fn set_notes(
        &mut self,
        domain: Domain,
        item: &str,
        notes: &str,
    ) -> StoreResult<Option<&Mapping>> {
        self.ensure_available(domain, item)?;

        if notes.is_empty() && !self.is_mapped(domain, item) {
            return Ok(None);
        }
        let mapping = self.upsert(domain, item);
        mapping.notes = notes.to_string();
        Ok(Some(&*mapping))
    }

    pub fn set_flag(
        &mut self,
        domain: Domain,
        item: &str,
        flag: MappingFlag,
        value: bool,
    ) -> StoreResult<&Mapping> {
        if !domain.supports_flags() {
            return Err(StoreError::FlagsNotSupported(domain));
        }
        self.ensure_available(domain, item)?;

        let mapping = self.upsert(domain, item);
        mapping
            .flags
            .get_or_insert_with(MappingFlags::default)
            .set(flag, value);
        Ok(&*mapping)
    }

    /// Applies `patch` to every named item, creating mappings as needed.
    /// Returns the number of distinct items touched.
    pub fn mass_apply(
        &mut self,
        domain: Domain,
        items: &[String],
        patch: &MappingPatch,
    ) -> StoreResult<usize> {
        if items.is_empty() {
            return Err(StoreError::NoItemsSelected);
        }
        if !patch.flags.is_empty() && !domain.supports_flags() {
            return Err(StoreError::FlagsNotSupported(domain));
        }
        for (category, value) in patch.category_entries() {
            self.ensure_assignable(category, value)?;
        }
        for item in items {
            self.ensure_available(domain, item)?;
        }

        let mut seen = HashSet::new();
        for item in items {
            if !seen.insert(item.as_str()) {
                continue;
            }
            let mapping = self.upsert(domain, item);
            for (category, value) in patch.category_entries() {
                mapping
                    .categories
                    .insert(category.to_string(), value.to_string());
            }
            if let Some(notes) = patch.notes() {
                mapping.notes = notes.to_string();
            }
            for (flag, value) in patch.flags.entries() {
                mapping
                    .flags
                    .get_or_insert_with(MappingFlags::default)
                    .set(flag, value);
            }
        }

        tracing::info!(%domain, items = seen.len(), "mass applied mapping patch");
        Ok(seen.len())
    }

    /* -------------------------
       Deletes / resets
    --------------------------*/

    pub fn delete_item(&mut self, domain: Domain, item: &str) -> StoreResult<()> {
        if !self.domains[domain.index()].remove(item) {
            return Err(StoreError::UnknownItem {
                domain,
                item: item.to_string(),
            });
        }
        tracing::info!(%domain, item, "deleted item");
        Ok(())
    }

    /// Deletes every named item and its mapping. Unknown names are skipped.
    pub fn mass_delete(&mut self, domain: Domain, items: &[String]) -> StoreResult<usize> {
        if items.is_empty() {
            return Err(StoreError::NoItemsSelected);
        }
        let state = &mut self.domains[domain.index()];
        let removed = items.iter().filter(|name| state.remove(name)).count();
        tracing::info!(%domain, removed, "mass deleted items");
        Ok(removed)
    }

    /// Clears every mapping, keeping available items and categories.
    pub fn reset_mappings(&mut self) {
        for state in &mut self.domains {
            state.mappings.clear();
        }
        tracing::info!("all mappings reset");
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
        tracing::info!("store reset");
    }

    /* -------------------------
       Category catalog
    --------------------------*/

    pub fn add_category(&mut self, name: &str, values: &str) -> StoreResult<&Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::MissingField("category name"));
        }
        let category = Category::from_csv(name, values);
        if category.values.is_empty() {
            return Err(StoreError::MissingField("category values"));
        }
        if is_reserved_column(name) {
            return Err(StoreError::ReservedCategoryName(name.to_string()));
        }
        if self.category(name).is_some() {
            return Err(StoreError::DuplicateCategory(name.to_string()));
        }

        tracing::info!(category = name, values = category.values.len(), "category added");
        let idx = self.categories.len();
        self.categories.push(category);
        Ok(&self.categories[idx])
    }

    /// Removes the category and purges its key from every mapping. Returns
    /// how many mappings held an assignment for it.
    pub fn delete_category(&mut self, name: &str) -> StoreResult<usize> {
        let idx = self.category_index(name)?;
        self.categories.remove(idx);

        let mut purged = 0;
        for mapping in self.domains.iter_mut().flat_map(|d| d.mappings.iter_mut()) {
            if mapping.categories.remove(name).is_some() {
                purged += 1;
            }
        }
        tracing::info!(category = name, purged, "category deleted");
        Ok(purged)
    }

    /// Replaces the allowed values. Mappings holding a value that is no
    /// longer allowed keep it.
    pub fn edit_category_values(&mut self, name: &str, values: &str) -> StoreResult<&Category> {
        let idx = self.category_index(name)?;
        let values = parse_values(values);
        if values.is_empty() {
            return Err(StoreError::MissingField("category values"));
        }

        let category = &mut self.categories[idx];
        category.values = values;
        tracing::info!(category = name, values = category.values.len(), "category values updated");
        Ok(&*category)
    }

    /* -------------------------
       Configuration
    --------------------------*/

    pub fn save_configuration(&self) -> StoreResult<ConfigurationSummary> {
        let practice_name = self.require_practice_name()?.to_string();
        let domains: Vec<DomainCount> = Domain::ALL
            .into_iter()
            .map(|domain| DomainCount {
                domain,
                label: domain.label(),
                available: self.available(domain).len(),
                mappings: self.mappings(domain).len(),
            })
            .collect();
        let summary = ConfigurationSummary {
            practice_name,
            total_mappings: self.total_mappings(),
            domains,
            saved_at: Utc::now(),
        };
        tracing::info!(
            practice = %summary.practice_name,
            total_mappings = summary.total_mappings,
            "configuration saved"
        );
        Ok(summary)
    }

    pub fn snapshot(&self) -> ConfigurationSnapshot {
        ConfigurationSnapshot {
            practice_name: self.practice_name.clone(),
            domains: Domain::ALL
                .into_iter()
                .map(|domain| DomainSnapshot {
                    domain,
                    state: self.domain(domain).clone(),
                })
                .collect(),
            categories: self.categories.clone(),
        }
    }

    /* -------------------------
       Helpers
    --------------------------*/

    fn category_index(&self, name: &str) -> StoreResult<usize> {
        self.categories
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| StoreError::UnknownCategory(name.to_string()))
    }

    fn ensure_available(&self, domain: Domain, item: &str) -> StoreResult<()> {
        match self.domain(domain).item(item) {
            Some(_) => Ok(()),
            None => Err(StoreError::UnknownItem {
                domain,
                item: item.to_string(),
            }),
        }
    }

    /// Empty values pass: they mean "clear" for single edits and "skip" for
    /// mass edits.
    fn ensure_assignable(&self, category: &str, value: &str) -> StoreResult<()> {
        let Some(cat) = self.category(category) else {
            return Err(StoreError::UnknownCategory(category.to_string()));
        };
        if !value.is_empty() && !cat.allows(value) {
            return Err(StoreError::ValueNotAllowed {
                category: category.to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }

    /// Returns the item's mapping, creating an empty one on first write.
    fn upsert(&mut self, domain: Domain, item: &str) -> &mut Mapping {
        let state = &mut self.domains[domain.index()];
        let idx = match state.mappings.iter().position(|m| m.item == item) {
            Some(idx) => idx,
            None => {
                state
                    .mappings
                    .push(Mapping::empty(item, domain.supports_flags()));
                state.mappings.len() - 1
            }
        };
        &mut state.mappings[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<Item> {
        names.iter().map(|n| Item::new(*n)).collect()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn store_with_priority() -> MappingStore {
        let mut store = MappingStore::new();
        store.import_available(
            Domain::AppointmentType,
            items(&["Checkup", "Follow-up", "New Patient"]),
        );
        store.add_category("Priority", "High,Medium,Low").unwrap();
        store
    }

    #[test]
    fn test_checkup_scenario() {
        let mut store = store_with_priority();
        let d = Domain::AppointmentType;

        store.set_category_value(d, "Checkup", "Priority", "High").unwrap();
        let patch = MappingPatch {
            categories: [("Priority".to_string(), "Low".to_string())].into(),
            ..Default::default()
        };
        let applied = store
            .mass_apply(d, &names(&["Follow-up", "New Patient"]), &patch)
            .unwrap();

        assert_eq!(applied, 2);
        assert_eq!(store.mappings(d).len(), 3);
        assert_eq!(store.mapping(d, "Checkup").unwrap().category("Priority"), Some("High"));
        assert_eq!(store.mapping(d, "Follow-up").unwrap().category("Priority"), Some("Low"));
        assert_eq!(store.mapping(d, "New Patient").unwrap().category("Priority"), Some("Low"));
    }

    #[test]
    fn test_set_category_value_overwrites() {
        let mut store = store_with_priority();
        let d = Domain::AppointmentType;

        store.set_category_value(d, "Checkup", "Priority", "High").unwrap();
        store.set_category_value(d, "Checkup", "Priority", "Medium").unwrap();
        store.set_category_value(d, "Checkup", "Priority", "Medium").unwrap();

        assert_eq!(store.mappings(d).len(), 1);
        assert_eq!(store.mapping(d, "Checkup").unwrap().category("Priority"), Some("Medium"));
    }

    #[test]
    fn test_set_category_value_empty_clears_but_keeps_mapping() {
        let mut store = store_with_priority();
        let d = Domain::AppointmentType;

        store.set_category_value(d, "Checkup", "Priority", "High").unwrap();
        store.set_category_value(d, "Checkup", "Priority", "").unwrap();

        let m = store.mapping(d, "Checkup").unwrap();
        assert!(m.categories.is_empty());
    }

    #[test]
    fn test_set_category_value_rejects_bad_input() {
        let mut store = store_with_priority();
        let d = Domain::AppointmentType;

        assert_eq!(
            store.set_category_value(d, "Checkup", "Urgency", "High").unwrap_err(),
            StoreError::UnknownCategory("Urgency".into())
        );
        assert!(matches!(
            store.set_category_value(d, "Checkup", "Priority", "Critical"),
            Err(StoreError::ValueNotAllowed { .. })
        ));
        assert!(matches!(
            store.set_category_value(d, "Walk-in", "Priority", "High"),
            Err(StoreError::UnknownItem { .. })
        ));
        assert!(!store.is_mapped(d, "Checkup"));
    }

    #[test]
    fn test_set_notes_does_not_create_on_empty() {
        let mut store = store_with_priority();
        let d = Domain::AppointmentType;

        assert!(store.set_notes(d, "Checkup", "").unwrap().is_none());
        assert!(!store.is_mapped(d, "Checkup"));

        store.set_notes(d, "Checkup", "annual").unwrap();
        assert_eq!(store.mapping(d, "Checkup").unwrap().notes, "annual");

        // clearing notes keeps the mapping
        store.set_notes(d, "Checkup", "").unwrap();
        let m = store.mapping(d, "Checkup").unwrap();
        assert_eq!(m.notes, "");
    }

    #[test]
    fn test_set_flag_only_on_flag_domains() {
        let mut store = MappingStore::new();
        store.import_available(Domain::Doctor, items(&["Dr. Smith"]));
        store.import_available(Domain::AppointmentPurpose, items(&["Vaccination"]));

        assert_eq!(
            store
                .set_flag(Domain::Doctor, "Dr. Smith", MappingFlag::BookingRule, true)
                .unwrap_err(),
            StoreError::FlagsNotSupported(Domain::Doctor)
        );

        let m = store
            .set_flag(
                Domain::AppointmentPurpose,
                "Vaccination",
                MappingFlag::CancelNoShowRule,
                true,
            )
            .unwrap();
        let flags = m.flags.unwrap();
        assert!(flags.cancel_no_show_rule);
        assert!(!flags.booking_rule);
    }

    #[test]
    fn test_mass_apply_notes_only() {
        let mut store = store_with_priority();
        let d = Domain::AppointmentType;
        store.set_category_value(d, "Checkup", "Priority", "High").unwrap();
        store.set_notes(d, "Checkup", "keep me").unwrap();

        let patch = MappingPatch {
            notes: Some("x".into()),
            ..Default::default()
        };
        store
            .mass_apply(d, &names(&["Checkup", "Follow-up"]), &patch)
            .unwrap();

        let checkup = store.mapping(d, "Checkup").unwrap();
        assert_eq!(checkup.category("Priority"), Some("High"));
        assert_eq!(checkup.notes, "x");

        let follow_up = store.mapping(d, "Follow-up").unwrap();
        assert!(follow_up.categories.is_empty());
        assert_eq!(follow_up.notes, "x");
    }

    #[test]
    fn test_mass_apply_skips_empty_entries() {
        let mut store = store_with_priority();
        store.add_category("Visit", "In person,Virtual").unwrap();
        let d = Domain::AppointmentType;
        store.set_category_value(d, "Checkup", "Priority", "High").unwrap();
        store.set_notes(d, "Checkup", "existing").unwrap();

        let patch = MappingPatch {
            categories: [
                ("Priority".to_string(), String::new()),
                ("Visit".to_string(), "Virtual".to_string()),
            ]
            .into(),
            notes: Some(String::new()),
            ..Default::default()
        };
        store.mass_apply(d, &names(&["Checkup", "New Patient"]), &patch).unwrap();

        let checkup = store.mapping(d, "Checkup").unwrap();
        assert_eq!(checkup.category("Priority"), Some("High"));
        assert_eq!(checkup.category("Visit"), Some("Virtual"));
        assert_eq!(checkup.notes, "existing");

        let new_patient = store.mapping(d, "New Patient").unwrap();
        assert_eq!(new_patient.category("Priority"), None);
        assert_eq!(new_patient.notes, "");
    }

    #[test]
    fn test_mass_apply_is_all_or_nothing() {
        let mut store = store_with_priority();
        let d = Domain::AppointmentType;
        let patch = MappingPatch {
            notes: Some("x".into()),
            ..Default::default()
        };

        assert_eq!(
            store.mass_apply(d, &[], &patch).unwrap_err(),
            StoreError::NoItemsSelected
        );
        assert!(store
            .mass_apply(d, &names(&["Checkup", "Missing"]), &patch)
            .is_err());
        assert!(store.mappings(d).is_empty());

        let doctor_patch = MappingPatch {
            flags: mapping::FlagPatch {
                booking_rule: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            store
                .mass_apply(Domain::Doctor, &names(&["Dr. Who"]), &doctor_patch)
                .unwrap_err(),
            StoreError::FlagsNotSupported(Domain::Doctor)
        );
    }

    #[test]
    fn test_mass_apply_dedups_selection_and_sets_flags() {
        let mut store = store_with_priority();
        let d = Domain::AppointmentType;
        let patch = MappingPatch {
            flags: mapping::FlagPatch {
                booking_rule: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };

        let applied = store
            .mass_apply(d, &names(&["Checkup", "Checkup"]), &patch)
            .unwrap();
        assert_eq!(applied, 1);
        assert_eq!(store.mappings(d).len(), 1);
        assert!(store.mapping(d, "Checkup").unwrap().flags.unwrap().booking_rule);
    }

    #[test]
    fn test_delete_category_purges_only_that_key() {
        let mut store = store_with_priority();
        store.add_category("Visit", "In person,Virtual").unwrap();
        store.import_available(Domain::Location, items(&["Main St"]));

        store
            .set_category_value(Domain::AppointmentType, "Checkup", "Priority", "High")
            .unwrap();
        store
            .set_category_value(Domain::AppointmentType, "Checkup", "Visit", "Virtual")
            .unwrap();
        store
            .set_category_value(Domain::Location, "Main St", "Priority", "Low")
            .unwrap();

        let purged = store.delete_category("Priority").unwrap();
        assert_eq!(purged, 2);
        assert!(store.category("Priority").is_none());

        let checkup = store.mapping(Domain::AppointmentType, "Checkup").unwrap();
        assert_eq!(checkup.category("Priority"), None);
        assert_eq!(checkup.category("Visit"), Some("Virtual"));
        assert!(store.mapping(Domain::Location, "Main St").unwrap().categories.is_empty());

        assert_eq!(
            store.delete_category("Priority").unwrap_err(),
            StoreError::UnknownCategory("Priority".into())
        );
    }

    #[test]
    fn test_add_category_validation() {
        let mut store = MappingStore::new();
        assert_eq!(
            store.add_category("  ", "a,b").unwrap_err(),
            StoreError::MissingField("category name")
        );
        assert_eq!(
            store.add_category("Priority", " ").unwrap_err(),
            StoreError::MissingField("category values")
        );
        assert_eq!(
            store.add_category("Priority", ", ,").unwrap_err(),
            StoreError::MissingField("category values")
        );

        store.add_category(" Priority ", "High, Low").unwrap();
        assert_eq!(
            store.add_category("Priority", "A").unwrap_err(),
            StoreError::DuplicateCategory("Priority".into())
        );
        // case-sensitive
        store.add_category("priority", "A").unwrap();
        assert_eq!(store.categories().len(), 2);
        assert_eq!(store.category_options("Priority").unwrap(), ["High", "Low"]);
    }

    #[test]
    fn test_add_category_rejects_export_headers() {
        let mut store = MappingStore::new();
        for name in ["id", "notes", "type", "doctor", "Booking Rule", " Cancel/No-Show Rules "] {
            assert_eq!(
                store.add_category(name, "A,B").unwrap_err(),
                StoreError::ReservedCategoryName(name.trim().to_string())
            );
        }
        assert!(store.categories().is_empty());
        store.add_category("Notes", "A").unwrap();
    }

    #[test]
    fn test_edit_category_values_keeps_stale_assignments() {
        let mut store = store_with_priority();
        let d = Domain::AppointmentType;
        store.set_category_value(d, "Checkup", "Priority", "High").unwrap();

        store.edit_category_values("Priority", "Urgent, Routine").unwrap();

        assert_eq!(store.category_options("Priority").unwrap(), ["Urgent", "Routine"]);
        assert_eq!(store.mapping(d, "Checkup").unwrap().category("Priority"), Some("High"));
        assert!(store.edit_category_values("Priority", "  ").is_err());
        assert!(store.edit_category_values("Nope", "a").is_err());
    }

    #[test]
    fn test_delete_item_and_mass_delete() {
        let mut store = store_with_priority();
        let d = Domain::AppointmentType;
        store.set_notes(d, "Checkup", "n").unwrap();

        store.delete_item(d, "Checkup").unwrap();
        assert!(store.available(d).iter().all(|i| i.name != "Checkup"));
        assert!(!store.is_mapped(d, "Checkup"));
        assert!(store.delete_item(d, "Checkup").is_err());

        store.set_notes(d, "Follow-up", "n").unwrap();
        let removed = store
            .mass_delete(d, &names(&["Follow-up", "Unknown"]))
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.available(d).len(), 1);
        assert!(!store.is_mapped(d, "Follow-up"));
        assert_eq!(store.mass_delete(d, &[]).unwrap_err(), StoreError::NoItemsSelected);
    }

    #[test]
    fn test_reimport_keeps_orphaned_mappings() {
        let mut store = store_with_priority();
        let d = Domain::AppointmentType;
        store.set_category_value(d, "Checkup", "Priority", "High").unwrap();

        store.import_available(d, items(&["Follow-up", " ", "Follow-up"]));

        assert_eq!(store.available(d).len(), 1);
        assert!(store.is_mapped(d, "Checkup"));
        let orphans = store.orphaned_mappings(d);
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].item, "Checkup");

        // orphans can still be deleted
        store.delete_item(d, "Checkup").unwrap();
        assert!(store.orphaned_mappings(d).is_empty());
    }

    #[test]
    fn test_resets() {
        let mut store = store_with_priority();
        store.set_practice_name("Acme Clinic");
        store
            .set_category_value(Domain::AppointmentType, "Checkup", "Priority", "High")
            .unwrap();

        store.reset_mappings();
        assert_eq!(store.total_mappings(), 0);
        assert_eq!(store.available(Domain::AppointmentType).len(), 3);
        assert_eq!(store.categories().len(), 1);
        assert_eq!(store.practice_name(), "Acme Clinic");

        store.reset_all();
        assert!(store.available(Domain::AppointmentType).is_empty());
        assert!(store.categories().is_empty());
        assert_eq!(store.practice_name(), "");
    }

    #[test]
    fn test_save_configuration_requires_practice_name() {
        let mut store = store_with_priority();
        store
            .set_category_value(Domain::AppointmentType, "Checkup", "Priority", "High")
            .unwrap();
        store.set_practice_name("   ");
        assert_eq!(
            store.save_configuration().unwrap_err(),
            StoreError::PracticeNameRequired
        );

        store.set_practice_name("Acme Clinic");
        let summary = store.save_configuration().unwrap();
        assert_eq!(summary.practice_name, "Acme Clinic");
        assert_eq!(summary.total_mappings, 1);
        assert_eq!(summary.domains.len(), 4);
        assert_eq!(summary.domains[0].mappings, 1);
        assert_eq!(summary.domains[0].available, 3);
    }

    #[test]
    fn test_replace_categories_keeps_first_duplicate() {
        let mut store = MappingStore::new();
        store.replace_categories(vec![
            Category::from_csv("Priority", "High,Low"),
            Category::from_csv("Priority", "A,B"),
            Category::from_csv("", "A"),
            Category::from_csv("Empty", ""),
            Category::from_csv("location", "A"),
        ]);
        assert_eq!(store.categories().len(), 1);
        assert_eq!(store.category_options("Priority").unwrap(), ["High", "Low"]);
    }

    #[test]
    fn test_snapshot_serializes_domains() {
        let mut store = store_with_priority();
        store
            .set_category_value(Domain::AppointmentType, "Checkup", "Priority", "High")
            .unwrap();
        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["domains"][0]["domain"], "appointment-type");
        assert_eq!(json["domains"][0]["available"].as_array().unwrap().len(), 3);
        assert_eq!(
            json["domains"][0]["mappings"][0]["categories"]["Priority"],
            "High"
        );
        assert_eq!(json["categories"][0]["name"], "Priority");
    }
}
