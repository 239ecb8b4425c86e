//! Read-only lookup of condition records.

use crate::condition::{ConditionRecord, ConditionSummary};

/// Immutable catalog of conditions, kept in declaration order.
///
/// Lookups never fail; a missing id is reported as `None` and callers decide what to show.
#[derive(Debug, Clone, Default)]
pub struct ConditionCatalog {
    records: Vec<ConditionRecord>,
}

impl ConditionCatalog {
    /// Builds a catalog from records that have already been validated.
    pub(crate) fn from_records(records: Vec<ConditionRecord>) -> Self {
        Self { records }
    }

    pub fn get(&self, id: &str) -> Option<&ConditionRecord> {
        self.records.iter().find(|record| record.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn all(&self) -> &[ConditionRecord] {
        &self.records
    }

    pub fn summaries(&self) -> Vec<ConditionSummary> {
        self.records.iter().map(ConditionRecord::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{ConditionCategory, ConditionId};

    fn record(id: &str) -> ConditionRecord {
        ConditionRecord {
            id: ConditionId::new(id),
            short_label: id.to_owned(),
            category: ConditionCategory::Common,
            definition: format!("{id} definition"),
            symptoms: vec![],
            red_flags: vec![],
            advice: format!("{id} advice"),
        }
    }

    #[test]
    fn get_returns_matching_record() {
        let catalog = ConditionCatalog::from_records(vec![record("asthma"), record("pneumonia")]);
        let found = catalog.get("pneumonia").expect("pneumonia present");
        assert_eq!(found.definition, "pneumonia definition");
    }

    #[test]
    fn get_unknown_id_is_none() {
        let catalog = ConditionCatalog::from_records(vec![record("asthma")]);
        assert!(catalog.get("croup").is_none());
        assert!(!catalog.contains("croup"));
    }

    #[test]
    fn get_is_exact_match() {
        let catalog = ConditionCatalog::from_records(vec![record("asthma")]);
        assert!(catalog.get("Asthma").is_none());
        assert!(catalog.get("asthm").is_none());
    }

    #[test]
    fn all_preserves_declaration_order() {
        let catalog = ConditionCatalog::from_records(vec![
            record("pneumonia"),
            record("asthma"),
            record("laryngeal web"),
        ]);
        let ids: Vec<&str> = catalog.all().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["pneumonia", "asthma", "laryngeal web"]);
        assert_eq!(catalog.len(), 3);
    }
}
