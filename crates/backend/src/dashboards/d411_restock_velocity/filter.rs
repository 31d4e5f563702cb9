use contracts::domain::a101_restock_event::RestockEvent;
use std::collections::HashSet;

use crate::shared::error::AnalyticsError;

/// Category multiselect state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    /// No filter given: every category is selected
    All,
    Only(HashSet<String>),
}

impl CategorySelection {
    /// Parse a comma-separated query value
    ///
    /// `None` selects everything, an empty string selects nothing, and a
    /// blank entry such as `"Snacks,,Dairy"` is rejected.
    pub fn parse(raw: Option<&str>) -> Result<Self, AnalyticsError> {
        let Some(raw) = raw else {
            return Ok(CategorySelection::All);
        };
        if raw.trim().is_empty() {
            return Ok(CategorySelection::Only(HashSet::new()));
        }

        let mut categories = HashSet::new();
        for (position, part) in raw.split(',').enumerate() {
            let category = part.trim();
            if category.is_empty() {
                return Err(AnalyticsError::invalid_argument(format!(
                    "malformed category set '{}': blank entry at position {}",
                    raw,
                    position + 1
                )));
            }
            categories.insert(category.to_string());
        }
        Ok(CategorySelection::Only(categories))
    }

    /// Selected categories for display: known ones in `available` order,
    /// unknown ones after them, sorted
    pub fn selected(&self, available: &[String]) -> Vec<String> {
        match self {
            CategorySelection::All => available.to_vec(),
            CategorySelection::Only(set) => {
                let mut selected: Vec<String> = available
                    .iter()
                    .filter(|c| set.contains(*c))
                    .cloned()
                    .collect();
                let mut unknown: Vec<String> = set
                    .iter()
                    .filter(|c| !available.contains(*c))
                    .cloned()
                    .collect();
                unknown.sort();
                selected.extend(unknown);
                selected
            }
        }
    }

    pub fn apply(&self, records: &[RestockEvent]) -> Vec<RestockEvent> {
        match self {
            CategorySelection::All => records.to_vec(),
            CategorySelection::Only(set) => filter(records, set),
        }
    }
}

/// Keep records whose category is allowed, in input order
pub fn filter(records: &[RestockEvent], allowed_categories: &HashSet<String>) -> Vec<RestockEvent> {
    records
        .iter()
        .filter(|r| allowed_categories.contains(&r.category))
        .cloned()
        .collect()
}

/// Distinct categories in order of first appearance
pub fn available_categories(records: &[RestockEvent]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.category.as_str()))
        .map(|r| r.category.clone())
        .collect()
}
