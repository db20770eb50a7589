use serde::Serialize;
use serde_json::json;

use super::backend::{fire_and_forget, Backend, SET_REV};

pub const TRIGGER_PLACEHOLDER: &str = "Select a version...";
pub const SEARCH_PLACEHOLDER: &str = "Search for a version...";
pub const NOT_FOUND_TEXT: &str = "Version not found";

/// Searchable single-choice dropdown over the version list.
#[derive(Debug, Clone, Default)]
pub struct VersionSelector {
    open: bool,
    value: String,
    query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorItem {
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorSnapshot {
    pub open: bool,
    pub trigger_label: String,
    pub query: String,
    pub search_placeholder: &'static str,
    pub items: Vec<SelectorItem>,
    pub empty_text: Option<&'static str>,
}

impl VersionSelector {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Currently selected version, empty when nothing is selected.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Candidates matching the search box, in list order.
    pub fn visible<'a>(&self, versions: &'a [String]) -> Vec<&'a String> {
        let needle = self.query.trim().to_lowercase();
        versions
            .iter()
            .filter(|version| needle.is_empty() || version.to_lowercase().contains(&needle))
            .collect()
    }

    /// Pick `candidate`. Picking the current selection again clears it.
    ///
    /// Always closes the dropdown and announces the resulting value, even when it is empty.
    pub fn select<B: Backend + ?Sized>(&mut self, backend: &B, candidate: &str) {
        self.value = if candidate == self.value {
            String::new()
        } else {
            candidate.to_string()
        };
        self.open = false;
        fire_and_forget(backend, SET_REV, json!({ "rev": self.value }));
    }

    /// What the trigger button shows. A selection missing from `versions` shows blank.
    pub fn trigger_label(&self, versions: &[String]) -> String {
        if self.value.is_empty() {
            return TRIGGER_PLACEHOLDER.to_string();
        }
        versions
            .iter()
            .find(|version| **version == self.value)
            .cloned()
            .unwrap_or_default()
    }

    pub fn snapshot(&self, versions: &[String]) -> SelectorSnapshot {
        let items: Vec<SelectorItem> = self
            .visible(versions)
            .into_iter()
            .map(|version| SelectorItem {
                label: version.clone(),
                checked: *version == self.value,
            })
            .collect();
        let empty_text = items.is_empty().then_some(NOT_FOUND_TEXT);

        SelectorSnapshot {
            open: self.open,
            trigger_label: self.trigger_label(versions),
            query: self.query.clone(),
            search_placeholder: SEARCH_PLACEHOLDER,
            items,
            empty_text,
        }
    }
}
