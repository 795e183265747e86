//! Per-request view filters applied on top of the cached snapshot.

use crate::models::Form;

/// Optional archived and name filters. The cached snapshot is never filtered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFilter {
    archived: Option<bool>,
    search: Option<String>,
}

impl FormFilter {
    /// Creates a filter. A blank search term matches everything.
    pub fn new(archived: Option<bool>, search: Option<String>) -> Self {
        let search = search
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty());
        Self { archived, search }
    }

    pub fn archived(&self) -> Option<bool> {
        self.archived
    }

    /// True when the filter keeps every form.
    pub fn is_empty(&self) -> bool {
        self.archived.is_none() && self.search.is_none()
    }

    pub fn matches(&self, form: &Form) -> bool {
        if let Some(archived) = self.archived {
            if form.is_archived() != archived {
                return false;
            }
        }
        match &self.search {
            Some(term) => form.name.to_lowercase().contains(term.as_str()),
            None => true,
        }
    }

    /// Borrows the matching forms, preserving order.
    pub fn apply<'a>(&self, forms: &'a [Form]) -> Vec<&'a Form> {
        forms.iter().filter(|form| self.matches(form)).collect()
    }
}
