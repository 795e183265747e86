//! Wire types for the forms listing endpoint.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::Form;

/// One page of `GET /marketing/v3/forms`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormsPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<Form>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NextPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NextPage {
    #[serde(default)]
    pub after: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Form>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Form>>::deserialize(deserializer)?.unwrap_or_default())
}

impl FormsPage {
    /// Creates a page, with a continuation cursor when `after` is set.
    pub fn new(results: Vec<Form>, after: Option<String>) -> Self {
        Self {
            results,
            paging: after.map(|after| Paging {
                next: Some(NextPage { after: Some(after) }),
            }),
        }
    }

    /// Cursor for the following page. A null or empty cursor ends pagination.
    pub fn next_cursor(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .and_then(|paging| paging.next.as_ref())
            .and_then(|next| next.after.as_deref())
            .filter(|after| !after.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_with_cursor() {
        let page: FormsPage = serde_json::from_value(json!({
            "results": [{"id": "1", "name": "a"}],
            "paging": {"next": {"after": "MTAw", "link": "https://api.hubapi.com/..."}}
        }))
        .unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.next_cursor(), Some("MTAw"));
    }

    #[test]
    fn test_last_page_without_paging() {
        let page: FormsPage = serde_json::from_value(json!({"results": []})).unwrap();
        assert!(page.next_cursor().is_none());
    }

    #[test]
    fn test_paging_without_next() {
        let page: FormsPage =
            serde_json::from_value(json!({"results": [], "paging": {}})).unwrap();
        assert!(page.next_cursor().is_none());
    }

    #[test]
    fn test_missing_results_is_empty() {
        let page: FormsPage = serde_json::from_value(json!({})).unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_empty_cursor_ends_pagination() {
        let page = FormsPage::new(Vec::new(), Some(String::new()));
        assert!(page.next_cursor().is_none());
    }

    #[test]
    fn test_null_results_is_empty() {
        let page: FormsPage = serde_json::from_value(json!({"results": null})).unwrap();
        assert!(page.results.is_empty());
        assert!(page.next_cursor().is_none());
    }

    #[test]
    fn test_null_cursor_ends_pagination() {
        let page: FormsPage = serde_json::from_value(json!({
            "results": [{"id": "1", "name": "a"}],
            "paging": {"next": {"after": null}}
        }))
        .unwrap();
        assert_eq!(page.results.len(), 1);
        assert!(page.next_cursor().is_none());

        let page: FormsPage =
            serde_json::from_value(json!({"results": [], "paging": {"next": {}}})).unwrap();
        assert!(page.next_cursor().is_none());
    }
}
