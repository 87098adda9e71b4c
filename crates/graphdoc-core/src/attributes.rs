//! Page attribute extraction
//!
//! Page attributes are document attributes using the reserved `page-` naming
//! convention, intended for site templates. Extraction filters the full
//! finalized attribute set and strips the prefix.

use std::collections::BTreeMap;

use graphdoc_processor::AttributeValue;

/// Prefix marking a document attribute as page-scoped
pub const PAGE_ATTRIBUTE_PREFIX: &str = "page-";

/// Filter the full attribute set down to page attributes, prefix stripped
pub fn extract_page_attributes(
    all_attributes: &BTreeMap<String, AttributeValue>,
) -> BTreeMap<String, AttributeValue> {
    all_attributes
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(PAGE_ATTRIBUTE_PREFIX)
                .map(|stripped| (stripped.to_string(), value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(entries: &[(&str, &str)]) -> BTreeMap<String, AttributeValue> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), AttributeValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_extracts_prefixed_keys_only() {
        let all = attrs(&[
            ("page-category", "tech"),
            ("page-draft", "yes"),
            ("title", "My Doc"),
            ("imagesdir", "/images"),
        ]);
        let page = extract_page_attributes(&all);
        assert_eq!(page.len(), 2);
        assert_eq!(page.get("category"), Some(&AttributeValue::from("tech")));
        assert_eq!(page.get("draft"), Some(&AttributeValue::from("yes")));
        assert!(page.get("title").is_none());
    }

    #[test]
    fn test_empty_when_no_page_attributes() {
        let all = attrs(&[("doctitle", "T"), ("author", "Jane Doe")]);
        assert!(extract_page_attributes(&all).is_empty());
    }

    #[test]
    fn test_boolean_page_attributes_survive() {
        let mut all = BTreeMap::new();
        all.insert("page-hidden".to_string(), AttributeValue::Bool(true));
        let page = extract_page_attributes(&all);
        assert_eq!(page.get("hidden"), Some(&AttributeValue::Bool(true)));
    }
}
