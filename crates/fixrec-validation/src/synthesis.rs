//! Synthetic `key` field for keyed documents

use fixrec_doc::Document;
use fixrec_schema::{KEY_FIELD, ResolvedSchema};
use tracing::debug;

/// Copy each entry's map key into its `key` field.
///
/// Decided once from the resolved schema: if `key` is already a valid
/// field nothing changes. Otherwise every item gains `key` (unless it
/// already supplies one) and the schema gains `key` as a valid field.
pub fn synthesize_keys(schema: ResolvedSchema, entries: &mut [(String, Document)]) -> ResolvedSchema {
    if schema.is_valid(KEY_FIELD) {
        return schema;
    }

    debug!("Synthesizing '{}' field for {} keyed items", KEY_FIELD, entries.len());
    for (key, item) in entries.iter_mut() {
        if let Document::Mapping(fields) = item {
            if !fields.contains_key(KEY_FIELD) {
                fields.insert(
                    Document::String(KEY_FIELD.to_string()),
                    Document::String(key.clone()),
                );
            }
        }
    }

    schema.with_synthesized_key()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixrec_schema::Mode;

    fn entries(yaml: &str) -> Vec<(String, Document)> {
        let doc = fixrec_doc::parse_yaml("test.yml", yaml).unwrap();
        doc.as_mapping()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.as_str().unwrap().to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_injects_map_key() {
        let mut entries = entries("StaticPage#first:\n  title: First Page\n");
        let schema = synthesize_keys(ResolvedSchema::inferred(["title"], Mode::Keyed), &mut entries);

        assert!(schema.synthesizes_key());
        assert_eq!(entries[0].1["key"].as_str(), Some("StaticPage#first"));
    }

    #[test]
    fn test_declared_key_left_alone() {
        let mut entries = entries("home:\n  key: custom\n  title: Home\n");
        let schema = synthesize_keys(ResolvedSchema::inferred(["key", "title"], Mode::Keyed), &mut entries);

        assert!(!schema.synthesizes_key());
        assert_eq!(entries[0].1["key"].as_str(), Some("custom"));
    }

    #[test]
    fn test_item_supplied_key_not_overwritten() {
        let mut entries = entries("home:\n  title: Home\n  key: mine\n");
        let schema = synthesize_keys(ResolvedSchema::inferred(["title"], Mode::Keyed), &mut entries);

        assert!(schema.is_valid("key"));
        assert_eq!(entries[0].1["key"].as_str(), Some("mine"));
    }
}
