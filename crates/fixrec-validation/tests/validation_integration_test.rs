//! End-to-end validation of small documents

use fixrec_schema::{Mode, Schema};
use fixrec_validation::{CheckResult, Fields, ItemLabel, Items, ValidationEngine, ValidationError};

fn doc(yaml: &str) -> fixrec_doc::Document {
    fixrec_doc::parse_yaml("links.yml", yaml).unwrap()
}

const LINKS: &str = "\
- name: Albion Research Ltd.
  url: https://www.albionresearch.com/
- name: BBC
  url: https://www.bbc.co.uk/
";

#[test]
fn test_happy_path_sequence() -> anyhow::Result<()> {
    let validated = ValidationEngine::new(Schema::inferred()).validate(doc(LINKS))?;

    assert_eq!(validated.schema.mode(), Mode::Sequence);
    match validated.items {
        Items::Sequence(items) => {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0]["name"].as_str(), Some("Albion Research Ltd."));
            assert_eq!(items[1]["url"].as_str(), Some("https://www.bbc.co.uk/"));
        }
        other => panic!("Expected sequence items, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_declared_optional_field_accepted() -> anyhow::Result<()> {
    let schema = Schema::new(["name", "url"], ["country"], false)?;
    let yaml = format!("{LINKS}- name: Le Monde\n  url: https://www.lemonde.fr/\n  country: FR\n");
    let validated = ValidationEngine::new(schema).validate(doc(&yaml))?;
    assert_eq!(validated.items.len(), 3);
    Ok(())
}

#[test]
fn test_undeclared_extra_field_rejected() {
    let yaml = format!("{LINKS}- name: Le Monde\n  url: https://www.lemonde.fr/\n  country: FR\n");
    let err = ValidationEngine::new(Schema::inferred())
        .validate(doc(&yaml))
        .unwrap_err();

    match err {
        ValidationError::UnexpectedField { label, field } => {
            assert_eq!(label, ItemLabel::Index(2));
            assert_eq!(field, "country");
        }
        e => panic!("Expected UnexpectedField error, got {:?}", e),
    }
}

#[test]
fn test_declared_key_preserved() -> anyhow::Result<()> {
    let schema = Schema::new(["key", "title"], Vec::<String>::new(), false)?;
    let validated = ValidationEngine::new(schema).validate(doc("home:\n  key: index\n  title: Home\n"))?;

    assert!(!validated.schema.synthesizes_key());
    match validated.items {
        Items::Keyed(entries) => assert_eq!(entries[0].1["key"].as_str(), Some("index")),
        other => panic!("Expected keyed items, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_declared_key_required_in_every_item() {
    let schema = Schema::new(["key", "title"], Vec::<String>::new(), false).unwrap();
    let err = ValidationEngine::new(schema)
        .validate(doc("home:\n  title: Home\n"))
        .unwrap_err();
    assert_eq!(err.to_string(), "key 'home' is missing value for 'key'");
}

#[test]
fn test_one_bad_item_fails_whole_document() {
    let check = |fields: &Fields, _: &ItemLabel| -> CheckResult {
        match fields.get("name").and_then(|v| v.as_str()) {
            Some(name) if name.is_empty() => Err("name is blank".into()),
            _ => Ok(()),
        }
    };
    let yaml = "- name: A\n  url: a\n- name: ''\n  url: b\n- name: C\n  url: c\n";
    let err = ValidationEngine::new(Schema::inferred())
        .with_check(check)
        .validate(doc(yaml))
        .unwrap_err();
    assert_eq!(err.label(), Some(&ItemLabel::Index(1)));
}
