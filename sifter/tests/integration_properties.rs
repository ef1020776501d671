//! Property tests: level monotonicity, stability across calls and faithful
//! leaf values, over randomly filled records.

use proptest::prelude::*;
use serde_json::{json, Value};
use sifter::{Level, OutputTree, Sift, Sifter};

#[derive(Clone, Debug, Sift)]
struct Contact {
    #[sift(json = "email,omitempty", confidential = "level1")]
    email: String,
    #[sift(json = "phone", confidential = "level2")]
    phone: String,
    #[sift(json = "verified", confidential = "level0")]
    verified: bool,
}

#[derive(Clone, Debug, Sift)]
struct Audit {
    #[sift(json = "revision")]
    revision: u64,
    #[sift(json = "editor,omitempty", confidential = "level3")]
    editor: Option<String>,
}

#[derive(Clone, Debug, Sift)]
struct Customer {
    #[sift(json = "id")]
    id: u64,
    #[sift(json = "name,omitempty")]
    name: String,
    #[sift(json = "score", confidential = "level1")]
    score: i32,
    #[sift(json = "tags,omitempty", confidential = "level2")]
    tags: Vec<String>,
    #[sift(json = "contact", confidential = "level1", nested)]
    contact: Contact,
    #[sift(embed)]
    audit: Audit,
    #[sift(json = "-")]
    note: String,
    _token: String,
}

prop_compose! {
    fn contact()(email in "[a-z]{0,6}", phone in "[0-9]{0,4}", verified in any::<bool>()) -> Contact {
        Contact { email, phone, verified }
    }
}

prop_compose! {
    fn customer()(
        id in any::<u64>(),
        name in "[a-z ]{0,8}",
        score in any::<i32>(),
        tags in prop::collection::vec("[a-z]{1,4}", 0..3),
        contact in contact(),
        revision in any::<u64>(),
        editor in prop::option::of("[a-z]{0,5}"),
        note in ".{0,8}",
        token in ".{0,8}",
    ) -> Customer {
        Customer {
            id,
            name,
            score,
            tags,
            contact,
            audit: Audit { revision, editor },
            note,
            _token: token,
        }
    }
}

fn level() -> impl Strategy<Value = Level> {
    prop_oneof![
        (0_u8..=3).prop_map(|level| Level::new(level).unwrap()),
        Just(Level::UNRESTRICTED),
    ]
}

fn owned_leaves(tree: &OutputTree) -> Vec<(String, Value)> {
    tree.leaves()
        .into_iter()
        .map(|(path, value)| (path.join("."), value.clone()))
        .collect()
}

fn expected_leaf(customer: &Customer, path: &str) -> Value {
    match path {
        "id" => json!(customer.id),
        "name" => json!(customer.name),
        "score" => json!(customer.score),
        "tags" => json!(customer.tags),
        "revision" => json!(customer.audit.revision),
        "editor" => json!(customer.audit.editor),
        "contact.email" => json!(customer.contact.email),
        "contact.phone" => json!(customer.contact.phone),
        "contact.verified" => json!(customer.contact.verified),
        other => panic!("unexpected output path `{other}`"),
    }
}

proptest! {
    #[test]
    fn prop_higher_levels_only_add_fields(
        customer in customer(),
        low in level(),
        high in level(),
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let sifter = Sifter::new();
        let narrow = owned_leaves(&sifter.sift(&customer, low).unwrap());
        let wide = owned_leaves(&sifter.sift(&customer, high).unwrap());
        for leaf in &narrow {
            prop_assert!(wide.contains(leaf), "{:?} missing at {}", leaf, high);
        }
    }

    #[test]
    fn prop_sifting_is_stable(customer in customer(), level in level()) {
        let sifter = Sifter::new();
        let first = sifter.sift(&customer, level).unwrap();
        let second = sifter.sift(&customer, level).unwrap();
        let fresh = Sifter::new().sift(&customer, level).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &fresh);
    }

    #[test]
    fn prop_leaves_carry_source_values(customer in customer(), level in level()) {
        let tree = Sifter::new().sift(&customer, level).unwrap();
        for (path, value) in owned_leaves(&tree) {
            prop_assert_eq!(&value, &expected_leaf(&customer, &path));
        }
    }

    #[test]
    fn prop_hidden_fields_never_appear(customer in customer(), level in level()) {
        let tree = Sifter::new().sift(&customer, level).unwrap();
        prop_assert!(!tree.contains_key("note"));
        prop_assert!(!tree.contains_key("_token"));
        prop_assert!(!tree.contains_key("audit"));
        if level < Level::LEVEL1 {
            prop_assert!(!tree.contains_key("contact"));
            prop_assert!(!tree.contains_key("score"));
        }
    }

    #[test]
    fn prop_omitted_values_are_never_empty(customer in customer()) {
        let tree = Sifter::new().sift(&customer, Level::UNRESTRICTED).unwrap();
        prop_assert_eq!(tree.contains_key("name"), !customer.name.is_empty());
        prop_assert_eq!(tree.contains_key("tags"), !customer.tags.is_empty());
        prop_assert_eq!(
            tree.contains_key("editor"),
            customer.audit.editor.as_deref().is_some_and(|editor| !editor.is_empty())
        );
        prop_assert!(tree.contains_key("id"));
        prop_assert!(tree.contains_key("revision"));
    }
}
