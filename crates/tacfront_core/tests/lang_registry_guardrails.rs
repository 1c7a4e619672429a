use std::collections::HashMap;

use tacfront_core::lang::keywords;
use tacfront_core::lang::operators::{self, Associativity};
use tacfront_core::lang::punctuation;

#[test]
fn keywords_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, keywords::KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(
            keywords::from_str(info.canonical),
            Some(info.id),
            "keyword canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(keywords::as_str(info.id), info.canonical);
        assert_eq!(keywords::category(info.id), info.category);

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate keyword spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn keywords_are_identifier_shaped() {
    for info in keywords::KEYWORDS {
        let mut chars = info.canonical.chars();
        let first = chars.next().expect("keyword spelling must not be empty");
        assert!(first.is_ascii_alphabetic() || first == '_', "{}", info.canonical);
        assert!(chars.all(|c| c.is_ascii_alphanumeric() || c == '_'), "{}", info.canonical);
    }
}

#[test]
fn operators_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, operators::OperatorId> = HashMap::new();

    for info in operators::OPERATORS {
        assert_eq!(operators::from_str(info.spelling), Some(info.id));
        assert_eq!(operators::as_str(info.id), info.spelling);
        assert!(info.spelling.len() <= 2, "operators need at most one char of lookahead");
        if let Some(prev) = seen.insert(info.spelling, info.id) {
            panic!("duplicate operator spelling {:?}: {:?} and {:?}", info.spelling, prev, info.id);
        }
    }
}

#[test]
fn operator_precedence_tiers_are_ordered() {
    use operators::OperatorId::*;

    for rel in [EqEq, NotEq, Lt, Gt, LtEq, GtEq] {
        assert_eq!(operators::precedence(rel), operators::RELATIONAL);
        assert!(!operators::is_prefix(rel));
    }
    for add in [Plus, Minus] {
        assert_eq!(operators::precedence(add), operators::ADDITIVE);
        assert!(operators::is_prefix(add));
    }
    for mul in [Star, Slash] {
        assert_eq!(operators::precedence(mul), operators::MULTIPLICATIVE);
    }
    assert!(operators::RELATIONAL < operators::ADDITIVE);
    assert!(operators::ADDITIVE < operators::MULTIPLICATIVE);
    assert!(operators::OPERATORS.iter().all(|o| o.associativity == Associativity::Left));
}

#[test]
fn punctuation_is_single_char_and_resolvable() {
    for info in punctuation::PUNCTUATION {
        assert_eq!(info.canonical.chars().count(), 1, "{:?}", info.id);
        assert_eq!(punctuation::from_str(info.canonical), Some(info.id));
        let c = info.canonical.chars().next().expect("non-empty");
        assert_eq!(punctuation::from_char(c), Some(info.id));
        assert_eq!(punctuation::category(info.id), info.category);
    }
}

#[test]
fn punctuation_and_operators_do_not_overlap() {
    for p in punctuation::PUNCTUATION {
        assert_eq!(operators::from_str(p.canonical), None, "{} is both", p.canonical);
    }
}
