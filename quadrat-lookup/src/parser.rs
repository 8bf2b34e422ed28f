//! Decomposition of canonical scientific names.
//!
//! Handles the shapes a backbone returns as canonical names: uninomials,
//! binomials and trinomials with an optional rank marker and subgenus.
//! Hybrid formulas and informal names are rejected.

use crate::NameParser;
use quadrat_core::{NameParts, Rank};

const RANK_MARKERS: &[&str] = &[
    "subsp.", "ssp.", "var.", "subvar.", "f.", "fo.", "forma", "subf.", "cv.", "morph", "nothosubsp.",
    "nothovar.",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalNameParser;

impl CanonicalNameParser {
    pub fn new() -> Self {
        Self
    }
}

fn is_genus(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            chars.all(|c| c.is_ascii_lowercase() || c == '-')
        }
        _ => false,
    }
}

fn is_epithet(token: &str) -> bool {
    !token.is_empty()
        && token.chars().all(|c| c.is_ascii_lowercase() || c == '-')
        && !token.starts_with('-')
}

fn is_subgenus(token: &str) -> bool {
    token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .map(is_genus)
        .unwrap_or(false)
}

impl NameParser for CanonicalNameParser {
    fn parse(&self, canonical_name: &str, rank: Option<Rank>) -> Option<NameParts> {
        let tokens: Vec<&str> = canonical_name.split_whitespace().collect();
        let (&first, rest) = tokens.split_first()?;

        if canonical_name.chars().any(|c| c.is_ascii_digit() || c == '×')
            || tokens.iter().any(|t| *t == "x" || *t == "X")
        {
            return None;
        }
        if !is_genus(first) {
            return None;
        }

        // Uninomials above genus carry no generic part
        if rest.is_empty() {
            return match rank {
                Some(r) if r < Rank::Genus => Some(NameParts::default()),
                _ => Some(NameParts {
                    generic_name: Some(first.to_string()),
                    ..Default::default()
                }),
            };
        }

        let mut rest = rest.iter().copied().peekable();
        if rest.peek().map(|t| is_subgenus(t)).unwrap_or(false) {
            rest.next();
        }

        let mut parts = NameParts {
            generic_name: Some(first.to_string()),
            ..Default::default()
        };

        match rest.next() {
            Some(epithet) if is_epithet(epithet) => parts.specific_epithet = Some(epithet.to_string()),
            Some(_) => return None,
            None => return Some(parts),
        }

        let mut next = rest.next();
        if next.map(|t| RANK_MARKERS.contains(&t)).unwrap_or(false) {
            next = rest.next();
            if next.is_none() {
                return None;
            }
        }
        match next {
            Some(epithet) if is_epithet(epithet) => {
                parts.infraspecific_epithet = Some(epithet.to_string())
            }
            Some(_) => return None,
            None => {}
        }

        if rest.next().is_some() {
            return None;
        }
        Some(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str) -> Option<NameParts> {
        CanonicalNameParser::new().parse(name, None)
    }

    #[test]
    fn test_binomial() {
        let parts = parse("Puma concolor").unwrap();
        assert_eq!(parts.generic_name.as_deref(), Some("Puma"));
        assert_eq!(parts.specific_epithet.as_deref(), Some("concolor"));
        assert_eq!(parts.infraspecific_epithet, None);
    }

    #[test]
    fn test_trinomial_with_and_without_marker() {
        let parts = parse("Abies alba var. acutifolia").unwrap();
        assert_eq!(parts.infraspecific_epithet.as_deref(), Some("acutifolia"));

        let parts = parse("Puma concolor couguar").unwrap();
        assert_eq!(parts.infraspecific_epithet.as_deref(), Some("couguar"));
    }

    #[test]
    fn test_subgenus_is_skipped() {
        let parts = parse("Aedes (Stegomyia) aegypti").unwrap();
        assert_eq!(parts.generic_name.as_deref(), Some("Aedes"));
        assert_eq!(parts.specific_epithet.as_deref(), Some("aegypti"));
    }

    #[test]
    fn test_uninomials() {
        assert_eq!(parse("Puma").unwrap().generic_name.as_deref(), Some("Puma"));

        let family = CanonicalNameParser::new().parse("Felidae", Some(Rank::Family)).unwrap();
        assert_eq!(family, NameParts::default());
    }

    #[test]
    fn test_unparsable() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("puma concolor"), None);
        assert_eq!(parse("Salix × rubens"), None);
        assert_eq!(parse("Quercus x hispanica"), None);
        assert_eq!(parse("Bacillus sp. 1234"), None);
        assert_eq!(parse("Puma Concolor"), None);
        assert_eq!(parse("Abies alba var."), None);
        assert_eq!(parse("Abies alba alba alba"), None);
    }
}
