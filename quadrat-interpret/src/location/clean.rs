/// Normalise a free text place name such as a state or water body.
///
/// Whitespace runs collapse to one space. Text written entirely in capitals
/// is lowercased with only its first letter kept upper case.
pub fn clean_place_name(text: &str) -> Option<String> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return None;
    }

    let all_caps = normalized
        .chars()
        .filter(|c| !c.is_whitespace())
        .all(char::is_uppercase);
    if !all_caps {
        return Some(normalized);
    }

    let lower = normalized.to_lowercase();
    let mut chars = lower.chars();
    Some(match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => lower,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_place_name() {
        assert_eq!(clean_place_name("ONTARIO").as_deref(), Some("Ontario"));
        assert_eq!(clean_place_name("  NORTH   SEA ").as_deref(), Some("North sea"));
        assert_eq!(clean_place_name("Baie de la Seine").as_deref(), Some("Baie de la Seine"));
        assert_eq!(clean_place_name("BC 12").as_deref(), Some("BC 12"));
        assert_eq!(clean_place_name("ÎLE DE RÉ").as_deref(), Some("Île de ré"));
        assert_eq!(clean_place_name("NEW-YORK").as_deref(), Some("NEW-YORK"));
        assert_eq!(clean_place_name("   "), None);
    }
}
