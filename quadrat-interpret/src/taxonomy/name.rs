//! Cleaning of verbatim name fragments and assembly of a query name

const PLACEHOLDERS: &[&str] = &["null", "\\n", "?"];

const QUOTES: &[char] = &['"', '\'', '“', '”', '‘', '’'];

/// Normalised name text, or None for blanks and placeholders
pub fn clean_name(text: Option<&str>) -> Option<String> {
    let text = text?;
    let spaced: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let unquoted = collapsed.trim_matches(QUOTES).trim();

    if unquoted.is_empty() || PLACEHOLDERS.contains(&unquoted.to_lowercase().as_str()) {
        return None;
    }
    Some(unquoted.to_string())
}

/// Cleaned epithet without any trailing authorship
pub fn clean_epithet(text: Option<&str>) -> Option<String> {
    let cleaned = clean_name(text)?;
    cleaned.split_whitespace().next().map(str::to_string)
}

/// The full scientific name if given, else one assembled from its parts.
///
/// The generic name is preferred over the genus for the first word.
pub fn build_scientific_name(
    scientific_name: Option<&str>,
    generic_name: Option<&str>,
    genus: Option<&str>,
    specific_epithet: Option<&str>,
    infraspecific_epithet: Option<&str>,
) -> Option<String> {
    if let Some(name) = clean_name(scientific_name) {
        return Some(name);
    }

    let first = clean_name(generic_name).or_else(|| clean_name(genus))?;
    let mut parts = vec![first];
    if let Some(epithet) = clean_epithet(specific_epithet) {
        parts.push(epithet);
        if let Some(infra) = clean_epithet(infraspecific_epithet) {
            parts.push(infra);
        }
    }
    Some(parts.join(" "))
}
