// SPDX-License-Identifier: GPL-3.0-or-later

/// Derive the Web API entity-set name from an entity logical name using the
/// platform's English pluralization rules: consonant + `y` -> `ies`;
/// sibilant endings (`s`, `x`, `z`, `ch`, `sh`) -> `es`; everything else
/// just appends `s`.
pub fn pluralize_entity_name(logical_name: &str) -> String {
    let lower = logical_name.to_lowercase();

    if let Some(stem) = lower.strip_suffix('y') {
        let preceded_by_vowel = stem
            .chars()
            .last()
            .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));
        if !preceded_by_vowel {
            return format!("{stem}ies");
        }
    }

    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{lower}es");
    }

    format!("{lower}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize_entity_name() {
        assert_eq!(pluralize_entity_name("account"), "accounts");
        assert_eq!(pluralize_entity_name("opportunity"), "opportunities");
        assert_eq!(pluralize_entity_name("business"), "businesses");
        assert_eq!(pluralize_entity_name("contact"), "contacts");
    }

    #[test]
    fn test_pluralize_edge_endings() {
        // vowel + y keeps the y...
        assert_eq!(pluralize_entity_name("journey"), "journeys");
        assert_eq!(pluralize_entity_name("fax"), "faxes");
        assert_eq!(pluralize_entity_name("branch"), "branches");
        assert_eq!(pluralize_entity_name("quiz"), "quizes");
    }
}
