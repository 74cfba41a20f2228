// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry of form-control class ids whose labels must not be edited.
//!
//! The `classid` attribute of a `<control>` element identifies the widget
//! rendering the cell. Container and system widgets (sub-grids, quick view
//! forms, timelines, notes, maps, knowledge-base search, action cards) own
//! their captions elsewhere in the platform; rewriting their cell labels
//! either has no visible effect or corrupts the form designer's view, so
//! the writer skips them wholesale.

/// Class ids of container/system controls excluded from label editing.
/// Stored normalized: upper-case, no surrounding braces.
const EXCLUDED_CLASS_IDS: &[(&str, &str)] = &[
    ("E7A81278-8635-4D9E-8D4D-59480B391C5B", "sub-grid"),
    ("5C5600E0-1D6E-4205-A272-BE80DA87FD42", "quick view form"),
    ("9FDF5F91-88B1-47F4-AD53-C11EFC01A01D", "timeline"),
    ("06375649-C143-495E-A496-C962E5B4488E", "notes"),
    ("62B0DF79-0464-470F-8AF7-4483CFEA0C7D", "map"),
    ("CA3F9859-5383-4B54-B93B-62BE8DF1C5E2", "knowledge-base search"),
    ("9C5D7E3A-BA39-4A83-A65E-2CBDF9A8A6B4", "action cards"),
];

fn normalize(class_id: &str) -> String {
    class_id
        .trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .to_uppercase()
}

/// TRUE when a control w/ the given `classid` attribute may have its labels
/// edited. An absent class id is treated as editable; only a positive match
/// against the exclusion registry disables editing.
pub fn is_label_editable(class_id: Option<&str>) -> bool {
    match class_id {
        None => true,
        Some(x) => {
            let needle = normalize(x);
            !EXCLUDED_CLASS_IDS.iter().any(|(id, _)| *id == needle)
        }
    }
}

/// Human-readable name of an excluded control class, if it is one.
pub fn excluded_class_name(class_id: &str) -> Option<&'static str> {
    let needle = normalize(class_id);
    EXCLUDED_CLASS_IDS
        .iter()
        .find(|(id, _)| *id == needle)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editable_gate() {
        assert!(is_label_editable(None));
        assert!(is_label_editable(Some("{4273EDBD-AC1D-40D3-9FB2-095C621B552D}")));
        // braces + case must not matter...
        assert!(!is_label_editable(Some("{e7a81278-8635-4d9e-8d4d-59480b391c5b}")));
        assert!(!is_label_editable(Some("E7A81278-8635-4D9E-8D4D-59480B391C5B")));
    }

    #[test]
    fn test_excluded_class_name() {
        assert_eq!(
            excluded_class_name("{06375649-c143-495e-a496-c962e5b4488e}"),
            Some("notes")
        );
        assert_eq!(excluded_class_name("{4273EDBD-AC1D-40D3-9FB2-095C621B552D}"), None);
    }
}
