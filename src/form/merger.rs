// SPDX-License-Identifier: GPL-3.0-or-later

//! Combining N per-language parses of one form into a single structure
//! holding all labels.
//!
//! Alignment is positional: `tabs[k]` of every input is assumed to
//! correspond to `tabs[k]` of the first, and likewise down the tree. Every
//! language variant of the same form has identical structural shape and
//! ordering -- only label text differs. If that invariant is ever broken
//! the zip walks silently drop the excess elements of the longer side.

use crate::data::{FormControl, FormStructure, Label, Lcid, push_label_dedup};
use std::collections::BTreeMap;

/// Merge per-language parses into one structure. The first entry supplies
/// the shape; every entry (the first included) contributes its labels,
/// de-duplicated by exact `(languageCode, label)` pair. Merging zero
/// inputs yields an empty structure, never an error.
pub fn merge_form_structures(
    per_language: &[(Lcid, FormStructure)],
    raw_xml_by_lcid: BTreeMap<Lcid, String>,
) -> FormStructure {
    let Some((_, first)) = per_language.first() else {
        return FormStructure {
            raw_xml_by_lcid: Some(raw_xml_by_lcid),
            ..FormStructure::empty()
        };
    };

    let mut base = first.clone();
    clear_labels(&mut base);

    for (_, structure) in per_language {
        merge_into(&mut base, structure);
    }

    base.raw_xml_by_lcid = Some(raw_xml_by_lcid);
    base
}

fn clear_labels(s: &mut FormStructure) {
    let clear_controls = |controls: &mut Vec<FormControl>| {
        for c in controls {
            c.labels.clear();
        }
    };
    if let Some(h) = s.header.as_mut() {
        clear_controls(&mut h.controls);
    }
    if let Some(f) = s.footer.as_mut() {
        clear_controls(&mut f.controls);
    }
    for tab in s.tabs.iter_mut() {
        tab.labels.clear();
        for column in tab.columns.iter_mut() {
            for section in column.sections.iter_mut() {
                section.labels.clear();
                clear_controls(&mut section.controls);
            }
        }
    }
}

fn merge_into(base: &mut FormStructure, other: &FormStructure) {
    if let (Some(bh), Some(oh)) = (base.header.as_mut(), other.header.as_ref()) {
        merge_controls(&mut bh.controls, &oh.controls);
    }
    if let (Some(bf), Some(of)) = (base.footer.as_mut(), other.footer.as_ref()) {
        merge_controls(&mut bf.controls, &of.controls);
    }
    for (bt, ot) in base.tabs.iter_mut().zip(other.tabs.iter()) {
        merge_labels(&mut bt.labels, &ot.labels);
        for (bc, oc) in bt.columns.iter_mut().zip(ot.columns.iter()) {
            for (bs, os) in bc.sections.iter_mut().zip(oc.sections.iter()) {
                merge_labels(&mut bs.labels, &os.labels);
                merge_controls(&mut bs.controls, &os.controls);
            }
        }
    }
}

fn merge_controls(base: &mut [FormControl], other: &[FormControl]) {
    for (bc, oc) in base.iter_mut().zip(other.iter()) {
        merge_labels(&mut bc.labels, &oc.labels);
    }
}

fn merge_labels(base: &mut Vec<Label>, other: &[Label]) {
    for label in other {
        push_label_dedup(base, label.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::parse_form_xml;
    use tracing_test::traced_test;

    fn doc(tab_label: &str, control_label: &str) -> String {
        format!(
            r#"<form><tabs><tab id="t">
  <labels><label description="{tab_label}" languagecode="1033" /></labels>
  <columns><column width="100%"><sections>
    <section id="s">
      <rows><row><cell id="c">
        <labels><label description="{control_label}" languagecode="1033" /></labels>
        <control id="name" datafieldname="name" />
      </cell></row></rows>
    </section>
  </sections></column></columns>
</tab></tabs></form>"#
        )
    }

    #[traced_test]
    #[test]
    fn test_merge_union_and_alignment() {
        let en = parse_form_xml(&doc("General", "Name"), Some(1033)).unwrap();
        let fr = parse_form_xml(&doc("Général", "Nom"), Some(1036)).unwrap();

        let raw = BTreeMap::from([(1033, en.raw_xml.clone()), (1036, fr.raw_xml.clone())]);
        let merged = merge_form_structures(&[(1033, en), (1036, fr)], raw);

        assert_eq!(merged.tabs.len(), 1);
        let tab = &merged.tabs[0];
        assert_eq!(tab.labels.len(), 2);
        assert_eq!(
            tab.labels,
            vec![Label::new(1033, "General"), Label::new(1036, "Général")]
        );

        let control = &tab.columns[0].sections[0].controls[0];
        assert_eq!(
            control.labels,
            vec![Label::new(1033, "Name"), Label::new(1036, "Nom")]
        );

        assert_eq!(merged.raw_xml_by_lcid.as_ref().map(|x| x.len()), Some(2));
    }

    #[traced_test]
    #[test]
    fn test_merge_dedups_fallback_twins() {
        // the French-context parse re-tags the 1033 text when no real
        // French label exists; merging it w/ a genuine 1036 parse of the
        // same text must not yield identical twins...
        let a = parse_form_xml(&doc("General", "Name"), Some(1033)).unwrap();
        let b = parse_form_xml(&doc("General", "Name"), Some(1033)).unwrap();

        let merged = merge_form_structures(&[(1033, a), (1033, b)], BTreeMap::new());
        let tab = &merged.tabs[0];
        assert_eq!(tab.labels, vec![Label::new(1033, "General")]);
        let control = &tab.columns[0].sections[0].controls[0];
        assert_eq!(control.labels, vec![Label::new(1033, "Name")]);
    }

    #[test]
    fn test_merge_empty_input() {
        let merged = merge_form_structures(&[], BTreeMap::new());
        assert!(merged.tabs.is_empty());
        assert!(merged.raw_xml.is_empty());
        assert_eq!(merged.raw_xml_by_lcid, Some(BTreeMap::new()));
    }
}
