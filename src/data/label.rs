// SPDX-License-Identifier: GPL-3.0-or-later

use crate::data::Lcid;
use core::fmt;
use serde::{Deserialize, Serialize};

/// One localized text value for one element in one language. A merged form
/// structure holds at most one [Label] per (element, LCID) pair.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// LCID the text belongs to.
    pub language_code: Lcid,
    /// The localized text proper.
    pub label: String,
}

impl Label {
    /// Construct a new instance.
    pub fn new(language_code: Lcid, label: impl Into<String>) -> Self {
        Label {
            language_code,
            label: label.into(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] '{}'", self.language_code, self.label)
    }
}

/// Append `label` to `labels` unless an exact `(languageCode, label)` twin
/// is already present. Guards against the parser's base-language fallback
/// injecting a duplicate that happens to equal one already captured for
/// that LCID.
pub fn push_label_dedup(labels: &mut Vec<Label>, label: Label) {
    if !labels
        .iter()
        .any(|x| x.language_code == label.language_code && x.label == label.label)
    {
        labels.push(label)
    }
}

/// Return the label text for `lcid` w/in `labels` if present.
pub fn label_for<'a>(labels: &'a [Label], lcid: Lcid) -> Option<&'a str> {
    labels
        .iter()
        .find(|x| x.language_code == lcid)
        .map(|x| x.label.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_label_dedup() {
        let mut labels = vec![Label::new(1033, "Name")];
        push_label_dedup(&mut labels, Label::new(1033, "Name"));
        assert_eq!(labels.len(), 1);

        push_label_dedup(&mut labels, Label::new(1036, "Name"));
        push_label_dedup(&mut labels, Label::new(1033, "Nom"));
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn test_label_for() {
        let labels = vec![Label::new(1033, "Name"), Label::new(1036, "Nom")];
        assert_eq!(label_for(&labels, 1036), Some("Nom"));
        assert_eq!(label_for(&labels, 1031), None);
    }
}
