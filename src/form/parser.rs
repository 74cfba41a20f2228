// SPDX-License-Identifier: GPL-3.0-or-later

//! Form-XML -> [FormStructure] parsing.
//!
//! The raw document's `languagecode` attributes do NOT update when the
//! server-side UI language changes -- only the `description` text does --
//! so when a caller supplies the LCID of the fetch context, that context
//! is treated as the true language of the text, not the embedded
//! attribute. See [element_labels] for the exact rule.

use crate::{
    LabelError,
    data::{
        BASE_LCID, FormColumn, FormControl, FormHeaderFooter, FormSection, FormStructure, FormTab,
        Label, Lcid,
    },
};
use roxmltree::{Document, Node};

/// Parse a form definition document into a typed tree.
///
/// When `current_lcid` is given (the merge pipeline always does), every
/// element carries at most one label, tagged w/ `current_lcid`. When it is
/// `None`, label entries are returned verbatim as declared in the XML --
/// an inspection mode only, never fed to the merger.
pub fn parse_form_xml(xml: &str, current_lcid: Option<Lcid>) -> Result<FormStructure, LabelError> {
    let doc = Document::parse(xml)?;
    let form = doc.root_element();

    let header = child(form, "header").map(|x| parse_header_footer(x, current_lcid));
    let footer = child(form, "footer").map(|x| parse_header_footer(x, current_lcid));

    let mut tabs = vec![];
    if let Some(tabs_el) = child(form, "tabs") {
        for tab_el in children(tabs_el, "tab") {
            tabs.push(parse_tab(tab_el, current_lcid));
        }
    }

    Ok(FormStructure {
        header,
        tabs,
        footer,
        raw_xml: xml.to_string(),
        raw_xml_by_lcid: None,
    })
}

fn parse_tab(tab_el: Node, current_lcid: Option<Lcid>) -> FormTab {
    let mut columns = vec![];
    if let Some(columns_el) = child(tab_el, "columns") {
        for column_el in children(columns_el, "column") {
            columns.push(parse_column(column_el, current_lcid));
        }
    }

    FormTab {
        id: attr(tab_el, "id"),
        name: opt_attr(tab_el, "name"),
        visible: parse_bool(tab_el.attribute("visible")),
        showlabel: parse_bool(tab_el.attribute("showlabel")),
        labels: element_labels(tab_el, current_lcid),
        columns,
    }
}

fn parse_column(column_el: Node, current_lcid: Option<Lcid>) -> FormColumn {
    let mut sections = vec![];
    if let Some(sections_el) = child(column_el, "sections") {
        for section_el in children(sections_el, "section") {
            sections.push(parse_section(section_el, current_lcid));
        }
    }

    FormColumn {
        width: attr(column_el, "width"),
        sections,
    }
}

fn parse_section(section_el: Node, current_lcid: Option<Lcid>) -> FormSection {
    FormSection {
        id: attr(section_el, "id"),
        name: opt_attr(section_el, "name"),
        visible: parse_bool(section_el.attribute("visible")),
        showlabel: parse_bool(section_el.attribute("showlabel")),
        labels: element_labels(section_el, current_lcid),
        controls: parse_cells(section_el, current_lcid),
    }
}

fn parse_header_footer(region_el: Node, current_lcid: Option<Lcid>) -> FormHeaderFooter {
    FormHeaderFooter {
        controls: parse_cells(region_el, current_lcid),
    }
}

/// Walk `rows > row > cell` under `container` in document order, keeping
/// cells that host a `<control>`. Labels live on the cell; the control
/// element supplies the identity and class attributes.
fn parse_cells(container: Node, current_lcid: Option<Lcid>) -> Vec<FormControl> {
    let mut controls = vec![];
    let Some(rows_el) = child(container, "rows") else {
        return controls;
    };
    for row_el in children(rows_el, "row") {
        for cell_el in children(row_el, "cell") {
            let Some(control_el) = child(cell_el, "control") else {
                continue;
            };
            // cell labels first; some documents hang them off the control...
            let mut labels = element_labels(cell_el, current_lcid);
            if labels.is_empty() {
                labels = element_labels(control_el, current_lcid);
            }
            controls.push(FormControl {
                id: attr(control_el, "id"),
                cell_id: opt_attr(cell_el, "id"),
                name: opt_attr(control_el, "name"),
                class_id: opt_attr(control_el, "classid"),
                datafieldname: opt_attr(control_el, "datafieldname"),
                disabled: parse_bool(control_el.attribute("disabled")),
                visible: parse_bool(control_el.attribute("visible")),
                labels,
            });
        }
    }
    controls
}

/// Extract the labels of one element, honoring the current language
/// context.
///
/// Only *direct child* `<labels>`/`<label>` elements count -- descending
/// further would pick up labels belonging to nested unrelated structures.
/// With a current LCID: the entry declared for that LCID wins; failing
/// that, an entry declared for the base language (1033) is included
/// re-tagged as the current LCID (fallback-as-if-translated); everything
/// else is dropped.
pub(crate) fn element_labels(el: Node, current_lcid: Option<Lcid>) -> Vec<Label> {
    let Some(labels_el) = child(el, "labels") else {
        return vec![];
    };
    let raw: Vec<(Lcid, &str)> = children(labels_el, "label")
        .filter_map(|l| {
            let lcid: Lcid = l.attribute("languagecode")?.trim().parse().ok()?;
            Some((lcid, l.attribute("description").unwrap_or("")))
        })
        .collect();

    match current_lcid {
        None => raw
            .into_iter()
            .map(|(lcid, text)| Label::new(lcid, text))
            .collect(),
        Some(current) => {
            if let Some((_, text)) = raw.iter().find(|(lcid, _)| *lcid == current) {
                vec![Label::new(current, *text)]
            } else if let Some((_, text)) = raw.iter().find(|(lcid, _)| *lcid == BASE_LCID) {
                vec![Label::new(current, *text)]
            } else {
                vec![]
            }
        }
    }
}

/// Permissive boolean attribute: `"true"`/`"1"` -> true, `"false"`/`"0"`
/// -> false, anything else or absent -> `None`.
fn parse_bool(v: Option<&str>) -> Option<bool> {
    match v {
        Some("true") | Some("1") => Some(true),
        Some("false") | Some("0") => Some(false),
        _ => None,
    }
}

fn attr(n: Node, name: &str) -> String {
    n.attribute(name).unwrap_or_default().to_string()
}

fn opt_attr(n: Node, name: &str) -> Option<String> {
    n.attribute(name).map(String::from)
}

pub(crate) fn child<'a, 'input>(n: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    n.children().find(|x| x.is_element() && x.has_tag_name(name))
}

pub(crate) fn children<'a, 'input>(
    n: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    n.children()
        .filter(move |x| x.is_element() && x.has_tag_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    const TV: &str = r#"<form>
  <header id="{h1}">
    <rows>
      <row>
        <cell id="{hc1}">
          <labels>
            <label description="Owner" languagecode="1033" />
          </labels>
          <control id="header_ownerid" classid="{270BD3DB-D9AF-4782-9025-509E298DEC0A}" datafieldname="ownerid" />
        </cell>
      </row>
    </rows>
  </header>
  <tabs>
    <tab id="{t1}" name="general" visible="true" showlabel="1">
      <labels>
        <label description="General" languagecode="1033" />
        <label description="Général" languagecode="1036" />
      </labels>
      <columns>
        <column width="50%">
          <sections>
            <section id="{s1}" name="main" showlabel="false">
              <labels>
                <label description="Main" languagecode="1033" />
              </labels>
              <rows>
                <row>
                  <cell id="{c1}">
                    <labels>
                      <label description="Account Name" languagecode="1033" />
                    </labels>
                    <control id="name" classid="{4273EDBD-AC1D-40D3-9FB2-095C621B552D}" datafieldname="name" disabled="0" />
                  </cell>
                </row>
                <row>
                  <cell id="{c2}">
                    <labels>
                      <label description="Contacts" languagecode="1033" />
                    </labels>
                    <control id="subgrid_1" classid="{E7A81278-8635-4D9E-8D4D-59480B391C5B}" />
                  </cell>
                </row>
                <row>
                  <cell id="{c3}" />
                </row>
              </rows>
            </section>
          </sections>
        </column>
      </columns>
    </tab>
  </tabs>
</form>"#;

    #[traced_test]
    #[test]
    fn test_shape() {
        let s = parse_form_xml(TV, Some(1033)).unwrap();
        assert!(s.header.is_some());
        assert!(s.footer.is_none());
        assert_eq!(s.tabs.len(), 1);

        let tab = &s.tabs[0];
        assert_eq!(tab.id, "{t1}");
        assert_eq!(tab.name.as_deref(), Some("general"));
        assert_eq!(tab.visible, Some(true));
        assert_eq!(tab.showlabel, Some(true));
        assert_eq!(tab.columns.len(), 1);
        assert_eq!(tab.columns[0].width, "50%");

        let section = &tab.columns[0].sections[0];
        assert_eq!(section.showlabel, Some(false));
        // the empty cell {c3} hosts no control and is skipped...
        assert_eq!(section.controls.len(), 2);

        let control = &section.controls[0];
        assert_eq!(control.id, "name");
        assert_eq!(control.cell_id.as_deref(), Some("{c1}"));
        assert_eq!(control.datafieldname.as_deref(), Some("name"));
        assert_eq!(control.disabled, Some(false));
        assert_eq!(control.visible, None);
    }

    #[traced_test]
    #[test]
    fn test_current_lcid_filter() {
        let s = parse_form_xml(TV, Some(1036)).unwrap();
        let tab = &s.tabs[0];
        // declared French label wins...
        assert_eq!(tab.labels, vec![Label::new(1036, "Général")]);
        // no French entry on the section: base language text re-tagged...
        let section = &tab.columns[0].sections[0];
        assert_eq!(section.labels, vec![Label::new(1036, "Main")]);
        // at most one label per element in context mode...
        for c in &section.controls {
            assert!(c.labels.len() <= 1);
            assert!(c.labels.iter().all(|x| x.language_code == 1036));
        }
    }

    #[traced_test]
    #[test]
    fn test_verbatim_mode() {
        let s = parse_form_xml(TV, None).unwrap();
        let tab = &s.tabs[0];
        assert_eq!(tab.labels.len(), 2);
        assert_eq!(tab.labels[0], Label::new(1033, "General"));
        assert_eq!(tab.labels[1], Label::new(1036, "Général"));
    }

    #[test]
    fn test_direct_child_labels_only() {
        // the section's only <labels> sits inside a nested cell; the
        // section itself must come back label-less...
        const NESTED: &str = r#"<form><tabs><tab id="t">
          <columns><column width="100%"><sections>
            <section id="s">
              <rows><row><cell id="c">
                <labels><label description="Inner" languagecode="1033" /></labels>
                <control id="x" />
              </cell></row></rows>
            </section>
          </sections></column></columns>
        </tab></tabs></form>"#;
        let s = parse_form_xml(NESTED, Some(1033)).unwrap();
        let section = &s.tabs[0].columns[0].sections[0];
        assert!(section.labels.is_empty());
        assert_eq!(section.controls[0].labels, vec![Label::new(1033, "Inner")]);
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            parse_form_xml("<form><tabs>", Some(1033)),
            Err(LabelError::Parse(_))
        ));
    }
}
