// SPDX-License-Identifier: GPL-3.0-or-later

//! Splicing edited labels back into the per-language form document.
//!
//! The writer walks the same document order as the parser and rewrites
//! only `<label>` elements w/in matched, label-editable elements; the rest
//! of the document is carried through byte-for-byte. Rewrites are collected
//! as byte-range splices against the original text and applied back to
//! front, then the output passes the space-before-self-closing-tag fixup
//! the server's own serializer uses.

use crate::{
    LabelError,
    data::{FormControl, FormStructure, Label, Lcid, is_label_editable, label_for},
    form::parser::{child, children},
};
use quick_xml::escape::escape;
use roxmltree::{Document, Node};
use std::{fmt::Write, ops::Range};

type Edit = (Range<usize>, String);

/// Produce a copy of `xml` w/ the label text for `lcid` taken from
/// `structure`, for every tab, section and (editable) control, aligned
/// positionally exactly like the parser walks them.
///
/// W/in a matched element: if a `<label>` declared for `lcid` exists its
/// `description` is overwritten; otherwise the *first* `<label>` child is
/// repurposed -- both its `languagecode` and `description` are rewritten.
/// A document w/ fewer label entries than languages edited thus has its
/// label slots reassigned, a destructive but deliberate choice that keeps
/// the document's label cardinality stable. Elements whose structure
/// counterpart carries no label for `lcid` are left untouched.
pub fn update_labels_in_xml(
    xml: &str,
    structure: &FormStructure,
    lcid: Lcid,
) -> Result<String, LabelError> {
    let doc = Document::parse(xml)?;
    let form = doc.root_element();
    let mut edits: Vec<Edit> = vec![];

    if let (Some(header_el), Some(header)) = (child(form, "header"), structure.header.as_ref()) {
        splice_cells(header_el, &header.controls, lcid, &mut edits);
    }

    if let Some(tabs_el) = child(form, "tabs") {
        for (tab_el, tab) in children(tabs_el, "tab").zip(structure.tabs.iter()) {
            splice_element(tab_el, &tab.labels, lcid, &mut edits);
            let Some(columns_el) = child(tab_el, "columns") else {
                continue;
            };
            for (column_el, column) in children(columns_el, "column").zip(tab.columns.iter()) {
                let Some(sections_el) = child(column_el, "sections") else {
                    continue;
                };
                for (section_el, section) in
                    children(sections_el, "section").zip(column.sections.iter())
                {
                    splice_element(section_el, &section.labels, lcid, &mut edits);
                    splice_cells(section_el, &section.controls, lcid, &mut edits);
                }
            }
        }
    }

    if let (Some(footer_el), Some(footer)) = (child(form, "footer"), structure.footer.as_ref()) {
        splice_cells(footer_el, &footer.controls, lcid, &mut edits);
    }

    Ok(fix_self_closing_tags(&apply_edits(xml, edits)))
}

/// Same `rows > row > cell` walk as the parser, zipped against the edited
/// controls. Container/system controls are skipped wholesale -- their
/// captions are not ours to rewrite.
fn splice_cells(container: Node, controls: &[FormControl], lcid: Lcid, edits: &mut Vec<Edit>) {
    let Some(rows_el) = child(container, "rows") else {
        return;
    };
    let cell_els = children(rows_el, "row")
        .flat_map(|row| children(row, "cell"))
        .filter(|cell| child(*cell, "control").is_some());

    for (cell_el, control) in cell_els.zip(controls.iter()) {
        let control_el = match child(cell_el, "control") {
            Some(x) => x,
            None => continue,
        };
        if !is_label_editable(control_el.attribute("classid")) {
            continue;
        }
        // labels host mirrors the parser: the cell first, then the control...
        if child(cell_el, "labels").is_some() {
            splice_element(cell_el, &control.labels, lcid, edits);
        } else {
            splice_element(control_el, &control.labels, lcid, edits);
        }
    }
}

fn splice_element(host_el: Node, labels: &[Label], lcid: Lcid, edits: &mut Vec<Edit>) {
    // no label for this LCID was ever requested: leave the element alone...
    let Some(text) = label_for(labels, lcid) else {
        return;
    };
    let Some(labels_el) = child(host_el, "labels") else {
        return;
    };
    let label_els: Vec<Node> = children(labels_el, "label").collect();
    if label_els.is_empty() {
        return;
    }

    let declared = label_els.iter().find(|l| {
        l.attribute("languagecode")
            .and_then(|x| x.trim().parse::<Lcid>().ok())
            == Some(lcid)
    });
    match declared {
        Some(l) => edits.push((l.range(), render_label(*l, lcid, text, false))),
        None => edits.push((label_els[0].range(), render_label(label_els[0], lcid, text, true))),
    }
}

/// Regenerate one `<label>` tag, preserving attribute order, replacing
/// `description` (and `languagecode` when repurposing a slot).
fn render_label(node: Node, lcid: Lcid, text: &str, retag: bool) -> String {
    let mut out = String::from("<label");
    let mut wrote_description = false;
    let mut wrote_languagecode = false;

    for a in node.attributes() {
        match a.name() {
            "description" => {
                wrote_description = true;
                let _ = write!(out, " description=\"{}\"", escape(text));
            }
            "languagecode" if retag => {
                wrote_languagecode = true;
                let _ = write!(out, " languagecode=\"{lcid}\"");
            }
            name => {
                let _ = write!(out, " {}=\"{}\"", name, escape(a.value()));
            }
        }
    }
    if !wrote_description {
        let _ = write!(out, " description=\"{}\"", escape(text));
    }
    if retag && !wrote_languagecode {
        let _ = write!(out, " languagecode=\"{lcid}\"");
    }
    out.push_str(" />");
    out
}

fn apply_edits(xml: &str, mut edits: Vec<Edit>) -> String {
    // splices target distinct label elements so ranges never overlap;
    // applying back to front keeps earlier offsets valid...
    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));
    let mut out = xml.to_string();
    for (range, replacement) in edits {
        out.replace_range(range, &replacement);
    }
    out
}

/// Ensure every self-closing tag ends in ` />` (space included), the
/// formatting the server's serializer emits. Quote-aware and tag-scoped,
/// so a `/>` sequence inside an attribute value survives untouched.
pub(crate) fn fix_self_closing_tags(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len() + 16);
    let mut in_tag = false;
    let mut quote: Option<char> = None;
    let mut chars = xml.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                out.push(c);
            }
            None if in_tag => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    out.push(c);
                }
                '>' => {
                    in_tag = false;
                    out.push(c);
                }
                '/' if chars.peek() == Some(&'>') => {
                    if !out.ends_with(' ') {
                        out.push(' ');
                    }
                    out.push(c);
                }
                _ => out.push(c),
            },
            None => {
                if c == '<' {
                    in_tag = true;
                }
                out.push(c);
            }
        }
    }
    out
}
