// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(dead_code)]

use dataverse_labels::api::mock::MockOrg;
use dataverse_labels::data::Lcid;

pub(crate) const BASE: &str = "https://mock.crm.dynamics.com";

/// Build a small account form document the way the platform serves it
/// under one language session: the `languagecode` attributes still declare
/// the codes baked into the document at design time, only the description
/// text follows the session language.
pub(crate) fn form_doc(tab: &str, section: &str, name_label: &str, number_label: &str) -> String {
    format!(
        r#"<form>
  <tabs>
    <tab id="{{t1}}" name="general" visible="true">
      <labels>
        <label description="{tab}" languagecode="1033" />
      </labels>
      <columns>
        <column width="100%">
          <sections>
            <section id="{{s1}}" name="main" showlabel="true">
              <labels>
                <label description="{section}" languagecode="1033" />
              </labels>
              <rows>
                <row>
                  <cell id="{{c1}}">
                    <labels>
                      <label description="{name_label}" languagecode="1033" />
                    </labels>
                    <control id="name" classid="{{4273EDBD-AC1D-40D3-9FB2-095C621B552D}}" datafieldname="name" />
                  </cell>
                </row>
                <row>
                  <cell id="{{c2}}">
                    <labels>
                      <label description="{number_label}" languagecode="1033" />
                    </labels>
                    <control id="accountnumber" classid="{{4273EDBD-AC1D-40D3-9FB2-095C621B552D}}" datafieldname="accountnumber" />
                  </cell>
                </row>
              </rows>
            </section>
          </sections>
        </column>
      </columns>
    </tab>
  </tabs>
</form>"#
    )
}

/// An org provisioned w/ English + French where the French session shows a
/// translated tab/section/name but an untranslated (still English) account
/// number -- the canonical missing-translation scenario.
pub(crate) fn bilingual_org() -> MockOrg {
    let org = MockOrg::new(&[1033, 1036]);
    org.set_form_xml(
        1033,
        form_doc("General", "Main", "Account Name", "Account Number"),
    );
    org.set_form_xml(
        1036,
        form_doc("Général", "Principal", "Nom du compte", "Account Number"),
    );
    org
}

pub(crate) fn lcids(labels: &[dataverse_labels::data::Label]) -> Vec<Lcid> {
    labels.iter().map(|x| x.language_code).collect()
}
