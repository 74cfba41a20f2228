// SPDX-License-Identifier: GPL-3.0-or-later

//! Entity attribute display names.
//!
//! Reads go through the Web API; writes go through the legacy SOAP
//! `Execute` endpoint carrying an `UpdateAttributeRequest`, b/c the Web API
//! offers no label-merge update for attribute metadata. `MergeLabels=true`
//! keeps every language the caller did not touch.

use crate::{
    LabelError,
    api::{Transport, localized_labels},
    config::config,
    data::Label,
};
use quick_xml::escape::escape;
use std::fmt::Write;
use tracing::debug;

const ODATA_TYPE_PREFIX: &str = "#Microsoft.Dynamics.CRM.";
const EXECUTE_ACTION: &str =
    "http://schemas.microsoft.com/xrm/2011/Contracts/Services/IOrganizationService/Execute";

fn attribute_url(base_url: &str, entity: &str, attribute: &str, select: &str) -> String {
    format!(
        "{}/EntityDefinitions(LogicalName='{}')/Attributes(LogicalName='{}')?$select={}",
        config().api_root(base_url),
        entity,
        attribute,
        select
    )
}

/// Fetch the localized display names of one entity attribute.
pub async fn attribute_display_name<T: Transport>(
    t: &T,
    base_url: &str,
    entity: &str,
    attribute: &str,
) -> Result<Vec<Label>, LabelError> {
    let url = attribute_url(base_url, entity, attribute, "DisplayName");
    let json = t.get_json(&url).await?;
    Ok(localized_labels(&json["DisplayName"]))
}

/// Update the localized display names of one entity attribute, merging w/
/// the labels already on the org (languages not present in `labels` are
/// left alone). The caller must publish the entity afterwards for the
/// change to become visible.
pub async fn update_attribute_display_name<T: Transport>(
    t: &T,
    base_url: &str,
    entity: &str,
    attribute: &str,
    labels: &[Label],
) -> Result<(), LabelError> {
    let url = attribute_url(base_url, entity, attribute, "MetadataId");
    let json = t.get_json(&url).await?;

    let metadata_id = json["MetadataId"]
        .as_str()
        .ok_or(LabelError::MissingField("attribute lacks MetadataId".into()))?
        .to_string();
    let odata_type = json["@odata.type"]
        .as_str()
        .ok_or(LabelError::MissingField("attribute lacks @odata.type".into()))?;
    // "#Microsoft.Dynamics.CRM.StringAttributeMetadata" names the concrete
    // SOAP contract type to declare on the payload...
    let soap_type = odata_type.strip_prefix(ODATA_TYPE_PREFIX).ok_or(LabelError::Runtime(
        format!("Unexpected attribute @odata.type '{odata_type}'").into(),
    ))?;

    let envelope = update_attribute_envelope(entity, attribute, &metadata_id, soap_type, labels);
    debug!(
        "Updating display name of {}.{} ({} label(s))",
        entity,
        attribute,
        labels.len()
    );

    let soap_url = format!(
        "{}/XRMServices/2011/Organization.svc/web",
        base_url.trim_end_matches('/')
    );
    t.post_soap(&soap_url, EXECUTE_ACTION, &envelope).await?;
    Ok(())
}

fn update_attribute_envelope(
    entity: &str,
    attribute: &str,
    metadata_id: &str,
    soap_type: &str,
    labels: &[Label],
) -> String {
    let mut localized = String::new();
    for l in labels {
        let _ = write!(
            localized,
            "<e:LocalizedLabel><e:Label>{}</e:Label><e:LanguageCode>{}</e:LanguageCode></e:LocalizedLabel>",
            escape(l.label.as_str()),
            l.language_code
        );
    }

    format!(
        concat!(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">"#,
            "<s:Body>",
            r#"<Execute xmlns="http://schemas.microsoft.com/xrm/2011/Contracts/Services">"#,
            r#"<request xmlns:a="http://schemas.microsoft.com/xrm/2011/Contracts""#,
            r#" xmlns:i="http://www.w3.org/2001/XMLSchema-instance""#,
            r#" i:type="b:UpdateAttributeRequest""#,
            r#" xmlns:b="http://schemas.microsoft.com/xrm/2011/Contracts/Messages">"#,
            r#"<a:Parameters xmlns:c="http://schemas.datacontract.org/2004/07/System.Collections.Generic">"#,
            "<a:KeyValuePairOfstringanyType><c:key>Attribute</c:key>",
            r#"<c:value i:type="d:{soap_type}" xmlns:d="http://schemas.microsoft.com/xrm/2011/Metadata">"#,
            "<d:MetadataId>{metadata_id}</d:MetadataId>",
            r#"<d:DisplayName xmlns:e="http://schemas.microsoft.com/xrm/2011/Contracts">"#,
            "<e:LocalizedLabels>{localized}</e:LocalizedLabels>",
            "</d:DisplayName>",
            "<d:LogicalName>{attribute}</d:LogicalName>",
            "</c:value></a:KeyValuePairOfstringanyType>",
            "<a:KeyValuePairOfstringanyType><c:key>EntityName</c:key>",
            r#"<c:value i:type="f:string" xmlns:f="http://www.w3.org/2001/XMLSchema">{entity}</c:value>"#,
            "</a:KeyValuePairOfstringanyType>",
            "<a:KeyValuePairOfstringanyType><c:key>MergeLabels</c:key>",
            r#"<c:value i:type="f:boolean" xmlns:f="http://www.w3.org/2001/XMLSchema">true</c:value>"#,
            "</a:KeyValuePairOfstringanyType>",
            "</a:Parameters>",
            r#"<a:RequestId i:nil="true" />"#,
            "<a:RequestName>UpdateAttribute</a:RequestName>",
            "</request></Execute></s:Body></s:Envelope>",
        ),
        soap_type = soap_type,
        metadata_id = metadata_id,
        localized = localized,
        attribute = escape(attribute),
        entity = escape(entity),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let labels = vec![Label::new(1033, "Name <&>"), Label::new(1036, "Nom")];
        let xml = update_attribute_envelope(
            "account",
            "name",
            "0a2e187d-0946-4824-a0ae-62b5b5b7a632",
            "StringAttributeMetadata",
            &labels,
        );
        assert!(xml.contains(r#"i:type="d:StringAttributeMetadata""#));
        assert!(xml.contains("<d:MetadataId>0a2e187d-0946-4824-a0ae-62b5b5b7a632</d:MetadataId>"));
        assert!(xml.contains("<e:Label>Name &lt;&amp;&gt;</e:Label>"));
        assert!(xml.contains("<e:LanguageCode>1036</e:LanguageCode>"));
        assert!(xml.contains("<c:key>MergeLabels</c:key>"));
        assert!(xml.contains(">true</c:value>"));
        assert!(xml.contains("<a:RequestName>UpdateAttribute</a:RequestName>"));
    }
}
