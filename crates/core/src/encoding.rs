//! XML bodies for the two outbound request types.
//!
//! Element order is fixed; the service rejects documents whose children appear
//! in a different order than the one written here.

use crate::config::Configuration;
use crate::error::{EncodeError, ValidationError};
use crate::models::{OutboundSubmission, StatusQuery};
use base64::prelude::*;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Level of disposition (delivery receipt) the service sends back. Receipts
/// are polled instead, so this is always off.
const DISPOSITION_LEVEL: &str = "NONE";

type XmlWriter = Writer<Vec<u8>>;

fn new_document() -> Result<XmlWriter, EncodeError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
    Ok(writer)
}

fn finish(writer: XmlWriter) -> Result<String, EncodeError> {
    Ok(String::from_utf8(writer.into_inner())?)
}

fn element<F>(writer: &mut XmlWriter, name: &str, children: F) -> Result<(), EncodeError>
where
    F: FnOnce(&mut XmlWriter) -> Result<(), EncodeError>,
{
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    children(writer)?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn text(writer: &mut XmlWriter, name: &str, value: &str) -> Result<(), EncodeError> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(value))?;
    Ok(())
}

fn access_control(writer: &mut XmlWriter, config: &Configuration) -> Result<(), EncodeError> {
    element(writer, "AccessControl", |w| {
        text(w, "UserName", &config.username)?;
        text(w, "Password", &config.password)
    })
}

/// Base64 of `content` on a single line.
pub fn encode_file_contents(content: &[u8]) -> String {
    let mut encoded = BASE64_STANDARD.encode(content);
    encoded.retain(|c| c != '\n' && c != '\r');
    encoded
}

/// Build the `OutboundRequest` document for a new fax.
pub fn encode_outbound_request(
    submission: &OutboundSubmission,
    config: &Configuration,
) -> Result<String, EncodeError> {
    if submission.recipient_fax_number.trim().is_empty() {
        return Err(ValidationError::MissingField("recipient_fax_number").into());
    }
    if submission.content.is_empty() {
        return Err(ValidationError::MissingField("content").into());
    }

    let mut writer = new_document()?;
    element(&mut writer, "OutboundRequest", |w| {
        access_control(w, config)?;
        element(w, "Transmission", |w| {
            element(w, "TransmissionControl", |w| {
                text(w, "Resolution", config.resolution.as_str())?;
                text(w, "Priority", config.priority.as_str())?;
                text(w, "SelfBusy", config.self_busy.as_str())?;
                text(w, "FaxHeader", &submission.subject)
            })?;
            element(w, "DispositionControl", |w| {
                text(w, "DispositionLevel", DISPOSITION_LEVEL)
            })?;
            element(w, "Recipients", |w| {
                element(w, "Recipient", |w| {
                    text(w, "RecipientName", &submission.recipient_name)?;
                    text(w, "RecipientCompany", &submission.recipient_company_name)?;
                    text(w, "RecipientFax", &submission.recipient_fax_number)
                })
            })?;
            element(w, "Files", |w| {
                element(w, "File", |w| {
                    text(w, "FileContents", &encode_file_contents(&submission.content))?;
                    text(w, "FileType", submission.content_type.as_str())
                })
            })
        })
    })?;
    finish(writer)
}

/// Build the `OutboundStatus` document polling `query.doc_id`.
pub fn encode_status_request(
    query: &StatusQuery,
    config: &Configuration,
) -> Result<String, EncodeError> {
    if query.doc_id.trim().is_empty() {
        return Err(ValidationError::MissingField("doc_id").into());
    }

    let mut writer = new_document()?;
    element(&mut writer, "OutboundStatus", |w| {
        access_control(w, config)?;
        element(w, "Transmission", |w| {
            element(w, "TransmissionControl", |w| text(w, "DOCID", &query.doc_id))
        })
    })?;
    finish(writer)
}
