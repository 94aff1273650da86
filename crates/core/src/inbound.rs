//! Inbound fax notifications posted by the service to the account's webhook.

use crate::error::ParseError;
use crate::models::FileType;
use crate::xml;
use base64::prelude::*;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use serde::Serialize;
use std::collections::HashMap;

/// Value of `Status` for a fax that was received completely.
pub const INBOUND_STATUS_SUCCESS: i64 = 1;

/// Body the webhook endpoint should answer with once a notification is stored.
pub const POST_SUCCESSFUL_MESSAGE: &str = "Post Successful";

/// Form field carrying the notification document.
const XML_PARAM: &str = "xml";

const ROOT: &str = "InboundPostRequest";
const REQUEST_DATE: &[&str] = &["RequestControl", "RequestDate"];
const REQUEST_TYPE: &[&str] = &["RequestControl", "RequestType"];
const ACCOUNT_ID: &[&str] = &["FaxControl", "AccountID"];
const DATE_RECEIVED: &[&str] = &["FaxControl", "DateReceived"];
const FAX_NAME: &[&str] = &["FaxControl", "FaxName"];
const FILE_TYPE: &[&str] = &["FaxControl", "FileType"];
const PAGE_COUNT: &[&str] = &["FaxControl", "PageCount"];
const CSID: &[&str] = &["FaxControl", "CSID"];
const ANI: &[&str] = &["FaxControl", "ANI"];
const STATUS: &[&str] = &["FaxControl", "Status"];
const MCFID: &[&str] = &["FaxControl", "MCFID"];
const FILE_CONTENTS: &[&str] = &["FaxControl", "FileContents"];
const BARCODE_KEYS: &[&str] = &["FaxControl", "BarcodeControl", "Barcodes", "Barcode", "Key"];
const BARCODE_PAGES: &[&str] = &[
    "FaxControl",
    "BarcodeControl",
    "Barcodes",
    "Barcode",
    "AdditionalInfo",
    "CodeLocation",
    "PageNumber",
];

const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S";
/// Inbound timestamps carry no zone and are always Pacific Standard Time.
/// Daylight saving is not applied.
const PACIFIC_STANDARD_WEST_SECS: i32 = 8 * 3600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboundFaxNotification {
    pub encoded_file_contents: String,
    pub file_type: FileType,
    /// ANI of the sending machine.
    pub sender_fax_number: String,
    pub account_id: String,
    pub fax_name: String,
    pub csid: String,
    pub status: i64,
    pub mcfid: i64,
    pub page_count: i64,
    pub request_type: String,
    pub date_received: DateTime<FixedOffset>,
    pub request_date: DateTime<FixedOffset>,
    pub barcodes: Vec<String>,
    /// Page numbers of the barcodes that reported a location. May be shorter
    /// than `barcodes`.
    pub barcode_pages: Vec<String>,
}

impl InboundFaxNotification {
    pub fn parse(xml: &str) -> Result<Self, ParseError> {
        let doc = xml::parse_document(xml, ROOT)?;

        Ok(Self {
            encoded_file_contents: xml::required_text(&doc, FILE_CONTENTS)?,
            file_type: xml::required_text(&doc, FILE_TYPE)?.trim().to_string().into(),
            sender_fax_number: xml::required_text(&doc, ANI)?,
            account_id: xml::required_text(&doc, ACCOUNT_ID)?,
            fax_name: xml::required_text(&doc, FAX_NAME)?,
            csid: xml::required_text(&doc, CSID)?,
            status: xml::required_integer(&doc, STATUS)?,
            mcfid: xml::required_integer(&doc, MCFID)?,
            page_count: xml::required_integer(&doc, PAGE_COUNT)?,
            request_type: xml::required_text(&doc, REQUEST_TYPE)?,
            date_received: parse_timestamp(&doc, DATE_RECEIVED)?,
            request_date: parse_timestamp(&doc, REQUEST_DATE)?,
            barcodes: xml::all_text(&doc, BARCODE_KEYS),
            barcode_pages: xml::all_text(&doc, BARCODE_PAGES),
        })
    }

    /// Parse the notification out of the webhook's form parameters.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ParseError> {
        let xml = params
            .get(XML_PARAM)
            .ok_or(ParseError::MissingParam(XML_PARAM))?;
        Self::parse(xml)
    }

    /// Decoded fax document.
    pub fn file_contents(&self) -> Result<Vec<u8>, ParseError> {
        let compact: String = self
            .encoded_file_contents
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        Ok(BASE64_STANDARD.decode(compact)?)
    }

    pub fn is_success(&self) -> bool {
        self.status == INBOUND_STATUS_SUCCESS
    }

    /// Barcodes with their page numbers, paired by position up to the shorter
    /// of the two lists.
    pub fn barcode_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.barcodes
            .iter()
            .zip(self.barcode_pages.iter())
            .map(|(key, page)| (key.as_str(), page.as_str()))
    }
}

fn parse_timestamp(
    doc: &roxmltree::Document,
    path: &[&str],
) -> Result<DateTime<FixedOffset>, ParseError> {
    let value = xml::required_text(doc, path)?;
    let invalid = || ParseError::InvalidTimestamp {
        element: path.join("/"),
        value: value.clone(),
    };
    let naive =
        NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|_| invalid())?;
    FixedOffset::west_opt(PACIFIC_STANDARD_WEST_SECS)
        .and_then(|tz| tz.from_local_datetime(&naive).single())
        .ok_or_else(invalid)
}
