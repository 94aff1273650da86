//! Response decoders and the delivery status classification.

use crate::error::ParseError;
use crate::models::{DeliveryStatus, OutboundAcknowledgment, QueryStatus, RequestStatus};
use crate::xml;

const ACK_ROOT: &str = "OutboundResponse";
const ACK_STATUS_CODE: &[&str] = &["Transmission", "Response", "StatusCode"];
const ACK_ERROR_MESSAGE: &[&str] = &["Transmission", "Response", "ErrorMessage"];
const ACK_ERROR_LEVEL: &[&str] = &["Transmission", "Response", "ErrorLevel"];
const ACK_DOCID: &[&str] = &["Transmission", "TransmissionControl", "DOCID"];

const STATUS_ROOT: &str = "OutboundStatusResponse";
const STATUS_MESSAGE: &[&str] = &["Transmission", "Recipients", "Recipient", "Status", "Message"];
const STATUS_CLASSIFICATION: &[&str] =
    &["Transmission", "Recipients", "Recipient", "Status", "Classification"];
const STATUS_OUTCOME: &[&str] = &["Transmission", "Recipients", "Recipient", "Status", "Outcome"];

/// What came back from the transport for one POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportResult {
    /// The server answered, with any status code.
    Response { status: u16, body: String },
    /// No answer: connection, TLS or timeout failure.
    Failed(String),
}

impl TransportResult {
    pub fn is_success(&self) -> bool {
        matches!(self, TransportResult::Response { status, .. } if (200..300).contains(status))
    }

    /// Human readable reason the call failed, `None` when it succeeded.
    pub fn failure_description(&self) -> Option<String> {
        match self {
            TransportResult::Response { status, .. } if (200..300).contains(status) => None,
            TransportResult::Response { status, .. } => {
                Some(format!("HTTP request failed ({status})"))
            }
            TransportResult::Failed(cause) => Some(format!("HTTP request failed ({cause})")),
        }
    }
}

/// Decode the answer to an `OutboundRequest`.
pub fn decode_acknowledgment(result: &TransportResult) -> Result<OutboundAcknowledgment, ParseError> {
    let body = match result {
        TransportResult::Response { status, body } if (200..300).contains(status) => body,
        _ => {
            return Ok(OutboundAcknowledgment {
                status_code: RequestStatus::HttpFailure,
                error_message: result.failure_description(),
                error_level: None,
                doc_id: None,
            })
        }
    };

    let doc = xml::parse_document(body, ACK_ROOT)?;
    let code = xml::required_integer(&doc, ACK_STATUS_CODE)?;
    let status_code = RequestStatus::from_code(code).ok_or(ParseError::InvalidStatusCode(code))?;

    Ok(OutboundAcknowledgment {
        status_code,
        error_message: xml::optional_text(&doc, ACK_ERROR_MESSAGE),
        error_level: xml::optional_text(&doc, ACK_ERROR_LEVEL),
        doc_id: xml::optional_text(&doc, ACK_DOCID).filter(|id| !id.is_empty()),
    })
}

/// Decode the answer to an `OutboundStatus` poll.
pub fn decode_delivery_status(result: &TransportResult) -> Result<DeliveryStatus, ParseError> {
    let body = match result {
        TransportResult::Response { status, body } if (200..300).contains(status) => body,
        _ => {
            return Ok(DeliveryStatus {
                status_code: QueryStatus::HttpFailure,
                message: result.failure_description().unwrap_or_default(),
                classification: String::new(),
                outcome: String::new(),
            })
        }
    };

    let doc = xml::parse_document(body, STATUS_ROOT)?;
    let message = xml::required_text(&doc, STATUS_MESSAGE)?;
    let classification = strip_quotes(&xml::required_text(&doc, STATUS_CLASSIFICATION)?);
    let outcome = strip_quotes(&xml::required_text(&doc, STATUS_OUTCOME)?);

    Ok(DeliveryStatus {
        status_code: classify(&classification, &outcome),
        message,
        classification,
        outcome,
    })
}

fn strip_quotes(token: &str) -> String {
    token.chars().filter(|&c| c != '"').collect()
}

/// Reduce the service's classification/outcome pair to a [`QueryStatus`].
///
/// The order of the checks matters: a busy line after the first attempt
/// still counts as pending, and only a double "Success" is a delivery.
pub fn classify(classification: &str, outcome: &str) -> QueryStatus {
    let attempted = !classification.is_empty() || !outcome.is_empty();
    if !attempted || classification == "Busy" {
        QueryStatus::Pending
    } else if classification == "Success" && outcome == "Success" {
        QueryStatus::Sent
    } else {
        QueryStatus::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> TransportResult {
        TransportResult::Response {
            status: 200,
            body: body.to_string(),
        }
    }

    fn ack_body(status: &str, docid: &str, extra: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<OutboundResponse>
  <Transmission>
    <TransmissionControl>
      <TransmissionID></TransmissionID>
      <DOCID>{docid}</DOCID>
    </TransmissionControl>
    <Response>
      <StatusCode>{status}</StatusCode>
      <StatusDescription>Success</StatusDescription>
      {extra}
    </Response>
  </Transmission>
</OutboundResponse>"#
        )
    }

    fn status_body(classification: &str, outcome: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<OutboundStatusResponse>
  <Transmission>
    <TransmissionControl>
      <TransmissionID></TransmissionID>
    </TransmissionControl>
    <Recipients>
      <Recipient>
        <DOCID>12345678</DOCID>
        <Name>Jane Doe</Name>
        <Company>Acme</Company>
        <Fax>15550102000</Fax>
        <Status>
          <Message>Your fax has been sent.</Message>
          <Classification>{classification}</Classification>
          <Outcome>{outcome}</Outcome>
        </Status>
        <LastAttempt>
          <LastDate>08/06/2024</LastDate>
          <LastTime>10:04:31</LastTime>
        </LastAttempt>
      </Recipient>
    </Recipients>
  </Transmission>
</OutboundStatusResponse>"#
        )
    }

    #[test]
    fn acknowledgment_success() {
        let ack = decode_acknowledgment(&ok(&ack_body("1", "12345678", ""))).unwrap();
        assert_eq!(ack.status_code, RequestStatus::Success);
        assert_eq!(ack.doc_id.as_deref(), Some("12345678"));
        assert_eq!(ack.error_message, None);
        assert_eq!(ack.error_level, None);
    }

    #[test]
    fn acknowledgment_empty_doc_id_is_absent() {
        let ack = decode_acknowledgment(&ok(&ack_body("1", "", ""))).unwrap();
        assert_eq!(ack.doc_id, None);
    }

    #[test]
    fn acknowledgment_failure_carries_error_fields() {
        let body = ack_body(
            "2",
            "",
            "<ErrorLevel>User</ErrorLevel><ErrorMessage>Invalid fax number</ErrorMessage>",
        );
        let ack = decode_acknowledgment(&ok(&body)).unwrap();
        assert_eq!(ack.status_code, RequestStatus::Failure);
        assert_eq!(ack.error_message.as_deref(), Some("Invalid fax number"));
        assert_eq!(ack.error_level.as_deref(), Some("User"));
        assert_eq!(ack.doc_id, None);
    }

    #[test]
    fn acknowledgment_transport_failure_ignores_body() {
        let result = TransportResult::Response {
            status: 500,
            body: ack_body("1", "12345678", ""),
        };
        let ack = decode_acknowledgment(&result).unwrap();
        assert_eq!(ack.status_code, RequestStatus::HttpFailure);
        assert_eq!(ack.error_message.as_deref(), Some("HTTP request failed (500)"));
        assert_eq!(ack.doc_id, None);
    }

    #[test]
    fn acknowledgment_connection_error() {
        let result = TransportResult::Failed("connection refused".into());
        let ack = decode_acknowledgment(&result).unwrap();
        assert_eq!(ack.status_code, RequestStatus::HttpFailure);
        assert_eq!(
            ack.error_message.as_deref(),
            Some("HTTP request failed (connection refused)")
        );
    }

    #[test]
    fn acknowledgment_without_status_code_is_a_parse_error() {
        let body = "<OutboundResponse><Transmission/></OutboundResponse>";
        let err = decode_acknowledgment(&ok(body)).unwrap_err();
        assert!(matches!(err, ParseError::MissingElement(path) if path == "Transmission/Response/StatusCode"));
    }

    #[test]
    fn acknowledgment_body_cannot_claim_http_failure() {
        let err = decode_acknowledgment(&ok(&ack_body("0", "", ""))).unwrap_err();
        assert!(matches!(err, ParseError::InvalidStatusCode(0)));
    }

    #[test]
    fn acknowledgment_padded_status_code() {
        let ack = decode_acknowledgment(&ok(&ack_body(" 1 ", "12345678", ""))).unwrap();
        assert_eq!(ack.status_code, RequestStatus::Success);
    }

    #[test]
    fn acknowledgment_unknown_status_code() {
        let err = decode_acknowledgment(&ok(&ack_body("9", "", ""))).unwrap_err();
        assert!(matches!(err, ParseError::InvalidStatusCode(9)));
    }

    #[test]
    fn classification_table() {
        let cases = [
            ("", "", QueryStatus::Pending),
            ("Busy", "", QueryStatus::Pending),
            ("Busy", "Failure", QueryStatus::Pending),
            ("Success", "Success", QueryStatus::Sent),
            ("Success", "Failure", QueryStatus::Failure),
            ("Failure", "Success", QueryStatus::Failure),
            ("", "Success", QueryStatus::Failure),
        ];
        for (classification, outcome, expected) in cases {
            assert_eq!(
                classify(classification, outcome),
                expected,
                "classification={classification:?} outcome={outcome:?}"
            );
        }
    }

    #[test]
    fn status_strips_quotes_before_classifying() {
        let status =
            decode_delivery_status(&ok(&status_body("\"Success\"", "\"Success\""))).unwrap();
        assert_eq!(status.status_code, QueryStatus::Sent);
        assert_eq!(status.classification, "Success");
        assert_eq!(status.outcome, "Success");
        assert_eq!(status.message, "Your fax has been sent.");
    }

    #[test]
    fn status_not_yet_attempted_is_pending() {
        let status = decode_delivery_status(&ok(&status_body("", ""))).unwrap();
        assert_eq!(status.status_code, QueryStatus::Pending);
    }

    #[test]
    fn status_busy_is_pending() {
        let status = decode_delivery_status(&ok(&status_body("\"Busy\"", ""))).unwrap();
        assert_eq!(status.status_code, QueryStatus::Pending);
    }

    #[test]
    fn status_whitespace_classification_counts_as_attempted() {
        let status = decode_delivery_status(&ok(&status_body(" ", ""))).unwrap();
        assert_eq!(status.classification, " ");
        assert_eq!(status.status_code, QueryStatus::Failure);
    }

    #[test]
    fn status_anything_else_after_attempt_is_failure() {
        let status =
            decode_delivery_status(&ok(&status_body("\"Failure\"", "\"No Answer\""))).unwrap();
        assert_eq!(status.status_code, QueryStatus::Failure);
        assert_eq!(status.outcome, "No Answer");
    }

    #[test]
    fn status_transport_failure_ignores_body() {
        let result = TransportResult::Response {
            status: 404,
            body: status_body("\"Success\"", "\"Success\""),
        };
        let status = decode_delivery_status(&result).unwrap();
        assert_eq!(status.status_code, QueryStatus::HttpFailure);
        assert_eq!(status.message, "HTTP request failed (404)");
    }

    #[test]
    fn status_missing_outcome_is_a_parse_error() {
        let body = status_body("x", "y").replace("<Outcome>y</Outcome>", "");
        let err = decode_delivery_status(&ok(&body)).unwrap_err();
        assert!(matches!(err, ParseError::MissingElement(_)));
    }

    #[test]
    fn status_rejects_other_documents() {
        let err = decode_delivery_status(&ok(&ack_body("1", "1", ""))).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedRoot { .. }));
    }

    #[test]
    fn transport_result_success_range() {
        assert!(ok("").is_success());
        assert!(!TransportResult::Failed("x".into()).is_success());
        assert_eq!(ok("").failure_description(), None);
    }
}
