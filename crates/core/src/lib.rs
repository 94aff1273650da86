//! Protocol core for the eFax Developer XML web service.
//!
//! Everything in this crate is pure: request encoders produce XML strings,
//! [`framing`] wraps them into the form body the service expects, and the
//! decoders turn a [`decoding::TransportResult`] back into typed results.
//! Sending the bytes is left to the caller (see the `access_point` crate).

pub mod config;
pub mod decoding;
pub mod encoding;
pub mod error;
pub mod framing;
pub mod inbound;
pub mod models;
mod xml;

pub use config::{Configuration, Priority, Resolution, SelfBusy};
pub use decoding::{classify, decode_acknowledgment, decode_delivery_status, TransportResult};
pub use encoding::{encode_outbound_request, encode_status_request};
pub use error::{EncodeError, Error, ParseError, ValidationError};
pub use framing::frame_request;
pub use inbound::{InboundFaxNotification, INBOUND_STATUS_SUCCESS, POST_SUCCESSFUL_MESSAGE};
pub use models::{
    DeliveryStatus, FileType, OutboundAcknowledgment, OutboundSubmission, QueryStatus,
    RequestStatus, StatusQuery,
};
