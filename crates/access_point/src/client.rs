use super::{FaxTransport, EFAX_URL};
use efax_core::{
    decode_acknowledgment, decode_delivery_status, encode_outbound_request, encode_status_request,
    frame_request, Configuration, DeliveryStatus, Error, OutboundAcknowledgment,
    OutboundSubmission, StatusQuery, TransportResult,
};
use std::sync::Arc;

/// Sends faxes and polls their status through a [`FaxTransport`].
///
/// Every call is one request: nothing is retried, queued or remembered.
#[derive(Clone)]
pub struct EFaxClient {
    config: Configuration,
    endpoint: String,
    transport: Arc<dyn FaxTransport>,
}

impl EFaxClient {
    pub fn new(transport: Arc<dyn FaxTransport>, config: Configuration) -> Self {
        Self {
            config,
            endpoint: EFAX_URL.to_string(),
            transport,
        }
    }

    /// Point the client at a different endpoint, e.g. a staging service.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Submit a new outbound fax.
    pub async fn send_fax(
        &self,
        submission: &OutboundSubmission,
    ) -> Result<OutboundAcknowledgment, Error> {
        let xml = encode_outbound_request(submission, &self.config)?;
        let result = self.post(&xml).await;
        let ack = decode_acknowledgment(&result)?;

        tracing::info!(
            status = ?ack.status_code,
            doc_id = ack.doc_id.as_deref().unwrap_or(""),
            error = ack.error_message.as_deref().unwrap_or(""),
            "Fax submitted to eFax"
        );
        Ok(ack)
    }

    /// Poll the delivery status of a fax submitted earlier.
    pub async fn query_status(&self, query: &StatusQuery) -> Result<DeliveryStatus, Error> {
        let xml = encode_status_request(query, &self.config)?;
        let result = self.post(&xml).await;
        let status = decode_delivery_status(&result)?;

        tracing::debug!(
            doc_id = %query.doc_id,
            status = ?status.status_code,
            classification = %status.classification,
            outcome = %status.outcome,
            "Polled eFax delivery status"
        );
        Ok(status)
    }

    async fn post(&self, xml: &str) -> TransportResult {
        let body = frame_request(xml, &self.config);
        match self.transport.post(&self.endpoint, body).await {
            Ok(reply) => {
                if !(200..300).contains(&reply.status) {
                    tracing::warn!(status = reply.status, "eFax request failed");
                }
                TransportResult::Response {
                    status: reply.status,
                    body: reply.body,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "eFax request did not complete");
                TransportResult::Failed(format!("{err:#}"))
            }
        }
    }
}
