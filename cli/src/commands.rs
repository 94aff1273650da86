use access_point::{EFaxClient, ReqwestTransport};
use anyhow::{bail, Context, Result};
use efax_core::{
    FileType, InboundFaxNotification, OutboundSubmission, Priority, Resolution, SelfBusy,
    StatusQuery,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

fn create_client(endpoint: Option<String>) -> Result<EFaxClient> {
    let cfg = config::load().unwrap_or_default();
    let transport = Arc::new(ReqwestTransport::new()?);
    let client = EFaxClient::new(transport, config::resolve(&cfg));
    tracing::debug!(account_id = %client.config().account_id, "Using eFax account");
    Ok(match endpoint {
        Some(url) => client.with_endpoint(url),
        None => client,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Debug, Clone)]
pub struct SendRequest {
    pub name: String,
    pub company: String,
    pub fax: String,
    pub subject: String,
    pub file_type: Option<FileType>,
    pub file: PathBuf,
}

pub async fn send(endpoint: Option<String>, req: SendRequest) -> Result<()> {
    let content = tokio::fs::read(&req.file)
        .await
        .with_context(|| format!("Failed to read {}", req.file.display()))?;
    let file_type = req
        .file_type
        .or_else(|| FileType::from_path(&req.file))
        .unwrap_or_default();

    let submission = OutboundSubmission::new(req.name, req.company, req.fax, content)
        .with_subject(req.subject)
        .with_content_type(file_type);

    let client = create_client(endpoint)?;
    let ack = client.send_fax(&submission).await?;
    tracing::info!(path = %req.file.display(), "Submitted fax");
    print_json(&ack)
}

pub async fn status(endpoint: Option<String>, doc_id: String) -> Result<()> {
    let client = create_client(endpoint)?;
    let status = client.query_status(&StatusQuery::new(doc_id)).await?;
    print_json(&status)
}

#[derive(Debug, Serialize)]
struct InboundSummary {
    #[serde(flatten)]
    fax: InboundFaxNotification,
    saved_to: Option<String>,
}

pub async fn inbound(xml_file: PathBuf, save: Option<PathBuf>) -> Result<()> {
    let xml = tokio::fs::read_to_string(&xml_file)
        .await
        .with_context(|| format!("Failed to read {}", xml_file.display()))?;
    let fax = InboundFaxNotification::parse(&xml)?;
    if !fax.is_success() {
        tracing::warn!(status = fax.status, fax_name = %fax.fax_name, "Inbound fax not received completely");
    }

    let saved_to = match save {
        Some(path) => {
            let bytes = fax.file_contents()?;
            tokio::fs::write(&path, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "Saved inbound fax");
            Some(path.display().to_string())
        }
        None => None,
    };

    print_json(&InboundSummary { fax, saved_to })
}

#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub account_id: Option<String>,
    pub username: Option<String>,
    pub resolution: Option<Resolution>,
    pub priority: Option<Priority>,
    pub self_busy: Option<SelfBusy>,
}

pub fn configure(settings: Settings) -> Result<()> {
    let mut cfg = config::load().unwrap_or_default();

    if let Some(account_id) = settings.account_id {
        if account_id.trim().is_empty() {
            bail!("account id must not be empty");
        }
        cfg.account.account_id = account_id;
    }
    if let Some(username) = settings.username {
        cfg.account.username = username;
    }
    if let Some(resolution) = settings.resolution {
        cfg.account.resolution = resolution;
    }
    if let Some(priority) = settings.priority {
        cfg.account.priority = priority;
    }
    if let Some(self_busy) = settings.self_busy {
        cfg.account.self_busy = self_busy;
    }

    config::store(&cfg)?;
    tracing::info!("Settings updated");
    print_json(&cfg)
}

pub fn set_password(password: &str) -> Result<()> {
    config::store_secret(config::PASSWORD_SECRET, password)
        .context("Failed to store password in keychain")?;
    tracing::info!("Password stored in keychain");
    Ok(())
}
