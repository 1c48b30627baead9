use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use camino::Utf8Path;
use reqwest::blocking::Client;
use serde::Serialize;

use crate::error::AadrError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// What a HEAD probe of one link produced: the HTTP status, or the request
/// error. A failed request is data, not an error; the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    Http(u16),
    Failed(String),
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Http(status) => write!(f, "{status}"),
            LinkStatus::Failed(message) => write!(f, "{message}"),
        }
    }
}

pub trait LinkClient: Send + Sync {
    fn head(&self, url: &str) -> LinkStatus;
}

#[derive(Clone)]
pub struct HttpLinkClient {
    client: Client,
}

impl HttpLinkClient {
    /// Redirects are followed (reqwest's default policy); each request gets
    /// the given timeout.
    pub fn new(timeout: Duration) -> Result<Self, AadrError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("aadr-curator/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| AadrError::LinkHttp(err.to_string()))?;
        Ok(Self { client })
    }
}

impl LinkClient for HttpLinkClient {
    fn head(&self, url: &str) -> LinkStatus {
        match self.client.head(url).send() {
            Ok(response) => LinkStatus::Http(response.status().as_u16()),
            Err(err) => LinkStatus::Failed(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkReportRow {
    pub doi_link: String,
    pub status: String,
}

/// Reads an exported table and returns its unique non-null `doi_link`
/// values in first-occurrence order.
pub fn collect_doi_links(path: &Utf8Path) -> Result<Vec<String>, AadrError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path.as_std_path())
        .map_err(|err| read_error(path, err))?;

    let headers = reader.headers().map_err(|err| read_error(path, err))?;
    let column = headers
        .iter()
        .position(|header| header == "doi_link")
        .ok_or_else(|| AadrError::MissingColumn {
            path: path.as_std_path().to_path_buf(),
            column: "doi_link".to_string(),
        })?;

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| read_error(path, err))?;
        let Some(value) = record.get(column) else {
            continue;
        };
        if value.is_empty() || !seen.insert(value.to_string()) {
            continue;
        }
        links.push(value.to_string());
    }
    Ok(links)
}

/// Probes each link once. No retries, no rate limiting; one link's failure
/// never affects the others.
pub fn check_links(client: &dyn LinkClient, links: &[String]) -> Vec<LinkReportRow> {
    links
        .iter()
        .map(|link| LinkReportRow {
            doi_link: link.clone(),
            status: client.head(link).to_string(),
        })
        .collect()
}

/// Writes the per-link report as `doi_link,status`.
pub fn write_report(path: &Utf8Path, rows: &[LinkReportRow]) -> Result<(), AadrError> {
    let mut writer =
        csv::Writer::from_path(path.as_std_path()).map_err(|err| write_error(path, err))?;
    writer
        .write_record(["doi_link", "status"])
        .map_err(|err| write_error(path, err))?;
    for row in rows {
        writer
            .write_record([row.doi_link.as_str(), row.status.as_str()])
            .map_err(|err| write_error(path, err))?;
    }
    writer.flush().map_err(|err| write_error(path, err))?;
    Ok(())
}

fn read_error(path: &Utf8Path, err: impl std::fmt::Display) -> AadrError {
    AadrError::TableRead {
        path: path.as_std_path().to_path_buf(),
        message: err.to_string(),
    }
}

fn write_error(path: &Utf8Path, err: impl std::fmt::Display) -> AadrError {
    AadrError::TableWrite {
        path: path.as_std_path().to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_status_display() {
        assert_eq!(LinkStatus::Http(200).to_string(), "200");
        assert_eq!(
            LinkStatus::Failed("connection timed out".to_string()).to_string(),
            "connection timed out"
        );
    }
}
