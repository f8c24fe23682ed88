//! License text lookup through the GitHub licenses API.
//!
//! The answered license *name* (as shown to the user, e.g. `"MIT License"`) is
//! mapped to a GitHub license *key* (`mit`), then `GET <api>/licenses/<key>`
//! returns a JSON document whose `body` field is the license text. The text
//! carries placeholders such as `[year]` and `[fullname]`, filled in by
//! [`fill_placeholders`].

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::ScaffoldError;

/// License name that means "no license file content".
pub const NO_LICENSE: &str = "None";

const ACCEPT: &str = "application/vnd.github.drax-preview+json";
const USER_AGENT: &str = concat!("service-scaffold/", env!("CARGO_PKG_VERSION"));

/// Known license names and their GitHub keys.
pub const LICENSES: &[(&str, &str)] = &[
    ("MIT License", "mit"),
    ("Apache License 2.0", "apache-2.0"),
    ("GNU General Public License v3.0", "gpl-3.0"),
    ("GNU General Public License v2.0", "gpl-2.0"),
    ("GNU Lesser General Public License v3.0", "lgpl-3.0"),
    ("GNU Lesser General Public License v2.1", "lgpl-2.1"),
    ("GNU Affero General Public License v3.0", "agpl-3.0"),
    ("BSD 2-Clause \"Simplified\" License", "bsd-2-clause"),
    ("BSD 3-Clause \"New\" or \"Revised\" License", "bsd-3-clause"),
    ("Mozilla Public License 2.0", "mpl-2.0"),
    ("Eclipse Public License 2.0", "epl-2.0"),
    ("Boost Software License 1.0", "bsl-1.0"),
    ("The Unlicense", "unlicense"),
];

/// GitHub key for a license name. Keys themselves are accepted case-insensitively.
pub fn license_key(name: &str) -> Option<&'static str> {
    LICENSES
        .iter()
        .find(|(full, key)| *full == name || key.eq_ignore_ascii_case(name))
        .map(|(_, key)| *key)
}

#[derive(Debug, Deserialize)]
struct LicenseDocument {
    body: String,
}

/// Client for the licenses endpoint.
#[derive(Debug, Clone)]
pub struct LicenseClient {
    client: reqwest::Client,
    base_url: String,
}

impl LicenseClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the license text for `name`.
    ///
    /// Returns `Ok(None)` for [`NO_LICENSE`].
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::Validation`] for a name with no known key
    /// - [`ScaffoldError::ExternalService`] when the service answers with a status
    ///   other than 200 or 302
    /// - transport or decoding failures
    pub async fn fetch(&self, name: &str) -> Result<Option<String>> {
        if name == NO_LICENSE {
            return Ok(None);
        }

        let key = license_key(name).ok_or_else(|| {
            ScaffoldError::validation("license", format!("unknown license '{name}'"))
        })?;

        let url = format!("{}/licenses/{}", self.base_url, key);
        tracing::debug!("Fetching license text from: {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .with_context(|| format!("Failed to fetch license '{name}'"))?;

        let status = response.status().as_u16();
        let body = response.text().await.context("Failed to read license response")?;

        if status != 200 && status != 302 {
            return Err(ScaffoldError::ExternalService {
                status,
                body,
            }
            .into());
        }

        let document: LicenseDocument =
            serde_json::from_str(&body).context("License response is not a license document")?;
        Ok(Some(document.body))
    }
}

/// Replace the `[year]` and `[fullname]` placeholders of a license text.
pub fn fill_placeholders(text: &str, year: i32, fullname: Option<&str>) -> String {
    let text = text.replace("[year]", &year.to_string());
    match fullname {
        Some(fullname) => text.replace("[fullname]", fullname),
        None => text,
    }
}
