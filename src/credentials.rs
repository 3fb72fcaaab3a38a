use std::{fmt, path::Path};

use serde::Deserialize;

use crate::{
    config::CredentialKind,
    error::{Error, Result},
    utils::read_trimmed_file,
};

#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Token(String),
    Cookie(String),
    Account { name: String, cookies: String },
}

impl Credential {
    pub fn label(&self) -> &str {
        match self {
            Credential::Token(_) => "token",
            Credential::Cookie(_) => "cookies",
            Credential::Account { name, .. } => name,
        }
    }
}

// Keeps secrets out of logs and panic messages.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Token(_) => f.write_str("Token(..)"),
            Credential::Cookie(_) => f.write_str("Cookie(..)"),
            Credential::Account { name, .. } => f
                .debug_struct("Account")
                .field("name", name)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Deserialize)]
struct AccountEntry {
    name: Option<String>,
    cookies: Option<String>,
}

pub async fn load_credentials(
    kind: CredentialKind,
    path: impl AsRef<Path>,
) -> Result<Vec<Credential>> {
    let path = path.as_ref();
    let contents = read_trimmed_file(path).await?;

    let credentials = match kind {
        CredentialKind::Token => vec![Credential::Token(contents)],
        CredentialKind::Cookie => vec![Credential::Cookie(contents)],
        CredentialKind::Accounts => parse_accounts(path, &contents)?,
    };

    tracing::info!(
        path = %path.display(),
        accounts = credentials.len(),
        "loaded credentials"
    );

    Ok(credentials)
}

fn parse_accounts(path: &Path, contents: &str) -> Result<Vec<Credential>> {
    let parse_error = |reason: String| Error::AccountsParse {
        path: path.to_path_buf(),
        reason,
    };

    let entries: Vec<AccountEntry> =
        serde_json::from_str(contents).map_err(|e| parse_error(e.to_string()))?;

    if entries.is_empty() {
        return Err(Error::NoAccounts(path.to_path_buf()));
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| -> Result<Credential> {
            let cookies = entry
                .cookies
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .ok_or_else(|| {
                    parse_error(format!("akun #{} tidak memiliki 'cookies'", index + 1))
                })?;

            let name = entry
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Akun {}", index + 1));

            Ok(Credential::Account { name, cookies })
        })
        .collect()
}
