//! Database connection settings.

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use serde::{Deserialize, Serialize};
use url::Url;

/// Connection settings for the MediaWiki database.
///
/// Either the discrete fields are used to assemble a MySQL DSN, or `url` is
/// set and used verbatim (which is how SQLite fixtures are pointed at).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Name of the database (schema) holding the wiki tables.
    pub name: String,
    pub charset: String,
    /// MediaWiki `$wgDBprefix`, prepended to every table name.
    pub table_prefix: String,
    /// Full connection URL. Overrides every other connection field when set.
    pub url: Option<String>,
}
impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: String::new(),
            password: String::new(),
            name: String::new(),
            charset: "utf8mb4".to_string(),
            table_prefix: String::new(),
            url: None,
        }
    }
}
impl DatabaseConfig {
    /// Connection URL understood by `sqlx`.
    ///
    /// Credentials and the database name are percent-encoded, so passwords
    /// containing `@`, `/` or spaces survive the round trip.
    pub fn url(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        let mut url = Url::parse("mysql://localhost").or_raise(|| ErrorKind::Url)?;
        url.set_host(Some(&self.host)).or_raise(|| ErrorKind::Url)?;
        url.set_port(Some(self.port)).ok().ok_or_raise(|| ErrorKind::Url)?;
        url.set_username(&self.user).ok().ok_or_raise(|| ErrorKind::Url)?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password)).ok().ok_or_raise(|| ErrorKind::Url)?;
        }
        url.set_path(&self.name);
        url.query_pairs_mut().append_pair("charset", &self.charset);
        Ok(url.into())
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.url.is_none() {
            if self.name.trim().is_empty() {
                exn::bail!(ErrorKind::Invalid("database.name must be set".to_string()));
            }
            if self.user.trim().is_empty() {
                exn::bail!(ErrorKind::Invalid("database.user must be set".to_string()));
            }
        }
        if !self.table_prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            exn::bail!(ErrorKind::Invalid(format!(
                "database.table_prefix may only contain ASCII letters, digits and underscores: {:?}",
                self.table_prefix
            )));
        }
        Ok(())
    }
}
