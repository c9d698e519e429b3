use clap::{Args, Parser, Subcommand};
use std::num::NonZeroU64;
use std::path::PathBuf;
use wikidump_config::Config;

#[derive(Debug, Parser)]
#[command(name = "wikidump", version, about = "Export MediaWiki pages and convert them to Markdown")]
pub struct Cli {
    /// Configuration file (defaults to `config.toml` in the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export pages from the wiki database to `.text` files
    Export(ExportArgs),
    /// Convert exported `.text` files to Markdown
    Convert(ConvertArgs),
}

#[derive(Debug, Default, Args)]
pub struct ExportArgs {
    /// Database host
    #[arg(long)]
    pub host: Option<String>,
    /// Database port
    #[arg(long)]
    pub port: Option<u16>,
    /// Database user
    #[arg(long)]
    pub user: Option<String>,
    /// Database password
    #[arg(long)]
    pub password: Option<String>,
    /// Database name
    #[arg(long = "database", value_name = "NAME")]
    pub name: Option<String>,
    /// Connection character set
    #[arg(long)]
    pub charset: Option<String>,
    /// Prefix of the wiki's table names
    #[arg(long)]
    pub table_prefix: Option<String>,
    /// Directory to write `.text` files to
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
    /// Only export pages in this namespace (0 is the main namespace)
    #[arg(long)]
    pub namespace: Option<i64>,
    /// Export at most this many pages
    #[arg(long)]
    pub limit: Option<NonZeroU64>,
}

impl ExportArgs {
    /// Apply the flags that were given on top of `config`.
    pub fn apply(self, config: &mut Config) {
        let database = &mut config.database;
        if let Some(host) = self.host {
            database.host = host;
        }
        if let Some(port) = self.port {
            database.port = port;
        }
        if let Some(user) = self.user {
            database.user = user;
        }
        if let Some(password) = self.password {
            database.password = password;
        }
        if let Some(name) = self.name {
            database.name = name;
        }
        if let Some(charset) = self.charset {
            database.charset = charset;
        }
        if let Some(table_prefix) = self.table_prefix {
            database.table_prefix = table_prefix;
        }
        if let Some(output_dir) = self.output_dir {
            config.export.output_dir = output_dir;
        }
        if self.namespace.is_some() {
            config.export.namespace = self.namespace;
        }
        if self.limit.is_some() {
            config.export.limit = self.limit;
        }
    }
}

#[derive(Debug, Default, Args)]
pub struct ConvertArgs {
    /// Directory of exported `.text` files
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,
    /// Directory to write `.md` files to
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

impl ConvertArgs {
    pub fn apply(self, config: &mut Config) {
        if let Some(input) = self.input {
            config.convert.input_dir = input;
        }
        if let Some(output) = self.output {
            config.convert.output_dir = output;
        }
    }
}
