//! Command line and environment configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::fmt;

use crate::markdown::ImageUrlResolver;

/// Server configuration for Vaultpress.
///
/// Every option can also be set through its environment variable.
#[derive(Clone, Parser)]
#[command(name = "vaultpress", version, about, long_about = None)]
pub struct Config {
    /// Owner of the vault and image repositories
    #[arg(long, env = "GITHUB_OWNER", default_value = "frechezz")]
    pub owner: String,

    /// Repository holding the notes
    #[arg(long, env = "GITHUB_REPO", default_value = "obsidianvault")]
    pub repo: String,

    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory of the notes inside the repository (empty for the root)
    #[arg(long, env = "NOTES_PATH", default_value_t = String::new())]
    pub notes_path: String,

    /// Public repository serving note images
    #[arg(long, env = "IMAGES_REPO", default_value = "publicobs")]
    pub images_repo: String,

    /// Branch images are served from
    #[arg(long, env = "GITHUB_BRANCH", default_value = "main")]
    pub branch: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Raw file host base URL
    #[arg(
        long,
        env = "GITHUB_RAW_URL",
        default_value = "https://raw.githubusercontent.com"
    )]
    pub raw_url: String,

    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Site name shown in titles and the footer
    #[arg(long, env = "SITE_NAME", default_value = "ObsidianNotes")]
    pub site_name: String,

    /// Serve the bundled sample notes instead of GitHub
    #[arg(long, env = "NOTES_DEMO")]
    pub demo: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("notes_path", &self.notes_path)
            .field("images_repo", &self.images_repo)
            .field("branch", &self.branch)
            .field("api_url", &self.api_url)
            .field("raw_url", &self.raw_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("site_name", &self.site_name)
            .field("demo", &self.demo)
            .finish()
    }
}

impl Config {
    /// Parses configuration from command line arguments and environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if a repository coordinate is empty or a base URL is
    /// not an HTTP(S) URL.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("images repo", &self.images_repo),
            ("branch", &self.branch),
        ] {
            if value.trim().is_empty() {
                bail!("GitHub {} must not be empty", name);
            }
        }

        for (name, value) in [("API URL", &self.api_url), ("raw URL", &self.raw_url)] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                bail!("GitHub {} must be an http(s) URL: {}", name, value);
            }
        }

        Ok(())
    }

    /// Token to authenticate with, ignoring blank values.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Resolver for image URLs on the public image repository.
    pub fn image_resolver(&self) -> ImageUrlResolver {
        ImageUrlResolver::new(&self.raw_url, &self.owner, &self.images_repo, &self.branch)
    }

    /// Socket address string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
