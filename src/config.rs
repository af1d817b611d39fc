//! Terminal configuration.
//!
//! The host passes the configuration as JSON when it creates a terminal.
//! Every field is optional:
//!
//! ```json
//! {
//!   "user": "nishant",
//!   "hostname": "Dell",
//!   "home": "/home/nishant",
//!   "restricted_dir": "personal-documents",
//!   "analytics": true,
//!   "filesystem": { "type": "directory", "children": { } }
//! }
//! ```

use crate::error::ConfigError;
use crate::vfs::{Inode, Vfs};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Shown in the prompt and by `whoami`
    pub user: String,
    pub hostname: String,
    /// What `~` expands to in `pwd`
    pub home: String,
    /// Directory name every navigation command refuses
    pub restricted_dir: String,
    /// Image shown by `sudo`
    pub sudo_image: String,
    /// Fire analytics events through the host
    pub analytics: bool,
    /// Banner the renderer shows while the scrollback is empty
    pub welcome: Vec<String>,
    /// Replaces the built-in portfolio tree
    pub filesystem: Option<Inode>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            user: "nishant".to_string(),
            hostname: "Dell".to_string(),
            home: "/home/nishant".to_string(),
            restricted_dir: "personal-documents".to_string(),
            sudo_image: "./images/memes/used-sudo-command.webp".to_string(),
            analytics: false,
            welcome: vec![
                "Welcome to Nishant's Portfolio Terminal!".to_string(),
                "Type 'help' to see available commands.".to_string(),
                "Tip: Use arrow keys to navigate command history".to_string(),
            ],
            filesystem: None,
        }
    }
}

impl TerminalConfig {
    /// Parse host JSON. An empty string yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn build_vfs(&self) -> Result<Vfs, ConfigError> {
        match &self.filesystem {
            Some(root) => Vfs::from_root(root.clone()),
            None => Ok(Vfs::portfolio()),
        }
    }
}
