use std::{env, fs, path::Path};

use anyhow::{bail, Context, Result};
use dao_query_interface::{PageLimits, QueryMsg};
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file when `--config` is not
/// given.
pub const CONFIG_ENV: &str = "CONFIG";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Page size bounds applied to listing queries.
    pub limits: PageLimits,
    /// Reject listing queries whose `limit` is above `limits.max_limit`
    /// instead of warning about them.
    pub strict_limits: bool,
    /// Warn about payload keys the query interface does not define.
    pub warn_on_extension: bool,
    /// Query variants this deployment does not serve.
    pub deny_tags: Vec<String>,
}

impl LintConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: LintConfig = serde_yaml::from_str(yaml).context("invalid lint config")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config from `path`, or from the file named by the
    /// `CONFIG` environment variable. Defaults apply when neither is
    /// set.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match env::var(CONFIG_ENV) {
                Ok(path) => path.into(),
                Err(_) => {
                    log::debug!("no lint config given, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        log::debug!("loading lint config from {}", path.display());
        let yaml = fs::read_to_string(&path)
            .with_context(|| format!("failed to read lint config {}", path.display()))?;
        Self::from_yaml(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        self.limits.validate()?;
        for tag in &self.deny_tags {
            if !QueryMsg::TAGS.contains(&tag.as_str()) {
                bail!("deny_tags: unknown query variant ({tag})");
            }
        }
        Ok(())
    }

    pub fn denies(&self, tag: &str) -> bool {
        self.deny_tags.iter().any(|denied| denied == tag)
    }
}
