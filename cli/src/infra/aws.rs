//! EC2 implementation of the `CloudProvider` port.
//!
//! `AwsCloud<R>` drives the `aws` CLI through a `CommandRunner`, so
//! credentials, regions and profiles are resolved by the CLI itself from the
//! environment. Generic over `R` so tests inject canned CLI output.

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::application::ports::{CloudProvider, CommandRunner};
use crate::domain::config::AwsConfig;
use crate::domain::{InstanceState, ProviderError};

/// Provider name of the EC2 backend.
pub const AWS_PROVIDER: &str = "aws";

const AWS_BIN: &str = "aws";

/// Error codes the EC2 API returns for ids it does not know.
const NOT_FOUND_CODES: &[&str] = &["InvalidInstanceID.NotFound", "InvalidInstanceID.Malformed"];

// ── CLI output shapes ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstanceStatusOutput {
    #[serde(default)]
    instance_statuses: Vec<InstanceStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstanceStatus {
    instance_id: String,
    instance_state: StateName,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StateName {
    name: String,
}

// ── Provider ──────────────────────────────────────────────────────────────────

/// EC2 backend routing every call through the `aws` CLI.
pub struct AwsCloud<R: CommandRunner> {
    runner: R,
    region: Option<String>,
    profile: Option<String>,
}

impl<R: CommandRunner> AwsCloud<R> {
    /// Create a backend honoring the region and profile from `config`.
    pub fn from_config(runner: R, config: &AwsConfig) -> Self {
        Self {
            runner,
            region: config.region.clone(),
            profile: config.profile.clone(),
        }
    }

    /// Run `aws ec2 <action> ... --instance-ids <id>` and return stdout.
    async fn ec2(&self, id: &str, action: &str, extra: &[&str]) -> Result<Vec<u8>, ProviderError> {
        let mut args = vec!["ec2", action];
        args.extend_from_slice(extra);
        args.extend_from_slice(&["--instance-ids", id, "--output", "json"]);
        if let Some(region) = self.region.as_deref() {
            args.extend_from_slice(&["--region", region]);
        }
        if let Some(profile) = self.profile.as_deref() {
            args.extend_from_slice(&["--profile", profile]);
        }

        let output = self
            .runner
            .run(AWS_BIN, &args)
            .await
            .with_context(|| format!("running aws ec2 {action}"))?;

        if output.status.success() {
            return Ok(output.stdout);
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if NOT_FOUND_CODES.iter().any(|code| stderr.contains(code)) {
            return Err(ProviderError::RemoteNotFound { id: id.to_string() });
        }
        Err(anyhow::anyhow!("aws ec2 {action} failed: {}", stderr.trim()).into())
    }
}

#[async_trait(?Send)]
impl<R: CommandRunner + Send + Sync> CloudProvider for AwsCloud<R> {
    async fn start(&self, id: &str) -> Result<(), ProviderError> {
        if self.get_status(id).await?.is_running() {
            return Err(ProviderError::AlreadyRunning { id: id.to_string() });
        }
        info!(id, "starting EC2 instance");
        self.ec2(id, "start-instances", &[]).await?;
        Ok(())
    }

    async fn stop(&self, id: &str) -> Result<(), ProviderError> {
        if !self.get_status(id).await?.is_running() {
            return Err(ProviderError::NotRunning { id: id.to_string() });
        }
        info!(id, "stopping EC2 instance");
        self.ec2(id, "stop-instances", &[]).await?;
        Ok(())
    }

    async fn get_status(&self, id: &str) -> Result<InstanceState, ProviderError> {
        let stdout = self
            .ec2(id, "describe-instance-status", &["--include-all-instances"])
            .await?;
        let parsed: DescribeInstanceStatusOutput =
            serde_json::from_slice(&stdout).context("parsing aws ec2 describe-instance-status")?;

        let status = parsed
            .instance_statuses
            .into_iter()
            .find(|s| s.instance_id == id)
            .ok_or_else(|| ProviderError::RemoteNotFound { id: id.to_string() })?;
        debug!(id, state = %status.instance_state.name, "EC2 status");

        let state = status
            .instance_state
            .name
            .parse::<InstanceState>()
            .context("unexpected EC2 instance state")?;
        Ok(state)
    }

    fn name(&self) -> &str {
        AWS_PROVIDER
    }
}
