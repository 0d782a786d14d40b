use crate::domain::ports::StoreBackend;
use crate::utils::error::{MigrateError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub const DEFAULT_EXECUTABLE: &str = "/usr/bin/dconf";
pub const DEFAULT_PROFILES_PATH: &str = "/org/gnome/terminal/legacy/profiles:/";

/// Drives the `dconf` binary for one directory of the database.
#[derive(Debug, Clone)]
pub struct DconfCommand {
    executable: String,
    path: String,
}

impl Default for DconfCommand {
    fn default() -> Self {
        Self::new(DEFAULT_EXECUTABLE, DEFAULT_PROFILES_PATH)
    }
}

impl DconfCommand {
    pub fn new(executable: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            path: path.into(),
        }
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.executable, args.join(" "))
    }

    async fn run(&self, args: &[&str], stdin: Option<&str>) -> Result<String> {
        let command = self.describe(args);
        tracing::debug!("Running {}", command);

        let mut child = Command::new(&self.executable)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| MigrateError::CommandError {
                command: command.clone(),
                message: e.to_string(),
            })?;

        // Feed stdin from its own task so a chatty child cannot fill stdout and stall us.
        let writer = match (stdin, child.stdin.take()) {
            (Some(text), Some(mut pipe)) => {
                let mut data = text.as_bytes().to_vec();
                data.push(b'\n');
                Some(tokio::spawn(async move {
                    // Dropping the pipe afterwards lets dconf see EOF.
                    pipe.write_all(&data).await
                }))
            }
            _ => None,
        };

        let output = child.wait_with_output().await?;
        if let Some(writer) = writer {
            writer.await.map_err(|e| MigrateError::CommandError {
                command: command.clone(),
                message: e.to_string(),
            })??;
        }
        if !output.status.success() {
            return Err(MigrateError::CommandError {
                command,
                message: format!(
                    "{} ({})",
                    String::from_utf8_lossy(&output.stderr).trim(),
                    output.status
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl StoreBackend for DconfCommand {
    async fn dump(&self) -> Result<String> {
        self.run(&["dump", self.path.as_str()], None).await
    }

    async fn load(&self, text: &str) -> Result<()> {
        self.run(&["load", self.path.as_str()], Some(text)).await.map(|_| ())
    }

    async fn reset(&self) -> Result<()> {
        self.run(&["reset", "-f", self.path.as_str()], None).await.map(|_| ())
    }
}
