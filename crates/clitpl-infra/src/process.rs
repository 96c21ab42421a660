//! Subprocess runner shared by the git and gh adapters.

use std::path::Path;
use std::process::Stdio;

use clitpl_types::error::GatewayError;

/// Run `program args...` in `cwd` and return its trimmed stdout.
///
/// A program that cannot be found maps to [`GatewayError::Unavailable`];
/// a non-zero exit maps to [`GatewayError::Failed`] carrying stderr.
pub async fn run(program: &str, args: &[&str], cwd: &Path) -> Result<String, GatewayError> {
    let command = render_command(program, args);
    tracing::debug!(%command, cwd = %cwd.display(), "spawning");

    let output = tokio::process::Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => GatewayError::Unavailable {
                tool: program.to_string(),
            },
            _ => GatewayError::Failed {
                command: command.clone(),
                status: "not started".to_string(),
                stderr: err.to_string(),
            },
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::debug!(%command, status = %output.status, %stderr, "command failed");
        return Err(GatewayError::Failed {
            command,
            status: output.status.to_string(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Human-readable command line for errors and logs.
pub fn render_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
