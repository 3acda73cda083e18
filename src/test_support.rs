//! Test-only helpers: recording sinks and fake tool executables.

use std::path::{Path, PathBuf};

use crate::sink::LineSink;

/// Sink that records every line for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub lines: Vec<String>,
}

impl LineSink for RecordingSink {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Write an executable shell script acting as a stand-in tool binary.
///
/// The script receives the sub-command arguments exactly as the runner would
/// pass them to the real tool.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> std::io::Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
    let mut perms = std::fs::metadata(&path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms)?;
    Ok(path)
}

/// Fake tool that answers status probes for any alias except `@bad`, logs
/// every invocation to `invocations.log` next to itself, and accepts only
/// `allowed_cache` as a cache target.
///
/// Invocation log lines are the space-joined argument vector, one per call,
/// so tests can count sql-sync and cache-clear invocations exactly.
#[cfg(unix)]
pub fn scripted_tool(dir: &Path, allowed_cache: &str) -> std::io::Result<PathBuf> {
    let body = format!(
        r#"log="$(dirname "$0")/invocations.log"
printf '%s\n' "$*" >> "$log"
for arg; do last="$arg"; done
case "$*" in
  *"@bad st")
    ;;
  *" st")
    echo "Database : ok"
    ;;
  *"sql-sync"*)
    echo "sync complete"
    ;;
  *" cc "*)
    if [ "$last" = "{allowed_cache}" ]; then
      echo "cache cleared"
    else
      printf '[error] invalid cache id %s\033[0m\n' "$last" >&2
    fi
    ;;
esac"#
    );
    fake_tool(dir, "tool", &body)
}

/// Read the scripted tool's invocation log as one line per call.
#[cfg(unix)]
pub fn read_invocations(dir: &Path) -> Vec<String> {
    match std::fs::read_to_string(dir.join("invocations.log")) {
        Ok(contents) => contents.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}
