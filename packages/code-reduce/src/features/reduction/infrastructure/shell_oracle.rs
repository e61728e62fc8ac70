//! Shell command oracle

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use regex::Regex;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, trace, warn};

use crate::config::{ConfigError, ConfigResult, OracleConfig};
use crate::errors::OracleError;
use crate::features::reduction::ports::Oracle;

/// Runs `sh -c <command>` in the working directory.
///
/// Passes iff the exit status equals `success_exit_code` and, when set,
/// `output_pattern` matches stdout followed by stderr. The command gets its
/// own process group; on timeout the whole group is killed.
pub struct ShellOracle {
    command: String,
    timeout: Option<Duration>,
    success_exit_code: i32,
    output_pattern: Option<Regex>,
    runtime: Option<Runtime>,
}

impl ShellOracle {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            timeout: None,
            success_exit_code: 0,
            output_pattern: None,
            runtime: None,
        }
    }

    pub fn from_config(config: &OracleConfig) -> ConfigResult<Self> {
        let output_pattern = config
            .output_pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()?;

        Ok(Self {
            command: config.command.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
            success_exit_code: config.success_exit_code,
            output_pattern,
            runtime: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_success_exit_code(mut self, code: i32) -> Self {
        self.success_exit_code = code;
        self
    }

    pub fn with_output_pattern(mut self, pattern: Regex) -> Self {
        self.output_pattern = Some(pattern);
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Current-thread runtime, built on first use and reused across trials.
    fn ensure_runtime(&mut self) -> Result<(), OracleError> {
        if self.runtime.is_none() {
            let runtime = Builder::new_current_thread()
                .enable_io()
                .enable_time()
                .build()
                .map_err(OracleError::Wait)?;
            self.runtime = Some(runtime);
        }
        Ok(())
    }

    fn spawn(&self, workdir: &Path) -> Result<Child, OracleError> {
        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg(&self.command)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        command.spawn().map_err(|source| OracleError::Spawn {
            command: self.command.clone(),
            source,
        })
    }

    /// Run the command to completion. The deadline covers both the exit of
    /// `sh` and the end of its output, so a background grandchild holding
    /// the pipes open still times out.
    async fn run(&self, workdir: &Path) -> Result<(ExitStatus, String), OracleError> {
        let mut child = self.spawn(workdir)?;
        let group = child.id();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let finished = async {
            let (status, out, err) =
                tokio::join!(child.wait(), read_all(stdout), read_all(stderr));
            status.map(|status| (status, out + &err)).map_err(OracleError::Wait)
        };

        let Some(limit) = self.timeout else {
            return finished.await;
        };
        let outcome = tokio::time::timeout(limit, finished).await;
        match outcome {
            Ok(result) => result,
            Err(_) => {
                warn!(command = %self.command, ?limit, "oracle command timed out");
                kill_group(&mut child, group);
                let _ = child.wait().await;
                Err(OracleError::Timeout { limit })
            }
        }
    }
}

async fn read_all<R: AsyncRead + Unpin>(pipe: Option<R>) -> String {
    let mut bytes = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut bytes).await;
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Kill every process in the command's group. `sh` may already be reaped
/// while a grandchild still runs, so the group id recorded at spawn is used.
fn kill_group(child: &mut Child, group: Option<u32>) {
    #[cfg(unix)]
    if let Some(pgid) = group {
        // SAFETY: killpg only sends a signal. The group was created by
        // `process_group(0)` at spawn, so its id equals the child pid.
        unsafe {
            libc::killpg(pgid as libc::pid_t, libc::SIGKILL);
        }
    }
    #[cfg(not(unix))]
    let _ = group;
    let _ = child.start_kill();
}

impl Oracle for ShellOracle {
    fn check(&mut self, workdir: &Path) -> Result<bool, OracleError> {
        self.ensure_runtime()?;
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(|| OracleError::Other("oracle runtime unavailable".to_string()))?;
        let (status, output) = runtime.block_on(self.run(workdir))?;

        let code = status.code();
        let exit_ok = code == Some(self.success_exit_code);
        let output_ok = self
            .output_pattern
            .as_ref()
            .map_or(true, |pattern| pattern.is_match(&output));
        trace!(?code, output_bytes = output.len(), "oracle command finished");
        debug!(exit_ok, output_ok, "oracle checked");

        Ok(exit_ok && output_ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn check(oracle: &mut ShellOracle) -> Result<bool, OracleError> {
        let dir = tempfile::tempdir().unwrap();
        oracle.check(dir.path())
    }

    #[test]
    fn test_exit_status_decides() {
        assert!(check(&mut ShellOracle::new("true")).unwrap());
        assert!(!check(&mut ShellOracle::new("false")).unwrap());
        assert!(check(&mut ShellOracle::new("exit 3").with_success_exit_code(3)).unwrap());
    }

    #[test]
    fn test_runs_in_workdir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("crash.txt"), "boom").unwrap();
        let mut oracle = ShellOracle::new("grep -q boom crash.txt");
        assert!(oracle.check(dir.path()).unwrap());
    }

    #[test]
    fn test_output_pattern_must_match() {
        let pattern = Regex::new("internal compiler error").unwrap();
        let mut matching = ShellOracle::new("echo 'internal compiler error' >&2").with_output_pattern(pattern.clone());
        let mut silent = ShellOracle::new("echo fine").with_output_pattern(pattern);

        assert!(check(&mut matching).unwrap());
        assert!(!check(&mut silent).unwrap());
    }

    #[test]
    fn test_timeout_kills_command() {
        let mut oracle = ShellOracle::new("sleep 5").with_timeout(Duration::from_millis(100));
        let started = Instant::now();
        let result = check(&mut oracle);

        assert!(matches!(result, Err(OracleError::Timeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_timeout_covers_background_output() {
        // `sh` exits at once but the background sleep keeps stdout open
        let mut oracle = ShellOracle::new("sleep 5 & exit 0").with_timeout(Duration::from_millis(300));
        let started = Instant::now();
        let result = check(&mut oracle);

        assert!(matches!(result, Err(OracleError::Timeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_timeout_kills_whole_process_group() {
        fn running(pid: &str) -> bool {
            std::fs::read_to_string(format!("/proc/{pid}/stat"))
                .map(|stat| {
                    let state = stat.rsplit(')').next().unwrap_or("").trim_start();
                    !state.starts_with('Z')
                })
                .unwrap_or(false)
        }

        let dir = tempfile::tempdir().unwrap();
        let mut oracle = ShellOracle::new("sleep 30 & echo $! > sleeper.pid; wait")
            .with_timeout(Duration::from_millis(300));
        let result = oracle.check(dir.path());
        assert!(matches!(result, Err(OracleError::Timeout { .. })));

        let pid = std::fs::read_to_string(dir.path().join("sleeper.pid")).unwrap();
        let pid = pid.trim();
        let deadline = Instant::now() + Duration::from_secs(2);
        while running(pid) && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(!running(pid), "sleep {pid} survived the timeout");
    }

    #[test]
    fn test_timeout_message_keeps_subsecond_limit() {
        let error = OracleError::Timeout { limit: Duration::from_millis(300) };
        assert_eq!(error.to_string(), "oracle command timed out after 300ms");
    }

    #[test]
    fn test_runtime_is_reused_across_checks() {
        let mut oracle = ShellOracle::new("true");
        assert!(check(&mut oracle).unwrap());
        assert!(check(&mut oracle).unwrap());
    }

    #[test]
    fn test_from_config() {
        let mut config = OracleConfig::new("exit 1");
        config.success_exit_code = 1;
        config.timeout_secs = Some(10);
        let mut oracle = ShellOracle::from_config(&config).unwrap();
        assert!(check(&mut oracle).unwrap());

        config.output_pattern = Some("[".to_string());
        assert!(matches!(ShellOracle::from_config(&config), Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_missing_workdir_is_spawn_error() {
        let mut oracle = ShellOracle::new("true");
        let result = oracle.check(Path::new("/nonexistent/code-reduce/workdir"));
        assert!(matches!(result, Err(OracleError::Spawn { .. })));
    }
}
