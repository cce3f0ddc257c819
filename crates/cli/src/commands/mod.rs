//! CLI commands

pub mod apps;
pub mod completion;
pub mod secrets;
pub mod services;

use crate::error::{CliError, CliResult};
use crate::utils::config::KfParams;
use crate::{Commands, GlobalArgs};
use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

/// Print a failed command's error to stderr and map it to an exit code.
pub fn report(result: CliResult<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Run `fut`, giving up after `timeout` seconds if one is set. Dropping the
/// future abandons any request still in flight.
pub async fn with_timeout<T>(
    timeout: Option<u64>,
    fut: impl Future<Output = CliResult<T>>,
) -> CliResult<T> {
    match timeout {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), fut)
            .await
            .map_err(|_| CliError::Timeout(secs))?,
        None => fut.await,
    }
}

/// Run a parsed command, printing its output to stdout, and return the exit code.
pub async fn run(global: &GlobalArgs, command: &Commands) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = execute(global, command, &mut out).await;
    let _ = out.flush();
    report(result)
}

/// Parameters are only resolved for commands that talk to the cluster, so a
/// broken config file never blocks completion generation.
async fn execute(
    global: &GlobalArgs,
    command: &Commands,
    out: &mut dyn Write,
) -> CliResult<()> {
    if let Commands::Completion(options) = command {
        return completion::run(options, out);
    }

    let params = KfParams::resolve(global)?;
    tracing::debug!(
        namespace = %params.namespace,
        kubeconfig = ?params.kube_config_file,
        context = ?params.context,
        "resolved parameters"
    );
    dispatch(&params, command, global.timeout, out).await
}

async fn dispatch(
    params: &KfParams,
    command: &Commands,
    timeout: Option<u64>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let clients = params.clients();
    match command {
        Commands::CreateService(options) => {
            with_timeout(timeout, services::create(params, clients, options, out)).await
        }
        Commands::DeleteService(options) => {
            with_timeout(timeout, services::delete(params, clients, options, out)).await
        }
        Commands::Services(options) => {
            with_timeout(timeout, services::list(params, clients, options, out)).await
        }
        Commands::Delete(options) => {
            with_timeout(timeout, apps::delete(params, clients, options, out)).await
        }
        Commands::Apps(options) => {
            with_timeout(timeout, apps::list(params, clients, options, out)).await
        }
        Commands::Secrets(options) => {
            with_timeout(timeout, secrets::list(params, clients, options, out)).await
        }
        Commands::Secret(options) => {
            with_timeout(timeout, secrets::get(params, clients, options, out)).await
        }
        Commands::DeleteSecret(options) => {
            with_timeout(timeout, secrets::delete(params, clients, options, out)).await
        }
        Commands::Completion(options) => completion::run(options, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::DirGuard;
    use crate::utils::config::LOCAL_CONFIG_PATH;
    use kf_core::{ClientError, KfError};
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn broken_local_config() -> (DirGuard, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let guard = DirGuard::new(temp_dir.path()).unwrap();
        fs::create_dir_all(".kf").unwrap();
        fs::write(LOCAL_CONFIG_PATH, "namespace: [unclosed\n").unwrap();
        (guard, temp_dir)
    }

    #[test]
    fn test_report_exit_codes() {
        assert_eq!(report(Ok(())), 0);
        assert_eq!(report(Err(CliError::Message("boom".to_string()))), 1);
    }

    #[tokio::test]
    async fn test_with_timeout_passes_result_through() {
        let value = with_timeout(Some(5), async { Ok::<_, CliError>(7) }).await.unwrap();
        assert_eq!(value, 7);

        let err = with_timeout(None, async {
            Err::<(), _>(CliError::Core(KfError::Remote(ClientError::new("server-call-error"))))
        })
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "server-call-error");
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_expires() {
        let err = with_timeout(Some(1), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, CliError>(())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Timeout(1)));
        assert_eq!(err.to_string(), "operation timed out after 1s");
    }

    #[tokio::test]
    async fn test_dispatch_rejects_empty_namespace_before_connecting() {
        let params = KfParams {
            namespace: String::new(),
            kube_config_file: Some("/definitely/missing/kubeconfig".into()),
            ..KfParams::default()
        };
        let command = Commands::Services(services::ListOptions {
            format: crate::utils::output::OutputFormat::Table,
        });
        let mut out = Vec::new();
        let err = dispatch(&params, &command, None, &mut out).await.unwrap_err();
        assert_eq!(err.to_string(), kf_core::error::EMPTY_NAMESPACE_ERROR);
    }

    #[tokio::test]
    #[serial]
    async fn test_completion_ignores_broken_config_file() {
        let (_guard, _dir) = broken_local_config();
        let command = Commands::Completion(completion::Options {
            shell: "bash".to_string(),
        });
        let mut out = Vec::new();
        execute(&GlobalArgs::default(), &command, &mut out)
            .await
            .unwrap();
        assert!(String::from_utf8(out).unwrap().contains("_kf"));
    }

    #[tokio::test]
    #[serial]
    async fn test_cluster_command_reports_broken_config_file() {
        let (_guard, _dir) = broken_local_config();
        let command = Commands::Services(services::ListOptions {
            format: crate::utils::output::OutputFormat::Table,
        });
        let mut out = Vec::new();
        let err = execute(&GlobalArgs::default(), &command, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert!(out.is_empty());
    }
}
