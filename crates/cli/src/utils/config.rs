//! Config file reading and parameter resolution

use crate::error::{CliError, CliResult};
use crate::GlobalArgs;
use directories::BaseDirs;
use kf_core::cluster::KubeClients;
use kf_core::{KfError, DEFAULT_NAMESPACE};
use serde::Deserialize;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Project-local config file, checked before the one in the home directory.
pub const LOCAL_CONFIG_PATH: &str = ".kf/config.yaml";

const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Config file structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub namespace: Option<String>,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

/// Read a config file. A missing file is not an error.
pub fn read_config_file(config_path: &Path) -> CliResult<Option<ConfigFile>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let config_content = fs::read_to_string(config_path).map_err(|e| {
        CliError::Config(format!(
            "Failed to read config file {}: {e}",
            config_path.display()
        ))
    })?;

    // An empty file parses as YAML null
    if config_content.trim().is_empty() {
        return Ok(Some(ConfigFile::default()));
    }

    let config: ConfigFile = serde_yaml::from_str(&config_content).map_err(|e| {
        CliError::Config(format!(
            "Failed to parse config file {}: {e}",
            config_path.display()
        ))
    })?;

    Ok(Some(config))
}

/// `~/.kf/config.yaml`, if a home directory can be determined.
pub fn home_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".kf").join("config.yaml"))
}

/// Pick the config file to load: an explicit path wins, then the
/// project-local file, then the one in the home directory.
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(LOCAL_CONFIG_PATH);
    if local.exists() {
        return Some(local);
    }
    home_config_path()
}

fn single_path(list: &OsStr) -> Option<PathBuf> {
    let mut paths = std::env::split_paths(list);
    match (paths.next(), paths.next()) {
        (Some(path), None) => Some(path),
        _ => None,
    }
}

/// Parameters shared by every command, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct KfParams {
    pub namespace: String,
    pub kube_config_file: Option<PathBuf>,
    pub context: Option<String>,
}

impl Default for KfParams {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            kube_config_file: None,
            context: None,
        }
    }
}

impl KfParams {
    /// Resolve parameters from flags (which already include their
    /// environment variables) and the config file, falling back to defaults.
    pub fn resolve(global: &GlobalArgs) -> CliResult<Self> {
        let file = match config_path(global.config_file.as_deref()) {
            Some(path) => read_config_file(&path)?.unwrap_or_default(),
            None => ConfigFile::default(),
        };
        let env_kubeconfig = std::env::var_os(KUBECONFIG_ENV).filter(|v| !v.is_empty());
        Ok(Self::merge(global, env_kubeconfig, file))
    }

    /// Kubeconfig precedence is flag, then `$KUBECONFIG`, then the config
    /// file. A `$KUBECONFIG` listing several files leaves the path unset so
    /// client inference can merge them.
    fn merge(global: &GlobalArgs, env_kubeconfig: Option<OsString>, file: ConfigFile) -> Self {
        let kube_config_file = match (&global.kubeconfig, env_kubeconfig) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(env)) => single_path(&env),
            (None, None) => file.kubeconfig,
        };

        Self {
            namespace: global
                .namespace
                .clone()
                .or(file.namespace)
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            kube_config_file,
            context: global.context.clone().or(file.context),
        }
    }

    /// The target namespace, rejecting an explicitly empty one before any
    /// client is built.
    pub fn require_namespace(&self) -> CliResult<&str> {
        if self.namespace.is_empty() {
            return Err(KfError::empty_namespace().into());
        }
        Ok(&self.namespace)
    }

    /// Production client factory for these parameters.
    pub fn clients(&self) -> KubeClients {
        let mut clients = KubeClients::new();
        if let Some(path) = &self.kube_config_file {
            clients = clients.with_kube_config_file(path);
        }
        if let Some(context) = &self.context {
            clients = clients.with_context(context);
        }
        clients
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{DirGuard, EnvGuard};
    use kf_core::error::EMPTY_NAMESPACE_ERROR;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_config_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_config_file(&temp_dir.path().join("config.yaml")).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_read_config_file_all_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(
            &path,
            "namespace: team-a\nkubeconfig: /etc/kf/kubeconfig\ncontext: staging\n",
        )
        .unwrap();

        let config = read_config_file(&path).unwrap().unwrap();
        assert_eq!(config.namespace.as_deref(), Some("team-a"));
        assert_eq!(config.kubeconfig, Some(PathBuf::from("/etc/kf/kubeconfig")));
        assert_eq!(config.context.as_deref(), Some("staging"));
    }

    #[test]
    fn test_read_config_file_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "\n").unwrap();

        let config = read_config_file(&path).unwrap().unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_read_config_file_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "namespace: [unclosed\n").unwrap();

        let result = read_config_file(&path);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_read_config_file_unknown_field() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "namespcae: typo\n").unwrap();

        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("namespcae"));
    }

    #[test]
    fn test_merge_flag_wins_over_file() {
        let global = GlobalArgs {
            namespace: Some("from-flag".to_string()),
            ..GlobalArgs::default()
        };
        let file = ConfigFile {
            namespace: Some("from-file".to_string()),
            context: Some("file-ctx".to_string()),
            ..ConfigFile::default()
        };

        let params = KfParams::merge(&global, None, file);
        assert_eq!(params.namespace, "from-flag");
        assert_eq!(params.context.as_deref(), Some("file-ctx"));
    }

    #[test]
    fn test_merge_defaults() {
        let params = KfParams::merge(&GlobalArgs::default(), None, ConfigFile::default());
        assert_eq!(params, KfParams::default());
        assert_eq!(params.namespace, "default");
    }

    #[test]
    fn test_require_namespace() {
        let params = KfParams {
            namespace: String::new(),
            ..KfParams::default()
        };
        let err = params.require_namespace().unwrap_err();
        assert_eq!(err.to_string(), EMPTY_NAMESPACE_ERROR);

        assert_eq!(KfParams::default().require_namespace().unwrap(), "default");
    }

    #[test]
    #[serial]
    fn test_resolve_reads_local_config() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path()).unwrap();

        fs::create_dir_all(".kf").unwrap();
        fs::write(LOCAL_CONFIG_PATH, "namespace: local-ns\n").unwrap();

        let params = KfParams::resolve(&GlobalArgs::default()).unwrap();
        assert_eq!(params.namespace, "local-ns");
    }

    #[test]
    #[serial]
    fn test_resolve_explicit_config_path() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path()).unwrap();

        fs::create_dir_all(".kf").unwrap();
        fs::write(LOCAL_CONFIG_PATH, "namespace: local-ns\n").unwrap();
        fs::write("other.yaml", "namespace: other-ns\n").unwrap();

        let global = GlobalArgs {
            config_file: Some(PathBuf::from("other.yaml")),
            ..GlobalArgs::default()
        };
        let params = KfParams::resolve(&global).unwrap();
        assert_eq!(params.namespace, "other-ns");
    }

    #[test]
    fn test_merge_kubeconfig_precedence() {
        let file = || ConfigFile {
            kubeconfig: Some(PathBuf::from("/from/file")),
            ..ConfigFile::default()
        };
        let flag = GlobalArgs {
            kubeconfig: Some(PathBuf::from("/from/flag")),
            ..GlobalArgs::default()
        };
        let env = || Some(OsString::from("/from/env"));

        let params = KfParams::merge(&flag, env(), file());
        assert_eq!(params.kube_config_file, Some(PathBuf::from("/from/flag")));

        let params = KfParams::merge(&GlobalArgs::default(), env(), file());
        assert_eq!(params.kube_config_file, Some(PathBuf::from("/from/env")));

        let params = KfParams::merge(&GlobalArgs::default(), None, file());
        assert_eq!(params.kube_config_file, Some(PathBuf::from("/from/file")));
    }

    #[test]
    fn test_merge_kubeconfig_env_list_is_left_to_inference() {
        let list = std::env::join_paths(["/a/kubeconfig", "/b/kubeconfig"]).unwrap();
        let file = ConfigFile {
            kubeconfig: Some(PathBuf::from("/from/file")),
            ..ConfigFile::default()
        };

        let params = KfParams::merge(&GlobalArgs::default(), Some(list), file);
        assert_eq!(params.kube_config_file, None);
    }

    #[test]
    #[serial]
    fn test_resolve_kubeconfig_env_beats_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path()).unwrap();
        let _env = EnvGuard::set("KUBECONFIG", "/from/env/kubeconfig");

        fs::create_dir_all(".kf").unwrap();
        fs::write(LOCAL_CONFIG_PATH, "kubeconfig: /from/file/kubeconfig\n").unwrap();

        let params = KfParams::resolve(&GlobalArgs::default()).unwrap();
        assert_eq!(
            params.kube_config_file,
            Some(PathBuf::from("/from/env/kubeconfig"))
        );
    }

    #[test]
    #[serial]
    fn test_resolve_config_file_kubeconfig_without_env() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path()).unwrap();
        let _env = EnvGuard::remove("KUBECONFIG");

        fs::create_dir_all(".kf").unwrap();
        fs::write(LOCAL_CONFIG_PATH, "kubeconfig: /from/file/kubeconfig\n").unwrap();

        let params = KfParams::resolve(&GlobalArgs::default()).unwrap();
        assert_eq!(
            params.kube_config_file,
            Some(PathBuf::from("/from/file/kubeconfig"))
        );
    }
}
