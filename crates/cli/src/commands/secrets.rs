//! Secret commands: `secrets`, `secret` and `delete-secret`

use crate::error::CliResult;
use crate::utils::config::KfParams;
use crate::utils::output::{format_age, or_dash, write_field, write_table, OutputFormat};
use clap::Args;
use kf_core::client::SecretsFactory;
use kf_core::secrets::{
    with_delete_namespace, with_get_namespace, with_list_label_selector, with_list_namespace,
    SecretsClient,
};
use std::io::Write;

/// Options for `secrets`
#[derive(Args, Debug, Clone)]
pub struct ListOptions {
    /// Only list secrets whose labels match this selector (e.g. env=prod)
    #[arg(short = 'l', long)]
    pub selector: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Options for `secret`
#[derive(Args, Debug, Clone)]
pub struct GetOptions {
    /// Name of the secret
    pub name: String,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Options for `delete-secret`
#[derive(Args, Debug, Clone)]
pub struct DeleteOptions {
    /// Name of the secret to delete
    pub name: String,
}

pub async fn list<F>(
    params: &KfParams,
    factory: F,
    options: &ListOptions,
    out: &mut dyn Write,
) -> CliResult<()>
where
    F: SecretsFactory + 'static,
{
    let namespace = params.require_namespace()?;

    let mut opts = vec![with_list_namespace(namespace)];
    if let Some(selector) = &options.selector {
        opts.push(with_list_label_selector(selector.as_str()));
    }
    let secrets = SecretsClient::new(factory).list(&opts).await?;

    match options.format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&secrets)?)?;
        }
        OutputFormat::Table => {
            if secrets.is_empty() {
                writeln!(out, "No secrets found in namespace {namespace}")?;
                return Ok(());
            }
            let now = chrono::Utc::now();
            let rows: Vec<Vec<String>> = secrets
                .iter()
                .map(|s| {
                    vec![
                        s.name.clone(),
                        or_dash(s.secret_type.as_deref()),
                        s.keys.len().to_string(),
                        format_age(s.created, now),
                    ]
                })
                .collect();
            write_table(out, &["NAME", "TYPE", "KEYS", "AGE"], &rows)?;
        }
    }
    Ok(())
}

pub async fn get<F>(
    params: &KfParams,
    factory: F,
    options: &GetOptions,
    out: &mut dyn Write,
) -> CliResult<()>
where
    F: SecretsFactory + 'static,
{
    let namespace = params.require_namespace()?;

    let secret = SecretsClient::new(factory)
        .get(&options.name, &[with_get_namespace(namespace)])
        .await?;

    match options.format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&secret)?)?;
        }
        OutputFormat::Table => {
            write_field(out, "Name", &secret.name)?;
            write_field(out, "Space", &secret.namespace)?;
            write_field(out, "Type", &or_dash(secret.secret_type.as_deref()))?;
            write_field(out, "Keys", &secret.keys.join(", "))?;
            let labels: Vec<String> = secret
                .labels
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            write_field(out, "Labels", &labels.join(","))?;
        }
    }
    Ok(())
}

pub async fn delete<F>(
    params: &KfParams,
    factory: F,
    options: &DeleteOptions,
    out: &mut dyn Write,
) -> CliResult<()>
where
    F: SecretsFactory + 'static,
{
    let namespace = params.require_namespace()?;

    SecretsClient::new(factory)
        .delete(&options.name, &[with_delete_namespace(namespace)])
        .await?;

    writeln!(out, "Secret {} deleted from namespace {namespace}", options.name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kf_core::client::SecretsApi;
    use kf_core::fake::{Call, FakeCluster};
    use kf_core::resources::Secret;
    use kf_core::ClientError;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn factory_for(
        fake: &Arc<FakeCluster>,
    ) -> impl Fn(&str) -> Result<Arc<dyn SecretsApi>, ClientError> + Send + Sync + 'static {
        let fake = Arc::clone(fake);
        move |_ns: &str| -> Result<Arc<dyn SecretsApi>, ClientError> {
            Ok(fake.clone() as Arc<dyn SecretsApi>)
        }
    }

    fn params_in(namespace: &str) -> KfParams {
        KfParams {
            namespace: namespace.to_string(),
            ..KfParams::default()
        }
    }

    fn seeded() -> Arc<FakeCluster> {
        let mut labels = BTreeMap::new();
        labels.insert("env".to_string(), "prod".to_string());
        Arc::new(FakeCluster::new().with_secrets(vec![Secret {
            name: "db-creds".to_string(),
            namespace: "default".to_string(),
            secret_type: Some("Opaque".to_string()),
            keys: vec!["password".to_string(), "username".to_string()],
            labels,
            created: None,
        }]))
    }

    #[tokio::test]
    async fn test_list_with_selector() {
        let fake = seeded();
        let mut out = Vec::new();
        list(
            &params_in("default"),
            factory_for(&fake),
            &ListOptions {
                selector: Some("env=prod".to_string()),
                format: OutputFormat::Table,
            },
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            fake.calls(),
            vec![Call::ListSecrets {
                namespace: "default".to_string(),
                label_selector: "env=prod".to_string(),
            }]
        );
        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("NAME"));
        assert!(output.contains("db-creds"));
    }

    #[tokio::test]
    async fn test_list_without_selector() {
        let fake = seeded();
        let mut out = Vec::new();
        list(
            &params_in("default"),
            factory_for(&fake),
            &ListOptions {
                selector: None,
                format: OutputFormat::Json,
            },
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            fake.calls(),
            vec![Call::ListSecrets {
                namespace: "default".to_string(),
                label_selector: String::new(),
            }]
        );
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["type"], "Opaque");
    }

    #[tokio::test]
    async fn test_get_shows_keys_not_values() {
        let fake = seeded();
        let mut out = Vec::new();
        get(
            &params_in("default"),
            factory_for(&fake),
            &GetOptions {
                name: "db-creds".to_string(),
                format: OutputFormat::Table,
            },
            &mut out,
        )
        .await
        .unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Keys:    password, username"));
        assert!(output.contains("Labels:  env=prod"));
    }

    #[tokio::test]
    async fn test_get_missing_secret_error_is_verbatim() {
        let fake = seeded();
        let mut out = Vec::new();
        let err = get(
            &params_in("other"),
            factory_for(&fake),
            &GetOptions {
                name: "db-creds".to_string(),
                format: OutputFormat::Table,
            },
            &mut out,
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "secrets \"db-creds\" not found");
    }

    #[tokio::test]
    async fn test_delete() {
        let fake = seeded();
        let mut out = Vec::new();
        delete(
            &params_in("default"),
            factory_for(&fake),
            &DeleteOptions {
                name: "db-creds".to_string(),
            },
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            fake.calls(),
            vec![Call::DeleteSecret {
                namespace: "default".to_string(),
                name: "db-creds".to_string(),
            }]
        );
    }
}
