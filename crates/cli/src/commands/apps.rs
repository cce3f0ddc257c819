//! App commands: `delete` and `apps`

use crate::error::CliResult;
use crate::utils::config::KfParams;
use crate::utils::output::{format_age, or_dash, write_table, OutputFormat};
use clap::Args;
use kf_core::apps::{
    with_delete_namespace, with_list_label_selector, with_list_namespace, Deleter, Lister,
};
use kf_core::client::ServingFactory;
use std::io::Write;

/// Options for `delete`
#[derive(Args, Debug, Clone)]
pub struct DeleteOptions {
    /// Name of the app to delete
    pub app_name: String,
}

/// Options for `apps`
#[derive(Args, Debug, Clone)]
pub struct ListOptions {
    /// Only list apps whose labels match this selector (e.g. team=payments)
    #[arg(short = 'l', long)]
    pub selector: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub async fn delete<F>(
    params: &KfParams,
    factory: F,
    options: &DeleteOptions,
    out: &mut dyn Write,
) -> CliResult<()>
where
    F: ServingFactory + 'static,
{
    let namespace = params.require_namespace()?;

    Deleter::new(factory)
        .delete(&options.app_name, &[with_delete_namespace(namespace)])
        .await?;

    writeln!(out, "App {} deleted from namespace {namespace}", options.app_name)?;
    Ok(())
}

pub async fn list<F>(
    params: &KfParams,
    factory: F,
    options: &ListOptions,
    out: &mut dyn Write,
) -> CliResult<()>
where
    F: ServingFactory + 'static,
{
    let namespace = params.require_namespace()?;

    let mut opts = vec![with_list_namespace(namespace)];
    if let Some(selector) = &options.selector {
        opts.push(with_list_label_selector(selector.as_str()));
    }
    let apps = Lister::new(factory).list(&opts).await?;

    match options.format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&apps)?)?;
        }
        OutputFormat::Table => {
            writeln!(out, "Getting apps in namespace: {namespace}")?;
            if apps.is_empty() {
                writeln!(out, "No apps found")?;
                return Ok(());
            }
            let now = chrono::Utc::now();
            let rows: Vec<Vec<String>> = apps
                .iter()
                .map(|a| {
                    vec![
                        a.name.clone(),
                        or_dash(a.ready.as_deref()),
                        format_age(a.created, now),
                        or_dash(a.url.as_deref()),
                    ]
                })
                .collect();
            write_table(out, &["NAME", "READY", "AGE", "URL"], &rows)?;
        }
    }
    Ok(())
}
