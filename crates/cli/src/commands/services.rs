//! Service instance commands
//!
//! `create-service`, `delete-service` and `services`.

use crate::error::CliResult;
use crate::utils::config::KfParams;
use crate::utils::output::{format_age, or_dash, write_field, write_table, OutputFormat};
use clap::Args;
use kf_core::client::CatalogFactory;
use kf_core::params::parse_json_or_file;
use kf_core::resources::ServiceInstance;
use kf_core::services::{
    with_create_service_namespace, with_create_service_params, with_delete_service_namespace,
    with_list_services_namespace, ServicesClient,
};
use std::io::Write;

/// Options for `create-service`
#[derive(Args, Debug, Clone)]
pub struct CreateOptions {
    /// Service class to provision (e.g. db-service)
    pub service_class: String,
    /// Plan of the service class (e.g. free)
    pub plan: String,
    /// Name of the new service instance
    pub instance_name: String,
    /// Instance parameters as inline JSON or a path to a JSON/YAML file
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Options for `delete-service`
#[derive(Args, Debug, Clone)]
pub struct DeleteOptions {
    /// Name of the service instance to delete
    pub instance_name: String,
}

/// Options for `services`
#[derive(Args, Debug, Clone)]
pub struct ListOptions {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub async fn create<F>(
    params: &KfParams,
    factory: F,
    options: &CreateOptions,
    out: &mut dyn Write,
) -> CliResult<()>
where
    F: CatalogFactory + 'static,
{
    let namespace = params.require_namespace()?;

    let mut opts = vec![with_create_service_namespace(namespace)];
    if let Some(config) = &options.config {
        opts.push(with_create_service_params(parse_json_or_file(config)?));
    }

    let instance = ServicesClient::new(factory)
        .create_service(
            &options.service_class,
            &options.plan,
            &options.instance_name,
            &opts,
        )
        .await?;

    writeln!(
        out,
        "Created service instance {} in namespace {}",
        instance.name, instance.namespace
    )?;
    describe_instance(out, &instance)
}

fn describe_instance(out: &mut dyn Write, instance: &ServiceInstance) -> CliResult<()> {
    write_field(out, "Name", &instance.name)?;
    write_field(out, "Namespace", &instance.namespace)?;
    write_field(out, "Class", &instance.class_name)?;
    write_field(out, "Plan", &instance.plan_name)?;
    write_field(
        out,
        "Params",
        &serde_json::Value::Object(instance.params.clone()).to_string(),
    )?;
    if let Some(status) = &instance.status {
        write_field(out, "Status", status)?;
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
    F: CatalogFactory + 'static,
{
    let namespace = params.require_namespace()?;

    ServicesClient::new(factory)
        .delete_service(
            &options.instance_name,
            &[with_delete_service_namespace(namespace)],
        )
        .await?;

    writeln!(
        out,
        "Deleted service instance {} in namespace {namespace}",
        options.instance_name
    )?;
    Ok(())
}

pub async fn list<F>(
    params: &KfParams,
    factory: F,
    options: &ListOptions,
    out: &mut dyn Write,
) -> CliResult<()>
where
    F: CatalogFactory + 'static,
{
    let namespace = params.require_namespace()?;

    let instances = ServicesClient::new(factory)
        .list_services(&[with_list_services_namespace(namespace)])
        .await?;

    match options.format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&instances)?)?;
        }
        OutputFormat::Table => {
            writeln!(out, "Getting services in namespace: {namespace}")?;
            if instances.is_empty() {
                writeln!(out, "No services found")?;
                return Ok(());
            }
            let now = chrono::Utc::now();
            let rows: Vec<Vec<String>> = instances
                .iter()
                .map(|i| {
                    vec![
                        i.name.clone(),
                        i.class_name.clone(),
                        i.plan_name.clone(),
                        format_age(i.created, now),
                        or_dash(i.status.as_deref()),
                    ]
                })
                .collect();
            write_table(out, &["NAME", "CLASS", "PLAN", "AGE", "STATUS"], &rows)?;
        }
    }
    Ok(())
}
