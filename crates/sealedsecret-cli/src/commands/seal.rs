//! Seal commands.

use crate::cli::BindingArgs;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use sealedsecret_core::util::load_yaml_file;
use sealedsecret_provider::request::attr;
use sealedsecret_provider::{
    Provider, RawSecretRequest, RawSecretState, RawSecretsRequest, RawSecretsState, SealedResource, SecretBinding,
};
use sealedsecret_types::SealerConfig;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// JSON printed by `seal-many`.
#[derive(Debug, Serialize)]
struct SealedMap<'a> {
    id: &'a str,
    encrypted_values: &'a BTreeMap<String, String>,
}

pub fn single(config: SealerConfig, args: &BindingArgs, cert: &Path, value: Option<&str>) -> Result<()> {
    let value = match value {
        Some(v) => v.to_string(),
        None => strip_line_ending(super::read_stdin()?),
    };

    let state = seal_single(&Provider::new(config), args, cert, value)?;
    println!("{}", state.encrypted_value);
    Ok(())
}

pub fn many(config: SealerConfig, args: &BindingArgs, cert: &Path, values: &Path) -> Result<()> {
    let state = seal_many(&Provider::new(config), args, cert, values)?;
    let out = SealedMap {
        id: state.id.as_str(),
        encrypted_values: &state.encrypted_values,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    eprintln!(
        "{} Sealed {} values for {}",
        "✓".green().bold(),
        state.encrypted_values.len(),
        display_id(state.id.as_str()).cyan()
    );
    Ok(())
}

fn seal_single(provider: &Provider, args: &BindingArgs, cert: &Path, value: String) -> Result<RawSecretState> {
    let request = RawSecretRequest::new(binding(args, cert)?, value);
    let state = provider.raw_secret().apply(None, &request)?;
    Ok(state)
}

fn seal_many(provider: &Provider, args: &BindingArgs, cert: &Path, values: &Path) -> Result<RawSecretsState> {
    let data = load_yaml_file(values).with_context(|| format!("Failed to read values from {}", values.display()))?;
    if !data.is_object() {
        bail!("{} must contain a map of names to values", values.display());
    }

    let binding = binding(args, cert)?;
    let mut attrs = Map::new();
    attrs.insert(attr::NAME.to_string(), Value::String(binding.name));
    attrs.insert(attr::NAMESPACE.to_string(), Value::String(binding.namespace));
    if let Some(scope) = binding.scope {
        attrs.insert(attr::SCOPE.to_string(), Value::String(scope));
    }
    attrs.insert(attr::CERTIFICATE.to_string(), Value::String(binding.certificate));
    attrs.insert(attr::VALUES.to_string(), data);

    let request = RawSecretsRequest::from_attributes(&attrs)?;
    let state = provider.raw_secrets().apply(None, &request)?;
    Ok(state)
}

fn binding(args: &BindingArgs, cert: &Path) -> Result<SecretBinding> {
    let certificate = fs::read_to_string(cert)
        .with_context(|| format!("Failed to read certificate {}", cert.display()))?;

    let mut binding = SecretBinding::new(&args.name, &args.namespace, certificate);
    binding.scope = args.scope.clone();
    Ok(binding)
}

/// Drop the single line ending a shell pipe adds.
fn strip_line_ending(mut value: String) -> String {
    if value.ends_with('\n') {
        value.pop();
        if value.ends_with('\r') {
            value.pop();
        }
    }
    value
}

pub(crate) fn display_id(id: &str) -> &str {
    if id.is_empty() {
        "(cluster-wide)"
    } else {
        id
    }
}
