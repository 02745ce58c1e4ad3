//! Print a binding label.

use crate::cli::BindingArgs;
use anyhow::Result;
use colored::Colorize;
use sealedsecret_types::{BindingLabel, SealingScope};

pub fn execute(args: &BindingArgs, quiet: bool) -> Result<()> {
    let (scope, label) = derive(args)?;
    println!("{}", label);

    if !quiet {
        eprintln!(
            "{} {} scope, resource id {}",
            "→".blue(),
            scope.to_string().cyan(),
            super::seal::display_id(&label.as_text()).cyan()
        );
    }
    Ok(())
}

fn derive(args: &BindingArgs) -> Result<(SealingScope, BindingLabel)> {
    let scope = SealingScope::resolve(args.scope.as_deref())?;
    Ok((scope, BindingLabel::derive(&args.namespace, &args.name, scope)))
}
