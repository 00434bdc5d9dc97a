//! Subcommand implementations. Each returns the text to print.

use std::fmt::Write as _;

use anyhow::Context;
use clap::Args;
use feature_toggles::{CallerContext, FeatureTogglesApi, ToggleRecord, ToggleUpdate};
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Args)]
pub struct SetArgs {
    pub feature_key: String,

    /// Global on/off switch for the toggle
    #[arg(long, action = clap::ArgAction::Set)]
    pub enabled: bool,

    /// Whitelisted group (repeatable). Omit to open the toggle to everyone.
    #[arg(long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    /// Replace the description; kept unchanged when omitted
    #[arg(long)]
    pub description: Option<String>,

    /// Name recorded in the audit fields
    #[arg(long, default_value = "cli")]
    pub operator: String,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    pub feature_key: String,

    /// Group the caller belongs to (repeatable). Without any, the caller is anonymous.
    #[arg(long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    /// Evaluate as an administrator
    #[arg(long, conflicts_with = "groups")]
    pub admin: bool,
}

/// # Errors
///
/// Fails if the update is rejected or the store is unavailable.
pub async fn set(api: &dyn FeatureTogglesApi, args: SetArgs) -> anyhow::Result<String> {
    let mut update = ToggleUpdate::new(args.feature_key, args.enabled);
    if !args.groups.is_empty() {
        update = update.with_groups(args.groups);
    }
    if let Some(description) = args.description {
        update = update.with_description(description);
    }

    let record = api.update_feature(update, &args.operator).await?;
    render_record(&record)
}

/// # Errors
///
/// Fails if the toggle does not exist or the store is unavailable.
pub async fn show(api: &dyn FeatureTogglesApi, feature_key: &str) -> anyhow::Result<String> {
    let record = api.get_feature(feature_key).await?;
    render_record(&record)
}

/// Returns whether the caller is allowed.
///
/// # Errors
///
/// Fails if the store is unavailable and the module propagates store errors.
pub async fn check(api: &dyn FeatureTogglesApi, args: &CheckArgs) -> anyhow::Result<bool> {
    let caller = if args.admin {
        CallerContext::admin()
    } else if args.groups.is_empty() {
        CallerContext::anonymous()
    } else {
        CallerContext::member_of(args.groups.iter().cloned())
    };
    Ok(api.is_allowed(&args.feature_key, &caller).await?)
}

/// # Errors
///
/// Fails if a timestamp cannot be formatted.
pub fn render_record(record: &ToggleRecord) -> anyhow::Result<String> {
    let groups = if record.allowed_groups.is_empty() {
        "(everyone)".to_owned()
    } else {
        record
            .allowed_groups
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut out = String::new();
    writeln!(out, "feature_key: {}", record.feature_key)?;
    writeln!(out, "enabled:     {}", record.enabled)?;
    writeln!(out, "groups:      {groups}")?;
    writeln!(
        out,
        "description: {}",
        record.description.as_deref().unwrap_or("-")
    )?;
    writeln!(out, "version:     {}", record.version)?;
    writeln!(
        out,
        "created:     {} by {}",
        record.created_at.format(&Rfc3339).context("created_at")?,
        record.created_by
    )?;
    write!(
        out,
        "updated:     {} by {}",
        record.updated_at.format(&Rfc3339).context("updated_at")?,
        record.updated_by
    )?;
    Ok(out)
}
