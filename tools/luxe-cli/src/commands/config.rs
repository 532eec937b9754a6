//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    ctx.output.kv("currency", ctx.config.currency.code());
    ctx.output.kv("store", &ctx.store_dir().display().to_string());

    ctx.output.info("[shipping]");
    ctx.output.kv(
        "free_shipping_threshold",
        &ctx.config.shipping.free_shipping_threshold.to_string(),
    );
    ctx.output.kv("flat_fee", &ctx.config.shipping.flat_fee.to_string());

    ctx.output.info("[promo_codes]");
    for code in &ctx.config.promo_codes {
        let status = if code.active { "" } else { " (inactive)" };
        ctx.output.list_item(&format!(
            "{} - {} ({:.0}%){}",
            code.code,
            code.name,
            code.rate.value() * 100.0,
            status
        ));
    }

    ctx.output.info("[auth]");
    ctx.output.kv(
        "token_expiry_days",
        &ctx.config.auth.token_expiry_days.to_string(),
    );

    ctx.output.info("[loading]");
    ctx.output.kv(
        "step_interval_ms",
        &ctx.config.loading.step_interval_ms.to_string(),
    );
    ctx.output.kv(
        "completion_delay_ms",
        &ctx.config.loading.completion_delay_ms.to_string(),
    );

    ctx.output.info("[checkout]");
    ctx.output.kv("delay_ms", &ctx.config.checkout.delay_ms.to_string());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join("luxe.toml");

    if path.exists() && !force {
        bail!("luxe.toml already exists. Use --force to overwrite.");
    }

    ctx.config.save(&path)?;
    ctx.output.success(&format!("Wrote {}", path.display()));
    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        ctx.output.info("No config file found, using defaults");
        return Ok(());
    };

    ctx.config.validate()?;
    if !ctx.config.promo_codes.iter().any(|code| code.active) {
        ctx.output.warn("No active promo codes");
    }

    ctx.output.success(&format!("{} is valid", path.display()));
    Ok(())
}
