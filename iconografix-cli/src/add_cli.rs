//! `add` - select icons and post them to the host

use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use tracing::{debug, info};

use iconografix_core::host::{AddToProject, HostMessagingChannel, JsonLinesTransport, TargetOrigin};
use iconografix_core::{SelectionMode, SelectionStore};

use crate::browse_cli::find_item;
use crate::AppContext;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Icon names to select, in order (only the first is sent)
    #[clap(required = true)]
    pub names: Vec<String>,

    /// Icon set id (defaults to the configured default provider)
    #[clap(long, short)]
    pub provider: Option<String>,

    /// Host origin, overriding the configured one
    #[clap(long)]
    pub origin: Option<String>,
}

pub async fn execute_add(ctx: &AppContext, args: &AddArgs) -> Result<()> {
    let target_origin = match &args.origin {
        Some(origin) => TargetOrigin::parse(origin)?,
        None => ctx.config.target_origin()?,
    };

    let mut selection = SelectionStore::new();
    if ctx.config.multi_select {
        selection.set_mode(SelectionMode::Multi);
    }
    for name in &args.names {
        let item = find_item(ctx, name).await?;
        selection.add(&item);
    }
    debug!(
        "Selected {} icon(s) in {:?} mode for {}",
        selection.count(),
        selection.mode(),
        target_origin
    );

    let transport = Arc::new(JsonLinesTransport::new(std::io::stdout()));
    let channel = HostMessagingChannel::new(transport, ctx.config.production);

    let report = AddToProject::new(&ctx.registry, &channel, target_origin)
        .with_plugin(&ctx.config.plugin_name, &ctx.config.plugin_version)
        .run(&mut selection)
        .await?;

    if let Some(report) = report {
        if report.batch_total > 1 {
            info!(
                "Added {} (1 of {} selected icons sent)",
                report.item_id, report.batch_total
            );
        } else {
            info!("Added {}", report.item_id);
        }
    }
    Ok(())
}
