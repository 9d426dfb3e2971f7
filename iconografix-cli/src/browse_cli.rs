//! Browsing commands: providers, search, random, show

use anyhow::{Context, Result};
use clap::Args;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use iconografix_core::{ItemRecord, PaginationResult};

use crate::AppContext;

/// Paging and output flags shared by search and random
#[derive(Args, Debug)]
pub struct PageArgs {
    /// Icon set id (defaults to the configured default provider)
    #[clap(long, short)]
    pub provider: Option<String>,

    /// Page size (clamped to the configured maximum)
    #[clap(long)]
    pub limit: Option<usize>,

    /// Number of items to skip
    #[clap(long, default_value_t = 0)]
    pub offset: usize,

    /// Output as JSON (`{ data, pagination }`)
    #[clap(long)]
    pub json: bool,
}

/// Table row for provider listing
#[derive(Tabled)]
struct ProviderRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Icons")]
    count: usize,
    #[tabled(rename = "Status")]
    status: String,
}

/// Table row for a page of icons
#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Display Name")]
    display_name: String,
    #[tabled(rename = "File")]
    file: String,
}

fn render<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

pub async fn execute_providers(ctx: &AppContext, json_output: bool) -> Result<()> {
    let reports = ctx.registry.initialize_all().await;

    if json_output {
        let output = serde_json::json!({
            "active": ctx.registry.active_id(),
            "providers": ctx.registry.get_stats(),
            "initialization": reports,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let active = ctx.registry.active_id();
    let rows: Vec<ProviderRow> = ctx
        .registry
        .get_stats()
        .into_iter()
        .zip(reports.iter())
        .map(|(stats, report)| {
            let mut status = if report.is_degraded() {
                "unavailable".to_string()
            } else {
                "ok".to_string()
            };
            if active == Some(stats.id.as_str()) {
                status.push_str(" (active)");
            }
            ProviderRow {
                id: stats.id,
                name: stats.display_name,
                count: stats.count,
                status,
            }
        })
        .collect();

    println!("{}", render(&rows));
    Ok(())
}

pub async fn execute_search(ctx: &AppContext, query: &str, page: &PageArgs) -> Result<()> {
    let limit = ctx.config.page_size(page.limit);
    let result = ctx.registry.search(query, limit, page.offset).await?;
    print_page(&result, page.json)
}

pub async fn execute_random(ctx: &AppContext, page: &PageArgs) -> Result<()> {
    let limit = ctx.config.page_size(page.limit);
    let result = ctx.registry.get_random(limit, page.offset).await?;
    print_page(&result, page.json)
}

pub async fn execute_show(ctx: &AppContext, name: &str) -> Result<()> {
    let item = find_item(ctx, name).await?;
    let content = ctx.registry.get_svg_content(&item).await;
    println!("{content}");
    Ok(())
}

/// Find an icon in the active provider by exact name
pub async fn find_item(ctx: &AppContext, name: &str) -> Result<ItemRecord> {
    let provider = ctx
        .registry
        .active_provider()
        .context("No active provider selected")?;

    // Substring search narrows the candidates, the name must still match exactly
    let result = ctx.registry.search(name, usize::MAX, 0).await?;
    result
        .items
        .into_iter()
        .find(|item| item.name == name)
        .with_context(|| format!("Icon '{}' not found in {}", name, provider.display_name()))
}

fn print_page(result: &PaginationResult, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if result.items.is_empty() {
        println!("No icons found.");
        return Ok(());
    }

    let rows: Vec<ItemRow> = result
        .items
        .iter()
        .map(|item| ItemRow {
            name: item.name.clone(),
            display_name: item.display_name.clone(),
            file: item.relative_path.clone(),
        })
        .collect();

    println!("{}", render(&rows));

    let pagination = &result.pagination;
    let first = if pagination.count == 0 { 0 } else { pagination.offset + 1 };
    println!(
        "Showing {}-{} of {}{}",
        first,
        pagination.offset + pagination.count,
        pagination.total,
        if pagination.has_next {
            format!(" (next: --offset {})", pagination.offset + pagination.count)
        } else {
            String::new()
        }
    );
    Ok(())
}
