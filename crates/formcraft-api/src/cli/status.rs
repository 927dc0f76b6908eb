//! System status dashboard command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display form counts, model settings and storage info.
pub async fn status(state: &AppState, owner: &str, json: bool) -> Result<()> {
    let stats = state.form_service.stats(owner).await?;
    let database_ok = state.db_pool.ping().await.is_ok();
    let model = &state.config.model;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "owner": owner,
            "forms": {
                "total": stats.total_forms,
                "published": stats.published_forms,
                "drafts": stats.total_forms - stats.published_forms,
            },
            "submissions": stats.total_submissions,
            "model": {
                "endpoint": model.endpoint,
                "name": model.name,
                "timeout_secs": model.timeout_secs,
            },
            "database_ok": database_ok,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Formcraft v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style(format!("── Forms ({owner}) ──")).dim());
    println!("  Total:       {}", style(stats.total_forms).bold());
    println!("  Published:   {}", style(stats.published_forms).green());
    let drafts = stats.total_forms - stats.published_forms;
    if drafts > 0 {
        println!("  Drafts:      {}", style(drafts).yellow());
    }
    println!("  Submissions: {}", stats.total_submissions);
    println!();

    println!("  {}", style("── Model ──").dim());
    println!("  Name:     {}", style(&model.name).cyan());
    println!("  Endpoint: {}", style(&model.endpoint).dim());
    println!("  Timeout:  {}s", model.timeout_secs);
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!(
        "  Database: {} {}",
        style("SQLite (WAL mode)").dim(),
        if database_ok {
            style("✓").green()
        } else {
            style("✗").red()
        }
    );
    println!();

    Ok(())
}
