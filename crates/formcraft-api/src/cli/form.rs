//! Form CLI commands: generate, list, show, publish, submissions, extract.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncReadExt;

use formcraft_core::generation::extractor::extract_json;
use formcraft_core::generation::validator::validate_schema;
use formcraft_core::repository::form::FormFilter;
use formcraft_types::form::{Form, FormId};
use formcraft_types::generation::GenerationError;
use formcraft_types::schema::FormSchema;

use crate::state::AppState;

/// Generate a form from a description and save it.
///
/// # Examples
///
/// ```bash
/// formcraft generate "newsletter signup with name, email and topics"
///
/// # Prompted interactively
/// formcraft generate --owner ada
/// ```
pub async fn generate_form(
    state: &AppState,
    owner: &str,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    let description = match description {
        Some(d) => d,
        None => Input::<String>::new()
            .with_prompt("Describe your form")
            .interact_text()?,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!(
        "Asking {} to design your form...",
        state.config.model.name
    ));
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = state
        .form_service
        .generate_form(owner, Some(&description))
        .await;

    spinner.finish_and_clear();

    let form = match result {
        Ok(form) => form,
        Err(err) => {
            print_generation_error(&err, json)?;
            return Err(err.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&form)?);
        return Ok(());
    }

    println!();
    println!("  {} Form generated!", style("✓").green().bold());
    print_form(&form);
    println!(
        "  Publish it with: {}",
        style(format!("formcraft publish {} --owner {owner}", form.id)).yellow()
    );
    println!();

    Ok(())
}

/// List the owner's forms in a table.
pub async fn list_forms(
    state: &AppState,
    owner: &str,
    published: Option<bool>,
    limit: Option<i64>,
    json: bool,
) -> Result<()> {
    let filter = FormFilter {
        published,
        limit,
        ..Default::default()
    };
    let forms = state.form_service.list_forms(owner, Some(filter)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&forms)?);
        return Ok(());
    }

    if forms.is_empty() {
        println!();
        println!(
            "  {} No forms found. Create one with: {}",
            style("i").blue().bold(),
            style("formcraft generate \"...\"").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Title").fg(Color::White),
        Cell::new("Fields").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("Submissions").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for form in &forms {
        let status_cell = if form.published {
            Cell::new("● published").fg(Color::Green)
        } else {
            Cell::new("○ draft").fg(Color::Yellow)
        };

        table.add_row(vec![
            Cell::new(form.content.title()),
            Cell::new(form.content.fields().len()),
            status_cell,
            Cell::new(form.submission_count),
            Cell::new(format_relative_time(&form.created_at)),
            Cell::new(form.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!("  {} form(s)", style(forms.len()).bold());
    println!();

    Ok(())
}

/// Show one form's fields and share link.
pub async fn show_form(state: &AppState, owner: &str, id: &str, json: bool) -> Result<()> {
    let id = parse_id(id)?;
    let form = state.form_service.get_form(owner, &id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&form)?);
        return Ok(());
    }

    print_form(&form);
    println!();
    Ok(())
}

/// Publish or unpublish a form.
pub async fn set_published(
    state: &AppState,
    owner: &str,
    id: &str,
    publish: bool,
    json: bool,
) -> Result<()> {
    let id = parse_id(id)?;
    let form = if publish {
        state.form_service.publish_form(owner, &id).await?
    } else {
        state.form_service.unpublish_form(owner, &id).await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&form)?);
        return Ok(());
    }

    println!();
    if form.published {
        println!(
            "  {} '{}' is live at {}",
            style("✓").green().bold(),
            style(form.content.title()).cyan(),
            style(form.share_path()).yellow()
        );
    } else {
        println!(
            "  {} '{}' is no longer accepting submissions",
            style("✓").green().bold(),
            style(form.content.title()).cyan()
        );
    }
    println!();
    Ok(())
}

/// List submissions for a form.
pub async fn list_submissions(
    state: &AppState,
    owner: &str,
    id: &str,
    limit: Option<i64>,
    json: bool,
) -> Result<()> {
    let id = parse_id(id)?;
    let form = state.form_service.get_form(owner, &id).await?;
    let submissions = state
        .submission_service
        .list_submissions(owner, &id, limit, None)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&submissions)?);
        return Ok(());
    }

    if submissions.is_empty() {
        println!();
        println!(
            "  {} No submissions for '{}' yet.",
            style("i").blue().bold(),
            form.content.title()
        );
        println!();
        return Ok(());
    }

    let fields = form.content.fields();
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Received").fg(Color::White)];
    header.extend(fields.iter().map(|f| Cell::new(&f.label).fg(Color::White)));
    table.set_header(header);

    for submission in &submissions {
        let mut row = vec![Cell::new(format_relative_time(&submission.created_at))];
        row.extend(fields.iter().map(|f| {
            let value = submission
                .content
                .get(f.key())
                .map(display_answer)
                .unwrap_or_default();
            Cell::new(value)
        }));
        table.add_row(row);
    }

    println!();
    println!(
        "  {} ({} total)",
        style(form.content.title()).cyan().bold(),
        form.submission_count
    );
    println!("{table}");
    println!();
    Ok(())
}

/// Run the extractor and validator over saved model output.
///
/// Useful for checking why a generation failed without calling the model.
pub async fn extract(file: Option<&Path>, json: bool) -> Result<()> {
    let raw = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read stdin")?;
            buf
        }
    };

    let schema = match extract_json(&raw).and_then(|doc| validate_schema(&doc)) {
        Ok(schema) => schema,
        Err(err) => {
            print_generation_error(&err, json)?;
            return Err(err.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Valid {} form schema",
        style("✓").green().bold(),
        schema.shape()
    );
    print_schema(&schema);
    println!();
    Ok(())
}

fn parse_id(id: &str) -> Result<FormId> {
    id.parse::<FormId>()
        .map_err(|_| anyhow::anyhow!("'{id}' is not a valid form id"))
}

fn print_generation_error(err: &GenerationError, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(err)?);
        return Ok(());
    }

    eprintln!();
    eprintln!(
        "  {} {} ({})",
        style("✗").red().bold(),
        err.message,
        style(err.kind).dim()
    );
    for detail in &err.validation_errors {
        eprintln!("    {} {detail}", style("•").dim());
    }
    if let Some(raw) = &err.raw_text {
        eprintln!();
        eprintln!("  {}", style("Model output:").bold());
        for line in raw.lines() {
            eprintln!("    {}", style(line).dim());
        }
    }
    eprintln!();
    Ok(())
}

fn print_form(form: &Form) {
    println!();
    println!(
        "  {}  {}",
        style("Title:").bold(),
        style(form.content.title()).cyan()
    );
    println!(
        "  {}  {}",
        style("Status:").bold(),
        if form.published {
            style("published").green()
        } else {
            style("draft").yellow()
        }
    );
    println!("  {}  {}", style("Share:").bold(), form.share_path());
    println!(
        "  {}  {}",
        style("ID:").bold(),
        style(form.id.to_string()).dim()
    );
    print_schema(&form.content);
}

fn print_schema(schema: &FormSchema) {
    println!();
    for field in schema.fields() {
        let marker = if field.is_required() {
            style("*").red().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "    {marker} {} {}",
            field.label,
            style(format!("[{}]", field.field_type)).dim()
        );
        if let Some(options) = &field.options {
            println!("        {}", style(options.join(" | ")).dim());
        }
    }
    println!();
    println!("    {}", style(format!("[ {} ]", schema.submit_label())).bold());
    println!();
}

fn display_answer(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(display_answer)
            .collect::<Vec<_>>()
            .join(", "),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn format_relative_time(dt: &chrono::DateTime<chrono::Utc>) -> String {
    let diff = chrono::Utc::now() - *dt;

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{}d ago", diff.num_days())
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}
