use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use scrawl::api::{CmdMessage, ConfigAction, MessageLevel, NotePaths, ScrawlApi};
use scrawl::config::ScrawlConfig;
use scrawl::error::{Result, ScrawlError};
use scrawl::index::{DisplayIndex, DisplayNote};
use scrawl::store::fs::FileStore;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: ScrawlApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Create { title, content }) => handle_create(&mut ctx, title, content),
        Some(Commands::List { search, archived }) => handle_list(&mut ctx, search, archived),
        Some(Commands::View { indexes }) => handle_view(&mut ctx, indexes),
        Some(Commands::Delete { indexes }) => handle_delete(&mut ctx, indexes),
        Some(Commands::Rename { index, title }) => handle_rename(&mut ctx, index, title),
        Some(Commands::Pin { indexes }) => handle_pin(&mut ctx, indexes),
        Some(Commands::Unpin { indexes }) => handle_unpin(&mut ctx, indexes),
        Some(Commands::Archive { indexes }) => handle_archive(&mut ctx, indexes),
        Some(Commands::Unarchive { indexes }) => handle_unarchive(&mut ctx, indexes),
        Some(Commands::Housekeep) => handle_housekeep(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Export { indexes }) => handle_export(&ctx, indexes),
        Some(Commands::Render { index, out }) => handle_render(&ctx, index, out),
        Some(Commands::Inspect { index, raw }) => handle_inspect(&ctx, index, raw),
        Some(Commands::ExportDrawing { index, out }) => handle_export_drawing(&ctx, index, out),
        None => handle_list(&mut ctx, None, false),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let root = match &cli.dir {
        Some(dir) => dir.clone(),
        None => {
            let proj_dirs = ProjectDirs::from("com", "scrawl", "scrawl")
                .ok_or_else(|| ScrawlError::Store("Could not determine data dir".into()))?;
            proj_dirs.data_dir().to_path_buf()
        }
    };

    let config = ScrawlConfig::load(&root).unwrap_or_default();
    let store = FileStore::new(root.clone())
        .with_asset_dir(&config.asset_dir)
        .with_sidecar_ext(&config.sidecar_ext);
    let paths = NotePaths { root };
    let api = ScrawlApi::new(store, paths, config);

    Ok(AppContext { api })
}

fn handle_create(ctx: &mut AppContext, title: String, content: Option<String>) -> Result<()> {
    if title.is_empty() {
        return Err(ScrawlError::Api("Title cannot be empty".into()));
    }
    let result = ctx.api.create_note(title, content.unwrap_or_default())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, search: Option<String>, archived: bool) -> Result<()> {
    let result = ctx.api.list_notes(search.as_deref(), archived)?;
    if result.listed_notes.is_empty() {
        println!("{}", "No notes.".dimmed());
        return Ok(());
    }
    print_listing(&result.listed_notes);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.view_notes(&indexes)?;
    for note in &result.affected_notes {
        println!("{}", note.metadata.title.bold());
        println!();
        println!("{}", note.content);
    }
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_notes(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rename(ctx: &mut AppContext, index: String, title: String) -> Result<()> {
    let result = ctx.api.rename_note(&index, &title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_pin(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.pin_notes(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_unpin(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.unpin_notes(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_archive(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.archive_notes(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_unarchive(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.unarchive_notes(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_housekeep(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.housekeep()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (Some(key), Some(value)) => ConfigAction::Set { key, value },
        (Some(key), None) => {
            return Err(ScrawlError::Api(format!("Missing value for key '{}'", key)));
        }
        _ => ConfigAction::Show,
    };
    let result = ctx.api.configure(action)?;
    print_messages(&result.messages);
    if let Some(config) = result.config {
        println!("asset-dir        {}", config.asset_dir);
        println!("sidecar-ext      {}", config.sidecar_ext);
        println!("max-image-width  {}", config.max_image_width);
        match config.expiry_days {
            Some(days) => println!("expiry-days      {}", days),
            None => println!("expiry-days      off"),
        }
    }
    Ok(())
}

fn handle_export(ctx: &AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.export_notes(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_render(ctx: &AppContext, index: String, out: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.render_preview(&index)?;
    let html = result.rendered.unwrap_or_default();
    match out {
        Some(path) => {
            std::fs::write(&path, html).map_err(ScrawlError::Io)?;
            println!("{} {}", "Wrote".green(), path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

fn handle_inspect(ctx: &AppContext, index: String, raw: bool) -> Result<()> {
    let result = ctx.api.inspect_note(&index, raw)?;
    print!("{}", result.rendered.unwrap_or_default());
    Ok(())
}

fn handle_export_drawing(ctx: &AppContext, index: String, out: PathBuf) -> Result<()> {
    let result = ctx.api.export_drawing(&index)?;
    if let Some(png) = result.blob {
        std::fs::write(&out, png).map_err(ScrawlError::Io)?;
    }
    print_messages(&result.messages);
    println!("{} {}", "Wrote".green(), out.display());
    Ok(())
}

fn format_time_ago(timestamp: chrono::DateTime<chrono::Utc>) -> String {
    let duration = chrono::Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}

fn print_listing(notes: &[DisplayNote]) {
    let title_width = notes
        .iter()
        .map(|dn| dn.note.metadata.title.width())
        .max()
        .unwrap_or(0)
        .min(48);

    for dn in notes {
        // Pinned notes list twice; skip the duplicate regular entry.
        if dn.note.metadata.is_pinned && matches!(dn.index, DisplayIndex::Regular(_)) {
            continue;
        }

        let index = format!("{:>3}", dn.index.to_string());
        let index = match dn.index {
            DisplayIndex::Pinned(_) => index.yellow().bold(),
            DisplayIndex::Archived(_) => index.dimmed(),
            DisplayIndex::Regular(_) => index.normal(),
        };

        let title = &dn.note.metadata.title;
        let pad = title_width.saturating_sub(title.width());
        let age = format_time_ago(dn.note.metadata.updated_at);

        println!("{}  {}{}  {}", index, title, " ".repeat(pad), age.dimmed());
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Info => println!("{}", message.content),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}
