//! # CLI Layer
//!
//! The terminal client. This module is the only place in the binary that
//! writes to stdout for humans: it parses arguments, picks the configured
//! store backend, calls the service, and renders the result. Every handler
//! re-fetches through the service after its own call resolves; nothing here
//! keeps note state of its own.

use anyhow::{bail, Context};
use clap::Parser;
use notekeepapp::config::{AppConfig, Backend};
use notekeepapp::content;
use notekeepapp::model::{NewNote, Note, NotePatch};
use notekeepapp::service::NoteService;
use notekeepapp::store::local::LocalStore;
use notekeepapp::store::remote::RemoteStore;
use notekeepapp::store::NoteStore;
use std::sync::Arc;

mod commands;
mod render;

pub use commands::{Cli, Commands};

use crate::server;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(data) = &cli.data {
        config.data_file = Some(data.clone());
    }
    if let Some(backend) = cli.backend {
        config.backend = backend.into();
    }

    let command = cli.command.unwrap_or(Commands::List);

    // Backend selection is explicit configuration; both arms run the same
    // generic dispatch.
    match config.backend {
        Backend::Local => {
            let store = LocalStore::open(config.data_file())
                .context("failed to open the local note store")?;
            execute(command, NoteService::new(store), &config).await
        }
        Backend::Remote => {
            let store = RemoteStore::new(&config.remote)
                .context("failed to set up the remote note store")?;
            execute(command, NoteService::new(store), &config).await
        }
    }
}

async fn execute<S: NoteStore + 'static>(
    command: Commands,
    service: NoteService<S>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    match command {
        Commands::List => render::print_board(&service.list_active().await?),
        Commands::Archived => {
            render::print_flat(&service.list_archived().await?, "No archived notes.")
        }
        Commands::Trash => render::print_flat(&service.list_trashed().await?, "Trash is empty."),
        Commands::Show { id } => {
            let note = resolve(&service, &id).await?;
            render::print_note(&note);
        }
        Commands::Add {
            title,
            content,
            color,
            pin,
        } => {
            let mut new = NewNote::new(title, content.unwrap_or_default());
            if let Some(color) = color {
                new.color = color;
            }
            new.is_pinned = pin;
            let note = service.create(new).await?;
            render::success(&format!("Note created: {}", note.title));
        }
        Commands::Edit { id, title, content } => {
            if title.is_none() && content.is_none() {
                bail!("nothing to change: pass --title and/or --content");
            }
            let note = resolve(&service, &id).await?;
            let patch = NotePatch {
                title,
                content,
                ..Default::default()
            };
            let updated = service.update(note.id, patch).await?;
            render::success(&format!("Note updated: {}", updated.title));
        }
        Commands::Color { id, color } => {
            let note = resolve(&service, &id).await?;
            let patch = NotePatch {
                color: Some(color),
                ..Default::default()
            };
            let updated = service.update(note.id, patch).await?;
            render::success(&format!("Note recolored ({}): {}", color, updated.title));
        }
        Commands::Pin { id } => {
            let note = resolve(&service, &id).await?;
            let updated = service.update(note.id, NotePatch::pinned(true)).await?;
            render::success(&format!("Note pinned: {}", updated.title));
        }
        Commands::Unpin { id } => {
            let note = resolve(&service, &id).await?;
            let updated = service.update(note.id, NotePatch::pinned(false)).await?;
            render::success(&format!("Note unpinned: {}", updated.title));
        }
        Commands::Archive { id } => {
            let note = resolve(&service, &id).await?;
            let updated = service.toggle_archive(note.id).await?;
            if updated.is_archived {
                render::success(&format!("Note archived: {}", updated.title));
            } else {
                render::success(&format!("Note unarchived: {}", updated.title));
            }
        }
        Commands::Image { id, url } => {
            let note = resolve(&service, &id).await?;
            let patch = NotePatch {
                content: Some(content::append_image(&note.content, &url)),
                ..Default::default()
            };
            let updated = service.update(note.id, patch).await?;
            render::success(&format!("Image attached to: {}", updated.title));
        }
        Commands::Delete { id } => {
            let note = resolve(&service, &id).await?;
            let trashed = service.soft_delete(note.id).await?;
            render::success(&format!("Note moved to trash: {}", trashed.title));
        }
        Commands::Restore { id } => {
            let note = resolve(&service, &id).await?;
            let restored = service.restore(note.id).await?;
            render::success(&format!("Note restored: {}", restored.title));
        }
        Commands::Purge { id } => {
            let note = resolve(&service, &id).await?;
            service.permanent_delete(note.id).await?;
            render::success(&format!("Note permanently deleted: {}", note.title));
        }
        Commands::Serve { listen } => {
            let addr = listen.unwrap_or_else(|| config.listen_addr.clone());
            server::serve(&addr, Arc::new(service)).await?;
        }
    }
    Ok(())
}

/// Resolve a full id or a unique id prefix against the whole collection.
async fn resolve<S: NoteStore>(service: &NoteService<S>, input: &str) -> anyhow::Result<Note> {
    let notes = service.list_all().await?;
    let matches: Vec<&Note> = notes
        .iter()
        .filter(|n| n.id.to_string().starts_with(input))
        .collect();
    match matches.len() {
        0 => bail!("no note matches id '{}'", input),
        1 => Ok(matches[0].clone()),
        n => bail!("id '{}' is ambiguous ({} notes match)", input, n),
    }
}
