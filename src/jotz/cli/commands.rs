use super::render::{print_info, print_success, render_note_list};
use super::setup::{Cli, Commands, Theme};
use clap::Parser;
use directories::ProjectDirs;
use jotz::api::NotesApi;
use jotz::config::JotzConfig;
use jotz::error::{JotzError, Result};
use jotz::model::{NoteId, Presentation};
use jotz::projection::DisplayNote;
use jotz::store::fs::FileAdapter;
use std::path::PathBuf;

const HOME_ENV: &str = "JOTZ_HOME";

struct AppContext {
    api: NotesApi<FileAdapter>,
    config: JotzConfig,
    data_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context()?;

    let outcome = match cli.command {
        Some(Commands::Add {
            color,
            gradient,
            text,
        }) => handle_add(&mut ctx, color, gradient, text),
        Some(Commands::List { search }) => handle_list(&mut ctx, search),
        Some(Commands::Edit { position, text }) => handle_edit(&mut ctx, position, text),
        Some(Commands::Delete { position }) => handle_delete(&mut ctx, position),
        Some(Commands::Pin { position }) => handle_pin(&mut ctx, position),
        Some(Commands::Move { from, to }) => handle_move(&mut ctx, from, to),
        Some(Commands::Theme { theme }) => handle_theme(&mut ctx, theme),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None),
    };

    ctx.api.close();
    outcome
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "jotz", "jotz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            JotzError::Config(format!(
                "Could not determine a data directory; set {}",
                HOME_ENV
            ))
        })
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    let config = JotzConfig::load(&data_dir).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable config: {}", e);
        JotzConfig::default()
    });
    let api = NotesApi::open(FileAdapter::new(data_dir.clone()));

    Ok(AppContext {
        api,
        config,
        data_dir,
    })
}

/// Maps a 1-based position typed by the user to a note id.
fn resolve(ctx: &AppContext, position: usize) -> Result<NoteId> {
    let index = to_index(ctx, position)?;
    ctx.api.id_at(index)
}

fn to_index(ctx: &AppContext, position: usize) -> Result<usize> {
    let len = ctx.api.notes().len();
    if position == 0 || position > len {
        return Err(JotzError::OutOfRange {
            index: position,
            len,
        });
    }
    Ok(position - 1)
}

fn handle_add(
    ctx: &mut AppContext,
    color: Option<String>,
    gradient: Option<String>,
    text: Vec<String>,
) -> Result<()> {
    let presentation = match (gradient, color) {
        (Some(g), _) => Presentation::Gradient(g),
        (None, Some(c)) => Presentation::Color(c),
        (None, None) => Presentation::Color(ctx.config.default_color.clone()),
    };

    let id = ctx.api.add_note(&text.join(" "), Some(presentation))?;
    if let Some(note) = ctx.api.get(id) {
        print_success(&format!("Note added (1): {}", note.text()));
    }
    Ok(())
}

fn handle_list(ctx: &mut AppContext, search: Option<String>) -> Result<()> {
    if let Some(term) = &search {
        ctx.api.set_search(term);
    }

    let rows: Vec<DisplayNote<'_>> = ctx.api.view().positioned().collect();
    if rows.is_empty() {
        match search {
            Some(term) => print_info(&format!("No notes match \"{}\".", term)),
            None => print_info("No notes yet. Add one with `jotz add <text>`."),
        }
        return Ok(());
    }

    print!(
        "{}",
        render_note_list(&rows, ctx.config.preview_width, ctx.api.dark_mode())
    );
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, position: usize, text: Vec<String>) -> Result<()> {
    let id = resolve(ctx, position)?;

    ctx.api.start_editing(id);
    ctx.api.update_draft(&text.join(" "));
    if let Err(e) = ctx.api.save_editing() {
        ctx.api.cancel_editing();
        return Err(e);
    }

    if let Some(note) = ctx.api.get(id) {
        print_success(&format!("Note updated ({}): {}", position, note.text()));
    }
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, position: usize) -> Result<()> {
    let id = resolve(ctx, position)?;
    let text = ctx
        .api
        .get(id)
        .map(|n| n.text().to_string())
        .unwrap_or_default();

    ctx.api.delete_note(id)?;
    print_success(&format!("Note deleted ({}): {}", position, text));
    Ok(())
}

fn handle_pin(ctx: &mut AppContext, position: usize) -> Result<()> {
    let id = resolve(ctx, position)?;
    ctx.api.toggle_pin(id)?;

    if let Some(note) = ctx.api.get(id) {
        let verb = if note.is_pinned() { "pinned" } else { "unpinned" };
        print_success(&format!("Note {} ({}): {}", verb, position, note.text()));
    }
    Ok(())
}

fn handle_move(ctx: &mut AppContext, from: usize, to: usize) -> Result<()> {
    let source = to_index(ctx, from)?;
    let target = to_index(ctx, to)?;

    ctx.api.reorder(source, target)?;
    if from != to {
        print_success(&format!("Note moved from {} to {}", from, to));
    }
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, theme: Option<Theme>) -> Result<()> {
    match theme {
        Some(theme) => {
            let dark = theme == Theme::Dark;
            ctx.api.set_dark_mode(dark);
            print_success(&format!("Theme set to {}", theme_name(dark)));
        }
        None => println!("{}", theme_name(ctx.api.dark_mode())),
    }
    Ok(())
}

fn theme_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in jotz::config::CONFIG_KEYS {
                println!("{} = {}", key, ctx.config.get(key)?);
            }
        }
        (Some(key), None) => println!("{} = {}", key, ctx.config.get(&key)?),
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.data_dir)?;
            print_success(&format!("{} = {}", key, ctx.config.get(&key)?));
        }
    }
    Ok(())
}
