//! Registry subcommand handlers.

use std::sync::Arc;

use tracing::{info, warn};

use launcher_core::{CellKind, KeyOutcome, KeyPress, LauncherApp, UiMode};
use launcher_protocols::{EntryField, LaunchContext, SyncStore, ZoneCoordinate};

use crate::cli::{Commands, ZoneAction};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Handle the commands that only touch the registry.
pub(crate) async fn handle_registry_command(store: Arc<dyn SyncStore>, command: Commands) -> CmdResult {
    let mut app = LauncherApp::open(store, LaunchContext::new_tab()).await?;

    match command {
        Commands::Zones { format } => list_zones(&app, &format),
        Commands::Add {
            zone,
            key,
            shift,
            url,
            description,
            match_keyword,
        } => {
            let fields = [
                (EntryField::Url, url),
                (EntryField::Description, description),
                (EntryField::MatchKeyword, match_keyword),
            ];
            add_entry(&mut app, zone, key.map(|k| KeyPress::new(k, shift)), fields).await
        }
        Commands::Set {
            zone,
            index,
            field,
            value,
        } => set_field(&mut app, zone, index, field, value).await,
        Commands::Remove { zone, index } => remove_entry(&mut app, zone, index).await,
        Commands::Move {
            from_zone,
            from_index,
            to_zone,
            to_index,
        } => move_entry(&mut app, from_zone, from_index, to_zone, to_index).await,
        Commands::Rename { zone, name } => rename_zone(&mut app, zone, name).await,
        Commands::Zone { action } => match action {
            ZoneAction::Activate { zone } => {
                report(app.activate_zone(zone).await?, format!("Activated zone {}", zone), || {
                    format!("Zone {} cannot be activated here", zone)
                })
            }
            ZoneAction::Delete { zone } => {
                report(app.delete_zone(zone).await?, format!("Deleted zone {}", zone), || {
                    format!("Zone {} cannot be deleted while zones depend on it", zone)
                })
            }
        },
        _ => Err("not a registry command".into()),
    }
}

fn report(done: bool, success: String, failure: impl FnOnce() -> String) -> CmdResult {
    if done {
        println!("{}", success);
        Ok(())
    } else {
        Err(failure().into())
    }
}

fn list_zones(app: &LauncherApp, format: &str) -> CmdResult {
    let registry = app.registry();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&registry.to_stored()?)?);
        return Ok(());
    }

    let layout = app.layout();
    println!("Grid {}x{}", layout.width(), layout.height());
    for y in 0..layout.height() as u8 {
        let row: Vec<String> = (0..layout.width() as u8)
            .filter_map(|x| layout.cell(x, y))
            .map(|cell| match cell.kind {
                CellKind::Zone { deletable: true } => format!("[{}]*", cell.id),
                CellKind::Zone { deletable: false } => format!("[{}] ", cell.id),
                CellKind::Expandable => " +   ".to_string(),
                CellKind::Blank => "     ".to_string(),
            })
            .collect();
        println!("  {}", row.join(" "));
    }
    println!();

    for (id, zone) in registry.zones() {
        println!("{} {}", id, zone.display_name(id));
        println!("{}", "-".repeat(80));
        if zone.hotkeys.is_empty() {
            println!("  (no entries)");
        }
        for (index, entry) in zone.hotkeys.iter().enumerate() {
            println!("  {:<3} {:<14} {}", index, entry.key_badge(), entry.display_text());
            if !entry.description.is_empty() && !entry.url.is_empty() {
                println!("      url: {}", entry.url);
            }
            if !entry.match_keyword.is_empty() {
                println!("      match: {}", entry.match_keyword);
            }
        }
        println!();
    }

    Ok(())
}

async fn add_entry(
    app: &mut LauncherApp,
    zone: ZoneCoordinate,
    key: Option<KeyPress>,
    fields: [(EntryField, Option<String>); 3],
) -> CmdResult {
    let Some(id) = app.add_entry(zone).await? else {
        return Err(format!("Zone {} does not exist", zone).into());
    };

    if let Some(press) = key {
        match app.handle_key(&press).await? {
            KeyOutcome::Captured(binding) => info!("Bound {}", binding),
            other => warn!("Key {:?} was not bound: {:?}", press.key, other),
        }
    }
    for (field, value) in fields {
        if let Some(value) = value {
            app.commit_field(id, field, value).await?;
        }
    }
    app.finish_edit();

    if let Some((zone, index)) = app.registry().position_of(id) {
        println!("Added entry {} to zone {}", index, zone);
    }
    Ok(())
}

async fn set_field(
    app: &mut LauncherApp,
    zone: ZoneCoordinate,
    index: usize,
    field: EntryField,
    value: String,
) -> CmdResult {
    let Some(id) = app.registry().entry(zone, index).map(|e| e.id) else {
        return Err(format!("No entry {} in zone {}", index, zone).into());
    };

    // Keys go through capture so they are stored in canonical form.
    if field == EntryField::Key {
        app.begin_edit(id);
        let shift = value.starts_with(launcher_core::keys::SHIFT_PREFIX);
        let raw = value.strip_prefix(launcher_core::keys::SHIFT_PREFIX).unwrap_or(&value);
        let outcome = app.handle_key(&KeyPress::new(raw, shift)).await?;
        app.finish_edit();
        return match outcome {
            KeyOutcome::Captured(binding) => {
                println!("Bound entry {} in zone {} to {}", index, zone, binding);
                Ok(())
            }
            _ => Err(format!("{:?} cannot be bound", value).into()),
        };
    }

    app.commit_field(id, field, value).await?;
    println!("Updated {} of entry {} in zone {}", field, index, zone);
    Ok(())
}

async fn remove_entry(app: &mut LauncherApp, zone: ZoneCoordinate, index: usize) -> CmdResult {
    let Some(id) = app.registry().entry(zone, index).map(|e| e.id) else {
        return Err(format!("No entry {} in zone {}", index, zone).into());
    };
    match app.delete_entry(id).await? {
        Some(entry) => {
            println!("Removed {} ({})", entry.display_text(), entry.url);
            Ok(())
        }
        None => Err(format!("No entry {} in zone {}", index, zone).into()),
    }
}

async fn move_entry(
    app: &mut LauncherApp,
    from_zone: ZoneCoordinate,
    from_index: usize,
    to_zone: ZoneCoordinate,
    to_index: Option<usize>,
) -> CmdResult {
    let Some(source) = app.registry().entry(from_zone, from_index).map(|e| e.id) else {
        return Err(format!("No entry {} in zone {}", from_index, from_zone).into());
    };

    app.begin_drag(source);
    let moved = match to_index {
        Some(index) => match app.registry().entry(to_zone, index).map(|e| e.id) {
            Some(target) => app.drop_on_entry(target).await?,
            None => {
                app.end_drag();
                return Err(format!("No entry {} in zone {}", index, to_zone).into());
            }
        },
        None => app.drop_on_zone(to_zone).await?,
    };
    debug_assert_eq!(app.mode(), UiMode::Idle);

    if moved {
        println!("Moved entry {}:{} to zone {}", from_zone, from_index, to_zone);
    } else {
        println!("Nothing to move");
    }
    Ok(())
}

async fn rename_zone(app: &mut LauncherApp, zone: ZoneCoordinate, name: String) -> CmdResult {
    if !app.begin_rename(zone) {
        return Err(format!("Zone {} does not exist", zone).into());
    }
    app.commit_rename(name).await?;
    if let Some(z) = app.registry().zone(zone) {
        println!("Zone {} is now {:?}", zone, z.display_name(zone));
    }
    Ok(())
}
