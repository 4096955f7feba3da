//! Chat style subcommand handlers.

use std::sync::Arc;

use launcher_core::ChatStyleStore;
use launcher_core::chat_style::{ChatStyleSettings, TextTag};
use launcher_protocols::SyncStore;

use crate::cli::StyleAction;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub(crate) async fn handle_style_command(store: Arc<dyn SyncStore>, action: StyleAction) -> CmdResult {
    let styles = ChatStyleStore::new(store);

    let settings = match action {
        StyleAction::Show { format } => {
            let settings = styles.load().await?;
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                print_settings(&settings);
            }
            return Ok(());
        }
        StyleAction::Enable => styles.set_enabled(true).await?,
        StyleAction::Disable => styles.set_enabled(false).await?,
        StyleAction::Width { percent } => styles.set_chat_width(percent).await?,
        StyleAction::Preset { preset } => styles.apply_preset(preset).await?,
        StyleAction::Sizes {
            h1,
            h2,
            h3,
            p,
            li,
            pre,
            code,
        } => {
            let mut sizes = styles.load().await?.sizes;
            let requested = [
                (TextTag::H1, h1),
                (TextTag::H2, h2),
                (TextTag::H3, h3),
                (TextTag::P, p),
                (TextTag::Li, li),
                (TextTag::Pre, pre),
                (TextTag::Code, code),
            ];
            for (tag, px) in requested {
                match px {
                    Some(0) => return Err(format!("Font size for {} must be positive", tag).into()),
                    Some(px) => sizes.set(tag, px),
                    None => {}
                }
            }
            styles.apply_font_sizes(sizes).await?
        }
    };

    print_settings(&settings);
    Ok(())
}

fn print_settings(settings: &ChatStyleSettings) {
    println!("Enabled:    {}", if settings.enabled { "yes" } else { "no" });
    println!("Chat width: {}%", settings.chat_width);
    for tag in TextTag::ALL {
        println!("  {:<6} {}px", tag.as_str(), settings.sizes.get(tag));
    }
}
