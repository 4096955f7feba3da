//! CLI definitions for the hotkey launcher.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use launcher_core::Preset;
use launcher_protocols::{EntryField, LaunchMode, ZoneCoordinate};

/// Hotkey launcher CLI.
#[derive(Parser)]
#[command(name = "hotkey-launcher")]
#[command(about = "Single-key bindings that open or switch to browser tabs")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: <config dir>/hotkey-launcher/launcher.toml)
    #[arg(short, long, global = true, env = "HOTKEY_LAUNCHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the store file from the configuration
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show the zone grid and every binding
    Zones {
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Append an entry to a zone
    Add {
        /// Zone id, e.g. 0-0
        zone: ZoneCoordinate,

        /// Key to bind, as the platform names it (e.g. "g", " ", "F2")
        #[arg(long)]
        key: Option<String>,

        /// Bind the key with Shift held
        #[arg(long)]
        shift: bool,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// URL prefix that identifies an already-open tab
        #[arg(long = "match")]
        match_keyword: Option<String>,
    },

    /// Set one field of an entry
    Set {
        zone: ZoneCoordinate,
        index: usize,
        /// key, url, description or matchKeyword
        field: EntryField,
        value: String,
    },

    /// Remove an entry
    Remove {
        zone: ZoneCoordinate,
        index: usize,
    },

    /// Move an entry, within a zone or to another one
    Move {
        from_zone: ZoneCoordinate,
        from_index: usize,
        to_zone: ZoneCoordinate,

        /// Target position; appended when omitted
        #[arg(long)]
        to_index: Option<usize>,
    },

    /// Rename a zone (an empty name restores the default label)
    Rename {
        zone: ZoneCoordinate,
        name: String,
    },

    /// Zone grid management
    Zone {
        #[command(subcommand)]
        action: ZoneAction,
    },

    /// Press a key on the launcher and dispatch the matching binding
    Press {
        /// Key as the platform names it
        key: String,

        #[arg(long)]
        shift: bool,

        /// Launcher address carrying the launch parameters
        #[arg(long)]
        address: Option<String>,

        /// Launch mode when no address is given
        #[arg(long)]
        mode: Option<LaunchMode>,

        /// URL the launcher replaced (current-tab mode)
        #[arg(long)]
        prev_url: Option<String>,

        /// Tab hosting the launcher (default: the active tab)
        #[arg(long)]
        tab: Option<String>,

        /// Print the message instead of dispatching it
        #[arg(long)]
        dry_run: bool,
    },

    /// Open the launcher surface
    Open {
        /// Trigger: icon, open-launcher or open-launcher-current
        #[arg(default_value = "icon")]
        trigger: String,
    },

    /// Dispatch a raw runtime message (JSON)
    Message {
        json: String,

        /// Tab the message came from
        #[arg(long)]
        sender: Option<String>,
    },

    /// Reading preferences for AI chat pages
    Style {
        #[command(subcommand)]
        action: StyleAction,
    },

    /// Validate the configuration file
    CheckConfig,
}

#[derive(Subcommand)]
pub(crate) enum ZoneAction {
    /// Create a zone next to an existing one
    Activate { zone: ZoneCoordinate },

    /// Delete a zone and its entries
    Delete { zone: ZoneCoordinate },
}

#[derive(Subcommand)]
pub(crate) enum StyleAction {
    /// Show the current settings
    Show {
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Turn chat styling on
    Enable,

    /// Turn chat styling off
    Disable,

    /// Set the chat column width in percent
    Width { percent: u32 },

    /// Apply a font size preset: xsmall, small or large
    Preset { preset: Preset },

    /// Set individual font sizes in pixels
    Sizes {
        #[arg(long)]
        h1: Option<u32>,
        #[arg(long)]
        h2: Option<u32>,
        #[arg(long)]
        h3: Option<u32>,
        #[arg(long)]
        p: Option<u32>,
        #[arg(long)]
        li: Option<u32>,
        #[arg(long)]
        pre: Option<u32>,
        #[arg(long)]
        code: Option<u32>,
    },
}
