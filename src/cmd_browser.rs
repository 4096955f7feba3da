//! Subcommands that drive browser tabs.

use std::sync::Arc;

use tracing::{debug, info};
use url::Url;

use launcher_config::Config;
use launcher_core::{KeyOutcome, KeyPress, LauncherApp};
use launcher_dispatch::{DispatchOutcome, Dispatcher, LauncherTrigger, TriggerOutcome, TriggerRouter};
use launcher_protocols::{LaunchContext, LaunchMode, RuntimeMessage, SyncStore, TabHost, TabId};
use launcher_tabs_cdp::CdpTabHost;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

async fn connect(config: &Config) -> Result<Arc<dyn TabHost>, Box<dyn std::error::Error>> {
    let endpoint = config.browser.endpoint();
    debug!("Connecting to DevTools at {}", endpoint);
    let host = CdpTabHost::connect(&endpoint).await?;
    Ok(Arc::new(host))
}

/// Build the launch context from an address, or from explicit flags.
fn launch_context(
    config: &Config,
    address: Option<&str>,
    mode: Option<LaunchMode>,
    prev_url: Option<String>,
) -> Result<LaunchContext, Box<dyn std::error::Error>> {
    if let Some(address) = address {
        return Ok(LaunchContext::from_address(&Url::parse(address)?));
    }
    Ok(match mode.unwrap_or(config.launcher.default_mode) {
        LaunchMode::New => LaunchContext::new_tab(),
        LaunchMode::Current => LaunchContext::current_tab(prev_url.unwrap_or_default()),
    })
}

#[allow(clippy::too_many_arguments)]
pub(crate) async fn press(
    config: &Config,
    store: Arc<dyn SyncStore>,
    key: String,
    shift: bool,
    address: Option<String>,
    mode: Option<LaunchMode>,
    prev_url: Option<String>,
    tab: Option<String>,
    dry_run: bool,
) -> CmdResult {
    let ctx = launch_context(config, address.as_deref(), mode, prev_url)?;
    let mut app = LauncherApp::open(store, ctx).await?;

    let press = KeyPress::new(key, shift);
    let message = match app.handle_key(&press).await? {
        KeyOutcome::Dispatch(message) => message,
        KeyOutcome::Unbound => {
            println!("No binding for {}", press);
            return Ok(());
        }
        other => {
            debug!("Key {} produced {:?}", press, other);
            return Ok(());
        }
    };

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&message)?);
        return Ok(());
    }

    let host = connect(config).await?;
    let sender = match tab {
        Some(id) => Some(TabId::new(id)),
        None => host.active_tab().await?.map(|t| t.id),
    };
    let outcome = Dispatcher::new(host).handle_message(message, sender).await;
    print_dispatch(&outcome);
    Ok(())
}

pub(crate) async fn open(config: &Config, trigger: &str) -> CmdResult {
    let trigger: LauncherTrigger = trigger.parse()?;
    let page = Url::parse(&config.launcher.page_url)?;

    let host = connect(config).await?;
    let router = TriggerRouter::new(host, page);
    match router.trigger(trigger).await {
        TriggerOutcome::Opened { tab, address } => println!("Opened {} in new tab {}", address, tab),
        TriggerOutcome::Replaced { tab, address } => println!("Opened {} in tab {}", address, tab),
        TriggerOutcome::Skipped => println!("Launcher not opened"),
    }
    Ok(())
}

pub(crate) async fn message(config: &Config, json: &str, sender: Option<String>) -> CmdResult {
    let message: RuntimeMessage = serde_json::from_str(json)?;
    info!("Dispatching {:?}", message);

    let host = connect(config).await?;
    let outcome = Dispatcher::new(host)
        .handle_message(message, sender.map(TabId::new))
        .await;
    print_dispatch(&outcome);
    Ok(())
}

fn print_dispatch(outcome: &DispatchOutcome) {
    match outcome {
        DispatchOutcome::Switched { tab, launcher } => {
            println!("Switched to tab {} (launcher: {:?})", tab, launcher)
        }
        DispatchOutcome::Navigated { tab, url } => println!("Navigated tab {} to {}", tab, url),
        DispatchOutcome::NoOp => println!("Nothing to do"),
    }
}
