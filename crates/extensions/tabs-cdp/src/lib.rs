//! # Launcher Tabs CDP
//!
//! [`TabHost`](launcher_protocols::TabHost) backed by a Chromium browser
//! started with `--remote-debugging-port`.

pub mod cdp;
mod host;

pub use cdp::{CdpClient, CdpError};
pub use host::CdpTabHost;
