//! Chrome DevTools Protocol (CDP) client.
//!
//! Only the target and browser domains are used: tabs are targets of type
//! `page`, and windows are resolved through `Browser.getWindowForTarget`.
//!
//! Start the browser with remote debugging first:
//! ```bash
//! chrome --remote-debugging-port=9222
//! ```

mod client;
mod error;
mod protocol;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
