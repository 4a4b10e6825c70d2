//! Terminal navigator
//!
//! The terminal has no pages; navigation targets become log lines.

use quill_core::Navigator;
use quill_core::navigation::{DASHBOARD_PATH, LOGIN_PATH};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn goto(&self, path: &str) {
        match path {
            DASHBOARD_PATH => info!(target_path = path, "Signed in"),
            LOGIN_PATH => info!(target_path = path, "Signed out, run `quill login` to sign in"),
            other => debug!(target_path = other, "Navigation requested"),
        }
    }
}
