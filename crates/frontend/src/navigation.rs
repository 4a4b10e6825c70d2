use quill_core::Navigator;
use yew_router::history::{BrowserHistory, History};

/// Navigates by replacing the current browser history entry
///
/// All `BrowserHistory` handles share one listener registry, so the router
/// sees the change and re-renders.
#[derive(Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn goto(&self, path: &str) {
        tracing::debug!(path, "Navigating");
        BrowserHistory::new().replace(path.to_string());
    }
}
