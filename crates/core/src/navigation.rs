//! Navigation seam used by the session manager after login and logout

/// Protected area shown after a successful login
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Entry page shown after logout or a failed renewal
pub const LOGIN_PATH: &str = "/login";

/// View-layer navigation primitive
pub trait Navigator: Send + Sync {
    /// Replace the current location with `path`
    fn goto(&self, path: &str);
}
