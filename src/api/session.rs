//! Session Storage
//!
//! Bearer token access and session teardown. The browser implementation uses
//! local storage; tests use the in-memory one.

/// Local storage keys removed when the session ends.
pub const SESSION_KEYS: [&str; 5] = [
    "access_token",
    "user_info",
    "temp_token",
    "pending_user_info",
    "admin_access_confirmed",
];

const TOKEN_KEY: &str = "access_token";

pub trait Session: Send + Sync {
    fn token(&self) -> Option<String>;
    fn clear(&self);
    fn redirect_to_login(&self);
}

/// `window.localStorage` backed session
#[derive(Debug, Clone)]
pub struct BrowserSession {
    login_route: String,
}

impl BrowserSession {
    pub fn new(login_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl Session for BrowserSession {
    fn token(&self) -> Option<String> {
        Self::storage()?
            .get_item(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }

    fn clear(&self) {
        let Some(storage) = Self::storage() else {
            return;
        };
        for key in SESSION_KEYS {
            if storage.remove_item(key).is_err() {
                log::error!(target: "API", "failed to remove {} from local storage", key);
            }
        }
        log::info!(target: "API", "cleared session storage");
    }

    fn redirect_to_login(&self) {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(&self.login_route).is_err() {
                log::error!(target: "API", "redirect to {} failed", self.login_route);
            }
        }
    }
}

#[cfg(test)]
pub use memory::MemorySession;

#[cfg(test)]
mod memory {
    use super::Session;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemorySession {
        token: Mutex<Option<String>>,
        redirects: Mutex<u32>,
    }

    impl MemorySession {
        pub fn with_token(token: &str) -> Self {
            Self {
                token: Mutex::new(Some(token.to_string())),
                redirects: Mutex::new(0),
            }
        }

        pub fn redirects(&self) -> u32 {
            *self.redirects.lock().unwrap()
        }
    }

    impl Session for MemorySession {
        fn token(&self) -> Option<String> {
            self.token.lock().unwrap().clone()
        }

        fn clear(&self) {
            *self.token.lock().unwrap() = None;
        }

        fn redirect_to_login(&self) {
            *self.redirects.lock().unwrap() += 1;
        }
    }
}
