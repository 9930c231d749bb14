use crate::core::blocklist::BlockSet;
use crate::core::client::{ChatClient, DirectoryMode, Request, SessionState};
use crate::core::error::ClientError;
use crate::core::models::UserIdentity;
use crate::core::prefs;

impl ChatClient {
    /// Validate the login form and ask for the existence check / registration.
    pub fn login_or_register(
        &mut self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Request>, ClientError> {
        let email = email.trim();
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        if email.is_empty() || first_name.is_empty() || last_name.is_empty() {
            return Err(ClientError::Validation("Fill in all fields".into()));
        }
        Ok(vec![Request::Login(UserIdentity {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })])
    }

    /// Outcome of [`Request::Login`]. Errors are returned for display and
    /// leave the session untouched.
    pub fn login_complete(
        &mut self,
        result: Result<UserIdentity, ClientError>,
    ) -> Result<Vec<Request>, ClientError> {
        let user = match result {
            Ok(user) => user,
            Err(e) => {
                log::error!("Login failed: {}", e);
                return Err(e);
            }
        };
        if let Err(e) = prefs::save_current_user(self.store.as_mut(), &user) {
            log::warn!("Failed to persist current user: {}", e);
        }
        log::info!("Logged in as {}", user.email);
        Ok(self.enter_session(user))
    }

    /// Resume a session persisted by an earlier run, without a server round-trip.
    pub fn restore(&mut self) -> Vec<Request> {
        match prefs::load_current_user(self.store.as_ref()) {
            Ok(Some(user)) => {
                log::info!("Restored session for {}", user.email);
                self.enter_session(user)
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Ignoring unreadable saved user: {}", e);
                Vec::new()
            }
        }
    }

    pub fn logout(&mut self) {
        if let SessionState::LoggedIn(user) = &self.session {
            log::info!("Logging out {}", user.email);
        }
        self.clear_to_no_active();
        self.session = SessionState::LoggedOut;
        self.directory.clear();
        self.directory_mode = DirectoryMode::Chats;
        self.blocked = BlockSet::default();
        self.confirmation = None;
        self.set_status("");
        if let Err(e) = prefs::clear_current_user(self.store.as_mut()) {
            log::warn!("Failed to clear persisted user: {}", e);
        }
    }

    fn enter_session(&mut self, user: UserIdentity) -> Vec<Request> {
        self.blocked = match BlockSet::load(self.store.as_ref()) {
            Ok(set) => set,
            Err(e) => {
                log::warn!("Failed to load block list, starting empty: {}", e);
                BlockSet::default()
            }
        };
        self.session = SessionState::LoggedIn(user);
        self.load_chats()
    }
}
