use crate::core::blocklist::BlockSet;
use crate::core::models::{ChatMessage, ConversationSummary, OutgoingMessage, UserIdentity};
use crate::core::poll::Poller;
use crate::core::prefs::PrefStore;

/// A network call the UI layer should perform on the client's behalf.
///
/// Operations never touch the network themselves; they hand these back and
/// receive the outcome through the matching `*_loaded` / `*_complete` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Login(UserIdentity),
    LoadChats { user_email: String },
    LoadMessages { user_email: String, contact_email: String },
    SendMessage(OutgoingMessage),
    ClearChat { user_email: String, contact_email: String },
    SearchUsers { term: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn(UserIdentity),
}

/// Which screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Main,
}

/// What currently fills the directory surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryMode {
    Chats,
    Search { term: String },
}

/// A question awaiting a yes/no answer before anything changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Block { contact: ConversationSummary },
    ClearChat { contact: ConversationSummary },
}

impl Confirmation {
    pub fn contact(&self) -> &ConversationSummary {
        match self {
            Confirmation::Block { contact } | Confirmation::ClearChat { contact } => contact,
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            Confirmation::Block { contact } => format!("Block {}?", contact.display_name()),
            Confirmation::ClearChat { .. } => "Clear chat history?".to_string(),
        }
    }
}

/// Application context: session, directory, open conversation and poll state.
pub struct ChatClient {
    pub(super) store: Box<dyn PrefStore>,
    pub(super) session: SessionState,
    pub(super) blocked: BlockSet,

    pub(super) directory_mode: DirectoryMode,
    pub(super) directory: Vec<ConversationSummary>,

    pub(super) active: Option<ConversationSummary>,
    pub(super) messages: Vec<ChatMessage>,
    pub(super) input_enabled: bool,
    pub(super) poller: Poller,

    pub(super) confirmation: Option<Confirmation>,
    pub(super) status: String,
}

impl ChatClient {
    pub fn new(store: Box<dyn PrefStore>) -> Self {
        ChatClient {
            store,
            session: SessionState::LoggedOut,
            blocked: BlockSet::default(),
            directory_mode: DirectoryMode::Chats,
            directory: Vec::new(),
            active: None,
            messages: Vec::new(),
            input_enabled: false,
            poller: Poller::default(),
            confirmation: None,
            status: String::new(),
        }
    }

    // -- read accessors ------------------------------------------------------

    pub fn screen(&self) -> Screen {
        match self.session {
            SessionState::LoggedOut => Screen::Login,
            SessionState::LoggedIn(_) => Screen::Main,
        }
    }

    pub fn current_user(&self) -> Option<&UserIdentity> {
        match &self.session {
            SessionState::LoggedIn(user) => Some(user),
            SessionState::LoggedOut => None,
        }
    }

    pub fn blocked(&self) -> &BlockSet {
        &self.blocked
    }

    pub fn directory(&self) -> &[ConversationSummary] {
        &self.directory
    }

    pub fn directory_mode(&self) -> &DirectoryMode {
        &self.directory_mode
    }

    pub fn active(&self) -> Option<&ConversationSummary> {
        self.active.as_ref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Send and block affordances follow the same rule as the input.
    pub fn block_visible(&self) -> bool {
        self.active.is_some()
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    // -- shared helpers ------------------------------------------------------

    pub(super) fn is_current_user(&self, email: &str) -> bool {
        self.current_user().is_some_and(|u| u.email == email)
    }

    pub(super) fn is_active_contact(&self, email: &str) -> bool {
        self.active.as_ref().is_some_and(|a| a.contact_email == email)
    }

    pub(super) fn persist_blocked(&mut self) {
        if let Err(e) = self.blocked.persist(self.store.as_mut()) {
            log::warn!("Failed to persist block list: {}", e);
        }
    }

    pub(super) fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::core::models::{ConversationSummary, UserIdentity};
    use crate::core::prefs::MemoryPrefStore;

    pub fn user(email: &str, first: &str, last: &str) -> UserIdentity {
        UserIdentity {
            email: email.into(),
            first_name: first.into(),
            last_name: last.into(),
        }
    }

    pub fn summary(email: &str, first: &str, last: &str) -> ConversationSummary {
        ConversationSummary {
            contact_email: email.into(),
            first_name: first.into(),
            last_name: last.into(),
        }
    }

    pub fn alice() -> UserIdentity {
        user("a@x.com", "Alice", "Ames")
    }

    pub fn bob() -> ConversationSummary {
        summary("b@x.com", "Bob", "Lee")
    }

    pub fn carol() -> ConversationSummary {
        summary("c@x.com", "Carol", "Diaz")
    }

    /// A client already logged in as Alice, backed by an in-memory store.
    pub fn logged_in() -> ChatClient {
        logged_in_with(Box::new(MemoryPrefStore::default()))
    }

    pub fn logged_in_with(store: Box<dyn PrefStore>) -> ChatClient {
        let mut client = ChatClient::new(store);
        client
            .login_complete(Ok(alice()))
            .expect("login should succeed");
        client
    }
}
