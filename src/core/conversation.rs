use crate::core::client::{ChatClient, Confirmation, Request};
use crate::core::error::ClientError;
use crate::core::models::{ChatMessage, ConversationSummary};

impl ChatClient {
    /// Open `summary`: cancel any running poll, enable the composer, load
    /// messages now and every poll interval after.
    pub fn select_conversation(&mut self, summary: ConversationSummary) -> Vec<Request> {
        self.poller.cancel();
        if self.current_user().is_none() {
            log::error!("select_conversation called while logged out");
            return Vec::new();
        }
        log::debug!("Opening conversation with {}", summary.contact_email);
        if !self.is_active_contact(&summary.contact_email) {
            self.messages.clear();
        }
        self.poller.start(&summary.contact_email);
        self.active = Some(summary);
        self.input_enabled = true;
        self.load_messages()
    }

    /// Back to the unselected state. Used by blocking and logout.
    pub fn clear_to_no_active(&mut self) {
        self.poller.cancel();
        self.active = None;
        self.input_enabled = false;
        self.messages.clear();
        // Every pending question is about the active contact
        self.confirmation = None;
    }

    pub fn load_messages(&mut self) -> Vec<Request> {
        match (self.current_user(), &self.active) {
            (Some(user), Some(active)) => vec![Request::LoadMessages {
                user_email: user.email.clone(),
                contact_email: active.contact_email.clone(),
            }],
            _ => Vec::new(),
        }
    }

    /// A poll timer fired. Ticks from a cancelled handle are dropped.
    pub fn poll_tick(&mut self, handle_id: u64) -> Vec<Request> {
        if !self.poller.is_live(handle_id) {
            log::debug!("Ignoring tick from stale poll #{handle_id}");
            return Vec::new();
        }
        self.load_messages()
    }

    /// Replace the rendered history with the server's. Responses for a
    /// pair that is no longer the open conversation are dropped.
    pub fn messages_loaded(
        &mut self,
        user_email: &str,
        contact_email: &str,
        result: Result<Vec<ChatMessage>, ClientError>,
    ) {
        if !self.is_current_user(user_email) || !self.is_active_contact(contact_email) {
            log::debug!("Discarding stale messages for {contact_email}");
            return;
        }
        match result {
            Ok(messages) => self.messages = messages,
            Err(e) => log::error!("Failed to load messages: {}", e),
        }
    }

    /// Ask for confirmation before deleting the history with the active contact.
    pub fn request_clear_chat(&mut self) {
        if let Some(contact) = self.active.clone() {
            self.confirmation = Some(Confirmation::ClearChat { contact });
        }
    }

    pub fn chat_cleared(&mut self, contact_email: &str, result: Result<(), ClientError>) {
        match result {
            Ok(()) if self.is_active_contact(contact_email) => {
                self.messages.clear();
                self.set_status("Chat history cleared");
            }
            Ok(()) => {}
            Err(e) => log::error!("Failed to clear chat: {}", e),
        }
    }

    /// Answer the pending question. Declining changes nothing; a question
    /// about a contact that is no longer open is dropped.
    pub fn resolve_confirmation(&mut self, accepted: bool) -> Vec<Request> {
        let Some(confirmation) = self.confirmation.take() else {
            return Vec::new();
        };
        if !accepted {
            return Vec::new();
        }
        let contact = confirmation.contact().clone();
        if !self.is_active_contact(&contact.contact_email) {
            log::warn!("Confirmation for {} is no longer current", contact.contact_email);
            return Vec::new();
        }
        match confirmation {
            Confirmation::Block { .. } => {
                self.block_contact(&contact);
                Vec::new()
            }
            Confirmation::ClearChat { .. } => match self.current_user() {
                Some(user) => vec![Request::ClearChat {
                    user_email: user.email.clone(),
                    contact_email: contact.contact_email,
                }],
                None => Vec::new(),
            },
        }
    }
}
