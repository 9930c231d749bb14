use crate::core::client::{ChatClient, Confirmation, DirectoryMode, Request};
use crate::core::error::ClientError;
use crate::core::models::ConversationSummary;

impl ChatClient {
    /// Ask for the current user's conversation list. The directory switches
    /// to chat mode now, so an in-flight search answer no longer applies.
    pub fn load_chats(&mut self) -> Vec<Request> {
        let Some(user) = self.current_user() else {
            log::error!("load_chats called while logged out");
            return Vec::new();
        };
        let request = Request::LoadChats {
            user_email: user.email.clone(),
        };
        self.directory_mode = DirectoryMode::Chats;
        vec![request]
    }

    /// Render a fresh chat list, minus blocked contacts. On failure the
    /// previous rendering stays. Dropped when it was fetched for another
    /// user or a search was started after it was requested.
    pub fn chats_loaded(
        &mut self,
        user_email: &str,
        result: Result<Vec<ConversationSummary>, ClientError>,
    ) {
        if !self.is_current_user(user_email) {
            log::debug!("Discarding chat list fetched for {user_email}");
            return;
        }
        if self.directory_mode != DirectoryMode::Chats {
            log::debug!("Discarding chat list, a search is pending");
            return;
        }
        match result {
            Ok(chats) => {
                self.directory = chats
                    .into_iter()
                    .filter(|c| !self.blocked.contains(&c.contact_email))
                    .collect();
                self.set_status(format!("{} chats", self.directory.len()));
            }
            Err(e) => {
                log::error!("Failed to load chats: {}", e);
            }
        }
    }

    /// Ask for confirmation before blocking the active contact.
    pub fn request_block(&mut self) {
        if let Some(contact) = self.active.clone() {
            self.confirmation = Some(Confirmation::Block { contact });
        }
    }

    /// Apply a confirmed block. Makes no network calls.
    pub(super) fn block_contact(&mut self, contact: &ConversationSummary) {
        let email = contact.contact_email.as_str();
        self.blocked.insert(email);
        self.persist_blocked();
        self.directory.retain(|c| c.contact_email != email);
        if self.is_active_contact(email) {
            self.clear_to_no_active();
        }
        log::info!("Blocked {}", email);
        self.set_status(format!("Blocked {}", email));
    }

    /// Remove `email` from the block list and reload the chat list so the
    /// contact can reappear.
    pub fn unblock_user(&mut self, email: &str) -> Vec<Request> {
        if self.blocked.remove(email) {
            self.persist_blocked();
            log::info!("Unblocked {}", email);
        }
        self.load_chats()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::client::testing::*;
    use crate::core::client::{Confirmation, DirectoryMode, Request};
    use crate::core::error::ClientError;
    use crate::core::prefs::{self, SqlitePrefStore};

    #[test]
    fn blocked_contacts_are_filtered_from_chat_list() {
        let mut client = logged_in();
        client.blocked.insert("b@x.com");
        client.chats_loaded("a@x.com", Ok(vec![bob(), carol()]));
        assert_eq!(client.directory(), &[carol()]);
        assert_eq!(client.directory_mode(), &DirectoryMode::Chats);
    }

    #[test]
    fn failed_reload_keeps_previous_rendering() {
        let mut client = logged_in();
        client.chats_loaded("a@x.com", Ok(vec![bob(), carol()]));
        client.chats_loaded("a@x.com", Err(ClientError::Network("connection refused".into())));
        assert_eq!(client.directory(), &[bob(), carol()]);
    }

    #[test]
    fn load_chats_logged_out_is_noop() {
        let mut client = logged_in();
        client.logout();
        assert!(client.load_chats().is_empty());
        client.chats_loaded("a@x.com", Ok(vec![bob()]));
        assert!(client.directory().is_empty());
    }

    #[test]
    fn selecting_entry_routes_to_conversation() {
        let mut client = logged_in();
        client.chats_loaded("a@x.com", Ok(vec![bob(), carol()]));
        let entry = client.directory()[1].clone();
        let reqs = client.select_conversation(entry);
        assert_eq!(client.active(), Some(&carol()));
        assert_eq!(reqs.len(), 1);
    }

    #[test]
    fn block_requires_active_conversation() {
        let mut client = logged_in();
        client.request_block();
        assert!(client.confirmation().is_none());
    }

    #[test]
    fn cancelled_block_changes_nothing() {
        let mut client = logged_in();
        client.chats_loaded("a@x.com", Ok(vec![bob()]));
        client.select_conversation(bob());
        client.request_block();
        assert!(client.resolve_confirmation(false).is_empty());
        assert!(client.blocked().is_empty());
        assert_eq!(client.active(), Some(&bob()));
        assert_eq!(client.poller().live_count(), 1);
        assert_eq!(client.directory(), &[bob()]);
    }

    #[test]
    fn blocking_active_contact_tears_down_conversation() {
        let mut client = logged_in();
        client.chats_loaded("a@x.com", Ok(vec![bob(), carol()]));
        client.select_conversation(bob());
        client.messages_loaded(
            "a@x.com",
            "b@x.com",
            Ok(vec![crate::core::models::ChatMessage {
                sender_email: "b@x.com".into(),
                receiver_email: "a@x.com".into(),
                message: "hi".into(),
                timestamp: crate::core::models::Timestamp::Millis(0),
                attachment_type: None,
                attachment_name: None,
            }]),
        );

        client.request_block();
        assert_eq!(
            client.confirmation(),
            Some(&Confirmation::Block { contact: bob() })
        );
        let reqs = client.resolve_confirmation(true);

        assert!(reqs.is_empty(), "blocking itself makes no network calls");
        assert!(client.blocked().contains("b@x.com"));
        assert_eq!(client.directory(), &[carol()]);
        assert!(client.messages().is_empty());
        assert!(!client.input_enabled());
        assert!(!client.block_visible());
        assert!(client.active().is_none());
        assert_eq!(client.poller().live_count(), 0);
    }

    #[test]
    fn blocked_contact_never_reappears_until_unblocked() {
        let mut client = logged_in();
        client.select_conversation(bob());
        client.request_block();
        client.resolve_confirmation(true);

        client.chats_loaded("a@x.com", Ok(vec![bob(), carol()]));
        assert!(client.directory().iter().all(|c| c.contact_email != "b@x.com"));

        let reqs = client.unblock_user("b@x.com");
        assert_eq!(
            reqs,
            vec![Request::LoadChats {
                user_email: "a@x.com".into()
            }]
        );
        client.chats_loaded("a@x.com", Ok(vec![bob(), carol()]));
        assert_eq!(client.directory(), &[bob(), carol()]);
    }

    #[test]
    fn block_and_unblock_are_persisted() {
        let store = SqlitePrefStore::open_in_memory().unwrap();
        let mut client = logged_in_with(Box::new(store));
        client.select_conversation(bob());
        client.request_block();
        client.resolve_confirmation(true);
        assert_eq!(
            prefs::load_blocked_users(client.store.as_ref()).unwrap(),
            vec!["b@x.com".to_string()]
        );

        client.unblock_user("b@x.com");
        assert!(prefs::load_blocked_users(client.store.as_ref())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn late_chat_list_for_previous_user_is_dropped() {
        let mut client = logged_in();
        client.load_chats();
        client.logout();
        client
            .login_complete(Ok(user("c@x.com", "Carol", "Diaz")))
            .unwrap();

        client.chats_loaded("a@x.com", Ok(vec![bob()]));
        assert!(client.directory().is_empty());

        client.chats_loaded("c@x.com", Ok(vec![bob()]));
        assert_eq!(client.directory(), &[bob()]);
    }
}
