use crate::core::blocklist::BlockSet;
use crate::core::client::{ChatClient, DirectoryMode, Request};
use crate::core::error::ClientError;
use crate::core::models::{ConversationSummary, UserIdentity};

/// Case-insensitive substring match on email, first and last name, minus
/// the current user and anyone blocked.
pub fn filter_users(
    users: &[UserIdentity],
    term: &str,
    me: &str,
    blocked: &BlockSet,
) -> Vec<ConversationSummary> {
    let needle = term.to_lowercase();
    users
        .iter()
        .filter(|u| {
            u.email.to_lowercase().contains(&needle)
                || u.first_name.to_lowercase().contains(&needle)
                || u.last_name.to_lowercase().contains(&needle)
        })
        .filter(|u| u.email != me && !blocked.contains(&u.email))
        .map(ConversationSummary::from)
        .collect()
}

impl ChatClient {
    pub fn search_user(&mut self, term: &str) -> Vec<Request> {
        if self.current_user().is_none() {
            log::error!("search_user called while logged out");
            return Vec::new();
        }
        self.directory_mode = DirectoryMode::Search {
            term: term.to_string(),
        };
        vec![Request::SearchUsers {
            term: term.to_string(),
        }]
    }

    /// Fill the directory surface with matches for `term`. Dropped when the
    /// user has since cleared or changed the search.
    pub fn users_loaded(&mut self, term: &str, result: Result<Vec<UserIdentity>, ClientError>) {
        let current = matches!(&self.directory_mode, DirectoryMode::Search { term: t } if t == term);
        if !current {
            log::debug!("Discarding stale search results for {term:?}");
            return;
        }
        let Some(me) = self.current_user().map(|u| u.email.clone()) else {
            return;
        };
        match result {
            Ok(users) => {
                self.directory = filter_users(&users, term, &me, &self.blocked);
                let count = self.directory.len();
                if count > 0 {
                    self.set_status(format!("Search: {} results for \"{}\"", count, term));
                } else {
                    self.set_status(format!("Search: no results for \"{}\"", term));
                }
            }
            Err(e) => log::error!("Search failed: {}", e),
        }
    }

    /// Leave search results and go back to the conversation list.
    pub fn clear_search(&mut self) -> Vec<Request> {
        self.load_chats()
    }
}

#[cfg(test)]
mod tests {
    use super::filter_users;
    use crate::core::blocklist::BlockSet;
    use crate::core::client::testing::*;
    use crate::core::client::{DirectoryMode, Request};
    use crate::core::error::ClientError;

    fn everyone() -> Vec<crate::core::models::UserIdentity> {
        vec![
            alice(),
            user("b@x.com", "Bob", "Lee"),
            user("c@x.com", "Carol", "Bobbins"),
            user("dave@bobcat.io", "Dave", "Ng"),
            user("e@x.com", "Eve", "Stone"),
        ]
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let hits = filter_users(&everyone(), "BOB", "a@x.com", &BlockSet::default());
        let emails: Vec<_> = hits.iter().map(|s| s.contact_email.as_str()).collect();
        assert_eq!(emails, vec!["b@x.com", "c@x.com", "dave@bobcat.io"]);
    }

    #[test]
    fn excludes_self_and_blocked() {
        let mut blocked = BlockSet::default();
        blocked.insert("c@x.com");
        let hits = filter_users(&everyone(), "x.com", "a@x.com", &blocked);
        let emails: Vec<_> = hits.iter().map(|s| s.contact_email.as_str()).collect();
        assert_eq!(emails, vec!["b@x.com", "e@x.com"]);
    }

    #[test]
    fn empty_term_lists_everyone_else() {
        let hits = filter_users(&everyone(), "", "a@x.com", &BlockSet::default());
        assert_eq!(hits.len(), 4);
    }

    #[test]
    fn search_replaces_directory_surface() {
        let mut client = logged_in();
        client.chats_loaded("a@x.com", Ok(vec![carol()]));
        assert_eq!(
            client.search_user("bob"),
            vec![Request::SearchUsers { term: "bob".into() }]
        );
        client.users_loaded("bob", Ok(everyone()));
        assert_eq!(
            client.directory_mode(),
            &DirectoryMode::Search { term: "bob".into() }
        );
        assert_eq!(client.directory().len(), 3);
    }

    #[test]
    fn stale_search_results_are_dropped() {
        let mut client = logged_in();
        client.search_user("bob");
        client.search_user("eve");
        client.users_loaded("bob", Ok(everyone()));
        assert!(client.directory().is_empty());

        client.clear_search();
        client.users_loaded("eve", Ok(everyone()));
        assert!(client.directory().is_empty());
    }

    #[test]
    fn failed_search_keeps_surface() {
        let mut client = logged_in();
        client.chats_loaded("a@x.com", Ok(vec![carol()]));
        client.search_user("bob");
        client.users_loaded("bob", Err(ClientError::Network("refused".into())));
        assert_eq!(client.directory(), &[carol()]);
    }

    #[test]
    fn login_search_select_scenario() {
        let mut client = logged_in();
        client.search_user("bob");
        client.users_loaded(
            "bob",
            Ok(vec![alice(), user("b@x.com", "Bob", "Lee")]),
        );
        assert_eq!(client.directory(), &[bob()]);

        let hit = client.directory()[0].clone();
        let reqs = client.select_conversation(hit);
        assert!(client.input_enabled());
        assert_eq!(
            reqs,
            vec![Request::LoadMessages {
                user_email: "a@x.com".into(),
                contact_email: "b@x.com".into()
            }]
        );
        assert_eq!(client.poller().live_count(), 1);
        assert_eq!(client.poller().live().unwrap().contact_email, "b@x.com");
    }

    #[test]
    fn blocked_contact_hidden_from_search() {
        let mut client = logged_in();
        client.select_conversation(bob());
        client.request_block();
        client.resolve_confirmation(true);

        client.search_user("bob");
        client.users_loaded("bob", Ok(everyone()));
        assert!(client
            .directory()
            .iter()
            .all(|s| s.contact_email != "b@x.com"));
    }

    #[test]
    fn chat_list_arriving_after_search_keeps_results() {
        let mut client = logged_in();
        client.load_chats();
        client.search_user("bob");
        client.chats_loaded("a@x.com", Ok(vec![carol()]));
        client.users_loaded("bob", Ok(everyone()));
        assert_eq!(
            client.directory_mode(),
            &DirectoryMode::Search { term: "bob".into() }
        );
        assert_eq!(client.directory().len(), 3);
    }

    #[test]
    fn latest_directory_request_wins() {
        let mut client = logged_in();
        client.search_user("bob");
        // Unblocking reloads the chat list after the search was issued
        client.unblock_user("z@x.com");
        client.users_loaded("bob", Ok(everyone()));
        client.chats_loaded("a@x.com", Ok(vec![carol()]));
        assert_eq!(client.directory(), &[carol()]);
        assert_eq!(client.directory_mode(), &DirectoryMode::Chats);
    }
}
