use cosmic::app::Task;

use super::{AppModel, Message};

impl AppModel {
    pub(super) fn handle_search(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SearchQueryChanged(q) => {
                self.search_query = q;
            }
            Message::SearchExecute => {
                let term = self.search_query.trim().to_lowercase();
                let requests = self.chat.search_user(&term);
                return self.perform(requests);
            }
            Message::UsersLoaded { term, result } => {
                self.chat.users_loaded(&term, result);
            }
            Message::SearchClear => {
                self.search_query.clear();
                let requests = self.chat.clear_search();
                return self.perform(requests);
            }
            _ => {}
        }
        Task::none()
    }
}
