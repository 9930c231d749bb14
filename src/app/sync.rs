use cosmic::app::Task;

use super::{AppModel, Message};
use crate::core::client::Request;

impl AppModel {
    pub(super) fn handle_sync(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ChatsLoaded { user, result } => {
                self.chat.chats_loaded(&user, result);
            }
            Message::RefreshChats => {
                let requests = self.chat.load_chats();
                return self.perform(requests);
            }
            _ => {}
        }
        Task::none()
    }

    /// Turn the client's requests into API calls whose outcome comes back
    /// through `update`.
    pub(super) fn perform(&self, requests: Vec<Request>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = requests
            .into_iter()
            .map(|request| self.perform_one(request))
            .collect();
        cosmic::task::batch(tasks)
    }

    fn perform_one(&self, request: Request) -> Task<Message> {
        let api = self.api.clone();
        match request {
            Request::Login(user) => cosmic::task::future(async move {
                Message::LoginComplete(api.login_or_register(user).await)
            }),
            Request::LoadChats { user_email } => cosmic::task::future(async move {
                let result = api.chats(&user_email).await;
                Message::ChatsLoaded {
                    user: user_email,
                    result,
                }
            }),
            Request::LoadMessages {
                user_email,
                contact_email,
            } => cosmic::task::future(async move {
                let result = api.messages(&user_email, &contact_email).await;
                Message::MessagesLoaded {
                    user: user_email,
                    contact: contact_email,
                    result,
                }
            }),
            Request::SendMessage(outgoing) => cosmic::task::future(async move {
                let result = api.send_message(&outgoing).await;
                Message::MessageSent {
                    contact: outgoing.receiver_email,
                    result,
                }
            }),
            Request::ClearChat {
                user_email,
                contact_email,
            } => cosmic::task::future(async move {
                let result = api.clear_chat(&user_email, &contact_email).await;
                Message::ChatCleared {
                    contact: contact_email,
                    result,
                }
            }),
            Request::SearchUsers { term } => cosmic::task::future(async move {
                let result = api.users().await;
                Message::UsersLoaded { term, result }
            }),
        }
    }
}
