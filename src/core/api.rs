use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::core::error::ClientError;
use crate::core::models::{
    ChatMessage, ChatsResponse, CheckUserResponse, ClearChatRequest, ConversationSummary,
    MessagesResponse, OutgoingMessage, StatusResponse, UserIdentity, UsersResponse,
};

/// Async facade over the chat service's JSON endpoints.
///
/// Cheap to clone; every clone shares one connection pool. No timeouts or
/// retries are configured, a hung request simply never completes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url) -> Self {
        ApiClient {
            http: Client::new(),
            base,
        }
    }

    /// Build `{base}/{segments...}` with each segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Network(format!("{} cannot be a base", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let url = self.endpoint(segments)?;
        log::debug!("GET {url}");
        let resp = self.http.get(url).send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(segments)?;
        log::debug!("POST {url}");
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    pub async fn user_exists(&self, email: &str) -> Result<bool, ClientError> {
        let resp: CheckUserResponse = self.get_json(&["check-user", email]).await?;
        Ok(resp.exists)
    }

    pub async fn register(&self, user: &UserIdentity) -> Result<(), ClientError> {
        let resp: StatusResponse = self.post_json(&["register"], user).await?;
        if resp.success {
            Ok(())
        } else {
            Err(ClientError::Registration(
                resp.error.unwrap_or_else(|| "unknown reason".into()),
            ))
        }
    }

    /// Existence check, then registration when the email is unknown.
    pub async fn login_or_register(&self, user: UserIdentity) -> Result<UserIdentity, ClientError> {
        if !self.user_exists(&user.email).await? {
            log::info!("Registering new user {}", user.email);
            self.register(&user).await?;
        }
        Ok(user)
    }

    pub async fn chats(&self, user_email: &str) -> Result<Vec<ConversationSummary>, ClientError> {
        let resp: ChatsResponse = self.get_json(&["chats", user_email]).await?;
        if !resp.success {
            return Err(rejected("chats"));
        }
        Ok(resp.chats)
    }

    pub async fn messages(
        &self,
        user_email: &str,
        contact_email: &str,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        let resp: MessagesResponse = self
            .get_json(&["messages", user_email, contact_email])
            .await?;
        if !resp.success {
            return Err(rejected("messages"));
        }
        Ok(resp.messages)
    }

    pub async fn send_message(&self, msg: &OutgoingMessage) -> Result<(), ClientError> {
        let resp: StatusResponse = self.post_json(&["send-message"], msg).await?;
        if !resp.success {
            return Err(rejected("send-message"));
        }
        Ok(())
    }

    pub async fn clear_chat(&self, user_email: &str, friend_email: &str) -> Result<(), ClientError> {
        let body = ClearChatRequest {
            user_email,
            friend_email,
        };
        let resp: StatusResponse = self.post_json(&["clear-chat"], &body).await?;
        if !resp.success {
            return Err(rejected("clear-chat"));
        }
        Ok(())
    }

    pub async fn users(&self) -> Result<Vec<UserIdentity>, ClientError> {
        let resp: UsersResponse = self.get_json(&["users"]).await?;
        if !resp.success {
            return Err(rejected("users"));
        }
        Ok(resp.users)
    }
}

fn rejected(endpoint: &str) -> ClientError {
    ClientError::Network(format!("server reported failure for /{endpoint}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap())
    }

    #[test]
    fn endpoint_joins_segments() {
        let api = client("http://localhost:3000");
        let url = api.endpoint(&["messages", "a@x.com", "b@x.com"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/messages/a@x.com/b@x.com");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let api = client("http://example.com/chat/");
        let url = api.endpoint(&["users"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/chat/users");
    }

    #[test]
    fn endpoint_encodes_slashes_in_segments() {
        let api = client("http://localhost:3000");
        let url = api.endpoint(&["check-user", "odd/name@x.com"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/check-user/odd%2Fname@x.com");
    }
}
