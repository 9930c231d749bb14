mod actions;
mod body;
mod compose;
mod search;
mod setup;
mod sync;
mod watch;

use cosmic::app::{Core, Task};
use cosmic::iced::{Length, Subscription};
use cosmic::widget;
use cosmic::widget::pane_grid;
use cosmic::Element;

use crate::config::{Config, LayoutConfig};
use crate::core::api::ApiClient;
use crate::core::client::{ChatClient, Screen};
use crate::core::error::ClientError;
use crate::core::models::{ChatMessage, ConversationSummary, UserIdentity};
use crate::core::prefs::{MemoryPrefStore, PrefStore, SqlitePrefStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneKind {
    Directory,
    Conversation,
    Details,
}

const APP_ID: &str = "com.palaver.chat";

pub struct AppModel {
    core: Core,
    pub(super) api: ApiClient,
    pub(super) chat: ChatClient,

    // Login form
    pub(super) login_email: String,
    pub(super) login_first_name: String,
    pub(super) login_last_name: String,
    pub(super) login_error: Option<String>,
    pub(super) is_logging_in: bool,

    pub(super) search_query: String,
    pub(super) composer: String,

    pub(super) panes: pane_grid::State<PaneKind>,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Session
    LoginEmailChanged(String),
    LoginFirstNameChanged(String),
    LoginLastNameChanged(String),
    LoginSubmit,
    LoginComplete(Result<UserIdentity, ClientError>),
    Logout,

    // Directory
    ChatsLoaded {
        user: String,
        result: Result<Vec<ConversationSummary>, ClientError>,
    },
    RefreshChats,
    SelectConversation(ConversationSummary),

    // Search
    SearchQueryChanged(String),
    SearchExecute,
    UsersLoaded {
        term: String,
        result: Result<Vec<UserIdentity>, ClientError>,
    },
    SearchClear,

    // Active conversation
    MessagesLoaded {
        user: String,
        contact: String,
        result: Result<Vec<ChatMessage>, ClientError>,
    },
    PollTick(u64),

    // Composer
    ComposerChanged(String),
    SendMessage,
    MessageSent {
        contact: String,
        result: Result<(), ClientError>,
    },

    // Block / clear
    BlockUser,
    Unblock(String),
    ClearChat,
    ChatCleared {
        contact: String,
        result: Result<(), ClientError>,
    },
    ConfirmAccept,
    ConfirmCancel,

    PaneResized(pane_grid::ResizeEvent),
}

impl cosmic::Application for AppModel {
    type Executor = cosmic::executor::Default;
    type Flags = ();
    type Message = Message;

    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, _flags: Self::Flags) -> (Self, Task<Self::Message>) {
        // Open prefs synchronously (just opens a file, fast)
        let store: Box<dyn PrefStore> = match SqlitePrefStore::open() {
            Ok(s) => {
                log::info!("Preference store opened successfully");
                Box::new(s)
            }
            Err(e) => {
                log::warn!("Failed to open preference store, nothing will persist: {}", e);
                Box::new(MemoryPrefStore::default())
            }
        };

        let config = Config::resolve();
        let layout = LayoutConfig::load();
        let pane_config = pane_grid::Configuration::Split {
            axis: pane_grid::Axis::Vertical,
            ratio: layout.directory_ratio,
            a: Box::new(pane_grid::Configuration::Pane(PaneKind::Directory)),
            b: Box::new(pane_grid::Configuration::Split {
                axis: pane_grid::Axis::Vertical,
                ratio: layout.details_ratio,
                a: Box::new(pane_grid::Configuration::Pane(PaneKind::Conversation)),
                b: Box::new(pane_grid::Configuration::Pane(PaneKind::Details)),
            }),
        };
        let panes = pane_grid::State::with_configuration(pane_config);

        let mut app = AppModel {
            core,
            api: ApiClient::new(config.api_base),
            chat: ChatClient::new(store),
            login_email: String::new(),
            login_first_name: String::new(),
            login_last_name: String::new(),
            login_error: None,
            is_logging_in: false,
            search_query: String::new(),
            composer: String::new(),
            panes,
        };

        let title_task = app.set_window_title("Palaver".into());
        let restore = app.chat.restore();
        let restore_task = app.perform(restore);

        (app, cosmic::task::batch(vec![title_task, restore_task]))
    }

    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        self.chat
            .confirmation()
            .map(crate::ui::confirm_dialog::view)
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        match self.chat.poller().live() {
            Some(handle) => watch::message_poll(handle.id, self.chat.poller().interval()),
            None => Subscription::none(),
        }
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let user = match (self.chat.screen(), self.chat.current_user()) {
            (Screen::Main, Some(user)) => user,
            _ => {
                return crate::ui::login::view(
                    &self.login_email,
                    &self.login_first_name,
                    &self.login_last_name,
                    self.login_error.as_deref(),
                    self.is_logging_in,
                )
            }
        };

        let main_content = widget::PaneGrid::new(&self.panes, |_pane, kind, _is_maximized| {
            let body: Element<'_, Self::Message> = match kind {
                PaneKind::Directory => crate::ui::directory::view(
                    self.chat.directory(),
                    self.chat.directory_mode(),
                    self.chat.active(),
                    self.chat.blocked(),
                    &self.search_query,
                ),
                PaneKind::Conversation => crate::ui::conversation::view(
                    self.chat.active(),
                    self.chat.messages(),
                    &user.email,
                    &self.composer,
                    self.chat.input_enabled(),
                    self.chat.block_visible(),
                ),
                PaneKind::Details => crate::ui::details::view(self.chat.active()),
            };
            pane_grid::Content::new(body)
        })
        .on_resize(10.0, Message::PaneResized)
        .width(Length::Fill)
        .height(Length::Fill);

        let banner = widget::row()
            .spacing(8)
            .align_y(cosmic::iced::Alignment::Center)
            .push(
                widget::container(widget::text::heading(format!(
                    "{} ({})",
                    user.display_name(),
                    user.email
                )))
                .width(Length::Fill),
            )
            .push(widget::button::standard("Logout").on_press(Message::Logout));

        let status_bar = widget::container(widget::text::caption(self.chat.status()))
            .padding([4, 8])
            .width(Length::Fill);

        widget::column()
            .push(widget::container(banner).padding([8, 8]).width(Length::Fill))
            .push(main_content)
            .push(status_bar)
            .height(Length::Fill)
            .into()
    }

    fn update(&mut self, message: Self::Message) -> Task<Self::Message> {
        match message {
            // Session
            Message::LoginEmailChanged(_)
            | Message::LoginFirstNameChanged(_)
            | Message::LoginLastNameChanged(_)
            | Message::LoginSubmit
            | Message::LoginComplete(_)
            | Message::Logout => self.handle_setup(message),

            // Chat list
            Message::ChatsLoaded { .. } | Message::RefreshChats => self.handle_sync(message),

            // Search
            Message::SearchQueryChanged(_)
            | Message::SearchExecute
            | Message::UsersLoaded { .. }
            | Message::SearchClear => self.handle_search(message),

            // Open conversation
            Message::SelectConversation(_) | Message::MessagesLoaded { .. } => {
                self.handle_body(message)
            }
            Message::PollTick(_) => self.handle_watch(message),

            // Composer
            Message::ComposerChanged(_) | Message::SendMessage | Message::MessageSent { .. } => {
                self.handle_compose(message)
            }

            // Block / clear / confirmation
            Message::BlockUser
            | Message::Unblock(_)
            | Message::ClearChat
            | Message::ChatCleared { .. }
            | Message::ConfirmAccept
            | Message::ConfirmCancel => self.handle_actions(message),

            // Pane layout
            Message::PaneResized(pane_grid::ResizeEvent { split, ratio }) => {
                self.panes.resize(split, ratio);
                self.save_layout();
                Task::none()
            }
        }
    }
}

impl AppModel {
    fn set_window_title(&self, title: String) -> cosmic::app::Task<Message> {
        self.core.set_title(self.core.main_window_id(), title)
    }

    /// Extract current split ratios from pane_grid layout tree and persist.
    fn save_layout(&self) {
        fn extract_ratios(node: &pane_grid::Node) -> (f32, f32) {
            let defaults = LayoutConfig::default();
            match node {
                pane_grid::Node::Split { ratio, b, .. } => {
                    // Inner split is in the 'b' branch
                    let details_ratio = match b.as_ref() {
                        pane_grid::Node::Split { ratio, .. } => *ratio,
                        _ => defaults.details_ratio,
                    };
                    (*ratio, details_ratio)
                }
                _ => (defaults.directory_ratio, defaults.details_ratio),
            }
        }

        let (directory_ratio, details_ratio) = extract_ratios(self.panes.layout());
        LayoutConfig {
            directory_ratio,
            details_ratio,
        }
        .save();
    }
}
