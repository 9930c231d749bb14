use cosmic::iced::Length;
use cosmic::widget;
use cosmic::Element;

use crate::app::Message;
use crate::core::blocklist::BlockSet;
use crate::core::client::DirectoryMode;
use crate::core::models::ConversationSummary;

/// Render the directory pane: search box, conversations or search hits, and
/// the block list.
pub fn view<'a>(
    entries: &'a [ConversationSummary],
    mode: &'a DirectoryMode,
    active: Option<&'a ConversationSummary>,
    blocked: &'a BlockSet,
    search_query: &'a str,
) -> Element<'a, Message> {
    let mut col = widget::column().spacing(4).padding(8);

    let search = widget::text_input("Search users...", search_query)
        .on_input(Message::SearchQueryChanged)
        .on_submit(|_| Message::SearchExecute);
    let trailing = match mode {
        DirectoryMode::Search { .. } => widget::button::text("Clear").on_press(Message::SearchClear),
        DirectoryMode::Chats => widget::button::text("Refresh").on_press(Message::RefreshChats),
    };
    col = col.push(
        widget::row()
            .push(widget::container(search).width(Length::Fill))
            .push(trailing)
            .spacing(4)
            .align_y(cosmic::iced::Alignment::Center),
    );
    col = col.push(widget::vertical_space().height(8));

    if entries.is_empty() {
        let empty = match mode {
            DirectoryMode::Chats => "No chats yet".to_string(),
            DirectoryMode::Search { term } => format!("No users match \"{term}\""),
        };
        col = col.push(widget::text::caption(empty));
    }

    for entry in entries {
        let row_content = widget::column()
            .push(widget::text::body(entry.display_name()))
            .push(widget::text::caption(entry.contact_email.as_str()))
            .spacing(2);

        let mut btn = widget::button::custom(row_content)
            .on_press(Message::SelectConversation(entry.clone()))
            .width(Length::Fill);

        if active.is_some_and(|a| a.contact_email == entry.contact_email) {
            btn = btn.class(cosmic::theme::Button::Suggested);
        }

        col = col.push(btn);
    }

    col = col.push(widget::vertical_space().height(16));
    col = col.push(widget::text::heading(format!(
        "Blocked users ({})",
        blocked.len()
    )));

    if blocked.is_empty() {
        col = col.push(widget::text::caption("No blocked users"));
    } else {
        for email in blocked.iter() {
            col = col.push(
                widget::row()
                    .spacing(4)
                    .align_y(cosmic::iced::Alignment::Center)
                    .push(widget::text::body(email).width(Length::Fill))
                    .push(
                        widget::button::text("Unblock")
                            .on_press(Message::Unblock(email.to_string())),
                    ),
            );
        }
    }

    widget::scrollable(col).height(Length::Fill).into()
}
