use cosmic::iced::Length;
use cosmic::widget;
use cosmic::Element;

use crate::app::Message;

/// Render the login / registration form.
pub fn view<'a>(
    email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    error: Option<&'a str>,
    is_logging_in: bool,
) -> Element<'a, Message> {
    let mut form = widget::column()
        .spacing(12)
        .push(widget::text::title3("Sign in"))
        .push(
            widget::text_input("you@example.com", email)
                .label("Email")
                .on_input(Message::LoginEmailChanged)
                .on_submit(|_| Message::LoginSubmit),
        )
        .push(
            widget::text_input("First name", first_name)
                .label("First name")
                .on_input(Message::LoginFirstNameChanged)
                .on_submit(|_| Message::LoginSubmit),
        )
        .push(
            widget::text_input("Last name", last_name)
                .label("Last name")
                .on_input(Message::LoginLastNameChanged)
                .on_submit(|_| Message::LoginSubmit),
        );

    if let Some(err) = error {
        form = form.push(widget::text::body(err));
    }

    let submit = if is_logging_in {
        widget::button::suggested("Signing in...")
    } else {
        widget::button::suggested("Sign in").on_press(Message::LoginSubmit)
    };
    form = form.push(submit.width(Length::Fill));

    widget::container(widget::container(form).width(Length::Fixed(360.0)))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
