use iced::widget::{Space, button, column, container, mouse_area, row, stack, text};
use iced::{Alignment, Color, Element, Length, Point, Theme};

use crate::presentation::{CallPresentation, ControlsLayout, LocalVideoLayout, Rect};
use crate::screen::UserAction;

const MUTED_GRAY: Color = Color {
    r: 0.5,
    g: 0.5,
    b: 0.5,
    a: 1.0,
};

/// Window-side state pushed by the call screen outside of a presentation.
#[derive(Clone, Copy, Debug)]
pub struct ViewOverlay {
    /// Blink opacity of the status line.
    pub status_alpha: f32,
    /// Optimistic speakerphone state until the route change is rendered.
    pub speaker_feedback: Option<bool>,
    pub video_attached: bool,
}

impl Default for ViewOverlay {
    fn default() -> Self {
        Self {
            status_alpha: 1.0,
            speaker_feedback: None,
            video_attached: true,
        }
    }
}

#[derive(Clone, Debug)]
pub enum ViewMessage {
    Action(UserAction),
    PreviewGrabbed,
    PointerMoved(Point),
    PointerReleased,
}

pub fn call_view<'a>(
    presentation: &'a CallPresentation,
    overlay: ViewOverlay,
) -> Element<'a, ViewMessage> {
    if presentation.minimized {
        return minimized_view(presentation, overlay).map(ViewMessage::Action);
    }

    let background: Element<'_, UserAction> = if presentation.is_vanity() {
        surface("Camera preview", overlay.video_attached)
    } else if presentation.remote_video_visible {
        surface("Remote video", overlay.video_attached)
    } else if presentation.avatar_visible {
        container(text(initials(&presentation.contact_name)).size(64))
            .center(Length::Fill)
            .into()
    } else {
        Space::new(Length::Fill, Length::Fill).into()
    };

    let background: Element<'_, UserAction> = mouse_area(background)
        .on_press(UserAction::TapBackground)
        .into();
    let mut layers = vec![background.map(ViewMessage::Action)];
    if let LocalVideoLayout::Floating(frame) = presentation.local_video {
        layers.push(floating_preview(frame, overlay.video_attached));
    }

    let mut content = column![
        row![
            Space::with_width(Length::Fill),
            button(text("Minimize").size(14))
                .on_press(UserAction::Minimize)
                .style(button::text),
        ],
        container(header(presentation, overlay)).center_x(Length::Fill),
        Space::with_height(Length::Fill),
    ]
    .padding(12);
    if !presentation.controls_hidden {
        content = content.push(
            container(controls(presentation, overlay))
                .center_x(Length::Fill)
                .padding(12),
        );
    }
    let content: Element<'_, UserAction> = content.into();
    layers.push(content.map(ViewMessage::Action));

    // Pointer tracking covers the whole screen so a drag keeps going when
    // the cursor leaves the preview.
    mouse_area(stack(layers))
        .on_move(ViewMessage::PointerMoved)
        .on_release(ViewMessage::PointerReleased)
        .into()
}

fn header(presentation: &CallPresentation, overlay: ViewOverlay) -> Element<'_, UserAction> {
    let status_color = Color {
        a: overlay.status_alpha,
        ..Color::WHITE
    };
    let mut header = column![
        text(presentation.contact_name.as_str()).size(32),
        text(presentation.status.label.as_str())
            .size(18)
            .color(status_color),
    ]
    .align_x(Alignment::Center)
    .spacing(6);
    if presentation.on_hold {
        header = header.push(text("On hold").size(14).color(MUTED_GRAY));
    }
    header.into()
}

fn minimized_view(
    presentation: &CallPresentation,
    overlay: ViewOverlay,
) -> Element<'_, UserAction> {
    let mut bar = row![
        header(presentation, overlay),
        Space::with_width(Length::Fill),
        button(text("Return to call"))
            .on_press(UserAction::ReturnFromMinimized)
            .style(button::primary),
    ]
    .spacing(12)
    .align_y(Alignment::Center);
    if matches!(presentation.controls.layout, ControlsLayout::Ongoing) {
        bar = bar.push(
            button(text("Hang up"))
                .on_press(UserAction::HangUp)
                .style(button::danger),
        );
    }
    container(bar).padding(16).center_y(Length::Fill).into()
}

fn controls(presentation: &CallPresentation, overlay: ViewOverlay) -> Element<'_, UserAction> {
    let controls = &presentation.controls;
    match controls.layout {
        ControlsLayout::Incoming { answer_with_video } => {
            let mut buttons: Vec<Element<'_, UserAction>> = vec![
                button(text("Decline"))
                    .on_press(UserAction::Decline)
                    .style(button::danger)
                    .into(),
                button(text("Answer"))
                    .on_press(UserAction::Answer { with_video: false })
                    .style(button::success)
                    .into(),
            ];
            if answer_with_video {
                buttons.push(
                    button(text("Answer with video"))
                        .on_press(UserAction::Answer { with_video: true })
                        .style(button::success)
                        .into(),
                );
            }
            row(buttons).spacing(20).align_y(Alignment::Center).into()
        }
        ControlsLayout::Ongoing => {
            let mut buttons: Vec<Element<'_, UserAction>> = vec![
                toggle("Mute".to_string(), controls.mute_selected, UserAction::ToggleMute),
                toggle("Video".to_string(), controls.video_selected, UserAction::ToggleVideo),
            ];
            if controls.flip_camera_visible {
                buttons.push(
                    button(text("Flip"))
                        .on_press(UserAction::FlipCamera)
                        .style(button::secondary)
                        .into(),
                );
            }
            let audio = &controls.audio_source;
            let audio_label = if audio.shows_picker {
                format!("{} ▾", audio.label)
            } else {
                audio.label.clone()
            };
            buttons.push(toggle(
                audio_label,
                overlay.speaker_feedback.unwrap_or(audio.speaker_selected),
                UserAction::AudioSourceButton,
            ));
            buttons.push(Space::with_width(Length::Fixed(20.0)).into());
            buttons.push(
                button(text("Hang up"))
                    .on_press(UserAction::HangUp)
                    .style(button::danger)
                    .into(),
            );
            row(buttons).spacing(12).align_y(Alignment::Center).into()
        }
        ControlsLayout::Hidden => Space::with_height(Length::Shrink).into(),
    }
}

fn toggle<'a>(label: String, selected: bool, action: UserAction) -> Element<'a, UserAction> {
    let style: fn(&Theme, button::Status) -> button::Style = if selected {
        button::primary
    } else {
        button::secondary
    };
    button(text(label)).on_press(action).style(style).into()
}

fn surface<'a>(label: &'a str, attached: bool) -> Element<'a, UserAction> {
    let label = if attached { label } else { "Video paused" };
    container(text(label).size(16).color(MUTED_GRAY))
        .center(Length::Fill)
        .style(container::rounded_box)
        .into()
}

fn floating_preview<'a>(frame: Rect, attached: bool) -> Element<'a, ViewMessage> {
    let label = if attached { "You" } else { "Paused" };
    let preview = mouse_area(
        container(text(label).size(14))
            .center_x(Length::Fixed(frame.size.width as f32))
            .center_y(Length::Fixed(frame.size.height as f32))
            .style(container::rounded_box),
    )
    .on_press(ViewMessage::PreviewGrabbed);
    column![
        Space::with_height(Length::Fixed(frame.origin.y.max(0.0) as f32)),
        row![
            Space::with_width(Length::Fixed(frame.origin.x.max(0.0) as f32)),
            preview
        ],
    ]
    .into()
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}
