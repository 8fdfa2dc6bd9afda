// SPDX-License-Identifier: MPL-2.0
//! Results card: thumbnail header plus one clickable row per prediction.

use crate::classifier::Prediction;
use crate::ui::design_tokens::{radius, sizing, spacing, typography};
use crate::ui::styles::{button as button_styles, container as container_styles, progress};
use crate::ui::theme::ColorScheme;
use iced::widget::{button, container, image, progress_bar, row, text, Column};
use iced::{Alignment, Border, Element, Length};

/// Messages local to the results card; the application maps them.
#[derive(Debug, Clone)]
pub enum Message {
    /// A prediction row was clicked; carries the human-readable label.
    LabelClicked(String),
}

/// Everything the results card needs from the application state.
pub struct ResultsContext<'a> {
    pub prediction: &'a Prediction,
    pub thumbnail: Option<&'a image::Handle>,
    pub scheme: ColorScheme,
    pub title: String,
    pub text_scale: f32,
}

/// Renders the results card.
pub fn view(ctx: ResultsContext<'_>) -> Element<'_, Message> {
    let mut content = Column::new().spacing(spacing::SM);

    let mut header = row![].spacing(spacing::MD).align_y(Alignment::Center);
    if let Some(handle) = ctx.thumbnail {
        let thumb = container(
            image(handle.clone())
                .width(Length::Fixed(sizing::THUMBNAIL))
                .height(Length::Fixed(sizing::THUMBNAIL)),
        )
        .style({
            let scheme = ctx.scheme.clone();
            move |_theme| container::Style {
                border: Border {
                    radius: radius::MD.into(),
                    color: scheme.surface_tertiary,
                    width: 1.0,
                },
                ..container::Style::default()
            }
        });
        header = header.push(thumb);
    }
    header = header.push(
        text(ctx.title)
            .size(typography::SECTION * ctx.text_scale)
            .color(ctx.scheme.text_primary),
    );
    content = content.push(header);

    for entry in &ctx.prediction.entries {
        content = content.push(result_row(
            &entry.label,
            entry.score,
            &ctx.scheme,
            ctx.text_scale,
        ));
    }

    container(content)
        .padding(spacing::MD)
        .width(Length::Fill)
        .style(container_styles::card(&ctx.scheme))
        .into()
}

fn result_row<'a>(
    label: &'a str,
    score: f32,
    scheme: &ColorScheme,
    text_scale: f32,
) -> Element<'a, Message> {
    let percent = format!("{:.1}%", score * 100.0);

    let inner = row![
        text(label)
            .size(typography::BODY * text_scale)
            .width(Length::FillPortion(2)),
        progress_bar(0.0..=1.0, score)
            .girth(sizing::SCORE_BAR_HEIGHT)
            .length(Length::FillPortion(3))
            .style(progress::score_bar(scheme)),
        text(percent)
            .size(typography::BODY * text_scale)
            .width(Length::Fixed(56.0)),
    ]
    .spacing(spacing::MD)
    .align_y(Alignment::Center);

    button(inner)
        .padding(spacing::SM)
        .width(Length::Fill)
        .style(button_styles::result_row(scheme))
        .on_press(Message::LabelClicked(label.to_string()))
        .into()
}

#[cfg(test)]
mod tests {
    #[test]
    fn percent_formatting_rounds_to_one_decimal() {
        let score = 0.8765_f32;
        assert_eq!(format!("{:.1}%", score * 100.0), "87.7%");
    }
}
