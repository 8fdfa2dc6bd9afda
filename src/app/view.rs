// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Pure functions of the state held by `App`; iced rebuilds the widget tree
//! on every refresh, so nothing here is cached or patched incrementally.

use super::{App, Message, Popup, ScreenMode};
use crate::classifier::{ModelStatus, VocabularySearch};
use crate::i18n::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::results::{self, ResultsContext};
use crate::ui::styles::{button as button_styles, container as container_styles};
use crate::ui::theme::ColorScheme;
use crate::ui::widgets::AnimatedSpinner;
use fluent_bundle::FluentArgs;
use iced::widget::{
    button, center, container, pick_list, progress_bar, scrollable, space, text, text_input,
    Column, Row, Stack,
};
use iced::{Alignment, Border, Element, Length, Shadow};

impl App {
    pub(super) fn view(&self) -> Element<'_, Message> {
        let scheme = self.theme_mode.scheme();
        let scale = self.text_size.scale();

        let mut content = Column::new()
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .push(toolbar(
                &self.i18n,
                &scheme,
                self,
                scale,
            ))
            .push(
                text(self.i18n.tr("main-title"))
                    .size(typography::TITLE * scale)
                    .color(scheme.text_primary),
            );

        if self.i18n.is_degraded() {
            content = content.push(banner(
                &self.i18n,
                &scheme,
                "error-translations",
                scale,
                false,
            ));
        }
        if let Some(key) = self.error_banner {
            content = content.push(banner(&self.i18n, &scheme, key, scale, true));
        }

        content = content
            .push(self.mode_content(&scheme, scale))
            .push(self.search_section(&scheme, scale))
            .push(self.bottom_row(&scheme, scale));

        let base = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(container_styles::root(&scheme));

        let mut stack = Stack::new().push(base);
        if let Some(popup) = &self.popup {
            stack = stack.push(self.popup_overlay(popup, &scheme, scale));
        }
        stack.into()
    }

    fn mode_content(&self, scheme: &ColorScheme, scale: f32) -> Element<'_, Message> {
        match self.mode {
            ScreenMode::Results => match (&self.last_prediction, &self.thumbnail) {
                (Some(prediction), thumbnail) => results::view(ResultsContext {
                    prediction,
                    thumbnail: thumbnail.as_ref(),
                    scheme: scheme.clone(),
                    title: self.i18n.tr("result-title"),
                    text_scale: scale,
                })
                .map(Message::Results),
                (None, _) => self.initial_card(scheme, scale),
            },
            ScreenMode::Loading => {
                let column = Column::new()
                    .spacing(spacing::MD)
                    .align_x(Alignment::Center)
                    .push(
                        AnimatedSpinner::new(scheme.accent_info, self.spinner_rotation)
                            .into_element(),
                    )
                    .push(
                        text(self.i18n.tr("loading"))
                            .size(typography::SECTION * scale)
                            .color(scheme.text_secondary),
                    );
                container(column)
                    .padding(spacing::XL)
                    .width(Length::Fill)
                    .align_x(Alignment::Center)
                    .style(container_styles::placeholder(scheme))
                    .into()
            }
            ScreenMode::Initial => self.initial_card(scheme, scale),
        }
    }

    /// Upload prompt, or model acquisition status while it is in flight.
    fn initial_card(&self, scheme: &ColorScheme, scale: f32) -> Element<'_, Message> {
        let mut column = Column::new().spacing(spacing::MD).align_x(Alignment::Center);

        match &self.model_status {
            ModelStatus::Downloading { progress } => {
                column = column.push(
                    progress_bar(0.0..=1.0, *progress).girth(sizing::SCORE_BAR_HEIGHT),
                );
                let mut args = FluentArgs::new();
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                args.set("percent", (progress * 100.0) as u32);
                column = column.push(
                    text(self.i18n.tr_with("downloading-model", &args))
                        .size(typography::BODY * scale)
                        .color(scheme.text_secondary),
                );
            }
            ModelStatus::Loading => {
                column = column
                    .push(
                        AnimatedSpinner::new(scheme.accent_info, self.spinner_rotation)
                            .into_element(),
                    )
                    .push(
                        text(self.i18n.tr("loading-model"))
                            .size(typography::BODY * scale)
                            .color(scheme.text_secondary),
                    );
            }
            ModelStatus::Ready | ModelStatus::Failed(_) => {
                column = column.push(
                    text(self.i18n.tr("initial-placeholder"))
                        .size(typography::SECTION * scale)
                        .color(scheme.text_secondary),
                );
            }
        }

        container(column)
            .padding(spacing::XL)
            .width(Length::Fill)
            .align_x(Alignment::Center)
            .style(container_styles::placeholder(scheme))
            .into()
    }

    fn search_section(&self, scheme: &ColorScheme, scale: f32) -> Element<'_, Message> {
        let input = text_input(&self.i18n.tr("search-placeholder"), &self.search_input)
            .on_input(Message::SearchInputChanged)
            .on_submit(Message::SearchSubmitted)
            .padding(spacing::SM)
            .size(typography::BODY * scale);

        let wiki_button = button(
            text(self.i18n.tr("wiki-button")).size(typography::BUTTON * scale),
        )
        .padding(spacing::SM)
        .style(button_styles::primary(scheme))
        .on_press(Message::SearchSubmitted);

        let label_button = button(
            text(self.i18n.tr("label-button")).size(typography::BUTTON * scale),
        )
        .padding(spacing::SM)
        .style(button_styles::primary(scheme))
        .on_press(Message::LabelSearchPressed);

        let row = container(
            Row::new()
                .spacing(spacing::SM)
                .align_y(Alignment::Center)
                .push(input)
                .push(wiki_button)
                .push(label_button),
        )
        .padding(spacing::XS)
        .style(container_styles::search_bar(scheme));

        let mut column = Column::new().spacing(spacing::XS).push(row);
        if let Some(outcome) = &self.label_search {
            column = column.push(
                text(label_search_line(&self.i18n, outcome))
                    .size(typography::BODY * scale)
                    .color(scheme.text_secondary),
            );
        }
        column.into()
    }

    fn bottom_row(&self, scheme: &ColorScheme, scale: f32) -> Element<'_, Message> {
        let reset = button(
            text(self.i18n.tr("clear-button"))
                .size(typography::BUTTON * scale)
                .width(Length::Fill)
                .center(),
        )
        .padding(spacing::SM)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .width(Length::FillPortion(1))
        .style(button_styles::destructive(scheme))
        .on_press(Message::ResetPressed);

        let upload = button(
            text(self.i18n.tr("upload-button"))
                .size(typography::BUTTON * scale)
                .width(Length::Fill)
                .center(),
        )
        .padding(spacing::SM)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .width(Length::FillPortion(2))
        .style(button_styles::primary(scheme))
        .on_press_maybe(self.upload_enabled().then_some(Message::UploadPressed));

        Row::new()
            .spacing(spacing::MD)
            .push(reset)
            .push(upload)
            .into()
    }

    fn popup_overlay<'a>(
        &'a self,
        popup: &'a Popup,
        scheme: &ColorScheme,
        scale: f32,
    ) -> Element<'a, Message> {
        let card_content: Element<'a, Message> = match popup {
            Popup::Searching { query } => Column::new()
                .spacing(spacing::MD)
                .align_x(Alignment::Center)
                .push(
                    AnimatedSpinner::new(scheme.accent_info, self.spinner_rotation)
                        .into_element(),
                )
                .push(
                    text(self.i18n.tr("searching")).size(typography::SECTION * scale),
                )
                .push(
                    text(query.as_str())
                        .size(typography::BODY * scale)
                        .color(scheme.text_secondary),
                )
                .into(),
            Popup::Result(result) => {
                let body = match &result.summary {
                    Some(summary) => text(summary.as_str()).size(typography::BODY * scale),
                    None => text(self.i18n.tr("page-not-found"))
                        .size(typography::BODY * scale)
                        .color(scheme.text_secondary),
                };

                let close = button(
                    text(self.i18n.tr("close-button")).size(typography::BUTTON * scale),
                )
                .padding(spacing::SM)
                .style(button_styles::primary(scheme))
                .on_press(Message::PopupDismissed);

                Column::new()
                    .spacing(spacing::MD)
                    .push(
                        text(self.i18n.tr("wiki-search-title"))
                            .size(typography::BODY * scale)
                            .color(scheme.text_secondary),
                    )
                    .push(text(result.title.as_str()).size(typography::SECTION * scale))
                    .push(
                        scrollable(body)
                            .width(Length::Fill)
                            .height(Length::Fixed(220.0)),
                    )
                    .push(
                        Row::new().push(space::horizontal()).push(close),
                    )
                    .into()
            }
        };

        let card = container(card_content)
            .padding(spacing::LG)
            .max_width(440)
            .style(container_styles::popup_card(scheme));

        center(card).style(container_styles::scrim(scheme)).into()
    }
}

fn toolbar<'a>(
    i18n: &'a I18n,
    scheme: &ColorScheme,
    app: &'a App,
    scale: f32,
) -> Element<'a, Message> {
    let language_picker = pick_list(
        i18n.available_locales(),
        Some(i18n.current_locale().clone()),
        Message::LanguageSelected,
    )
    .text_size(typography::BUTTON * scale)
    .padding(spacing::XS);

    let theme_button = button(
        text(if app.theme_mode.is_dark() { "☀" } else { "🌙" })
            .size(typography::BUTTON * scale),
    )
    .padding(spacing::XS)
    .style(button_styles::icon(scheme))
    .on_press(Message::ThemeToggled);

    let text_size_button = button(
        text(i18n.tr(app.text_size.i18n_key())).size(typography::BUTTON * scale),
    )
    .padding(spacing::XS)
    .style(button_styles::icon(scheme))
    .on_press(Message::TextSizeCycled);

    let window_button = button(
        text(i18n.tr(app.window_profile.i18n_key())).size(typography::BUTTON * scale),
    )
    .padding(spacing::XS)
    .style(button_styles::icon(scheme))
    .on_press(Message::WindowProfileCycled);

    Row::new()
        .spacing(spacing::SM)
        .align_y(Alignment::Center)
        .push(language_picker)
        .push(space::horizontal())
        .push(text_size_button)
        .push(window_button)
        .push(theme_button)
        .into()
}

/// One-line localized rendering of a vocabulary search outcome.
fn label_search_line(i18n: &I18n, outcome: &VocabularySearch) -> String {
    match outcome {
        VocabularySearch::EmptyQuery => i18n.tr("label-search-enter-keyword"),
        VocabularySearch::NotLoaded => i18n.tr("label-search-loading"),
        VocabularySearch::NoMatch => i18n.tr("label-search-not-found"),
        VocabularySearch::Found { count, preview } => {
            let mut args = FluentArgs::new();
            args.set("count", *count);
            args.set("preview", preview.join(", "));
            let mut line = i18n.tr_with("label-search-found", &args);
            if *count > preview.len() {
                let mut more = FluentArgs::new();
                more.set("count", *count);
                line.push(' ');
                line.push_str(&i18n.tr_with("label-search-more", &more));
            }
            line
        }
    }
}

// Keep the banner free-standing so both the error and the degraded-i18n
// warnings render identically.
fn banner<'a>(
    i18n: &I18n,
    scheme: &ColorScheme,
    key: &str,
    scale: f32,
    dismissible: bool,
) -> Element<'a, Message> {
    let mut row = Row::new()
        .align_y(Alignment::Center)
        .spacing(spacing::SM)
        .push(text(i18n.tr(key)).size(typography::BODY * scale));

    if dismissible {
        let close_text = scheme.button_text;
        row = row.push(space::horizontal()).push(
            button(text("✕").size(typography::BODY * scale))
                .padding(spacing::XS)
                .style(move |_theme, _status| button::Style {
                    background: None,
                    text_color: close_text,
                    border: Border::default(),
                    shadow: Shadow::default(),
                    snap: true,
                })
                .on_press(Message::ErrorDismissed),
        );
    }

    container(row)
        .padding(spacing::SM)
        .width(Length::Fill)
        .style(container_styles::error_banner(scheme))
        .into()
}
