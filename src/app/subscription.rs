// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use iced::{time, Subscription};
use std::time::Duration;

/// Periodic tick driving spinner rotation; idle when nothing is animating.
pub(super) fn tick(spinner_visible: bool) -> Subscription<Message> {
    if spinner_visible {
        time::every(Duration::from_millis(50)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
