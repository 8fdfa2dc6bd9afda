// SPDX-License-Identifier: MPL-2.0
//! Screen mode enumeration.

/// The three modes of the main content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenMode {
    /// Upload prompt, no prediction held.
    #[default]
    Initial,
    /// A classification is in flight.
    Loading,
    /// A prediction is held and rendered.
    Results,
}
