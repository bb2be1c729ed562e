//! Alert banners for messages that interrupt the user.
//!
//! The expenses page uses these in place of the browser-native blocking
//! alert dialog: the banner renders above the table and the rest of the
//! action is skipped.

use maud::{Markup, html};

const ALERT_STYLE: &str = "w-full max-w-md rounded border border-red-300 \
    bg-red-50 px-4 py-3 text-sm text-red-800 dark:border-red-800 \
    dark:bg-gray-800 dark:text-red-400";

/// An error message displayed as a banner above the page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Alert {
    message: String,
}

impl Alert {
    /// Create a new error alert.
    pub(crate) fn error(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }

    pub(crate) fn into_html(self) -> Markup {
        html! {
            div class=(ALERT_STYLE) role="alert" data-alert="true"
            {
                (self.message)
            }
        }
    }
}
