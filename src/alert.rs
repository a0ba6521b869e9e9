//! Alerts for telling the user why a form submission failed.
//!
//! Alerts are swapped into `#alert-container` by htmx (`hx-target-error`).

use axum::response::Html;
use maud::{Markup, html};

/// An error alert with optional details.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

const ALERT_STYLE: &str = "flex items-start gap-3 p-4 rounded-lg border border-red-300 \
    bg-red-50 text-red-800 shadow-lg dark:bg-gray-800 \
    dark:text-red-400 dark:border-red-800";

impl Alert {
    pub fn into_markup(self) -> Markup {
        let Alert { message, details } = self;

        html! {
            div
                id="alert-container"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                hx-swap-oob="true"
            {
                div class=(ALERT_STYLE) role="alert"
                {
                    span class="font-bold" aria-hidden="true" { "!" }

                    div class="flex-1"
                    {
                        p class="font-medium" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1 text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        class="ms-auto text-sm font-semibold"
                        aria-label="Close"
                        onclick="document.getElementById('alert-container').classList.add('hidden')"
                    {
                        "×"
                    }
                }
            }
        }
    }

    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }
}
