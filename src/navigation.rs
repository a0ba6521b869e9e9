//! This file defines the footer navigation shown at the bottom of every page.

use maud::{Markup, html};

use crate::{endpoints, month::MonthKey};

/// A link in the footer.
///
/// It will change appearance if `is_current` is set to `true`. Only one link
/// should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: String,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "flex flex-col items-center text-xs font-bold text-white"
        } else {
            "flex flex-col items-center text-xs font-bold text-white/40 \
            hover:text-white transition-colors"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

pub struct Footer<'a> {
    links: Vec<Link<'a>>,
    new_transaction_url: String,
}

impl Footer<'_> {
    /// Get the footer for pages about `month`.
    ///
    /// If a link matches `active_endpoint`, then that link will be marked as
    /// active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str, month: MonthKey) -> Footer<'_> {
        let links = vec![
            Link {
                url: endpoints::with_month(endpoints::ROOT, month),
                title: "明細",
                is_current: active_endpoint == endpoints::ROOT,
            },
            Link {
                url: endpoints::with_month(endpoints::BREAKDOWN_VIEW, month),
                title: "圖表",
                is_current: active_endpoint == endpoints::BREAKDOWN_VIEW,
            },
            Link {
                url: endpoints::with_month(endpoints::SETTINGS_VIEW, month),
                title: "設定",
                is_current: active_endpoint == endpoints::SETTINGS_VIEW,
            },
        ];

        Footer {
            links,
            new_transaction_url: endpoints::NEW_TRANSACTION_VIEW.to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        let mut links = self.links.into_iter();
        let first = links.next();

        html!(
            footer
                class="fixed bottom-0 left-1/2 -translate-x-1/2 max-w-md w-full
                bg-[#373e4b] h-20 flex items-center justify-around px-8 z-40"
            {
                @if let Some(link) = first {
                    (link.into_html())
                }

                div class="relative -top-8"
                {
                    a
                        href=(self.new_transaction_url)
                        aria-label="記一筆"
                        class="w-16 h-16 bg-white text-[#373e4b] rounded-full shadow-2xl
                        flex items-center justify-center border-[6px] border-[#373e4b]
                        text-4xl font-black active:scale-90 transition-transform"
                    {
                        "+"
                    }
                }

                @for link in links {
                    (link.into_html())
                }
            }
        )
    }
}
