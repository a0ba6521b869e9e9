use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-4 bg-[#373e4b] \
    disabled:opacity-50 hover:enabled:bg-[#2d333e] text-white font-black \
    rounded-3xl shadow-xl active:scale-95 transition-all";

pub const BUTTON_DELETE_STYLE: &str = "px-5 py-4 rounded-3xl bg-red-50 \
    text-red-500 font-black hover:bg-red-100 disabled:opacity-50";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto max-w-md text-gray-900";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-xs font-bold text-slate-400 tracking-widest";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-3 rounded-2xl text-base \
    text-slate-800 bg-slate-50 border border-slate-200 focus:ring-[#373e4b] \
    focus:border-[#373e4b]";

// Tag chip style
pub const TAG_BADGE_STYLE: &str = "bg-indigo-50 text-indigo-500 text-[10px] \
    px-1.5 rounded-full border border-indigo-100 font-bold";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "max-w-md mx-auto min-h-screen flex flex-col \
    relative bg-[#f3f4f6] pb-24 shadow-2xl overflow-x-hidden";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="zh-Hant"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - 朱羅記帳" }
                link href="/static/ledger.css" rel="stylesheet";

                script src="https://cdn.tailwindcss.com" {}
                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4/response-targets.js" {}

                style
                {
                    r#"
                    #indicator.htmx-indicator {
                        display: none;
                    }

                    #indicator.htmx-request .htmx-indicator {
                        display: inline;
                    }

                    #indicator.htmx-request.htmx-indicator {
                        display: inline;
                    }
                    "#
                }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="bg-slate-200 min-h-screen"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id="alert-container"
                    class="hidden w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-[#373e4b]"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-[#373e4b]
                            hover:bg-[#2d333e] font-medium rounded text-sm px-5
                            py-2.5 text-center my-4"
                    {
                        "回到首頁"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

pub fn loading_spinner() -> Markup {
    // Spinner SVG adapted from https://flowbite.com/docs/components/spinner/
    html! {
        svg
            aria-hidden="true"
            role="status"
            class="inline text-white w-4 h-4 me-2 mb-1 animate-spin"
            viewBox="0 0 100 101"
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
        {
            path
                d="M100 50.5908C100 78.2051 77.6142 100.591 50 100.591C22.3858 100.591 0 78.2051 0 50.5908C0 22.9766 22.3858 0.59082 50 0.59082C77.6142 0.59082 100 22.9766 100 50.5908ZM9.08144 50.5908C9.08144 73.1895 27.4013 91.5094 50 91.5094C72.5987 91.5094 90.9186 73.1895 90.9186 50.5908C90.9186 27.9921 72.5987 9.67226 50 9.67226C27.4013 9.67226 9.08144 27.9921 9.08144 50.5908Z"
                fill="#E5E7EB" {}
            path
                d="M93.9676 39.0409C96.393 38.4038 97.8624 35.9116 97.0079 33.5539C95.2932 28.8227 92.871 24.3692 89.8167 20.348C85.8452 15.1192 80.8826 10.7238 75.2124 7.41289C69.5422 4.10194 63.2754 1.94025 56.7698 1.05124C51.7666 0.367541 46.6976 0.446843 41.7345 1.27873C39.2613 1.69328 37.813 4.19778 38.4501 6.62326C39.0873 9.04874 41.5694 10.4717 44.0505 10.1071C47.8511 9.54855 51.7191 9.52689 55.5402 10.0491C60.8642 10.7766 65.9928 12.5457 70.6331 15.2552C75.2735 17.9648 79.3347 21.5619 82.5849 25.841C84.9175 28.9121 86.7997 32.2913 88.1811 35.8758C89.083 38.2158 91.5421 39.6781 93.9676 39.0409Z"
                fill="currentColor" {}
        }
    }
}

/// Format `number` with thousands separators, e.g. `1,234` or `12.5`.
///
/// Whole numbers have no decimal places, other numbers are rounded to at
/// most two.
pub fn format_number(number: f64) -> String {
    static WHOLE_FMT: OnceLock<Formatter> = OnceLock::new();
    static DECIMAL_FMT: OnceLock<Formatter> = OnceLock::new();

    if number == 0.0 {
        // numfmt ignores the precision for zero.
        return "0".to_owned();
    }

    let formatter = if number.fract() == 0.0 {
        WHOLE_FMT.get_or_init(|| number_formatter(0))
    } else {
        DECIMAL_FMT.get_or_init(|| number_formatter(2))
    };

    let formatted = formatter.fmt_string(number.abs());

    if number < 0.0 {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// Format `number` as a dollar amount with the sign after the dollar sign,
/// e.g. `$1,234` or `$-1,234`.
pub fn format_currency(number: f64) -> String {
    format!("${}", format_number(number))
}

fn number_formatter(decimals: u8) -> Formatter {
    Formatter::currency("")
        .unwrap_or_default()
        .precision(Precision::Decimals(decimals))
}
