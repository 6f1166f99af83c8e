//! Shared page layout and formatting helpers for the HTML views.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};

// Table styles
pub const TABLE_STYLE: &str = "data-table";
pub const TABLE_HEADER_STYLE: &str = "data-table-header";
pub const TABLE_CELL_STYLE: &str = "data-table-cell";

// Card styles
pub const CARD_STYLE: &str = "card";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "page";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Sales Dashboard" }
                link href="/static/main.css" rel="stylesheet";

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
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class=(PAGE_CONTAINER_STYLE)
        {
            div class="error"
            {
                h1 class="error-code" { (header) }

                p class="error-description" { (description) }

                p { (fix) }

                a href="/" class="button" { "Back to Dashboard" }
            }
        }
    );

    base(title, &[], &content)
}

pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(2)))
    });

    let Some(positive_fmt) = positive_fmt else {
        return format!("${number:.2}");
    };

    if number == 0.0 {
        // numfmt renders zero as "0".
        return "$0.00".to_owned();
    }

    if number < 0.0 {
        return format!("-{}", format_currency(-number));
    }

    let mut formatted_string = positive_fmt.fmt_string(number);

    // numfmt omits trailing zeros, so we must add them ourselves.
    // For example, "12.30" is rendered as "12.3" and "12.00" as "12".
    match formatted_string.rfind('.') {
        Some(dot) => {
            let decimals = formatted_string.len() - dot - 1;
            formatted_string.push_str(&"0".repeat(2usize.saturating_sub(decimals)));
        }
        None => formatted_string.push_str(".00"),
    }

    formatted_string
}
