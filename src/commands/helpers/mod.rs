mod formatting;

pub(super) use formatting::as_html_block;
