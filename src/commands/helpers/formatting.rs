const TELEGRAM_TEXT_SAFE_LIMIT: usize = 3900;

pub(crate) fn as_html_block(title: &str, body: &str) -> String {
    let escaped_title = html_escape::encode_text(title);
    let escaped_body = html_escape::encode_text(body);
    let message = format!("<b>{}</b>\n<pre>{}</pre>", escaped_title, escaped_body);
    if message.len() > TELEGRAM_TEXT_SAFE_LIMIT {
        log::warn!("formatted Telegram message is close to hard limit");
    }
    message
}
