/// Literal token replaced by the count in channel name templates.
pub const COUNT_TOKEN: &str = "{count}";

/// Discord rejects channel names longer than this (in characters).
pub const MAX_CHANNEL_NAME_LENGTH: usize = 100;

/// Renders a channel name by substituting every `{count}` in `template`.
pub fn render_channel_name(template: &str, count: usize) -> String {
    let name = template.replace(COUNT_TOKEN, &group_thousands(count));

    match name.char_indices().nth(MAX_CHANNEL_NAME_LENGTH) {
        Some((cut, _)) => name[..cut].to_string(),
        None => name,
    }
}

/// `1234567` becomes `1,234,567`.
pub fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}
