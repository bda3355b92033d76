//! Unread badge presentation.

/// Label for an unread-count badge.
///
/// Returns `None` when there is nothing unread (no badge is drawn),
/// the literal count up to 99, and `"99+"` beyond that.
pub fn badge_label(unread: usize) -> Option<String> {
    match unread {
        0 => None,
        1..=99 => Some(unread.to_string()),
        _ => Some("99+".to_owned()),
    }
}
