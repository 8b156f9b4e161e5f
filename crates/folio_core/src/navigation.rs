//! Maps discrete user gestures onto navigation intents.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Next,
    Prev,
    JumpTo(usize),
    JumpToLast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
}

pub fn intent_for_key(key: Key) -> NavIntent {
    match key {
        Key::ArrowRight | Key::PageDown => NavIntent::Next,
        Key::ArrowLeft | Key::PageUp => NavIntent::Prev,
        Key::Home => NavIntent::JumpTo(0),
        Key::End => NavIntent::JumpToLast,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeSettings {
    /// Minimum absolute horizontal travel, in pixels, that counts as a swipe.
    pub threshold_px: f32,
}

impl Default for SwipeSettings {
    fn default() -> Self {
        Self { threshold_px: 50.0 }
    }
}

/// Rightward travel pages back, leftward travel pages forward.
pub fn classify_swipe(start_x: f32, end_x: f32, settings: &SwipeSettings) -> Option<NavIntent> {
    let delta = end_x - start_x;
    if !(delta.abs() > settings.threshold_px) {
        return None;
    }
    if delta > 0.0 {
        Some(NavIntent::Prev)
    } else {
        Some(NavIntent::Next)
    }
}

/// Indicator text such as `Page 3 / 12` or `Page 3-4 / 12`.
pub fn page_label(current_index: usize, visible_count: usize, total: usize) -> String {
    if total == 0 {
        return "Page 0 / 0".to_string();
    }
    if visible_count > 1 {
        let last = (current_index + visible_count).min(total);
        format!("Page {}-{} / {}", current_index + 1, last, total)
    } else {
        format!("Page {} / {}", current_index + 1, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_direction_follows_travel() {
        let settings = SwipeSettings::default();
        assert_eq!(classify_swipe(200.0, 100.0, &settings), Some(NavIntent::Next));
        assert_eq!(classify_swipe(100.0, 200.0, &settings), Some(NavIntent::Prev));
    }

    #[test]
    fn swipe_at_or_below_threshold_is_ignored() {
        let settings = SwipeSettings::default();
        assert_eq!(classify_swipe(100.0, 130.0, &settings), None);
        assert_eq!(classify_swipe(100.0, 50.0, &settings), None);
        assert_eq!(classify_swipe(f32::NAN, 10.0, &settings), None);
    }

    #[test]
    fn labels_cover_single_and_spread() {
        assert_eq!(page_label(0, 1, 4), "Page 1 / 4");
        assert_eq!(page_label(2, 2, 4), "Page 3-4 / 4");
        assert_eq!(page_label(4, 1, 5), "Page 5 / 5");
        assert_eq!(page_label(0, 0, 0), "Page 0 / 0");
    }
}
