use serde::{Deserialize, Serialize};

/// Keys the slider reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Tab { shift: bool },
}

impl SliderKey {
    /// Parses a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_key_name(name: &str, shift: bool) -> Option<Self> {
        let key = match name {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Home" => Self::Home,
            "End" => Self::End,
            "Tab" => Self::Tab { shift },
            _ => return None,
        };
        Some(key)
    }
}

/// Normalized keyboard action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    /// Signed number of selection-granularity steps.
    Step(i32),
    /// Signed number of display-unit steps.
    Page(i32),
    ToStart,
    ToEnd,
    FocusNext,
    FocusPrevious,
}

impl From<SliderKey> for KeyCommand {
    fn from(key: SliderKey) -> Self {
        match key {
            SliderKey::ArrowLeft | SliderKey::ArrowDown => Self::Step(-1),
            SliderKey::ArrowRight | SliderKey::ArrowUp => Self::Step(1),
            SliderKey::PageDown => Self::Page(-1),
            SliderKey::PageUp => Self::Page(1),
            SliderKey::Home => Self::ToStart,
            SliderKey::End => Self::ToEnd,
            SliderKey::Tab { shift: false } => Self::FocusNext,
            SliderKey::Tab { shift: true } => Self::FocusPrevious,
        }
    }
}
