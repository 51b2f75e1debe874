//! Keyboard-driven page turning.
//!
//! [`PageKeys`] turns key presses tracked by [`Input`] into [`PageCommand`]s
//! that a [`PageQuad`](crate::PageQuad) can [`apply`](crate::PageQuad::apply).
//!
//! ```
//! use pagequad::{Input, KeyCode, PageCommand, PageKeys};
//!
//! let keys = PageKeys::default().bind(KeyCode::KeyN, PageCommand::Next);
//!
//! let mut input = Input::new();
//! input.press(KeyCode::KeyN);
//! assert_eq!(keys.poll(&input), Some(PageCommand::Next));
//! ```

use crate::input::Input;
use winit::keyboard::KeyCode;

/// A single navigation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageCommand {
    Next,
    Previous,
    First,
    Last,
}

/// Key bindings for page navigation.
///
/// | Command    | Default keys                                |
/// |------------|---------------------------------------------|
/// | `Next`     | Right, Down, PageDown, Space                |
/// | `Previous` | Left, Up, PageUp, Backspace                 |
/// | `First`    | Home                                        |
/// | `Last`     | End                                         |
#[derive(Clone, Debug)]
pub struct PageKeys {
    bindings: Vec<(KeyCode, PageCommand)>,
}

impl Default for PageKeys {
    fn default() -> Self {
        Self {
            bindings: vec![
                (KeyCode::ArrowRight, PageCommand::Next),
                (KeyCode::ArrowDown, PageCommand::Next),
                (KeyCode::PageDown, PageCommand::Next),
                (KeyCode::Space, PageCommand::Next),
                (KeyCode::ArrowLeft, PageCommand::Previous),
                (KeyCode::ArrowUp, PageCommand::Previous),
                (KeyCode::PageUp, PageCommand::Previous),
                (KeyCode::Backspace, PageCommand::Previous),
                (KeyCode::Home, PageCommand::First),
                (KeyCode::End, PageCommand::Last),
            ],
        }
    }
}

impl PageKeys {
    /// No bindings at all.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds `key` to `command`, replacing any previous binding of `key`.
    pub fn bind(mut self, key: KeyCode, command: PageCommand) -> Self {
        self.bindings.retain(|(k, _)| *k != key);
        self.bindings.push((key, command));
        self
    }

    /// Removes any binding of `key`.
    pub fn unbind(mut self, key: KeyCode) -> Self {
        self.bindings.retain(|(k, _)| *k != key);
        self
    }

    pub fn command_for(&self, key: KeyCode) -> Option<PageCommand> {
        self.bindings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, command)| *command)
    }

    /// The command for the first bound key pressed this frame.
    pub fn poll(&self, input: &Input) -> Option<PageCommand> {
        self.bindings
            .iter()
            .find(|(key, _)| input.key_pressed(*key))
            .map(|(_, command)| *command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let keys = PageKeys::default();
        assert_eq!(keys.command_for(KeyCode::PageDown), Some(PageCommand::Next));
        assert_eq!(keys.command_for(KeyCode::ArrowLeft), Some(PageCommand::Previous));
        assert_eq!(keys.command_for(KeyCode::Home), Some(PageCommand::First));
        assert_eq!(keys.command_for(KeyCode::End), Some(PageCommand::Last));
        assert_eq!(keys.command_for(KeyCode::KeyQ), None);
    }

    #[test]
    fn rebinding_replaces() {
        let keys = PageKeys::default()
            .bind(KeyCode::Space, PageCommand::Last)
            .unbind(KeyCode::End);
        assert_eq!(keys.command_for(KeyCode::Space), Some(PageCommand::Last));
        assert_eq!(keys.command_for(KeyCode::End), None);
    }

    #[test]
    fn poll_only_sees_fresh_presses() {
        let keys = PageKeys::default();
        let mut input = Input::new();
        assert_eq!(keys.poll(&input), None);

        input.press(KeyCode::End);
        assert_eq!(keys.poll(&input), Some(PageCommand::Last));

        input.begin_frame();
        assert_eq!(keys.poll(&input), None);
    }
}
