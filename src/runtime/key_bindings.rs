use crate::runtime::command::Command;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, Command>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut table = Self::default();
        table.install_defaults();
        table
    }

    pub fn bind(&mut self, key: KeyBinding, command: Command) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    pub fn resolve(&self, event: KeyEvent) -> Option<Command> {
        self.bindings.get(&KeyBinding::from_event(event)).copied()
    }

    /// Drops the Alt+digit jump bindings. Used when a wizard disables the
    /// step-tab navigation affordance.
    pub fn remove_jump_bindings(&mut self) {
        for digit in '1'..='9' {
            self.unbind(&KeyBinding::alt(KeyCode::Char(digit)));
        }
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::key(KeyCode::Enter), Command::Advance);
        self.bind(KeyBinding::alt(KeyCode::Right), Command::Advance);
        self.bind(KeyBinding::alt(KeyCode::Left), Command::Back);
        self.bind(KeyBinding::ctrl(KeyCode::Char('s')), Command::Submit);
        self.bind(KeyBinding::key(KeyCode::Esc), Command::Cancel);
        self.bind(KeyBinding::ctrl(KeyCode::Char('c')), Command::Cancel);
        for (offset, digit) in ('1'..='9').enumerate() {
            self.bind(KeyBinding::alt(KeyCode::Char(digit)), Command::Jump(offset));
        }
    }
}
