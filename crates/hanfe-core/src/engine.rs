// Hanfe Interception Engine
// Grabs one keyboard, drives the composer, keeps the preedit consistent

use std::collections::{HashMap, HashSet};
use std::io;
use std::os::unix::io::AsRawFd;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use evdev::{Device, EventType, InputEvent};
use smallvec::SmallVec;

use crate::compose::Composer;
use crate::config::ToggleConfig;
use crate::key::codes;
use crate::layout::{Layout, SymbolKind};
use crate::modifier;
use crate::output::{Emitter, EmitterError};

/// Current interpretation of the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Hangul,
    Latin,
}

impl InputMode {
    fn flipped(self) -> Self {
        match self {
            InputMode::Hangul => InputMode::Latin,
            InputMode::Latin => InputMode::Hangul,
        }
    }
}

/// Engine errors; fatal, the process exits with code 1.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to grab device: {0}")]
    Grab(#[source] io::Error),

    #[error("failed to read input event: {0}")]
    Read(#[source] io::Error),

    #[error(transparent)]
    Emitter(#[from] EmitterError),
}

/// The event-loop state machine.
///
/// Owns the composer, the emitter and the preedit mirror. `preedit` is not
/// authoritative text; it records what has already been typed into the
/// downstream consumer so reconciliation knows how much to erase.
pub struct HanfeEngine {
    layout: Layout,
    emitter: Box<dyn Emitter>,
    composer: Composer,
    mode: InputMode,
    preedit: String,
    toggle_keys: HashSet<u16>,
    /// Physical up/down state of the eight modifier keys.
    modifier_state: HashMap<u16, bool>,
    /// Which modifiers the virtual device currently holds pressed.
    forwarded_modifiers: HashMap<u16, bool>,
    /// Non-modifier keys whose press was forwarded; their release must be too.
    forwarded_keys: HashSet<u16>,
    running: Arc<AtomicBool>,
}

fn is_press(event: &InputEvent) -> bool {
    event.value() == 1 || event.value() == 2
}

fn is_release(event: &InputEvent) -> bool {
    event.value() == 0
}

impl HanfeEngine {
    pub fn new(layout: Layout, toggle: ToggleConfig, emitter: Box<dyn Emitter>) -> Self {
        let mut modifier_state = HashMap::new();
        let mut forwarded_modifiers = HashMap::new();
        for code in modifier::MODIFIER_KEYS {
            modifier_state.insert(code, false);
            forwarded_modifiers.insert(code, false);
        }
        Self {
            layout,
            emitter,
            composer: Composer::new(),
            mode: toggle.default_mode,
            preedit: String::new(),
            toggle_keys: toggle.toggle_keys.into_iter().collect(),
            modifier_state,
            forwarded_modifiers,
            forwarded_keys: HashSet::new(),
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Share the stop flag with a signal handler.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn preedit(&self) -> &str {
        &self.preedit
    }

    /// Grab the device and pump events until EOF, a fatal error, or the
    /// stop flag clears. The grab is dropped on every exit path.
    pub fn run(&mut self, device: &mut Device) -> Result<(), EngineError> {
        // A previous instance may have died holding the grab.
        let _ = device.ungrab();
        device.grab().map_err(EngineError::Grab)?;

        let result = self.event_loop(device);

        let _ = device.ungrab();
        result
    }

    fn event_loop(&mut self, device: &mut Device) -> Result<(), EngineError> {
        // Bounded poll so the stop flag is observed even while idle; the
        // signal handler lives on another thread and cannot EINTR us.
        const POLL_TIMEOUT_MS: libc::c_int = 200;

        while self.running.load(Ordering::SeqCst) {
            let mut pollfd = libc::pollfd {
                fd: device.as_raw_fd(),
                events: libc::POLLIN,
                revents: 0,
            };
            let rc = unsafe { libc::poll(&mut pollfd, 1, POLL_TIMEOUT_MS) };
            if rc < 0 {
                let err = io::Error::last_os_error();
                if err.raw_os_error() == Some(libc::EINTR) {
                    // Signal delivery; the loop condition decides.
                    continue;
                }
                return Err(EngineError::Read(err));
            }
            if rc == 0 {
                continue;
            }
            if pollfd.revents & (libc::POLLHUP | libc::POLLERR | libc::POLLNVAL) != 0 {
                log::warn!("input device disappeared, shutting down");
                return Ok(());
            }

            let events: Vec<InputEvent> = match device.fetch_events() {
                Ok(events) => events.collect(),
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => continue,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) if err.raw_os_error() == Some(libc::ENODEV) => {
                    log::warn!("input device disappeared, shutting down");
                    return Ok(());
                }
                Err(err) => return Err(EngineError::Read(err)),
            };
            for event in events {
                self.process_event(&event)?;
            }
        }
        Ok(())
    }

    /// Dispatch one source event.
    pub fn process_event(&mut self, event: &InputEvent) -> Result<(), EngineError> {
        if event.event_type() != EventType::KEY {
            // While a preedit is active no foreign SYNs may leak; the
            // emitter syncs after its own writes.
            if self.mode == InputMode::Latin {
                self.emitter.forward_event(event)?;
            }
            return Ok(());
        }

        let code = event.code();

        if self.toggle_keys.contains(&code) {
            if event.value() == 1 {
                self.toggle_mode()?;
            }
            return Ok(());
        }

        if modifier::is_modifier_code(code) {
            return self.handle_modifier(event);
        }

        if self.mode == InputMode::Latin {
            return self.forward_key_event(event);
        }

        if code == codes::KEY_BACKSPACE {
            return self.handle_backspace(event);
        }

        if is_release(event) {
            return self.handle_key_release(event);
        }

        self.handle_key_press(event)
    }

    fn toggle_mode(&mut self) -> Result<(), EngineError> {
        self.commit_preedit()?;
        self.mode = self.mode.flipped();
        log::debug!("mode switched to {:?}", self.mode);
        Ok(())
    }

    fn handle_modifier(&mut self, event: &InputEvent) -> Result<(), EngineError> {
        let code = event.code();
        let press = is_press(event);
        let release = is_release(event);

        if press {
            self.modifier_state.insert(code, true);
        } else if release {
            self.modifier_state.insert(code, false);
        }

        if self.mode == InputMode::Latin || modifier::is_always_forward_code(code) {
            self.emitter.forward_event(event)?;
            self.forwarded_modifiers.insert(code, press && !release);
            return Ok(());
        }

        // Hangul-mode Shift: withheld on press so it cannot distort the
        // synthesized preedit; released downstream only if we forwarded it.
        if release && self.is_forwarded_modifier(code) {
            self.set_forwarded_modifier(code, false)?;
        }
        Ok(())
    }

    fn handle_backspace(&mut self, event: &InputEvent) -> Result<(), EngineError> {
        if is_release(event) {
            if self.forwarded_keys.contains(&codes::KEY_BACKSPACE) {
                self.forward_key_event(event)?;
            }
            return Ok(());
        }

        if let Some(new_preedit) = self.composer.backspace() {
            return self.replace_preedit(&new_preedit);
        }

        // Composer empty: the backspace is meant for real text.
        self.commit_preedit()?;
        self.forward_key_event(event)
    }

    fn handle_key_release(&mut self, event: &InputEvent) -> Result<(), EngineError> {
        if self.forwarded_keys.contains(&event.code()) {
            self.forward_key_event(event)?;
        }
        Ok(())
    }

    fn handle_key_press(&mut self, event: &InputEvent) -> Result<(), EngineError> {
        let code = event.code();

        // Shortcut chords bypass composition entirely.
        if self.any_always_forward_active() {
            self.commit_preedit()?;
            self.ensure_shift_forwarded()?;
            return self.forward_key_event(event);
        }

        let Some(symbol) = self.layout.translate(code, self.shift_active()).cloned() else {
            self.commit_preedit()?;
            self.ensure_shift_forwarded()?;
            return self.forward_key_event(event);
        };

        match symbol.kind {
            SymbolKind::Passthrough => {
                if symbol.commit_before {
                    self.commit_preedit()?;
                }
                self.ensure_shift_forwarded()?;
                self.forward_key_event(event)
            }
            SymbolKind::Text(text) => {
                if symbol.commit_before {
                    self.commit_preedit()?;
                }
                self.send_text(&text)
            }
            SymbolKind::Jamo { jamo, role } => {
                let result = self.composer.feed(jamo, role);
                if !result.commit.is_empty() {
                    self.commit_text(&result.commit)?;
                }
                if result.preedit != self.preedit {
                    self.replace_preedit(&result.preedit)?;
                }
                Ok(())
            }
        }
    }

    fn forward_key_event(&mut self, event: &InputEvent) -> Result<(), EngineError> {
        self.emitter.forward_event(event)?;
        if is_press(event) {
            self.forwarded_keys.insert(event.code());
        } else if is_release(event) {
            self.forwarded_keys.remove(&event.code());
        }
        Ok(())
    }

    fn shift_active(&self) -> bool {
        modifier::SHIFT_KEYS
            .iter()
            .any(|code| self.modifier_state.get(code) == Some(&true))
    }

    fn any_always_forward_active(&self) -> bool {
        modifier::ALWAYS_FORWARD_KEYS
            .iter()
            .any(|code| self.modifier_state.get(code) == Some(&true))
    }

    fn is_forwarded_modifier(&self, code: u16) -> bool {
        self.forwarded_modifiers.get(&code) == Some(&true)
    }

    fn set_forwarded_modifier(&mut self, code: u16, pressed: bool) -> Result<(), EngineError> {
        if self.forwarded_modifiers.get(&code) == Some(&pressed) {
            return Ok(());
        }
        self.emitter.send_key_state(code, pressed)?;
        self.forwarded_modifiers.insert(code, pressed);
        Ok(())
    }

    /// Press Shift on the virtual device when it is physically held but not
    /// yet forwarded, so passthroughs and shortcuts stay shifted.
    fn ensure_shift_forwarded(&mut self) -> Result<(), EngineError> {
        for code in modifier::SHIFT_KEYS {
            if self.modifier_state.get(&code) == Some(&true) && !self.is_forwarded_modifier(code) {
                self.set_forwarded_modifier(code, true)?;
            }
        }
        Ok(())
    }

    /// Release every modifier the virtual device holds and remember which,
    /// so a synthesized Ctrl+Shift+U sequence starts from a clean slate.
    fn suspend_forwarded_modifiers(&mut self) -> Result<SmallVec<[u16; 8]>, EngineError> {
        let mut suspended = SmallVec::new();
        for code in modifier::MODIFIER_KEYS {
            if self.is_forwarded_modifier(code) {
                self.set_forwarded_modifier(code, false)?;
                suspended.push(code);
            }
        }
        Ok(suspended)
    }

    /// Re-press suspended modifiers that are still physically held.
    fn restore_forwarded_modifiers(
        &mut self,
        suspended: SmallVec<[u16; 8]>,
    ) -> Result<(), EngineError> {
        for code in suspended {
            if self.modifier_state.get(&code) == Some(&true) {
                self.set_forwarded_modifier(code, true)?;
            }
        }
        Ok(())
    }

    /// Bring the downstream preedit region in line with `new_text`:
    /// backspace over the old provisional characters, type the new ones.
    fn replace_preedit(&mut self, new_text: &str) -> Result<(), EngineError> {
        if new_text == self.preedit {
            return Ok(());
        }
        let suspended = self.suspend_forwarded_modifiers()?;
        let old_count = self.preedit.chars().count();
        if old_count > 0 {
            self.emitter.send_backspace(old_count)?;
        }
        if !new_text.is_empty() {
            self.emitter.send_text(new_text)?;
        }
        self.preedit = new_text.to_string();
        self.restore_forwarded_modifiers(suspended)
    }

    fn commit_preedit(&mut self) -> Result<(), EngineError> {
        let commit = self.composer.flush();
        if commit.is_empty() && self.preedit.is_empty() {
            return Ok(());
        }
        self.replace_preedit("")?;
        if !commit.is_empty() {
            self.send_text(&commit)?;
        }
        Ok(())
    }

    fn commit_text(&mut self, text: &str) -> Result<(), EngineError> {
        if text.is_empty() {
            return Ok(());
        }
        self.replace_preedit("")?;
        self.send_text(text)
    }

    fn send_text(&mut self, text: &str) -> Result<(), EngineError> {
        if text.is_empty() {
            return Ok(());
        }
        let suspended = self.suspend_forwarded_modifiers()?;
        self.emitter.send_text(text)?;
        self.restore_forwarded_modifiers(suspended)
    }
}
