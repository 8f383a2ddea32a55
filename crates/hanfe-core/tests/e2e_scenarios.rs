// Hanfe End-to-End Scenarios
//
// Drives the full engine with a recording emitter: every uinput-bound
// operation lands in one chronological log, and `screen` models the text a
// downstream consumer would display after commits, preedit rewrites and
// backspaces.

use std::cell::RefCell;
use std::rc::Rc;

use evdev::{EventType, InputEvent};

use hanfe_core::key::codes::*;
use hanfe_core::{
    load_layout, Emitter, EmitterError, HanfeEngine, InputMode, ToggleConfig,
};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Forward(EventType, u16, i32),
    Key(u16, bool),
    Backspace(usize),
    Text(String),
}

#[derive(Default)]
struct EmitterState {
    ops: Vec<Op>,
    screen: String,
}

impl EmitterState {
    fn forwarded(&self) -> Vec<(EventType, u16, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Forward(kind, code, value) => Some((*kind, *code, *value)),
                _ => None,
            })
            .collect()
    }

    fn key_states(&self) -> Vec<(u16, bool)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Key(code, pressed) => Some((*code, *pressed)),
                _ => None,
            })
            .collect()
    }

    fn backspace_total(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                Op::Backspace(count) => *count,
                _ => 0,
            })
            .sum()
    }
}

struct RecordingEmitter {
    state: Rc<RefCell<EmitterState>>,
}

impl Emitter for RecordingEmitter {
    fn forward_event(&mut self, event: &InputEvent) -> Result<(), EmitterError> {
        self.state.borrow_mut().ops.push(Op::Forward(
            event.event_type(),
            event.code(),
            event.value(),
        ));
        Ok(())
    }

    fn send_key_state(&mut self, code: u16, pressed: bool) -> Result<(), EmitterError> {
        self.state.borrow_mut().ops.push(Op::Key(code, pressed));
        Ok(())
    }

    fn send_backspace(&mut self, count: usize) -> Result<(), EmitterError> {
        let mut state = self.state.borrow_mut();
        state.ops.push(Op::Backspace(count));
        for _ in 0..count {
            state.screen.pop();
        }
        Ok(())
    }

    fn send_text(&mut self, text: &str) -> Result<(), EmitterError> {
        let mut state = self.state.borrow_mut();
        state.ops.push(Op::Text(text.to_string()));
        state.screen.push_str(text);
        Ok(())
    }
}

fn new_engine(layout_name: &str) -> (HanfeEngine, Rc<RefCell<EmitterState>>) {
    let state = Rc::new(RefCell::new(EmitterState::default()));
    let emitter = RecordingEmitter {
        state: state.clone(),
    };
    let layout = load_layout(layout_name).unwrap();
    let engine = HanfeEngine::new(layout, ToggleConfig::default(), Box::new(emitter));
    (engine, state)
}

fn key_event(code: u16, value: i32) -> InputEvent {
    InputEvent::new(EventType::KEY, code, value)
}

fn tap(engine: &mut HanfeEngine, code: u16) {
    engine.process_event(&key_event(code, 1)).unwrap();
    engine.process_event(&key_event(code, 0)).unwrap();
}

fn tap_all(engine: &mut HanfeEngine, keycodes: &[u16]) {
    for &code in keycodes {
        tap(engine, code);
    }
}

fn shifted_tap(engine: &mut HanfeEngine, code: u16) {
    engine.process_event(&key_event(KEY_LEFTSHIFT, 1)).unwrap();
    tap(engine, code);
    engine.process_event(&key_event(KEY_LEFTSHIFT, 0)).unwrap();
}

#[test]
fn scenario_simple_syllable_stays_in_preedit() {
    // R K S: 간 composed, nothing committed yet.
    let (mut engine, state) = new_engine("dubeolsik");
    tap_all(&mut engine, &[KEY_R, KEY_K, KEY_S]);
    assert_eq!(state.borrow().screen, "간");
    assert_eq!(engine.preedit(), "간");
}

#[test]
fn scenario_second_syllable_commits_first() {
    // R K S R K: 간 commits when the second ㄱ cannot join its coda.
    let (mut engine, state) = new_engine("dubeolsik");
    tap_all(&mut engine, &[KEY_R, KEY_K, KEY_S, KEY_R, KEY_K]);
    assert_eq!(state.borrow().screen, "간가");
    assert_eq!(engine.preedit(), "가");
}

#[test]
fn scenario_coda_then_vowel_migrates() {
    // R K S T K: ㅅ lands as coda candidate, the vowel pulls it forward.
    let (mut engine, state) = new_engine("dubeolsik");
    tap_all(&mut engine, &[KEY_R, KEY_K, KEY_S, KEY_T, KEY_K]);
    assert_eq!(state.borrow().screen, "간사");
    assert_eq!(engine.preedit(), "사");
}

#[test]
fn double_tap_tenses_but_non_pairs_commit() {
    // ㄱㄱ is a double-initial pair, so two plain R taps compose ㄲ;
    // a non-doubling pair commits the first jamo bare.
    let (mut engine, state) = new_engine("dubeolsik");
    tap_all(&mut engine, &[KEY_R, KEY_R, KEY_K]);
    assert_eq!(state.borrow().screen, "까");
    assert_eq!(engine.preedit(), "까");

    let (mut engine, state) = new_engine("dubeolsik");
    tap_all(&mut engine, &[KEY_S, KEY_R, KEY_K]);
    assert_eq!(state.borrow().screen, "ㄴ가");
    assert_eq!(engine.preedit(), "가");
}

#[test]
fn scenario_shifted_tense_consonant() {
    // Shift+R K: ㄲ then ㅏ composes 까.
    let (mut engine, state) = new_engine("dubeolsik");
    shifted_tap(&mut engine, KEY_R);
    tap(&mut engine, KEY_K);
    assert_eq!(state.borrow().screen, "까");
    assert_eq!(engine.preedit(), "까");
}

#[test]
fn scenario_backspace_peels_composition() {
    // D K Backspace Backspace: 아 → ㅇ → empty.
    let (mut engine, state) = new_engine("dubeolsik");
    tap_all(&mut engine, &[KEY_D, KEY_K]);
    assert_eq!(state.borrow().screen, "아");

    tap(&mut engine, KEY_BACKSPACE);
    assert_eq!(state.borrow().screen, "ㅇ");
    assert_eq!(engine.preedit(), "ㅇ");

    tap(&mut engine, KEY_BACKSPACE);
    assert_eq!(state.borrow().screen, "");
    assert_eq!(engine.preedit(), "");

    // No swallowed backspace was ever forwarded.
    assert!(state.borrow().forwarded().is_empty());
}

#[test]
fn backspace_on_empty_composer_passes_through() {
    let (mut engine, state) = new_engine("dubeolsik");
    tap(&mut engine, KEY_BACKSPACE);
    let forwarded = state.borrow().forwarded();
    assert_eq!(
        forwarded,
        vec![
            (EventType::KEY, KEY_BACKSPACE, 1),
            (EventType::KEY, KEY_BACKSPACE, 0),
        ]
    );
}

#[test]
fn scenario_ctrl_shortcut_bypasses_composer() {
    // Ctrl held, then R: raw Ctrl+R forwarded, composer untouched.
    let (mut engine, state) = new_engine("dubeolsik");
    engine.process_event(&key_event(KEY_LEFTCTRL, 1)).unwrap();
    tap(&mut engine, KEY_R);
    engine.process_event(&key_event(KEY_LEFTCTRL, 0)).unwrap();

    assert_eq!(engine.preedit(), "");
    assert_eq!(state.borrow().screen, "");
    let forwarded = state.borrow().forwarded();
    assert_eq!(
        forwarded,
        vec![
            (EventType::KEY, KEY_LEFTCTRL, 1),
            (EventType::KEY, KEY_R, 1),
            (EventType::KEY, KEY_R, 0),
            (EventType::KEY, KEY_LEFTCTRL, 0),
        ]
    );
}

#[test]
fn latin_mode_is_identity_passthrough() {
    let (mut engine, state) = new_engine("dubeolsik");
    tap(&mut engine, KEY_RIGHTALT); // toggle, swallowed
    assert_eq!(engine.mode(), InputMode::Latin);
    state.borrow_mut().ops.clear();

    let events = [
        key_event(KEY_LEFTSHIFT, 1),
        key_event(KEY_R, 1),
        key_event(KEY_R, 0),
        key_event(KEY_LEFTSHIFT, 0),
        InputEvent::new(EventType::MISC, 4, 458756),
        InputEvent::new(EventType::SYNCHRONIZATION, 0, 0),
        key_event(KEY_SPACE, 1),
        key_event(KEY_SPACE, 2),
        key_event(KEY_SPACE, 0),
    ];
    for event in &events {
        engine.process_event(event).unwrap();
    }

    let forwarded = state.borrow().forwarded();
    let expected: Vec<(EventType, u16, i32)> = events
        .iter()
        .map(|e| (e.event_type(), e.code(), e.value()))
        .collect();
    assert_eq!(forwarded, expected);
    assert_eq!(state.borrow().screen, "");
}

#[test]
fn non_key_events_dropped_while_composing() {
    let (mut engine, state) = new_engine("dubeolsik");
    tap(&mut engine, KEY_R);
    engine
        .process_event(&InputEvent::new(EventType::SYNCHRONIZATION, 0, 0))
        .unwrap();
    engine
        .process_event(&InputEvent::new(EventType::MISC, 4, 458756))
        .unwrap();
    assert!(state.borrow().forwarded().is_empty());
}

#[test]
fn toggle_commits_active_preedit() {
    let (mut engine, state) = new_engine("dubeolsik");
    tap_all(&mut engine, &[KEY_R, KEY_K]);
    assert_eq!(engine.preedit(), "가");

    tap(&mut engine, KEY_RIGHTALT);
    assert_eq!(engine.mode(), InputMode::Latin);
    assert_eq!(engine.preedit(), "");
    // The committed text was retyped after the preedit was erased.
    assert_eq!(state.borrow().screen, "가");
}

#[test]
fn toggle_repeat_and_release_swallowed() {
    let (mut engine, state) = new_engine("dubeolsik");
    engine.process_event(&key_event(KEY_RIGHTALT, 1)).unwrap();
    assert_eq!(engine.mode(), InputMode::Latin);
    engine.process_event(&key_event(KEY_RIGHTALT, 2)).unwrap();
    engine.process_event(&key_event(KEY_RIGHTALT, 0)).unwrap();
    assert_eq!(engine.mode(), InputMode::Latin);
    assert!(state.borrow().forwarded().is_empty());
}

#[test]
fn backspace_count_matches_preedit_scalars() {
    let (mut engine, state) = new_engine("dubeolsik");
    tap_all(&mut engine, &[KEY_R, KEY_K, KEY_S]);
    // Three rewrites so far: "" → ㄱ → 가 → 간, erasing 0+1+1 scalars.
    assert_eq!(state.borrow().backspace_total(), 2);

    tap(&mut engine, KEY_RIGHTALT);
    // Committing erased the single-scalar preedit 간 exactly once more.
    assert_eq!(state.borrow().backspace_total(), 3);
    assert_eq!(state.borrow().screen, "간");
}

#[test]
fn shift_suspended_around_preedit_rewrite() {
    let (mut engine, state) = new_engine("dubeolsik");

    // Unmapped key with Shift held forwards Shift to the virtual device.
    engine.process_event(&key_event(KEY_LEFTSHIFT, 1)).unwrap();
    tap(&mut engine, KEY_F5);
    state.borrow_mut().ops.clear();

    // Next jamo (Shift+R = ㄲ) must rewrite the preedit with Shift lifted.
    engine.process_event(&key_event(KEY_R, 1)).unwrap();

    let ops = state.borrow().ops.clone();
    let release_at = ops
        .iter()
        .position(|op| *op == Op::Key(KEY_LEFTSHIFT, false))
        .expect("shift released before synthesis");
    let text_at = ops
        .iter()
        .position(|op| matches!(op, Op::Text(_)))
        .expect("preedit typed");
    let repress_at = ops
        .iter()
        .rposition(|op| *op == Op::Key(KEY_LEFTSHIFT, true))
        .expect("shift restored after synthesis");
    assert!(release_at < text_at, "shift still held during synthesis");
    assert!(text_at < repress_at, "shift restored too early");
    assert_eq!(engine.preedit(), "ㄲ");
}

#[test]
fn suspended_shift_not_restored_once_released() {
    let (mut engine, state) = new_engine("dubeolsik");
    engine.process_event(&key_event(KEY_LEFTSHIFT, 1)).unwrap();
    tap(&mut engine, KEY_F5); // forwards shift
    engine.process_event(&key_event(KEY_LEFTSHIFT, 0)).unwrap();
    state.borrow_mut().ops.clear();

    tap(&mut engine, KEY_R); // plain ㄱ now
    let key_states = state.borrow().key_states();
    assert!(
        !key_states.contains(&(KEY_LEFTSHIFT, true)),
        "released shift must not be re-pressed: {key_states:?}"
    );
}

#[test]
fn hangul_shift_withheld_without_consumer() {
    // Shift tapped alone in Hangul mode reaches nothing downstream.
    let (mut engine, state) = new_engine("dubeolsik");
    engine.process_event(&key_event(KEY_LEFTSHIFT, 1)).unwrap();
    engine.process_event(&key_event(KEY_LEFTSHIFT, 0)).unwrap();
    assert!(state.borrow().ops.is_empty());
}

#[test]
fn passthrough_symbol_commits_and_forwards() {
    let (mut engine, state) = new_engine("dubeolsik");
    tap_all(&mut engine, &[KEY_R, KEY_K]);
    tap(&mut engine, KEY_ENTER);

    assert_eq!(engine.preedit(), "");
    assert_eq!(state.borrow().screen, "가");
    let forwarded = state.borrow().forwarded();
    assert_eq!(
        forwarded,
        vec![(EventType::KEY, KEY_ENTER, 1), (EventType::KEY, KEY_ENTER, 0)]
    );
}

#[test]
fn text_symbol_commits_then_types() {
    let (mut engine, state) = new_engine("dubeolsik");
    tap_all(&mut engine, &[KEY_R, KEY_K]);
    tap(&mut engine, KEY_1);
    assert_eq!(state.borrow().screen, "가1");
    assert_eq!(engine.preedit(), "");

    shifted_tap(&mut engine, KEY_1);
    assert_eq!(state.borrow().screen, "가1!");
}

#[test]
fn autorepeat_keeps_feeding_the_composer() {
    let (mut engine, _state) = new_engine("dubeolsik");
    engine.process_event(&key_event(KEY_R, 1)).unwrap();
    engine.process_event(&key_event(KEY_R, 2)).unwrap();
    // Two ㄱ feeds compose the tense ㄲ.
    assert_eq!(engine.preedit(), "ㄲ");
}

#[test]
fn release_forwarded_only_after_forwarded_press() {
    let (mut engine, state) = new_engine("dubeolsik");
    // Jamo press is swallowed, so its release must be too.
    engine.process_event(&key_event(KEY_R, 1)).unwrap();
    engine.process_event(&key_event(KEY_R, 0)).unwrap();
    assert!(state.borrow().forwarded().is_empty());

    // A key pressed before Hangul mode took it over: press forwarded in
    // Latin mode, release after toggling back must still be forwarded.
    tap(&mut engine, KEY_RIGHTALT);
    engine.process_event(&key_event(KEY_F5, 1)).unwrap();
    tap(&mut engine, KEY_RIGHTALT);
    engine.process_event(&key_event(KEY_F5, 0)).unwrap();
    let forwarded = state.borrow().forwarded();
    assert_eq!(
        forwarded,
        vec![(EventType::KEY, KEY_F5, 1), (EventType::KEY, KEY_F5, 0)]
    );
}

#[test]
fn sebeolsik_forced_coda_builds_syllable() {
    let (mut engine, state) = new_engine("sebeolsik-390");
    tap(&mut engine, KEY_R); // ㄱ
    tap(&mut engine, KEY_K); // ㅏ
    shifted_tap(&mut engine, KEY_J); // coda ㄴ
    assert_eq!(engine.preedit(), "간");
    assert_eq!(state.borrow().screen, "간");
}

#[test]
fn sebeolsik_compound_vowel_keys() {
    let (mut engine, state) = new_engine("sebeolsik-390");
    tap(&mut engine, KEY_R); // ㄱ
    tap(&mut engine, KEY_COMMA); // ㅘ directly
    assert_eq!(engine.preedit(), "과");
    assert_eq!(state.borrow().screen, "과");
}

#[test]
fn latin_start_mode_respected() {
    let state = Rc::new(RefCell::new(EmitterState::default()));
    let emitter = RecordingEmitter {
        state: state.clone(),
    };
    let layout = load_layout("dubeolsik").unwrap();
    let toggle = ToggleConfig {
        default_mode: InputMode::Latin,
        ..ToggleConfig::default()
    };
    let mut engine = HanfeEngine::new(layout, toggle, Box::new(emitter));
    assert_eq!(engine.mode(), InputMode::Latin);

    tap(&mut engine, KEY_R);
    assert_eq!(engine.preedit(), "");
    assert_eq!(
        state.borrow().forwarded(),
        vec![(EventType::KEY, KEY_R, 1), (EventType::KEY, KEY_R, 0)]
    );
}
