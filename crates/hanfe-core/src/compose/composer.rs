// Hanfe Syllable Composer
// Incremental three-slot Hangul automaton with backspace decomposition

use super::tables;

/// Positional role requested for a consonant by the layout.
///
/// `Auto` lets the composer decide from its state (two-set layouts);
/// `Leading`/`Trailing` force the onset or coda slot (three-set layouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JamoRole {
    Auto,
    Leading,
    Trailing,
}

/// Outcome of feeding one jamo.
///
/// `commit` is text that left the preedit for good; `preedit` is the full
/// provisional text after the step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompositionResult {
    pub commit: String,
    pub preedit: String,
}

/// Builds Hangul syllables one jamo at a time.
///
/// State is three optional slots (leading consonant, medial vowel, trailing
/// consonant). A vowel arriving with no onset implicitly inserts the null
/// initial `ㅇ`; that implicit onset is remembered so backspace removes it
/// together with the vowel, while a typed `ㅇ` survives on its own.
#[derive(Debug, Default)]
pub struct Composer {
    leading: Option<char>,
    vowel: Option<char>,
    trailing: Option<char>,
    implicit_leading: bool,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.leading.is_none() && self.vowel.is_none() && self.trailing.is_none()
    }

    /// Consume one jamo with the requested role.
    pub fn feed(&mut self, ch: char, role: JamoRole) -> CompositionResult {
        let commit = if tables::is_vowel(ch) {
            self.handle_vowel(ch)
        } else {
            self.handle_consonant(ch, role)
        };
        CompositionResult {
            commit,
            preedit: self.compose(),
        }
    }

    /// Step the state one jamo back toward empty.
    ///
    /// Returns the new preedit, or `None` when there was nothing to erase
    /// and the caller should let the real Backspace through.
    pub fn backspace(&mut self) -> Option<String> {
        if let Some(tail) = self.trailing {
            self.trailing = tables::split_final(tail).map(|(first, _)| first);
            return Some(self.compose());
        }
        if let Some(vowel) = self.vowel {
            match tables::split_medial(vowel) {
                Some((first, _)) => self.vowel = Some(first),
                None => {
                    self.vowel = None;
                    if self.implicit_leading {
                        self.leading = None;
                        self.implicit_leading = false;
                    }
                }
            }
            return Some(self.compose());
        }
        if let Some(lead) = self.leading {
            match tables::split_initial(lead) {
                Some((first, _)) => self.leading = Some(first),
                None => {
                    self.leading = None;
                    self.implicit_leading = false;
                }
            }
            return Some(self.compose());
        }
        None
    }

    /// Commit whatever the slots hold and clear the state.
    pub fn flush(&mut self) -> String {
        let commit = self.compose();
        self.reset();
        commit
    }

    /// Current preedit text.
    pub fn preedit(&self) -> String {
        self.compose()
    }

    fn handle_consonant(&mut self, ch: char, role: JamoRole) -> String {
        if !tables::is_consonant(ch) {
            // Not a jamo at all; flush and pass the character along.
            let mut commit = self.flush();
            commit.push(ch);
            return commit;
        }

        let Some(leading) = self.leading else {
            self.set_leading(ch);
            self.trailing = None;
            return String::new();
        };

        if role == JamoRole::Leading {
            let commit = self.flush();
            self.set_leading(ch);
            return commit;
        }

        if self.vowel.is_none() {
            if let Some(combined) = tables::combine_initial(leading, ch) {
                self.leading = Some(combined);
                return String::new();
            }
            self.set_leading(ch);
            return leading.to_string();
        }

        if role == JamoRole::Trailing {
            return self.attach_trailing(ch);
        }

        match self.trailing {
            None => {
                if tables::is_final_consonant(ch) {
                    self.trailing = Some(ch);
                    String::new()
                } else {
                    self.flush_and_restart(ch)
                }
            }
            Some(tail) => {
                if let Some(combined) = tables::combine_final(tail, ch) {
                    self.trailing = Some(combined);
                    String::new()
                } else {
                    self.flush_and_restart(ch)
                }
            }
        }
    }

    fn handle_vowel(&mut self, ch: char) -> String {
        if self.leading.is_none() {
            self.leading = Some('ㅇ');
            self.implicit_leading = true;
        }

        let Some(vowel) = self.vowel else {
            self.vowel = Some(ch);
            return String::new();
        };

        if let Some(combined) = tables::combine_medial(vowel, ch) {
            self.vowel = Some(combined);
            return String::new();
        }

        if let Some(tail) = self.trailing {
            // A vowel after a compound coda splits it: the first half stays
            // as the committed syllable's batchim, the second half becomes
            // the next syllable's onset.
            if let Some((kept, carried)) = tables::split_final(tail) {
                self.trailing = Some(kept);
                let commit = self.compose();
                self.set_leading(carried);
                self.vowel = Some(ch);
                self.trailing = None;
                return commit;
            }
        }

        let commit = self.compose();
        self.leading = Some('ㅇ');
        self.implicit_leading = true;
        self.vowel = Some(ch);
        self.trailing = None;
        commit
    }

    fn attach_trailing(&mut self, ch: char) -> String {
        match self.trailing {
            None => {
                if tables::is_final_consonant(ch) {
                    self.trailing = Some(ch);
                    String::new()
                } else {
                    self.flush_and_restart(ch)
                }
            }
            Some(tail) => {
                if let Some(combined) = tables::combine_final(tail, ch) {
                    self.trailing = Some(combined);
                    String::new()
                } else {
                    self.flush_and_restart(ch)
                }
            }
        }
    }

    fn flush_and_restart(&mut self, ch: char) -> String {
        let commit = self.flush();
        self.set_leading(ch);
        commit
    }

    fn set_leading(&mut self, ch: char) {
        self.leading = Some(ch);
        self.implicit_leading = false;
    }

    fn reset(&mut self) {
        self.leading = None;
        self.vowel = None;
        self.trailing = None;
        self.implicit_leading = false;
    }

    fn compose(&self) -> String {
        match (self.leading, self.vowel) {
            (None, None) => String::new(),
            (Some(lead), None) => lead.to_string(),
            (None, Some(vowel)) => vowel.to_string(),
            (Some(lead), Some(vowel)) => {
                match tables::compose_syllable(lead, vowel, self.trailing) {
                    Some(syllable) => syllable.to_string(),
                    None => {
                        // A slot holds a jamo outside its table; emit the
                        // pieces rather than lose them.
                        let mut out = String::new();
                        out.push(lead);
                        out.push(vowel);
                        if let Some(tail) = self.trailing {
                            out.push(tail);
                        }
                        out
                    }
                }
            }
        }
    }
}
