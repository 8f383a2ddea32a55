// Hanfe Jamo Tables
// Compatibility-jamo tables and double-jamo composition rules

/// Leading consonants, ordered by Unicode choseong index.
pub const CHO: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ',
    'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Medial vowels, ordered by Unicode jungseong index.
pub const JUNG: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ',
    'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Trailing consonants, ordered by Unicode jongseong index starting at 1
/// (index 0 is the empty coda and has no jamo).
pub const JONG: [char; 27] = [
    'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ',
    'ㅁ', 'ㅂ', 'ㅄ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

const DOUBLE_INITIAL: [((char, char), char); 5] = [
    (('ㄱ', 'ㄱ'), 'ㄲ'),
    (('ㄷ', 'ㄷ'), 'ㄸ'),
    (('ㅂ', 'ㅂ'), 'ㅃ'),
    (('ㅈ', 'ㅈ'), 'ㅉ'),
    (('ㅅ', 'ㅅ'), 'ㅆ'),
];

const DOUBLE_MEDIAL: [((char, char), char); 7] = [
    (('ㅗ', 'ㅏ'), 'ㅘ'),
    (('ㅗ', 'ㅐ'), 'ㅙ'),
    (('ㅗ', 'ㅣ'), 'ㅚ'),
    (('ㅜ', 'ㅓ'), 'ㅝ'),
    (('ㅜ', 'ㅔ'), 'ㅞ'),
    (('ㅜ', 'ㅣ'), 'ㅟ'),
    (('ㅡ', 'ㅣ'), 'ㅢ'),
];

const DOUBLE_FINAL: [((char, char), char); 13] = [
    (('ㄱ', 'ㄱ'), 'ㄲ'),
    (('ㄱ', 'ㅅ'), 'ㄳ'),
    (('ㄴ', 'ㅈ'), 'ㄵ'),
    (('ㄴ', 'ㅎ'), 'ㄶ'),
    (('ㄹ', 'ㄱ'), 'ㄺ'),
    (('ㄹ', 'ㅁ'), 'ㄻ'),
    (('ㄹ', 'ㅂ'), 'ㄼ'),
    (('ㄹ', 'ㅅ'), 'ㄽ'),
    (('ㄹ', 'ㅌ'), 'ㄾ'),
    (('ㄹ', 'ㅍ'), 'ㄿ'),
    (('ㄹ', 'ㅎ'), 'ㅀ'),
    (('ㅂ', 'ㅅ'), 'ㅄ'),
    (('ㅅ', 'ㅅ'), 'ㅆ'),
];

fn combine(table: &[((char, char), char)], first: char, second: char) -> Option<char> {
    table
        .iter()
        .find(|((a, b), _)| *a == first && *b == second)
        .map(|(_, composed)| *composed)
}

// Decomposition is the forward table read backwards; there is no second
// table to keep in sync.
fn split(table: &[((char, char), char)], composed: char) -> Option<(char, char)> {
    table
        .iter()
        .find(|(_, c)| *c == composed)
        .map(|(pair, _)| *pair)
}

pub fn combine_initial(first: char, second: char) -> Option<char> {
    combine(&DOUBLE_INITIAL, first, second)
}

pub fn combine_medial(first: char, second: char) -> Option<char> {
    combine(&DOUBLE_MEDIAL, first, second)
}

pub fn combine_final(first: char, second: char) -> Option<char> {
    combine(&DOUBLE_FINAL, first, second)
}

pub fn split_initial(composed: char) -> Option<(char, char)> {
    split(&DOUBLE_INITIAL, composed)
}

pub fn split_medial(composed: char) -> Option<(char, char)> {
    split(&DOUBLE_MEDIAL, composed)
}

pub fn split_final(composed: char) -> Option<(char, char)> {
    split(&DOUBLE_FINAL, composed)
}

pub fn choseong_index(ch: char) -> Option<usize> {
    CHO.iter().position(|&c| c == ch)
}

pub fn jungseong_index(ch: char) -> Option<usize> {
    JUNG.iter().position(|&c| c == ch)
}

/// Jongseong index in `1..=27`; the empty coda is index 0 by convention.
pub fn jongseong_index(ch: char) -> Option<usize> {
    JONG.iter().position(|&c| c == ch).map(|i| i + 1)
}

pub fn is_consonant(ch: char) -> bool {
    CHO.contains(&ch) || JONG.contains(&ch)
}

pub fn is_vowel(ch: char) -> bool {
    JUNG.contains(&ch)
}

/// Whether the jamo may occupy the trailing slot. Tensed `ㄸ/ㅃ/ㅉ` are
/// consonants but never valid codas.
pub fn is_final_consonant(ch: char) -> bool {
    JONG.contains(&ch)
}

/// Compose a full syllable from choseong/jungseong/jongseong jamo.
pub fn compose_syllable(leading: char, vowel: char, trailing: Option<char>) -> Option<char> {
    let lead = choseong_index(leading)?;
    let mid = jungseong_index(vowel)?;
    let tail = match trailing {
        Some(t) => jongseong_index(t)?,
        None => 0,
    };
    let codepoint = 0xAC00 + ((lead * 21) + mid) * 28 + tail;
    char::from_u32(codepoint as u32)
}
