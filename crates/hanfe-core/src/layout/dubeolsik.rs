// Hanfe Dubeolsik Layout
// The two-set standard layout: consonants left, vowels right

use super::{Layout, LayoutBuilder, LayoutSymbol};
use crate::key::codes::*;

pub(super) fn build() -> Layout {
    let mut builder = LayoutBuilder::new();
    let jamo = LayoutSymbol::jamo;
    let text = LayoutSymbol::text;

    builder.set(KEY_Q, jamo('ㅂ'), Some(jamo('ㅃ')));
    builder.set(KEY_W, jamo('ㅈ'), Some(jamo('ㅉ')));
    builder.set(KEY_E, jamo('ㄷ'), Some(jamo('ㄸ')));
    builder.set(KEY_R, jamo('ㄱ'), Some(jamo('ㄲ')));
    builder.set(KEY_T, jamo('ㅅ'), Some(jamo('ㅆ')));
    builder.set(KEY_Y, jamo('ㅛ'), None);
    builder.set(KEY_U, jamo('ㅕ'), None);
    builder.set(KEY_I, jamo('ㅑ'), None);
    builder.set(KEY_O, jamo('ㅐ'), Some(jamo('ㅒ')));
    builder.set(KEY_P, jamo('ㅔ'), Some(jamo('ㅖ')));

    builder.set(KEY_A, jamo('ㅁ'), None);
    builder.set(KEY_S, jamo('ㄴ'), None);
    builder.set(KEY_D, jamo('ㅇ'), None);
    builder.set(KEY_F, jamo('ㄹ'), None);
    builder.set(KEY_G, jamo('ㅎ'), None);
    builder.set(KEY_H, jamo('ㅗ'), None);
    builder.set(KEY_J, jamo('ㅓ'), None);
    builder.set(KEY_K, jamo('ㅏ'), None);
    builder.set(KEY_L, jamo('ㅣ'), None);
    builder.set(KEY_SEMICOLON, text(";"), Some(text(":")));
    builder.set(KEY_APOSTROPHE, text("'"), Some(text("\"")));

    builder.set(KEY_Z, jamo('ㅋ'), None);
    builder.set(KEY_X, jamo('ㅌ'), None);
    builder.set(KEY_C, jamo('ㅊ'), None);
    builder.set(KEY_V, jamo('ㅍ'), None);
    builder.set(KEY_B, jamo('ㅠ'), None);
    builder.set(KEY_N, jamo('ㅜ'), None);
    builder.set(KEY_M, jamo('ㅡ'), None);
    builder.set(KEY_COMMA, text(","), Some(text("<")));
    builder.set(KEY_DOT, text("."), Some(text(">")));
    builder.set(KEY_SLASH, text("/"), Some(text("?")));

    builder.set(KEY_SPACE, text(" "), None);

    builder.set(KEY_1, text("1"), Some(text("!")));
    builder.set(KEY_2, text("2"), Some(text("@")));
    builder.set(KEY_3, text("3"), Some(text("#")));
    builder.set(KEY_4, text("4"), Some(text("$")));
    builder.set(KEY_5, text("5"), Some(text("%")));
    builder.set(KEY_6, text("6"), Some(text("^")));
    builder.set(KEY_7, text("7"), Some(text("&")));
    builder.set(KEY_8, text("8"), Some(text("*")));
    builder.set(KEY_9, text("9"), Some(text("(")));
    builder.set(KEY_0, text("0"), Some(text(")")));
    builder.set(KEY_MINUS, text("-"), Some(text("_")));
    builder.set(KEY_EQUAL, text("="), Some(text("+")));
    builder.set(KEY_LEFTBRACE, text("["), Some(text("{")));
    builder.set(KEY_RIGHTBRACE, text("]"), Some(text("}")));
    builder.set(KEY_BACKSLASH, text("\\"), Some(text("|")));
    builder.set(KEY_GRAVE, text("`"), Some(text("~")));

    builder.passthrough(KEY_TAB);
    builder.passthrough(KEY_ENTER);
    builder.passthrough(KEY_ESC);
    builder.passthrough(KEY_BACKSPACE);

    builder.build("dubeolsik")
}
