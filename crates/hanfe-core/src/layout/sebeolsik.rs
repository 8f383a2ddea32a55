// Hanfe Sebeolsik-390 Layout
// Three-set layout: explicit coda jamo live on the shifted right hand

use super::{Layout, LayoutBuilder, LayoutSymbol};
use crate::compose::JamoRole;
use crate::key::codes::*;

pub(super) fn build() -> Layout {
    let mut builder = LayoutBuilder::new();
    let jamo = LayoutSymbol::jamo;
    let text = LayoutSymbol::text;
    let coda = |ch| LayoutSymbol::jamo_with_role(ch, JamoRole::Trailing);

    builder.set(KEY_GRAVE, text("`"), Some(text("~")));
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

    builder.set(KEY_Q, jamo('ㅂ'), Some(jamo('ㅃ')));
    builder.set(KEY_W, jamo('ㅈ'), Some(jamo('ㅉ')));
    builder.set(KEY_E, jamo('ㄷ'), Some(jamo('ㄸ')));
    builder.set(KEY_R, jamo('ㄱ'), Some(jamo('ㄲ')));
    builder.set(KEY_T, jamo('ㅅ'), Some(jamo('ㅆ')));
    builder.set(KEY_Y, jamo('ㅛ'), Some(coda('ㅅ')));
    builder.set(KEY_U, jamo('ㅕ'), Some(coda('ㅈ')));
    builder.set(KEY_I, jamo('ㅑ'), Some(coda('ㅊ')));
    builder.set(KEY_O, jamo('ㅐ'), Some(coda('ㅋ')));
    builder.set(KEY_P, jamo('ㅔ'), Some(coda('ㅌ')));
    builder.set(KEY_LEFTBRACE, jamo('ㅒ'), Some(coda('ㅍ')));
    builder.set(KEY_RIGHTBRACE, jamo('ㅖ'), Some(coda('ㅎ')));
    builder.set(KEY_BACKSLASH, jamo('ㅢ'), Some(text("|")));

    builder.set(KEY_A, jamo('ㅁ'), Some(jamo('ㅁ')));
    builder.set(KEY_S, jamo('ㄴ'), Some(jamo('ㄴ')));
    builder.set(KEY_D, jamo('ㅇ'), Some(jamo('ㅇ')));
    builder.set(KEY_F, jamo('ㄹ'), Some(jamo('ㄹ')));
    builder.set(KEY_G, jamo('ㅎ'), Some(jamo('ㅎ')));
    builder.set(KEY_H, jamo('ㅗ'), Some(coda('ㄱ')));
    builder.set(KEY_J, jamo('ㅓ'), Some(coda('ㄴ')));
    builder.set(KEY_K, jamo('ㅏ'), Some(coda('ㄷ')));
    builder.set(KEY_L, jamo('ㅣ'), Some(coda('ㄹ')));
    builder.set(KEY_SEMICOLON, jamo('ㅠ'), Some(coda('ㅁ')));
    builder.set(KEY_APOSTROPHE, jamo('ㅜ'), Some(coda('ㅂ')));

    builder.set(KEY_Z, jamo('ㅋ'), Some(jamo('ㅋ')));
    builder.set(KEY_X, jamo('ㅌ'), Some(jamo('ㅌ')));
    builder.set(KEY_C, jamo('ㅊ'), Some(jamo('ㅊ')));
    builder.set(KEY_V, jamo('ㅍ'), Some(jamo('ㅍ')));
    builder.set(KEY_B, jamo('ㅠ'), Some(coda('ㅇ')));
    builder.set(KEY_N, jamo('ㅜ'), Some(coda('ㅅ')));
    builder.set(KEY_M, jamo('ㅡ'), Some(coda('ㅎ')));
    builder.set(KEY_COMMA, jamo('ㅘ'), Some(jamo('ㅙ')));
    builder.set(KEY_DOT, jamo('ㅝ'), Some(jamo('ㅞ')));
    builder.set(KEY_SLASH, jamo('ㅟ'), Some(text("?")));

    builder.set(KEY_SPACE, text(" "), None);

    builder.passthrough(KEY_TAB);
    builder.passthrough(KEY_ENTER);
    builder.passthrough(KEY_ESC);
    builder.passthrough(KEY_BACKSPACE);

    builder.build("sebeolsik-390")
}
