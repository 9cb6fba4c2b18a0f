// 🧹 Input Normalization - identifiers and Korean names
//
// Identifiers are only trimmed. Names lose ALL whitespace ("홍 길동" → "홍길동").
// The smart name policy additionally repairs keyboard mishaps:
//   - typed with the IME off     "ghdrlfehd"        → "홍길동"
//   - jamo that never composed   "ㅎㅗㅇㄱㅣㄹㄷㅗㅇ" → "홍길동"
//
// Directory records go through normalize_identifier / normalize_name so both
// sides of a comparison are normalized the same way.

use crate::ime::{is_hangul_jamo, is_hangul_syllable, InputMethod};

/// Trim leading/trailing whitespace from an identifier
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_string()
}

/// Remove every whitespace character from a name, not just the ends
pub fn normalize_name(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// True when the identifier is non-empty and made only of ASCII digits
pub fn is_numeric_identifier(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.chars().all(|c| c.is_ascii_digit())
}

pub fn contains_latin(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}

pub fn contains_jamo(text: &str) -> bool {
    text.chars().any(is_hangul_jamo)
}

pub fn contains_syllables(text: &str) -> bool {
    text.chars().any(is_hangul_syllable)
}

/// Smart name normalization
///
/// 1. Latin letters present → treat the input as keystrokes and convert to Hangul
/// 2. Isolated jamo present and no composed syllables → round-trip through
///    keystrokes so the jamo compose into syllable blocks
/// 3. Strip all whitespace
///
/// Mixed-script names (e.g. a Hangul name with a Latin initial) are converted
/// wholesale in step 1; there is no per-segment detection.
pub fn normalize_name_smart<I: InputMethod + ?Sized>(raw: &str, ime: &I) -> String {
    let mut name = raw.trim().to_string();

    if contains_latin(&name) {
        name = ime.romanized_to_hangul(&name);
    }

    if contains_jamo(&name) && !contains_syllables(&name) {
        let keystrokes = ime.hangul_to_romanized(&name);
        name = ime.romanized_to_hangul(&keystrokes);
    }

    normalize_name(&name)
}
