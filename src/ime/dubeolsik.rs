// ⌨️ Dubeolsik (2-set) keyboard conversion
//
// Romanized → Hangul runs the keystrokes through a small composition
// automaton, the same way a Korean IME builds syllable blocks while typing:
//
//   "ghdrlfehd"  →  ㅎ ㅗ ㅇ | ㄱ ㅣ ㄹ | ㄷ ㅗ ㅇ  →  "홍길동"
//
// Hangul → romanized decomposes every syllable back into its keystrokes.

use super::{is_hangul_syllable, InputMethod};

// ============================================================================
// JAMO TABLES
// ============================================================================

/// Initial consonants in Unicode syllable order
const INITIALS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// Medial vowels in Unicode syllable order
const MEDIALS: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ',
    'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Final consonants in Unicode syllable order (index 0 = no final, so offset by one)
const FINALS: [char; 27] = [
    'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ', 'ㅁ',
    'ㅂ', 'ㅄ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// (first, second, combined)
const COMPOUND_VOWELS: [(char, char, char); 7] = [
    ('ㅗ', 'ㅏ', 'ㅘ'),
    ('ㅗ', 'ㅐ', 'ㅙ'),
    ('ㅗ', 'ㅣ', 'ㅚ'),
    ('ㅜ', 'ㅓ', 'ㅝ'),
    ('ㅜ', 'ㅔ', 'ㅞ'),
    ('ㅜ', 'ㅣ', 'ㅟ'),
    ('ㅡ', 'ㅣ', 'ㅢ'),
];

/// (first, second, combined)
const COMPOUND_FINALS: [(char, char, char); 11] = [
    ('ㄱ', 'ㅅ', 'ㄳ'),
    ('ㄴ', 'ㅈ', 'ㄵ'),
    ('ㄴ', 'ㅎ', 'ㄶ'),
    ('ㄹ', 'ㄱ', 'ㄺ'),
    ('ㄹ', 'ㅁ', 'ㄻ'),
    ('ㄹ', 'ㅂ', 'ㄼ'),
    ('ㄹ', 'ㅅ', 'ㄽ'),
    ('ㄹ', 'ㅌ', 'ㄾ'),
    ('ㄹ', 'ㅍ', 'ㄿ'),
    ('ㄹ', 'ㅎ', 'ㅀ'),
    ('ㅂ', 'ㅅ', 'ㅄ'),
];

/// Unshifted key positions
const KEYS: [(char, char); 26] = [
    ('q', 'ㅂ'),
    ('w', 'ㅈ'),
    ('e', 'ㄷ'),
    ('r', 'ㄱ'),
    ('t', 'ㅅ'),
    ('y', 'ㅛ'),
    ('u', 'ㅕ'),
    ('i', 'ㅑ'),
    ('o', 'ㅐ'),
    ('p', 'ㅔ'),
    ('a', 'ㅁ'),
    ('s', 'ㄴ'),
    ('d', 'ㅇ'),
    ('f', 'ㄹ'),
    ('g', 'ㅎ'),
    ('h', 'ㅗ'),
    ('j', 'ㅓ'),
    ('k', 'ㅏ'),
    ('l', 'ㅣ'),
    ('z', 'ㅋ'),
    ('x', 'ㅌ'),
    ('c', 'ㅊ'),
    ('v', 'ㅍ'),
    ('b', 'ㅠ'),
    ('n', 'ㅜ'),
    ('m', 'ㅡ'),
];

/// Shift layer; every other uppercase letter types the same jamo as lowercase
const SHIFTED_KEYS: [(char, char); 7] = [
    ('Q', 'ㅃ'),
    ('W', 'ㅉ'),
    ('E', 'ㄸ'),
    ('R', 'ㄲ'),
    ('T', 'ㅆ'),
    ('O', 'ㅒ'),
    ('P', 'ㅖ'),
];

const SYLLABLE_BASE: u32 = 0xAC00;
const MEDIAL_COUNT: u32 = 21;
const FINAL_COUNT: u32 = 28;

fn key_to_jamo(key: char) -> Option<char> {
    if let Some(&(_, jamo)) = SHIFTED_KEYS.iter().find(|(k, _)| *k == key) {
        return Some(jamo);
    }
    if !key.is_ascii_alphabetic() {
        return None;
    }
    let lower = key.to_ascii_lowercase();
    KEYS.iter().find(|(k, _)| *k == lower).map(|&(_, jamo)| jamo)
}

fn jamo_to_key(jamo: char) -> Option<char> {
    KEYS.iter()
        .chain(SHIFTED_KEYS.iter())
        .find(|(_, j)| *j == jamo)
        .map(|&(key, _)| key)
}

fn is_vowel(jamo: char) -> bool {
    MEDIALS.contains(&jamo)
}

/// ㄸ ㅃ ㅉ exist only as initials
fn can_be_final(jamo: char) -> bool {
    FINALS.contains(&jamo)
}

fn combine_vowels(first: char, second: char) -> Option<char> {
    COMPOUND_VOWELS
        .iter()
        .find(|(a, b, _)| *a == first && *b == second)
        .map(|&(_, _, combined)| combined)
}

fn combine_finals(first: char, second: char) -> Option<char> {
    COMPOUND_FINALS
        .iter()
        .find(|(a, b, _)| *a == first && *b == second)
        .map(|&(_, _, combined)| combined)
}

/// Split a (possibly compound) jamo into its typed parts
fn decompose(jamo: char) -> Vec<char> {
    COMPOUND_VOWELS
        .iter()
        .chain(COMPOUND_FINALS.iter())
        .find(|(_, _, combined)| *combined == jamo)
        .map(|&(a, b, _)| vec![a, b])
        .unwrap_or_else(|| vec![jamo])
}

fn compose_syllable(initial: char, medial: char, trailing: Option<char>) -> Option<char> {
    let i = INITIALS.iter().position(|&c| c == initial)? as u32;
    let m = MEDIALS.iter().position(|&c| c == medial)? as u32;
    let t = match trailing {
        Some(t) => FINALS.iter().position(|&c| c == t)? as u32 + 1,
        None => 0,
    };
    char::from_u32(SYLLABLE_BASE + (i * MEDIAL_COUNT + m) * FINAL_COUNT + t)
}

fn decompose_syllable(syllable: char) -> (char, char, Option<char>) {
    let code = syllable as u32 - SYLLABLE_BASE;
    let i = (code / (MEDIAL_COUNT * FINAL_COUNT)) as usize;
    let m = ((code % (MEDIAL_COUNT * FINAL_COUNT)) / FINAL_COUNT) as usize;
    let t = (code % FINAL_COUNT) as usize;
    let trailing = if t == 0 { None } else { Some(FINALS[t - 1]) };
    (INITIALS[i], MEDIALS[m], trailing)
}

fn push_keys(jamo: char, output: &mut String) {
    for part in decompose(jamo) {
        output.push(jamo_to_key(part).unwrap_or(part));
    }
}

// ============================================================================
// COMPOSITION AUTOMATON
// ============================================================================

/// Syllable block under construction
#[derive(Debug, Default, Clone, Copy)]
struct Block {
    initial: Option<char>,
    medial: Option<char>,
    trailing: Option<char>,
}

#[derive(Debug, Default)]
struct Composer {
    output: String,
    block: Block,
}

impl Composer {
    fn push_consonant(&mut self, c: char) {
        match (self.block.initial, self.block.medial, self.block.trailing) {
            (Some(_), Some(_), None) if can_be_final(c) => {
                self.block.trailing = Some(c);
            }
            (Some(_), Some(_), Some(t)) => match combine_finals(t, c) {
                Some(compound) => self.block.trailing = Some(compound),
                None => self.start_with_initial(c),
            },
            _ => self.start_with_initial(c),
        }
    }

    fn push_vowel(&mut self, v: char) {
        match (self.block.medial, self.block.trailing) {
            (None, _) => self.block.medial = Some(v),
            (Some(m), None) => match combine_vowels(m, v) {
                Some(compound) => self.block.medial = Some(compound),
                None => {
                    self.flush();
                    self.block.medial = Some(v);
                }
            },
            // The final consonant moves over to start the next syllable
            (Some(_), Some(t)) => {
                let parts = decompose(t);
                let (kept, moved) = match parts.as_slice() {
                    [first, second] => (Some(*first), *second),
                    _ => (None, t),
                };
                self.block.trailing = kept;
                self.flush();
                self.block.initial = Some(moved);
                self.block.medial = Some(v);
            }
        }
    }

    fn start_with_initial(&mut self, c: char) {
        self.flush();
        self.block.initial = Some(c);
    }

    fn push_other(&mut self, c: char) {
        self.flush();
        self.output.push(c);
    }

    fn flush(&mut self) {
        let block = std::mem::take(&mut self.block);
        match (block.initial, block.medial) {
            (Some(i), Some(m)) => match compose_syllable(i, m, block.trailing) {
                Some(syllable) => self.output.push(syllable),
                None => {
                    self.output.push(i);
                    self.output.push(m);
                    self.output.extend(block.trailing);
                }
            },
            (Some(i), None) => self.output.push(i),
            (None, Some(m)) => self.output.push(m),
            (None, None) => {}
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        self.output
    }
}

// ============================================================================
// DUBEOLSIK INPUT METHOD
// ============================================================================

/// Standard Korean 2-set keyboard layout
#[derive(Debug, Default, Clone, Copy)]
pub struct Dubeolsik;

impl Dubeolsik {
    pub fn new() -> Self {
        Dubeolsik
    }
}

impl InputMethod for Dubeolsik {
    fn romanized_to_hangul(&self, text: &str) -> String {
        let mut composer = Composer::default();

        for ch in text.chars() {
            match key_to_jamo(ch) {
                Some(jamo) if is_vowel(jamo) => composer.push_vowel(jamo),
                Some(jamo) => composer.push_consonant(jamo),
                None => composer.push_other(ch),
            }
        }

        composer.finish()
    }

    fn hangul_to_romanized(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());

        for ch in text.chars() {
            if is_hangul_syllable(ch) {
                let (initial, medial, trailing) = decompose_syllable(ch);
                push_keys(initial, &mut output);
                push_keys(medial, &mut output);
                if let Some(t) = trailing {
                    push_keys(t, &mut output);
                }
            } else if INITIALS.contains(&ch) || MEDIALS.contains(&ch) || FINALS.contains(&ch) {
                push_keys(ch, &mut output);
            } else {
                output.push(ch);
            }
        }

        output
    }
}

// ============================================================================
// TESTS
// ============================================================================
