// ⌨️ Input Method - conversion between keyboard keystrokes and Hangul
//
// The resolver only needs two pure conversions. Anything implementing
// InputMethod can be plugged in; Dubeolsik is the standard 2-set layout.

pub mod dubeolsik;

pub use dubeolsik::Dubeolsik;

/// Conversion between romanized keystrokes and Hangul text.
///
/// Both directions must be deterministic and total: characters that have no
/// mapping pass through unchanged.
pub trait InputMethod {
    /// Interpret Latin keystrokes as Korean keyboard input ("ghdrlfehd" → "홍길동")
    fn romanized_to_hangul(&self, text: &str) -> String;

    /// Turn Hangul syllables and jamo back into the keystrokes that type them
    fn hangul_to_romanized(&self, text: &str) -> String;
}

impl<T: InputMethod + ?Sized> InputMethod for &T {
    fn romanized_to_hangul(&self, text: &str) -> String {
        (**self).romanized_to_hangul(text)
    }

    fn hangul_to_romanized(&self, text: &str) -> String {
        (**self).hangul_to_romanized(text)
    }
}

/// Composed Hangul syllable block (가-힣)
pub fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// Isolated compatibility jamo, consonants ㄱ-ㅎ and vowels ㅏ-ㅣ
pub fn is_hangul_jamo(c: char) -> bool {
    ('\u{3131}'..='\u{3163}').contains(&c)
}
