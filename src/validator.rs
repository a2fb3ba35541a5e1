/// Accented variants accepted for each vowel. Any variant of a vowel
/// matches a round played on that vowel.
static VOWEL_CLASSES: [(char, &[char]); 5] = [
    ('a', &['a', 'á', 'à', 'â', 'ã']),
    ('e', &['e', 'é', 'è', 'ê']),
    ('i', &['i', 'í', 'ì', 'î']),
    ('o', &['o', 'ó', 'ò', 'ô', 'õ']),
    ('u', &['u', 'ú', 'ù', 'û', 'ü']),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterClass {
    Vowel(&'static [char]),
    Consonant(char),
}

fn lower(c: char) -> char {
    // Every letter we care about lowercases to a single char.
    c.to_lowercase().next().unwrap_or(c)
}

/// Classify a round letter. Returns `None` for anything that is not an
/// alphabetic character.
pub fn classify(letter: char) -> Option<LetterClass> {
    if !letter.is_alphabetic() {
        return None;
    }
    let letter = lower(letter);
    let class = VOWEL_CLASSES
        .iter()
        .find(|(_, variants)| variants.contains(&letter))
        .map(|&(_, variants)| LetterClass::Vowel(variants))
        .unwrap_or(LetterClass::Consonant(letter));
    Some(class)
}

/// Checks answers against the round letter for a fixed alphabet.
#[derive(Debug, Clone)]
pub struct AnswerValidator {
    alphabet: Vec<char>,
}

impl AnswerValidator {
    pub fn new(alphabet: &[char]) -> Self {
        Self {
            alphabet: alphabet.iter().map(|&c| lower(c)).collect(),
        }
    }

    /// True when `answer` begins with `letter`, ignoring case and treating
    /// all accented forms of a vowel as that vowel. Letters outside the
    /// alphabet never match.
    pub fn starts_with(&self, answer: &str, letter: char) -> bool {
        if !self.alphabet.contains(&lower(letter)) {
            return false;
        }
        let Some(first) = answer.chars().next().map(lower) else {
            return false;
        };
        match classify(letter) {
            Some(LetterClass::Vowel(variants)) => variants.contains(&first),
            Some(LetterClass::Consonant(c)) => first == c,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> AnswerValidator {
        AnswerValidator::new(&"ABCDEFGHIJLMNOPQRSTUVXZ".chars().collect::<Vec<_>>())
    }

    #[test]
    fn vowel_matches_plain_and_accented() {
        let v = validator();
        assert!(v.starts_with("Ana", 'A'));
        assert!(v.starts_with("Ânia", 'A'));
        assert!(v.starts_with("água", 'A'));
        assert!(v.starts_with("Ótica", 'O'));
        assert!(v.starts_with("úmido", 'U'));
    }

    #[test]
    fn different_vowel_class_does_not_match() {
        let v = validator();
        assert!(!v.starts_with("Eva", 'A'));
        assert!(!v.starts_with("Érica", 'I'));
    }

    #[test]
    fn consonants_match_exactly_ignoring_case() {
        let v = validator();
        assert!(v.starts_with("Bola", 'B'));
        assert!(v.starts_with("bola", 'B'));
        assert!(!v.starts_with("Casa", 'B'));
        // cedilla is not a variant of c
        assert!(!v.starts_with("Çar", 'C'));
    }

    #[test]
    fn letters_outside_alphabet_never_match() {
        let v = validator();
        assert!(!v.starts_with("Kiwi", 'K'));
        assert!(!v.starts_with("1abc", '1'));
    }

    #[test]
    fn empty_answer_never_matches() {
        assert!(!validator().starts_with("", 'A'));
    }

    #[test]
    fn classify_groups_accented_vowels() {
        assert_eq!(classify('Ã'), classify('a'));
        assert_eq!(classify('b'), Some(LetterClass::Consonant('b')));
        assert_eq!(classify('7'), None);
    }
}
