//! Canonical lookup keys for template identifiers.
//!
//! Word boundaries follow the usual snake-case rules: any character that is
//! not a letter or digit separates words, an uppercase letter starts a new
//! word after a lowercase letter or digit, and the last capital of an
//! acronym starts a new word when lowercase follows (`HTTPServer` →
//! `http_server`). Digits never split a word on their own, so the output of
//! one pass is already a fixpoint.

/// Maps a template identifier to its lookup key.
///
/// Each `/`-separated segment is converted to snake case, so `UserProfile`,
/// `userProfile`, `user-profile` and `user_profile` all share one key while
/// directory nesting is preserved. Applying it twice yields the same key.
pub fn normalize(identifier: &str) -> String {
    identifier.split('/').map(normalize_segment).collect::<Vec<_>>().join("/")
}

fn normalize_segment(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut words = Vec::new();
    let mut word = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            finish_word(&mut words, &mut word);
            continue;
        }
        if is_upper(c) && i > 0 && chars[i - 1].is_alphanumeric() {
            let prev = chars[i - 1];
            let lower_follows = chars
                .get(i + 1)
                .is_some_and(|&next| next.is_alphabetic() && !is_upper(next));
            if !is_upper(prev) || lower_follows {
                finish_word(&mut words, &mut word);
            }
        }
        // Multi-char lowercase mappings can yield combining marks; drop them.
        word.extend(c.to_lowercase().filter(|l| l.is_alphanumeric()));
    }
    finish_word(&mut words, &mut word);

    words.join("_")
}

fn finish_word(words: &mut Vec<String>, word: &mut String) {
    if !word.is_empty() {
        words.push(std::mem::take(word));
    }
}

/// A character with a distinct lowercase form, any script.
fn is_upper(c: char) -> bool {
    let mut lower = c.to_lowercase();
    !(lower.next() == Some(c) && lower.next().is_none())
}
