//! Group substitution cipher (header segment).
//!
//! Every supported character becomes a four-character group `m+mm`, where `m`
//! is the character mirrored across its alphabet (`A`↔`Z`, `a`↔`z`,
//! `0`↔`9`). Groups are joined with `|`.

use std::collections::HashMap;
use std::sync::LazyLock;

const GROUP_DELIMITER: char = '|';

/// Punctuation has hand-picked groups. The `"` group is five characters
/// long; issued tokens depend on it.
const PUNCTUATION: [(char, &str); 7] = [
    (' ', "_+__"),
    ('.', "-+--"),
    (',', "*+**"),
    (':', "#+##"),
    ('{', "[+[["),
    ('}', "]+]]"),
    ('"', "'+'''"),
];

static FORWARD: LazyLock<HashMap<char, String>> = LazyLock::new(|| {
    let mirrored = ('A'..='Z')
        .zip(('A'..='Z').rev())
        .chain(('a'..='z').zip(('a'..='z').rev()))
        .chain(('0'..='9').zip(('0'..='9').rev()))
        .map(|(plain, mirror)| (plain, fallback_group(mirror)));

    mirrored
        .chain(PUNCTUATION.iter().map(|&(plain, group)| (plain, group.to_string())))
        .collect()
});

static REVERSE: LazyLock<HashMap<&'static str, char>> = LazyLock::new(|| {
    FORWARD
        .iter()
        .map(|(&plain, group)| (group.as_str(), plain))
        .collect()
});

fn fallback_group(c: char) -> String {
    format!("{c}+{c}{c}")
}

/// Replace every character with its group and join the groups with `|`.
///
/// Characters outside the table become `c+cc`.
pub fn encrypt(plaintext: &str) -> String {
    plaintext
        .chars()
        .map(|c| FORWARD.get(&c).cloned().unwrap_or_else(|| fallback_group(c)))
        .collect::<Vec<_>>()
        .join("|")
}

/// Reverse [`encrypt`].
///
/// Unknown groups decode to the text before their first `+`. This is lossy
/// for input that was never in the table: `_` comes back as a space, and a
/// plaintext `|` or `+` splits its own group apart.
pub fn decrypt(ciphertext: &str) -> String {
    ciphertext
        .split(GROUP_DELIMITER)
        .map(|group| match REVERSE.get(group) {
            Some(&plain) => plain.to_string(),
            None => group
                .split_once('+')
                .map_or(group, |(head, _)| head)
                .to_string(),
        })
        .collect()
}
