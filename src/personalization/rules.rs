//! Ordered suffix-rewrite tables.
//!
//! Every declension fallback is expressed as a slice of [`SuffixRule`]s
//! evaluated top to bottom. The first rule whose suffix matches the end of
//! the word fires exactly once; later rules are never consulted. Keeping the
//! tables as data makes each rule individually addressable in tests.

/// A single rewrite: when a word ends with `suffix`, drop the last `strip`
/// characters and append `append`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixRule {
    pub suffix: &'static str,
    pub strip: usize,
    pub append: &'static str,
}

impl SuffixRule {
    /// Rule replacing the whole matched suffix with `replacement`.
    pub const fn replace(suffix: &'static str, replacement: &'static str) -> Self {
        Self {
            suffix,
            strip: char_count(suffix),
            append: replacement,
        }
    }

    /// Rule keeping the word intact and appending `ending`.
    pub const fn append(suffix: &'static str, ending: &'static str) -> Self {
        Self {
            suffix,
            strip: 0,
            append: ending,
        }
    }

    /// Rule dropping `strip` trailing characters before appending `ending`.
    pub const fn rewrite(suffix: &'static str, strip: usize, ending: &'static str) -> Self {
        Self {
            suffix,
            strip,
            append: ending,
        }
    }

    pub fn matches(&self, word: &str) -> bool {
        word.ends_with(self.suffix)
    }

    /// Applies the rewrite without checking [`SuffixRule::matches`].
    pub fn rewrite_word(&self, word: &str) -> String {
        let keep = word.chars().count().saturating_sub(self.strip);
        let mut out: String = word.chars().take(keep).collect();
        out.push_str(self.append);
        out
    }
}

const fn char_count(value: &str) -> usize {
    let bytes = value.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        // UTF-8 continuation bytes look like 0b10xx_xxxx.
        if bytes[i] & 0xC0 != 0x80 {
            count += 1;
        }
        i += 1;
    }
    count
}

/// Ordered list of rules. Earlier entries take priority.
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub name: &'static str,
    pub rules: &'static [SuffixRule],
}

impl RuleSet {
    pub const fn new(name: &'static str, rules: &'static [SuffixRule]) -> Self {
        Self { name, rules }
    }

    /// Returns the first rule matching `word`, if any.
    pub fn matching(&self, word: &str) -> Option<&'static SuffixRule> {
        self.rules.iter().find(|rule| rule.matches(word))
    }

    /// Rewrites `word` with the first matching rule.
    pub fn apply(&self, word: &str) -> Option<String> {
        self.matching(word).map(|rule| rule.rewrite_word(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: RuleSet = RuleSet::new(
        "sample",
        &[
            SuffixRule::replace("ów", "owie"),
            SuffixRule::rewrite("ec", 2, "cu"),
            SuffixRule::append("k", "u"),
        ],
    );

    #[test]
    fn replace_counts_characters_not_bytes() {
        let rule = SuffixRule::replace("ów", "owie");
        assert_eq!(rule.strip, 2);
        assert_eq!(rule.rewrite_word("Kraków"), "Krakowie");
    }

    #[test]
    fn first_matching_rule_wins() {
        assert_eq!(
            SAMPLE.matching("Mielec"),
            Some(&SuffixRule::rewrite("ec", 2, "cu"))
        );
        assert_eq!(SAMPLE.apply("Mielec").as_deref(), Some("Mielcu"));
        assert_eq!(SAMPLE.apply("Malbork").as_deref(), Some("Malborku"));
    }

    #[test]
    fn no_rule_yields_none() {
        assert!(SAMPLE.apply("Radom").is_none());
    }
}
