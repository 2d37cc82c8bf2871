//! Combining-character composition: the tables `vtterm::printable` consults
//! when a non-spacing or enclosing mark arrives over an existing cell.

/// NFC-style pairwise composition, limited (per `SPEC_FULL.md` §4.D) to
/// precomposed-character pairs actually reachable by typing a base letter
/// followed by a combining mark at a terminal, not the full Unicode
/// composition table.
#[must_use]
pub fn combine_unicode(base: char, mark: char) -> Option<char> {
    let composed = match (base, mark) {
        ('a', '\u{301}') => 'á',
        ('a', '\u{300}') => 'à',
        ('a', '\u{303}') => 'ã',
        ('a', '\u{308}') => 'ä',
        ('a', '\u{302}') => 'â',
        ('e', '\u{301}') => 'é',
        ('e', '\u{300}') => 'è',
        ('e', '\u{308}') => 'ë',
        ('e', '\u{302}') => 'ê',
        ('i', '\u{301}') => 'í',
        ('i', '\u{300}') => 'ì',
        ('i', '\u{308}') => 'ï',
        ('o', '\u{301}') => 'ó',
        ('o', '\u{300}') => 'ò',
        ('o', '\u{303}') => 'õ',
        ('o', '\u{308}') => 'ö',
        ('u', '\u{301}') => 'ú',
        ('u', '\u{300}') => 'ù',
        ('u', '\u{308}') => 'ü',
        ('n', '\u{303}') => 'ñ',
        ('c', '\u{327}') => 'ç',
        ('y', '\u{301}') => 'ý',
        _ => return None,
    };
    Some(composed)
}

/// Dead-key + letter spacing forms, for the case where the existing cell
/// under the cursor held a *spacing* "peculiar non-combiner" (e.g. a bare
/// circumflex `^` typed as a standalone glyph) rather than a true combining
/// mark; `vtterm` inserts a space instead of attempting composition when
/// this table has no entry for the pair, per §4.E's printable-character
/// rule.
#[must_use]
pub fn combine_peculiar_non_combiners(spacing_base: char, letter: char) -> Option<char> {
    let composed = match (spacing_base, letter) {
        ('^', 'a') => 'â',
        ('^', 'e') => 'ê',
        ('^', 'i') => 'î',
        ('^', 'o') => 'ô',
        ('^', 'u') => 'û',
        ('`', 'a') => 'à',
        ('`', 'e') => 'è',
        ('\'', 'a') => 'á',
        ('\'', 'e') => 'é',
        ('~', 'n') => 'ñ',
        ('~', 'o') => 'õ',
        ('"', 'u') => 'ü',
        ('"', 'o') => 'ö',
        _ => return None,
    };
    Some(composed)
}

/// ISO 9995-3 dead-key pairs: a dead key produces a standalone spacing
/// diacritic code point, which this table pairs with the following letter.
/// Distinct from [`combine_unicode`] in that the first element is a spacing
/// diacritic (e.g. U+00B4 ACUTE ACCENT), not a combining mark.
#[must_use]
pub fn combine_dead_keys(dead_key: char, letter: char) -> Option<char> {
    match dead_key {
        '\u{B4}' => combine_peculiar_non_combiners('\'', letter),
        '\u{60}' => combine_peculiar_non_combiners('`', letter),
        '\u{5E}' => combine_peculiar_non_combiners('^', letter),
        '\u{7E}' => combine_peculiar_non_combiners('~', letter),
        '\u{A8}' => combine_peculiar_non_combiners('"', letter),
        _ => None,
    }
}

/// Combining class used only to order multiple combining marks stacked on
/// one base character; not a transcription of the Unicode `ccc` property,
/// just a stable "nonspacing marks sort before enclosing marks" rule
/// sufficient for the single-mark-at-a-time compositions `vtterm` performs.
#[must_use]
fn combining_class(c: char) -> u8 {
    if crate::predicates::is_mark_nonspacing(c) {
        1
    } else if crate::predicates::is_mark_enclosing(c) {
        2
    } else {
        0
    }
}

/// A stable comparator ordering combining marks by [`combining_class`],
/// lowest first. Base (non-combining) characters compare as class 0, so they
/// always sort first when compared against a mark.
#[must_use]
pub fn lower_combining_class(a: char, b: char) -> std::cmp::Ordering {
    combining_class(a).cmp(&combining_class(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_e_acute() {
        assert_eq!(combine_unicode('e', '\u{301}'), Some('é'));
    }

    #[test]
    fn unknown_pair_does_not_combine() {
        assert_eq!(combine_unicode('z', '\u{301}'), None);
    }

    #[test]
    fn spacing_circumflex_plus_a_gives_a_circumflex() {
        assert_eq!(combine_peculiar_non_combiners('^', 'a'), Some('â'));
    }

    #[test]
    fn dead_key_acute_plus_e_gives_e_acute() {
        assert_eq!(combine_dead_keys('\u{B4}', 'e'), Some('é'));
    }

    #[test]
    fn nonspacing_marks_sort_before_enclosing_marks() {
        use std::cmp::Ordering;
        assert_eq!(lower_combining_class('\u{301}', '\u{20DD}'), Ordering::Less);
    }
}
