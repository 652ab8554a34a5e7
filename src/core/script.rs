//! Code-point classes used when joining continuation messages.
//!
//! Logographic text is written without spaces between words, so two CJK
//! characters meeting at a line break are glued together, and CJK
//! punctuation never takes a space on either side.

/// CJK punctuation marks, fullwidth forms included.
const CJK_PUNCTUATION: &[char] = &[
    '\u{3002}', // 。
    '\u{ff1f}', // ？
    '\u{ff01}', // ！
    '\u{ff0c}', // ，
    '\u{3001}', // 、
    '\u{ff1b}', // ；
    '\u{ff1a}', // ：
    '\u{201c}', // “
    '\u{201d}', // ”
    '\u{2018}', // ‘
    '\u{2019}', // ’
    '\u{ff08}', // （
    '\u{ff09}', // ）
    '\u{300a}', // 《
    '\u{300b}', // 》
    '\u{3008}', // 〈
    '\u{3009}', // 〉
    '\u{3010}', // 【
    '\u{3011}', // 】
    '\u{300e}', // 『
    '\u{300f}', // 』
    '\u{300c}', // 「
    '\u{300d}', // 」
    '\u{fe43}', // ﹃
    '\u{fe44}', // ﹄
    '\u{3014}', // 〔
    '\u{3015}', // 〕
    '\u{2026}', // …
    '\u{2014}', // —
    '\u{ff5e}', // ～
    '\u{fe4f}', // ﹏
    '\u{ffe5}', // ￥
];

/// CJK unified ideographs (basic block) plus hiragana and katakana.
pub fn is_cjk_script(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9fa5}' | '\u{3040}'..='\u{30ff}')
}

pub fn is_cjk_punctuation(c: char) -> bool {
    CJK_PUNCTUATION.contains(&c)
}

/// Whether a space belongs between `left` and `right` when two message
/// fragments are concatenated.
pub fn needs_separator(left: char, right: char) -> bool {
    let both_cjk = is_cjk_script(left) && is_cjk_script(right);
    let punctuated = is_cjk_punctuation(left) || is_cjk_punctuation(right);
    !(both_cjk || punctuated)
}

/// Concatenate two message fragments, inserting a single space only where
/// the boundary characters are word-separated in their script.
///
/// An empty side never produces a separator.
pub fn join_fragments(left: &str, right: &str) -> String {
    match (left.chars().next_back(), right.chars().next()) {
        (Some(l), Some(r)) if needs_separator(l, r) => format!("{left} {right}"),
        _ => format!("{left}{right}"),
    }
}
