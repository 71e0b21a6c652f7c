//! Ordered literal-token substitution
//!
//! The text is scanned once, left to right. At each position the first token
//! of the list that matches is replaced and the scan continues after it, so
//! longer tokens must be listed before their prefixes or suffixes
//! (`PokemonNumber` before `Number`) and inserted values are never rescanned.

/// Replace every occurrence of each token with its value in a single pass
pub fn substitute(text: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    'scan: while let Some(ch) = rest.chars().next() {
        for (token, value) in substitutions {
            if token.is_empty() {
                continue;
            }
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(value);
                rest = tail;
                continue 'scan;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}
