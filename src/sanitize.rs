//! Filesystem-safe names for artist/album directories and track files.

/// Longest name (in bytes) most filesystems accept for one path segment.
const MAX_NAME_BYTES: usize = 255;

const WINDOWS_RESERVED: &[&str] = &[
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8",
    "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

fn is_illegal(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || c.is_control()
}

fn is_windows_reserved(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or(name);
    WINDOWS_RESERVED
        .iter()
        .any(|r| r.eq_ignore_ascii_case(stem.trim_end()))
}

fn truncate_to(out: &mut String, max: usize) {
    if out.len() > max {
        let mut cut = max;
        while !out.is_char_boundary(cut) {
            cut -= 1;
        }
        out.truncate(cut);
    }
}

fn trim_trailing(out: &mut String) {
    let trimmed = out.trim_end_matches(['.', ' ']).len();
    out.truncate(trimmed);
}

/// Make `name` usable as a single path segment on common filesystems.
///
/// Characters that are illegal on Windows (and `/` everywhere) are dropped,
/// trailing dots and spaces are trimmed, reserved device names get a `_`
/// appended to their stem and the result is capped at 255 bytes. Names that are already
/// legal come back unchanged, so applying this twice equals applying it once.
pub fn safe_name(name: &str) -> String {
    let mut out: String = name.chars().filter(|&c| !is_illegal(c)).collect();

    truncate_to(&mut out, MAX_NAME_BYTES);
    trim_trailing(&mut out);

    if !out.is_empty() && is_windows_reserved(&out) {
        // Room for the marker, without exposing a new trailing dot or space.
        truncate_to(&mut out, MAX_NAME_BYTES - 1);
        trim_trailing(&mut out);
        let stem_end = out.find('.').unwrap_or(out.len());
        out.insert(stem_end, '_');
    }

    out
}
