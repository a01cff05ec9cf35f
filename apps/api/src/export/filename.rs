pub const DEFAULT_FILENAME: &str = "resume.pdf";

/// Download name for a person: lowercase, whitespace runs become `-`, anything other
/// than alphanumerics, `-` and `_` is dropped. Blank names fall back to `resume.pdf`.
pub fn derive_filename(full_name: &str) -> String {
    let mut stem = String::with_capacity(full_name.len());
    let mut pending_dash = false;
    for c in full_name.trim().chars() {
        if c.is_whitespace() {
            pending_dash = true;
            continue;
        }
        if !(c.is_alphanumeric() || c == '-' || c == '_') {
            continue;
        }
        if pending_dash && !stem.is_empty() {
            stem.push('-');
        }
        pending_dash = false;
        stem.extend(c.to_lowercase());
    }
    if stem.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        format!("{stem}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        assert_eq!(derive_filename("Ada Lovelace"), "ada-lovelace.pdf");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(derive_filename("  Grace \t Brewster  Hopper "), "grace-brewster-hopper.pdf");
    }

    #[test]
    fn test_punctuation_dropped() {
        assert_eq!(derive_filename("Dr. J. O'Neil-Smith"), "dr-j-oneil-smith.pdf");
        assert_eq!(derive_filename("\"quoted\"/../name"), "quotedname.pdf");
    }

    #[test]
    fn test_blank_name_uses_default() {
        assert_eq!(derive_filename(""), DEFAULT_FILENAME);
        assert_eq!(derive_filename("   "), DEFAULT_FILENAME);
        assert_eq!(derive_filename("!!!"), DEFAULT_FILENAME);
    }

    #[test]
    fn test_unicode_letters_kept() {
        assert_eq!(derive_filename("Zoë Åberg"), "zoë-åberg.pdf");
    }
}
