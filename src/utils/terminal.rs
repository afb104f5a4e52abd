//! Display sanitization for text read from the editor's state database.
//!
//! Labels and URIs come from a file any local program can write. Before they
//! reach the terminal, escape sequences and control characters are removed so
//! a crafted entry cannot move the cursor, recolor the screen or spoof other
//! rows.

/// Reduce `text` to a single printable line.
///
/// Drops CSI (`ESC [ ... letter`) and OSC (`ESC ] ... BEL` or `ESC \`)
/// sequences, then every remaining control character. Newlines and tabs
/// become spaces.
///
/// # Examples
///
/// ```
/// use recent_workspaces::utils::sanitize_for_display;
///
/// assert_eq!(sanitize_for_display("\x1b[31mproj\x1b[0m"), "proj");
/// assert_eq!(sanitize_for_display("two\nlines"), "two lines");
/// ```
pub fn sanitize_for_display(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() || next == '~' {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        match ch {
            '\n' | '\r' | '\t' => result.push(' '),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}
