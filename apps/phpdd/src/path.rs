//! Path shortening for narrow table columns.

const MARKER: &str = "..";

/// Shorten `path` to at most `max_width` characters when possible.
///
/// Inner segments are abbreviated right-to-left (second-to-last first),
/// replacing their tail with `..`. The first segment (root or drive) and the
/// last one (file name) are never touched, so the result may still exceed
/// `max_width`. A path that already fits is returned unchanged; otherwise
/// backslash separators come back as `/`.
pub fn truncate_path(path: &str, max_width: usize) -> String {
    let mut total = width(path);
    if total <= max_width {
        return path.to_string();
    }

    let normalized = path.replace('\\', "/");
    let mut parts: Vec<String> = normalized.split('/').map(str::to_string).collect();
    let mut changed = false;

    for i in (1..parts.len().saturating_sub(1)).rev() {
        if total <= max_width {
            break;
        }
        let len = width(&parts[i]);
        // "x.." is the shortest abbreviation; nothing to gain below that
        if len <= MARKER.len() + 1 {
            continue;
        }
        let overflow = total - max_width;
        let cut = if overflow + MARKER.len() < len {
            overflow + MARKER.len()
        } else {
            overflow.min(len - 1)
        };
        let kept: String = parts[i].chars().take(len - cut).collect();
        parts[i] = format!("{kept}{MARKER}");
        total = total - len + width(&parts[i]);
        changed = true;
    }

    if changed {
        parts.join("/")
    } else {
        path.to_string()
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}
