//! Node label simplification.

/// Substrings removed from resource identifiers, applied in this order.
const STRIPPED: [&str; 4] = ["Service", "AWS", "Task", "Security"];

/// Labels longer than this many characters are truncated.
pub const MAX_LABEL_CHARS: usize = 20;

const ELLIPSIS: &str = "...";

/// Shorten a resource identifier for display under its icon.
///
/// Strips the noise words in [`STRIPPED`] everywhere they occur, then cuts
/// the result to [`MAX_LABEL_CHARS`] characters plus `...` when longer.
#[must_use]
pub fn simplify_label(id: &str) -> String {
    let mut label = id.to_owned();
    for word in STRIPPED {
        label = label.replace(word, "");
    }

    if label.chars().count() > MAX_LABEL_CHARS {
        let mut truncated: String = label.chars().take(MAX_LABEL_CHARS).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    } else {
        label
    }
}

#[cfg(test)]
#[path = "label_test.rs"]
mod tests;
