/// Computes the failure function of `pattern`.
///
/// Entry `i` is the length of the longest proper prefix of `pattern[..=i]`
/// which is also a suffix of `pattern[..=i]`. Knuth-Morris-Pratt uses the
/// table to resume a scan after a mismatch without re-reading the text.
///
/// ```
/// # use kmpz_common::prefix_function;
/// assert_eq!(prefix_function(b"AABAACAABAA"), [0, 1, 0, 1, 2, 0, 1, 2, 3, 4, 5]);
/// ```
#[must_use]
pub fn prefix_function<T: PartialEq>(pattern: &[T]) -> Vec<usize> {
    let m = pattern.len();
    let mut table = vec![0; m];
    let mut i = 1;
    let mut j = 0;
    while i < m {
        if pattern[i] == pattern[j] {
            j += 1;
            table[i] = j;
            i += 1;
        } else if j != 0 {
            // fall back to the next shorter border, without advancing i
            j = table[j - 1];
        } else {
            table[i] = 0;
            i += 1;
        }
    }
    table
}

/// Scans `text` against `pattern` in a single pass, recording the matched
/// prefix length at every text position.
///
/// Entry `i` is the number of consecutive pattern symbols matched by the text
/// suffix ending at `i`. An entry equal to `pattern.len()` marks a full
/// occurrence ending there. After a full match the scan folds back through
/// the failure function instead of restarting, so overlapping occurrences
/// are reported too.
///
/// Returns an empty vector when `pattern` is empty.
///
/// ```
/// # use kmpz_common::kmp_match;
/// assert_eq!(kmp_match(b"ababab", b"abab"), [1, 2, 3, 4, 3, 4]);
/// ```
#[must_use]
pub fn kmp_match<T: PartialEq>(text: &[T], pattern: &[T]) -> Vec<usize> {
    let n = text.len();
    let m = pattern.len();
    if m == 0 {
        return Vec::new();
    }
    let table = prefix_function(pattern);
    let mut states = vec![0; n];
    let mut i = 0;
    let mut j = 0;
    while i < n {
        if pattern[j] == text[i] {
            j += 1;
            states[i] = j;
            i += 1;
        }
        if j == m {
            // full match: fold back and keep scanning for overlaps
            j = table[j - 1];
        } else if i < n && pattern[j] != text[i] {
            if j != 0 {
                j = table[j - 1];
            } else {
                states[i] = 0;
                i += 1;
            }
        }
    }
    states
}
