//! Leaf pattern matcher: runs one rule's regex over a byte region of the
//! buffer and yields capture ranges in absolute buffer coordinates.

use super::buffer::StyledBuffer;
use regex::Regex;
use std::ops::Range;

/// One regex match, with whole-match and capture-group ranges rebased to
/// absolute buffer offsets.
#[derive(Debug, Clone)]
pub struct RuleMatch {
    pub range: Range<usize>,
    groups: Vec<Option<Range<usize>>>,
}

impl RuleMatch {
    /// Capture group range by number. An out-of-range group is simply
    /// `None`, so a rule asking for a capture the pattern never had treats
    /// the occurrence as a non-match instead of failing.
    pub fn group(&self, n: usize) -> Option<Range<usize>> {
        self.groups.get(n).cloned().flatten()
    }
}

/// Collect all matches of `re` inside `region`.
///
/// With `skip_hidden`, matches that overlap spans an earlier rule already
/// hid are discarded. This is what keeps the single-asterisk italic rule
/// from re-matching the interior of an already-decorated `**bold**` run.
pub fn find_matches(
    re: &Regex,
    buffer: &StyledBuffer,
    region: Range<usize>,
    skip_hidden: bool,
) -> Vec<RuleMatch> {
    let len = buffer.len();
    let start = region.start.min(len);
    let region = start..region.end.clamp(start, len);
    let slice = &buffer.text()[region.clone()];

    let mut matches = Vec::new();
    let mut pos = 0;
    while pos <= slice.len() {
        let caps = match re.captures_at(slice, pos) {
            Some(caps) => caps,
            None => break,
        };
        let whole = match caps.get(0) {
            Some(m) => m,
            None => break,
        };
        let range = region.start + whole.start()..region.start + whole.end();
        if skip_hidden && buffer.overlaps_hidden(range.clone()) {
            // A discarded match may have consumed the opening marker of a
            // real one right behind it; rescan from just past its start.
            pos = next_char_boundary(slice, whole.start());
            continue;
        }
        let groups = (0..caps.len())
            .map(|i| {
                caps.get(i)
                    .map(|m| region.start + m.start()..region.start + m.end())
            })
            .collect();
        matches.push(RuleMatch { range, groups });
        pos = if whole.end() > whole.start() {
            whole.end()
        } else {
            next_char_boundary(slice, whole.start())
        };
    }
    matches
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    let mut next = pos + 1;
    while next < s.len() && !s.is_char_boundary(next) {
        next += 1;
    }
    next
}
