//! Block-matching string similarity.
//!
//! The similarity of two strings is `2 * M / T`, where `T` is their combined
//! length in characters and `M` is the number of characters covered by the
//! matching blocks found as follows: take the longest common contiguous block,
//! then recurse on the pieces to its left and to its right. Identical strings
//! score 1.0 (two empty strings included) and strings sharing no character
//! score 0.0.
//!
//! The score is not symmetric. `a` is the query and `b` the candidate; only
//! `b` is indexed. When `b` has 200 or more characters, characters occurring
//! in more than 1% of its positions are left out of the index ("popular"
//! characters). They can still extend a block found through other characters
//! but never start one.
//!
//! Two cheap upper bounds, [`SequenceMatcher::real_quick_ratio`] and
//! [`SequenceMatcher::quick_ratio`], allow skipping candidates that cannot beat
//! a known score.
//!
//! # Examples
//!
//! ```
//! use gutensearch::spelling::similarity::SequenceMatcher;
//!
//! let a: Vec<char> = "fsh".chars().collect();
//! let b: Vec<char> = "fish".chars().collect();
//! let matcher = SequenceMatcher::new(&a, &b);
//! assert!((matcher.ratio() - 6.0 / 7.0).abs() < 1e-12);
//! ```

use ahash::AHashMap;

/// Candidates at least this long get popular characters pruned from the index.
const POPULAR_MIN_LEN: usize = 200;

/// A block of `size` characters shared by `a[a..a + size]` and `b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Compares one query sequence against one candidate sequence.
pub struct SequenceMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of every non-popular character of `b`, ascending.
    b2j: AHashMap<char, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    /// Index `b` and prepare to compare it with `a`.
    pub fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: AHashMap<char, Vec<usize>> = AHashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        if b.len() >= POPULAR_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        SequenceMatcher { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among blocks of maximal size, the one starting earliest in `a` wins,
    /// and of those the one starting earliest in `b`. A zero-sized match at
    /// `(alo, blo)` means the ranges share nothing.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (a, b) = (self.a, self.b);
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // j2len[j] = length of the block ending at a[i - 1] and b[j]
        let mut j2len: AHashMap<usize, usize> = AHashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut new_j2len: AHashMap<usize, usize> = AHashMap::new();
            if let Some(positions) = self.b2j.get(c) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    new_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Popular characters are missing from the index; let them widen the block.
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        Match {
            a: best_i,
            b: best_j,
            size: best_size,
        }
    }

    /// All matching blocks, ascending, adjacent blocks merged, terminated by
    /// the sentinel `Match { a: a.len(), b: b.len(), size: 0 }`.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let mut blocks = self.raw_blocks();
        blocks.sort_unstable();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(Match {
            a: self.a.len(),
            b: self.b.len(),
            size: 0,
        });
        merged
    }

    /// Similarity in `[0.0, 1.0]`.
    pub fn ratio(&self) -> f64 {
        let matches: usize = self.raw_blocks().iter().map(|m| m.size).sum();
        ratio_of(matches, self.a.len() + self.b.len())
    }

    /// Upper bound on [`ratio`](Self::ratio) counting shared characters,
    /// regardless of their order.
    pub fn quick_ratio(&self) -> f64 {
        quick_ratio(self.a, self.b)
    }

    /// Upper bound on [`quick_ratio`](Self::quick_ratio) from the lengths alone.
    pub fn real_quick_ratio(&self) -> f64 {
        real_quick_ratio(self.a.len(), self.b.len())
    }

    /// Matching blocks in discovery order, unmerged.
    fn raw_blocks(&self) -> Vec<Match> {
        let mut blocks = Vec::new();
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            if alo < m.a && blo < m.b {
                pending.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                pending.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
            blocks.push(m);
        }

        blocks
    }
}

/// `2 * matches / length`, with two empty strings counting as identical.
fn ratio_of(matches: usize, length: usize) -> f64 {
    if length == 0 {
        1.0
    } else {
        2.0 * matches as f64 / length as f64
    }
}

/// Upper bound on the similarity of `a` and `b` from their multiset overlap.
pub fn quick_ratio(a: &[char], b: &[char]) -> f64 {
    let mut available: AHashMap<char, usize> = AHashMap::new();
    for &c in b {
        *available.entry(c).or_insert(0) += 1;
    }

    let mut matches = 0;
    for c in a {
        if let Some(left) = available.get_mut(c) {
            if *left > 0 {
                *left -= 1;
                matches += 1;
            }
        }
    }

    ratio_of(matches, a.len() + b.len())
}

/// Upper bound on the similarity of two strings of the given lengths.
pub fn real_quick_ratio(a_len: usize, b_len: usize) -> f64 {
    ratio_of(a_len.min(b_len), a_len + b_len)
}

/// Similarity of `query` against `candidate`.
pub fn similarity(query: &str, candidate: &str) -> f64 {
    let a: Vec<char> = query.chars().collect();
    let b: Vec<char> = candidate.chars().collect();
    SequenceMatcher::new(&a, &b).ratio()
}
