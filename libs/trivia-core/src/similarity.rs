//! Lexical similarity for typo tolerance.
//!
//! Ratcliff–Obershelp: find the longest common block, recurse on the pieces
//! left and right of it, and score `2·M / (|a| + |b|)` where `M` is the total
//! length of all blocks found.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
struct Block {
    a: usize,
    b: usize,
    size: usize,
}

/// Similarity ratio in `[0, 1]`, computed over Unicode scalar values.
///
/// `1.0` iff the strings are equal, `0.0` when they share no character.
/// Symmetric in its arguments.
pub fn ratio(a: &str, b: &str) -> f64 {
    // The block search breaks ties by position, so fix the argument order.
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b_index.entry(ch).or_default().push(j);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = longest_block(a, &b_index, alo, ahi, blo, bhi);
        if block.size == 0 {
            continue;
        }
        matched += block.size;
        if alo < block.a && blo < block.b {
            pending.push((alo, block.a, blo, block.b));
        }
        if block.a + block.size < ahi && block.b + block.size < bhi {
            pending.push((block.a + block.size, ahi, block.b + block.size, bhi));
        }
    }
    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`, earliest in `a`
/// (then `b`) on ties.
fn longest_block(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> Block {
    let mut best = Block {
        a: alo,
        b: blo,
        size: 0,
    };
    // run_len[j] = length of the common block ending at a[i - 1], b[j]
    let mut run_len: HashMap<usize, usize> = HashMap::new();
    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_run_len = HashMap::new();
        let positions = b_index.get(ch).map(Vec::as_slice).unwrap_or_default();
        for &j in positions {
            if j < blo {
                continue;
            }
            if j >= bhi {
                break;
            }
            let k = j
                .checked_sub(1)
                .and_then(|prev| run_len.get(&prev))
                .copied()
                .unwrap_or(0)
                + 1;
            next_run_len.insert(j, k);
            if k > best.size {
                best = Block {
                    a: i + 1 - k,
                    b: j + 1 - k,
                    size: k,
                };
            }
        }
        run_len = next_run_len;
    }
    best
}
