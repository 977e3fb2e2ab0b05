//! Distinct sampling without replacement, and unbiased shuffling.
//!
//! Every ordered selection of `n` positions is equally likely. Small draws
//! use rejection of repeated positions; once `n` exceeds half of the free
//! positions the sampler switches to a partial Fisher–Yates shuffle so the
//! expected number of redraws stays bounded.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use wordgrid_core::error::AppError;
use wordgrid_core::result::AppResult;

/// Draws `n` distinct positions from `0..len`.
///
/// `prefix` is an already-chosen, in-order head of the result; the sampler
/// tops it up. Fails if `n > len`, if the prefix is longer than `n`,
/// repeats a position, or names a position outside `0..len`.
pub fn sample_indices<R>(
    rng: &mut R,
    n: usize,
    len: usize,
    prefix: &[usize],
) -> AppResult<Vec<usize>>
where
    R: Rng + ?Sized,
{
    if n > len {
        return Err(AppError::invalid_argument(format!(
            "Cannot draw {n} distinct items from a pool of {len}"
        )));
    }
    if prefix.len() > n {
        return Err(AppError::invalid_argument(format!(
            "Prefix of {} items exceeds requested {n}",
            prefix.len()
        )));
    }

    let mut chosen: HashSet<usize> = HashSet::with_capacity(n);
    for &idx in prefix {
        if idx >= len {
            return Err(AppError::invalid_argument(format!(
                "Prefix position {idx} is outside a pool of {len}"
            )));
        }
        if !chosen.insert(idx) {
            return Err(AppError::invalid_argument(format!(
                "Prefix repeats position {idx}"
            )));
        }
    }

    let mut result = prefix.to_vec();
    let remaining = n - prefix.len();
    let free = len - prefix.len();

    if remaining * 2 > free {
        let mut candidates: Vec<usize> = (0..len).filter(|i| !chosen.contains(i)).collect();
        let (picked, _) = candidates.partial_shuffle(rng, remaining);
        result.extend_from_slice(picked);
    } else {
        while result.len() < n {
            let idx = rng.gen_range(0..len);
            if chosen.insert(idx) {
                result.push(idx);
            }
        }
    }

    Ok(result)
}

/// Draws `n` elements at distinct positions of `pool`.
pub fn sample_distinct<T, R>(rng: &mut R, n: usize, pool: &[T]) -> AppResult<Vec<T>>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let indices = sample_indices(rng, n, pool.len(), &[])?;
    Ok(indices.into_iter().map(|i| pool[i].clone()).collect())
}

/// Shuffles `items` in place; every permutation is equally likely.
pub fn shuffle<T, R>(rng: &mut R, items: &mut [T])
where
    R: Rng + ?Sized,
{
    items.shuffle(rng);
}
