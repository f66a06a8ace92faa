//! # Ascending sort of row ids
//!
//! In-place heap sort over the scratch array of row ids pending for a single column. The ids are
//! unique by construction, so stability is not a concern.

/// Sort the values ascending, in place.
///
/// A max-heap is built first, then the front is repeatedly swapped to the shrinking back of the
/// slice and sifted down.
pub(crate) fn sort(values: &mut [i64]) {
    let length = values.len();
    if length < 2 {
        return;
    }

    for start in (0..length / 2).rev() {
        sift_down(values, start, length);
    }

    for end in (1..length).rev() {
        values.swap(0, end);
        sift_down(values, 0, end);
    }
}

/// Restore the max-heap property for the subtree at `root`, within `values[..end]`.
fn sift_down(values: &mut [i64], mut root: usize, end: usize) {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;

        let mut largest = root;
        if left < end && values[left] > values[largest] {
            largest = left;
        }
        if right < end && values[right] > values[largest] {
            largest = right;
        }

        if largest == root {
            return;
        }
        values.swap(root, largest);
        root = largest;
    }
}
