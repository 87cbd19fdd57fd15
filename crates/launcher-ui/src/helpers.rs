//! Internal helpers shared across views.

/// Convert an index into a value from a static enum variant table.
pub(crate) const fn enum_from_index<T: Copy, const N: usize>(
    all: &[T; N],
    index: usize,
) -> Option<T> {
    if index < N {
        Some(all[index])
    } else {
        None
    }
}

/// Move a clamped cursor by `delta` within `0..len`.
pub(crate) fn step_clamped(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current
        .saturating_add_signed(delta)
        .min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_clamps_both_ends() {
        assert_eq!(step_clamped(0, -1, 3), 0);
        assert_eq!(step_clamped(2, 1, 3), 2);
        assert_eq!(step_clamped(1, 1, 3), 2);
        assert_eq!(step_clamped(5, 0, 0), 0);
    }

    #[test]
    fn enum_lookup_rejects_out_of_range() {
        assert_eq!(enum_from_index(&[1, 2], 1), Some(2));
        assert_eq!(enum_from_index(&[1, 2], 2), None);
    }
}
