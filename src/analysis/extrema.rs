//! Sliding-window min/max over the bucketed frame sequence

use crate::model::{BucketedFrame, Extrema};
use rayon::prelude::*;
use std::ops::Range;

/// Frames scanned for `index`: `[max(index - window/2, 0), min(index + window/2, count))`
///
/// Edge frames get a smaller, asymmetric window. A window of 0 or 1 frames leaves
/// that range empty, so it is replaced by `[index, index + 1)` and each frame is
/// scaled against its own extrema instead of an empty scan's `(0, 0)`.
pub fn window_bounds(index: usize, window: usize, frame_count: usize) -> Range<usize> {
    let half = window / 2;
    let start = index.saturating_sub(half);
    let end = (index + half).min(frame_count);
    if start < end {
        start..end
    } else {
        index..(index + 1).min(frame_count)
    }
}

/// Min and max over every bucket of every frame in `frames`
///
/// An empty slice yields `(0, 0)`.
pub fn find_extrema(frames: &[BucketedFrame]) -> Extrema {
    let mut values = frames.iter().flat_map(|f| f.iter().copied());
    let Some(first) = values.next() else {
        return Extrema::new(0, 0);
    };

    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Extrema::new(min, max)
}

/// Extrema of the window centred on frame `index`
pub fn local_extrema(frames: &[BucketedFrame], index: usize, window: usize) -> Extrema {
    find_extrema(&frames[window_bounds(index, window, frames.len())])
}

/// [`local_extrema`] for every frame, in frame order
pub fn all_local_extrema(frames: &[BucketedFrame], window: usize) -> Vec<Extrema> {
    (0..frames.len())
        .into_par_iter()
        .map(|i| local_extrema(frames, i, window))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(rows: &[&[u32]]) -> Vec<BucketedFrame> {
        rows.iter().map(|r| BucketedFrame::from(r.to_vec())).collect()
    }

    #[test]
    fn test_window_bounds_at_edges() {
        assert_eq!(window_bounds(0, 10, 20), 0..5);
        assert_eq!(window_bounds(19, 10, 20), 14..20);
        assert_eq!(window_bounds(10, 10, 20), 5..15);
        // odd windows round the half down
        assert_eq!(window_bounds(10, 7, 20), 7..13);
    }

    #[test]
    fn test_window_bounds_degenerate_window() {
        assert_eq!(window_bounds(3, 0, 20), 3..4);
        assert_eq!(window_bounds(3, 1, 20), 3..4);
        assert_eq!(window_bounds(19, 1, 20), 19..20);
    }

    #[test]
    fn test_find_extrema() {
        let f = frames(&[&[1, 2, 3], &[0, 2, 3], &[5, 10, 100]]);
        assert_eq!(find_extrema(&f), Extrema::new(0, 100));
        assert_eq!(find_extrema(&[]), Extrema::new(0, 0));
    }

    #[test]
    fn test_local_extrema_only_sees_window() {
        let mut rows: Vec<Vec<u32>> = (0..20).map(|i| vec![i, i + 1]).collect();
        rows[19] = vec![1000, 1000];
        let f: Vec<BucketedFrame> = rows.into_iter().map(BucketedFrame::from).collect();

        // frame 0 scans frames 0..5
        assert_eq!(local_extrema(&f, 0, 10), Extrema::new(0, 5));
        // frame 19 scans frames 14..20, including the spike
        assert_eq!(local_extrema(&f, 19, 10), Extrema::new(14, 1000));
    }

    #[test]
    fn test_all_local_extrema_in_order() {
        let f: Vec<BucketedFrame> = (0..20).map(|i| BucketedFrame::from(vec![i])).collect();
        let all = all_local_extrema(&f, 10);
        assert_eq!(all.len(), 20);
        for (i, e) in all.iter().enumerate() {
            assert_eq!(*e, local_extrema(&f, i, 10));
        }
    }
}
