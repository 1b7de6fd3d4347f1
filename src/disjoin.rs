//! Splitting an arbitrary set of rectangles into a disjoint cover
//!
//! Overlapping monitor rectangles (and the `disjoin_rects` command) are
//! resolved into a list of pairwise non-overlapping rectangles covering the
//! same area. When two rectangles overlap, the region is attributed to
//! whichever rectangle was inserted first.

use crate::geometry::Rectangle;

/// Produce a disjoint cover of the given rectangles. The union of the result
/// equals the union of the input, and no two result rectangles overlap
pub(crate) fn disjoin_rects(rects: &[Rectangle]) -> Vec<Rectangle> {
    disjoin_rects_attributed(rects)
        .into_iter()
        .map(|(rect, _)| rect)
        .collect()
}

/// Like [`disjoin_rects`], but each cover rectangle carries the index of the
/// input rectangle its area is attributed to
pub(crate) fn disjoin_rects_attributed(rects: &[Rectangle]) -> Vec<(Rectangle, usize)> {
    let mut cover = Vec::with_capacity(rects.len());

    for (source, &rect) in rects.iter().enumerate() {
        insert_disjoint(&mut cover, 0, rect, source);
    }

    cover
}

/// Insert `element` into the cover without introducing any overlap,
/// considering only entries at positions `from..`.
///
/// Entries before `from` are known to be disjoint from `element`: either they
/// were walked past without intersecting, or `element` is a border fragment of
/// a rectangle that was itself already disjoint from them
fn insert_disjoint(cover: &mut Vec<(Rectangle, usize)>, from: usize, element: Rectangle, source: usize) {
    if element.is_degenerate() {
        return;
    }

    let slot = match (from..cover.len()).find(|&i| cover[i].0.intersects(&element)) {
        Some(slot) => slot,
        None => {
            cover.push((element, source));
            return;
        },
    };

    let (large, owner) = cover[slot];
    let center = match large.intersection(&element) {
        Some(center) => center,
        // unreachable: `slot` was chosen because it intersects
        None => return,
    };

    // The resident rectangle keeps the contested region; both rectangles are
    // fragmented around it and reinserted further down the list
    cover[slot] = (center, owner);
    insert_borders(cover, slot + 1, large, center, owner);
    insert_borders(cover, slot + 1, element, center, source);
}

/// Split `large` around the fully-contained `center` and insert the
/// non-degenerate border fragments:
///
/// ```text
/// +------- large ---------+
/// |         top           |
/// |------+--------+-------|
/// | left | center | right |
/// |------+--------+-------|
/// |        bottom         |
/// +-----------------------+
/// ```
fn insert_borders(
    cover: &mut Vec<(Rectangle, usize)>,
    from: usize,
    large: Rectangle,
    center: Rectangle,
    source: usize,
) {
    let (x1, y1) = (large.point.x, large.point.y);
    let (x2, y2) = (large.right(), large.bottom());

    let parts = [
        Rectangle::from_corners(x1, y1, x2, center.point.y),
        Rectangle::from_corners(x1, center.point.y, center.point.x, center.bottom()),
        Rectangle::from_corners(center.right(), center.point.y, x2, center.bottom()),
        Rectangle::from_corners(x1, center.bottom(), x2, y2),
    ];

    for part in parts.into_iter().flatten() {
        insert_disjoint(cover, from, part, source);
    }
}

#[cfg(test)]
mod tests {
    use super::{disjoin_rects, disjoin_rects_attributed};
    use crate::geometry::{Point, Rectangle};
    use itertools::Itertools;

    /// Compare the cover against the input point-by-point: every point of the
    /// input union must be covered by exactly one cover rectangle, and no
    /// cover rectangle may stick out of the union
    fn assert_exact_cover(input: &[Rectangle], cover: &[Rectangle]) {
        let x1 = input.iter().map(|r| r.point.x).min().unwrap() - 1;
        let y1 = input.iter().map(|r| r.point.y).min().unwrap() - 1;
        let x2 = input.iter().map(Rectangle::right).max().unwrap() + 1;
        let y2 = input.iter().map(Rectangle::bottom).max().unwrap() + 1;

        for y in y1..y2 {
            for x in x1..x2 {
                let p = Point::new(x, y);
                let wanted = input.iter().any(|r| r.contains(p));
                let got = cover.iter().filter(|r| r.contains(p)).count();

                assert!(got <= 1, "point {p} covered {got} times");
                assert_eq!(wanted, got == 1, "coverage mismatch at {p}");
            }
        }
    }

    #[test]
    fn empty_input_yields_empty_cover() {
        assert!(disjoin_rects(&[]).is_empty());
    }

    #[test]
    fn single_rect_is_returned_unchanged() {
        let rect = Rectangle::new(3, -4, 100, 200);
        assert_eq!(disjoin_rects(&[rect]), vec![rect]);
    }

    #[test]
    fn disjoint_input_passes_through() {
        let rects = [
            Rectangle::new(0, 0, 800, 600),
            Rectangle::new(800, 0, 1024, 768),
        ];

        let cover = disjoin_rects(&rects);
        assert_eq!(cover.len(), 2);
        assert_exact_cover(&rects, &cover);
    }

    #[test]
    fn degenerate_inputs_are_dropped() {
        let cover = disjoin_rects(&[
            Rectangle::new(0, 0, 0, 10),
            Rectangle::new(0, 0, 10, 0),
            Rectangle::new(0, 0, 4, 4),
        ]);

        assert_eq!(cover, vec![Rectangle::new(0, 0, 4, 4)]);
    }

    #[test]
    fn overlapping_squares_split_into_disjoint_pieces() {
        let rects = [Rectangle::new(0, 0, 10, 10), Rectangle::new(5, 5, 10, 10)];
        let cover = disjoin_rects(&rects);

        for r in &cover {
            assert!(!r.is_degenerate());
        }
        for (a, b) in cover.iter().tuple_combinations() {
            assert!(!a.intersects(b), "{a} intersects {b}");
        }

        // 100 + 100 - 25 of overlap
        assert_eq!(cover.iter().map(Rectangle::area).sum::<u64>(), 175);
        assert_exact_cover(&rects, &cover);
    }

    #[test]
    fn earlier_rect_wins_the_overlap() {
        let rects = [Rectangle::new(0, 0, 10, 10), Rectangle::new(5, 5, 10, 10)];
        let cover = disjoin_rects_attributed(&rects);

        // the contested 5x5 region at (5,5) belongs to the first input
        let (rect, owner) = cover
            .iter()
            .find(|(r, _)| r.contains(Point::new(7, 7)))
            .copied()
            .unwrap();

        assert_eq!(owner, 0);
        assert_eq!(rect, Rectangle::new(5, 5, 5, 5));
    }

    #[test]
    fn contained_rect_is_fully_absorbed() {
        let rects = [Rectangle::new(0, 0, 10, 10), Rectangle::new(2, 2, 4, 4)];
        let cover = disjoin_rects_attributed(&rects);

        assert_eq!(
            cover.iter().map(|(r, _)| r.area()).sum::<u64>(),
            rects[0].area()
        );
        // every piece traces back to the first input
        for (_, owner) in &cover {
            assert_eq!(*owner, 0);
        }
        let plain = cover.iter().map(|(r, _)| *r).collect::<Vec<_>>();
        assert_exact_cover(&rects, &plain);
    }

    #[test]
    fn many_overlaps_stay_disjoint() {
        // a diagonal chain where every rect overlaps its neighbour
        let rects = (0..6)
            .map(|i| Rectangle::new(i * 4, i * 3, 12, 9))
            .collect::<Vec<_>>();

        let cover = disjoin_rects(&rects);

        for (a, b) in cover.iter().tuple_combinations() {
            assert!(!a.intersects(b), "{a} intersects {b}");
        }
        assert_exact_cover(&rects, &cover);
    }
}
