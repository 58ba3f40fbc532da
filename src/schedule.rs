// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The order in which to carve.
//!
//! Carving all the columns first and then all the rows (or the other
//! way around) squeezes the picture along one direction before the
//! other gets a say.  Instead, the two kinds of seam are interleaved so
//! that, at every point of the run, the fraction of vertical seams
//! removed so far tracks the fraction still owed, the same way
//! Bresenham's line steps along the minor axis.

use crate::seamfinder::Axis;

/// An iterator over the axes to carve, in order.  It yields exactly
/// `vertical + horizontal` items.
#[derive(Debug, Clone)]
pub struct ShrinkSchedule {
    need_v: u64,
    need_h: u64,
    removed_v: u64,
    removed_h: u64,
}

impl ShrinkSchedule {
    /// A schedule removing `vertical` vertical seams and `horizontal`
    /// horizontal ones.
    pub fn new(vertical: u32, horizontal: u32) -> Self {
        ShrinkSchedule {
            need_v: u64::from(vertical),
            need_h: u64::from(horizontal),
            removed_v: 0,
            removed_h: 0,
        }
    }

    fn remaining(&self) -> u64 {
        (self.need_v - self.removed_v) + (self.need_h - self.removed_h)
    }
}

impl Iterator for ShrinkSchedule {
    type Item = Axis;

    fn next(&mut self) -> Option<Axis> {
        if self.remaining() == 0 {
            return None;
        }
        let vertical_due = self.need_h == 0
            || self.removed_v * self.need_h <= self.removed_h * self.need_v;
        if self.need_v > self.removed_v && vertical_due {
            self.removed_v += 1;
            Some(Axis::Vertical)
        } else {
            self.removed_h += 1;
            Some(Axis::Horizontal)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ShrinkSchedule {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seamfinder::Axis::{Horizontal as H, Vertical as V};

    #[test]
    fn nothing_to_do_is_empty() {
        assert_eq!(ShrinkSchedule::new(0, 0).count(), 0);
    }

    #[test]
    fn single_axis_runs_straight_through() {
        assert_eq!(ShrinkSchedule::new(3, 0).collect::<Vec<_>>(), vec![V, V, V]);
        assert_eq!(ShrinkSchedule::new(0, 2).collect::<Vec<_>>(), vec![H, H]);
    }

    #[test]
    fn equal_needs_alternate_starting_vertical() {
        assert_eq!(
            ShrinkSchedule::new(2, 2).collect::<Vec<_>>(),
            vec![V, H, V, H]
        );
    }

    #[test]
    fn six_to_two_spaces_the_rows_out() {
        let order: Vec<_> = ShrinkSchedule::new(6, 2).collect();
        assert_eq!(order, vec![V, H, V, V, V, H, V, V]);

        // At every prefix, the vertical count stays within one step of
        // where the 6:2 ratio says it should be.
        let (mut v, mut h) = (0i64, 0i64);
        for axis in order {
            match axis {
                V => v += 1,
                H => h += 1,
            }
            assert!((v * 2 - h * 6).abs() <= 6, "v={} h={}", v, h);
        }
        assert_eq!((v, h), (6, 2));
    }

    #[test]
    fn counts_always_match_the_request() {
        for (nv, nh) in [(1, 7), (7, 1), (5, 3), (3, 5), (10, 10), (0, 4)].iter() {
            let order: Vec<_> = ShrinkSchedule::new(*nv, *nh).collect();
            assert_eq!(order.iter().filter(|a| **a == V).count(), *nv as usize);
            assert_eq!(order.iter().filter(|a| **a == H).count(), *nh as usize);
        }
    }

    #[test]
    fn size_hint_is_exact() {
        let mut schedule = ShrinkSchedule::new(4, 3);
        assert_eq!(schedule.len(), 7);
        schedule.next();
        schedule.next();
        assert_eq!(schedule.len(), 5);
    }
}
