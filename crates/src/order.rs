/// A single-element relocation inside a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub source: usize,
    pub target: usize,
}

/// Where a drop gesture landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Dropped onto the item currently at this index: insert before it.
    Before(usize),
    /// Dropped onto the zone after the last item.
    End,
}

impl Move {
    pub fn new(source: usize, target: usize) -> Self {
        Move { source, target }
    }

    pub fn up(index: usize) -> Option<Self> {
        if index == 0 {
            return None;
        }
        Some(Move::new(index, index - 1))
    }

    pub fn down(index: usize, len: usize) -> Option<Self> {
        if index + 1 >= len {
            return None;
        }
        Some(Move::new(index, index + 1))
    }

    /// Insert `source` before the item at `target_item`.
    ///
    /// Removing the source shifts every later index left by one, so a target
    /// after the source is decremented before relocation.
    pub fn before_item(source: usize, target_item: usize) -> Self {
        let target = if source < target_item {
            target_item - 1
        } else {
            target_item
        };
        Move::new(source, target)
    }

    /// Move `source` to the last position. Length is unchanged, so the last
    /// position is `len - 1`, not `len`.
    pub fn to_end(source: usize, len: usize) -> Self {
        Move::new(source, len.saturating_sub(1))
    }

    pub fn resolve(source: usize, placement: Placement, len: usize) -> Self {
        match placement {
            Placement::Before(item) => Move::before_item(source, item),
            Placement::End => Move::to_end(source, len),
        }
    }

    pub fn is_noop(&self, len: usize) -> bool {
        self.source == self.target || self.source >= len || self.target >= len
    }

    pub fn apply<T: Clone>(&self, items: &[T]) -> Option<Vec<T>> {
        move_item(items, self.source, self.target)
    }
}

/// Relocate the element at `source` to `target`.
///
/// Returns `None` when the move would leave the sequence unchanged, including
/// equal or out-of-range indices; gesture-derived indices may be stale, so
/// those are absorbed rather than reported. `items` itself is never touched.
pub fn move_item<T: Clone>(items: &[T], source: usize, target: usize) -> Option<Vec<T>> {
    if Move::new(source, target).is_noop(items.len()) {
        return None;
    }
    let mut out = items.to_vec();
    let it = out.remove(source);
    out.insert(target, it);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn abcd() -> Vec<char> {
        vec!['A', 'B', 'C', 'D']
    }

    #[test]
    fn move_item_forward_and_backward() {
        assert_eq!(move_item(&abcd(), 0, 2), Some(vec!['B', 'C', 'A', 'D']));
        assert_eq!(move_item(&abcd(), 3, 1), Some(vec!['A', 'D', 'B', 'C']));
    }

    #[test]
    fn move_item_rejects_same_and_out_of_range() {
        let s = abcd();
        assert_eq!(move_item(&s, 2, 2), None);
        assert_eq!(move_item(&s, 4, 0), None);
        assert_eq!(move_item(&s, 0, 4), None);
        assert_eq!(move_item::<char>(&[], 0, 0), None);
        assert_eq!(s, abcd());
    }

    #[test]
    fn drop_before_later_item_compensates_for_removal() {
        // drag A, drop before C
        let mv = Move::resolve(0, Placement::Before(2), 4);
        assert_eq!(mv, Move::new(0, 1));
        assert_eq!(mv.apply(&abcd()), Some(vec!['B', 'A', 'C', 'D']));
    }

    #[test]
    fn drop_before_earlier_item_keeps_index() {
        // drag D, drop before B
        let mv = Move::resolve(3, Placement::Before(1), 4);
        assert_eq!(mv.apply(&abcd()), Some(vec!['A', 'D', 'B', 'C']));
    }

    #[test]
    fn drop_before_own_successor_is_noop() {
        let mv = Move::before_item(1, 2);
        assert!(mv.is_noop(4));
        assert_eq!(mv.apply(&abcd()), None);
    }

    #[test]
    fn drop_at_end_moves_to_last_position() {
        let s = vec!['A', 'B', 'C'];
        let mv = Move::resolve(0, Placement::End, s.len());
        assert_eq!(mv.apply(&s), Some(vec!['B', 'C', 'A']));
        // already last
        assert_eq!(Move::to_end(2, 3).apply(&s), None);
    }

    #[test]
    fn before_last_item_and_end_differ_by_one() {
        let s = abcd();
        let before_last = Move::resolve(0, Placement::Before(3), 4).apply(&s);
        let end = Move::resolve(0, Placement::End, 4).apply(&s);
        assert_eq!(before_last, Some(vec!['B', 'C', 'A', 'D']));
        assert_eq!(end, Some(vec!['B', 'C', 'D', 'A']));
    }

    #[test]
    fn up_and_down_boundaries() {
        assert_eq!(Move::up(0), None);
        assert_eq!(Move::up(2), Some(Move::new(2, 1)));
        assert_eq!(Move::down(3, 4), None);
        assert_eq!(Move::down(0, 0), None);
        assert_eq!(Move::down(1, 4), Some(Move::new(1, 2)));
    }

    proptest! {
        #[test]
        fn prop_move_is_stable_relocation(
            items in prop::collection::vec(any::<u8>(), 2..24),
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let len = items.len();
            let (i, j) = (a.index(len), b.index(len));
            prop_assume!(i != j);
            // tag each element with its original position so duplicates stay distinguishable
            let tagged: Vec<(usize, u8)> = items.iter().copied().enumerate().collect();
            let moved = move_item(&tagged, i, j).expect("valid move");

            prop_assert_eq!(moved.len(), len);
            prop_assert_eq!(moved[j], tagged[i]);

            let mut sorted = moved.clone();
            sorted.sort();
            prop_assert_eq!(&sorted, &tagged);

            let rest_before: Vec<_> = tagged.iter().filter(|e| e.0 != i).collect();
            let rest_after: Vec<_> = moved.iter().filter(|e| e.0 != i).collect();
            prop_assert_eq!(rest_before, rest_after);
        }

        #[test]
        fn prop_invalid_moves_are_noops(
            items in prop::collection::vec(any::<u8>(), 0..12),
            i in 0usize..32,
            j in 0usize..32,
        ) {
            prop_assume!(i == j || i >= items.len() || j >= items.len());
            prop_assert_eq!(move_item(&items, i, j), None);
        }

        #[test]
        fn prop_up_then_down_round_trips(
            items in prop::collection::vec(any::<u8>(), 2..16),
            idx in any::<prop::sample::Index>(),
        ) {
            let i = idx.index(items.len() - 1) + 1;
            let up = Move::up(i).and_then(|m| m.apply(&items)).expect("up");
            let back = Move::down(i - 1, up.len()).and_then(|m| m.apply(&up)).expect("down");
            prop_assert_eq!(back, items);
        }
    }
}
