use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::interval::Interval;

/// Registry of collapsible regions over the preview document.
pub trait Folding {
    type Handle: Copy + Eq + fmt::Debug;

    /// Creates a region over `[start, end)`. Returns `None` if the surface
    /// refuses it.
    fn add_fold_region(&mut self, start: usize, end: usize, placeholder: &str) -> Option<Self::Handle>;

    fn remove_fold_region(&mut self, handle: Self::Handle);

    fn set_expanded(&mut self, handle: Self::Handle, expanded: bool);

    /// Runs `op` as one batched folding update.
    fn batch<R, F>(&mut self, op: F) -> R
        where Self: Sized,
              F: FnOnce(&mut Self) -> R
    {
        op(self)
    }
}

new_key_type! { pub struct FoldHandle; }

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldRegion {
    pub range: Interval,
    pub placeholder: String,
    pub expanded: bool,
}

/// In-memory folding surface. Rejects empty regions and regions that
/// partially overlap an existing one.
#[derive(Default)]
pub struct FoldRegistry {
    regions: SlotMap<FoldHandle, FoldRegion>,
    batch_depth: usize,
    batches: usize,
}

impl FoldRegistry {
    pub fn new() -> FoldRegistry {
        FoldRegistry::default()
    }

    pub fn get(&self, handle: FoldHandle) -> Option<&FoldRegion> {
        self.regions.get(handle)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions ordered by start offset.
    pub fn regions(&self) -> Vec<&FoldRegion> {
        let mut ret: Vec<_> = self.regions.values().collect();
        ret.sort_by_key(|r| r.range);
        ret
    }

    /// Number of completed top-level batches.
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn in_batch(&self) -> bool {
        self.batch_depth > 0
    }

    fn nests_or_disjoint(a: &Interval, b: &Interval) -> bool {
        !a.overlaps(b)
            || (a.beg <= b.beg && b.end <= a.end)
            || (b.beg <= a.beg && a.end <= b.end)
    }
}

impl Folding for FoldRegistry {
    type Handle = FoldHandle;

    fn add_fold_region(&mut self, start: usize, end: usize, placeholder: &str) -> Option<FoldHandle> {
        if start >= end {
            return None;
        }
        let range = Interval::new(start, end);
        if self.regions.values().any(|r| r.range == range || !Self::nests_or_disjoint(&r.range, &range)) {
            return None;
        }
        Some(self.regions.insert(FoldRegion {
            range,
            placeholder: placeholder.to_owned(),
            expanded: false,
        }))
    }

    fn remove_fold_region(&mut self, handle: FoldHandle) {
        self.regions.remove(handle);
    }

    fn set_expanded(&mut self, handle: FoldHandle, expanded: bool) {
        if let Some(region) = self.regions.get_mut(handle) {
            region.expanded = expanded;
        }
    }

    fn batch<R, F>(&mut self, op: F) -> R
        where F: FnOnce(&mut Self) -> R
    {
        self.batch_depth += 1;
        let ret = op(self);
        self.batch_depth -= 1;
        if self.batch_depth == 0 {
            self.batches += 1;
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::{FoldRegistry, Folding};

    #[test]
    fn add_and_remove() {
        let mut folds = FoldRegistry::new();
        let h = folds.add_fold_region(2, 8, "a...").unwrap();
        assert_eq!(folds.len(), 1);
        assert_eq!(folds.get(h).unwrap().placeholder, "a...");
        assert!(!folds.get(h).unwrap().expanded);
        folds.set_expanded(h, true);
        assert!(folds.get(h).unwrap().expanded);
        folds.remove_fold_region(h);
        assert!(folds.is_empty());
        assert!(folds.get(h).is_none());
    }

    #[test]
    fn stale_handle_does_not_alias_new_region() {
        let mut folds = FoldRegistry::new();
        let old = folds.add_fold_region(0, 4, "x...").unwrap();
        folds.remove_fold_region(old);
        let new = folds.add_fold_region(0, 4, "y...").unwrap();
        assert_ne!(old, new);
        folds.remove_fold_region(old);
        assert_eq!(folds.len(), 1);
    }

    #[test]
    fn rejects_empty_and_crossing_regions() {
        let mut folds = FoldRegistry::new();
        assert!(folds.add_fold_region(3, 3, "").is_none());
        assert!(folds.add_fold_region(0, 10, "").is_some());
        assert!(folds.add_fold_region(0, 10, "").is_none());
        assert!(folds.add_fold_region(5, 15, "").is_none());
        assert!(folds.add_fold_region(2, 6, "").is_some());
        assert!(folds.add_fold_region(10, 12, "").is_some());
    }

    #[test]
    fn batches_count_outermost_only() {
        let mut folds = FoldRegistry::new();
        folds.batch(|f| {
            assert!(f.in_batch());
            f.batch(|f| f.add_fold_region(0, 1, ""));
        });
        assert!(!folds.in_batch());
        assert_eq!(folds.batches(), 1);
    }
}
