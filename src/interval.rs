use std::{cmp, fmt};
use std::iter::FromIterator;
use std::ops::Range;

/// Half open interval of document offsets: [beg, end)
#[derive(Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Interval {
    pub beg: usize,
    pub end: usize,
}

impl Interval {
    pub fn new(beg: usize, end: usize) -> Interval {
        assert!(beg <= end, "inverted interval: {}..{}", beg, end);
        Interval { beg, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.beg
    }

    pub fn is_empty(&self) -> bool {
        self.beg == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.beg <= offset && offset < self.end
    }

    /// True if the two intervals share at least one offset.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.beg < other.end && other.beg < self.end
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}--{})", self.beg, self.end)
    }
}

impl From<(usize, usize)> for Interval {
    fn from((beg, end): (usize, usize)) -> Interval {
        Interval { beg, end }
    }
}

impl From<Range<usize>> for Interval {
    fn from(r: Range<usize>) -> Interval {
        Interval { beg: r.start, end: r.end }
    }
}

/// Set of ordered disjoint intervals. Touching intervals are merged on insertion.
#[derive(Clone, Default)]
pub struct IntervalSet {
    inner: Vec<Interval>,
}

impl fmt::Debug for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl IntervalSet {
    pub fn new() -> IntervalSet {
        IntervalSet { inner: Vec::new() }
    }

    pub fn add<T>(&mut self, iv: T) where T: Into<Interval> {
        let iv = iv.into();
        if iv.beg == iv.end { return; }
        assert!(iv.beg < iv.end);

        // first interval that ends at or after iv.beg touches or follows iv
        let first = self.inner.partition_point(|e| e.end < iv.beg);
        // first interval that begins strictly after iv.end is untouched
        let last = first + self.inner[first..].partition_point(|e| e.beg <= iv.end);

        if first == last {
            self.inner.insert(first, iv);
            return;
        }

        let beg = cmp::min(self.inner[first].beg, iv.beg);
        let end = cmp::max(self.inner[last - 1].end, iv.end);
        self.inner.drain(first..last);
        self.inner.insert(first, Interval { beg, end });
    }

    pub fn covers(&self, offset: usize) -> bool {
        match self.inner.binary_search_by(|e| e.beg.cmp(&offset)) {
            Ok(_) => true,
            Err(0) => false,
            Err(i) => self.inner[i - 1].contains(offset),
        }
    }

    /// Sum of the lengths of all intervals in the set.
    pub fn covered_len(&self) -> usize {
        self.inner.iter().map(Interval::len).sum()
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.inner
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<T> FromIterator<T> for IntervalSet
where T: Into<Interval>
{
    fn from_iter<U>(iter: U) -> Self
        where U: IntoIterator<Item = T>
    {
        let mut ret = IntervalSet::new();
        ret.extend(iter);
        ret
    }
}

impl<T> Extend<T> for IntervalSet
where T: Into<Interval>
{
    fn extend<U>(&mut self, iter: U)
        where U: IntoIterator<Item = T>
    {
        for e in iter {
            self.add(e);
        }
    }
}
