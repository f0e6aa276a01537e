//! Ordered Float
//!
//! A totally ordered wrapper of [`Weight`] used as the key of every addressable heap.
//! Unlike comparisons during tightness checks, ordering here is exact so that heap invariants never depend on tolerance.
//!

use crate::util::*;
use num_traits::Zero;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
pub struct OrderedFloat(Weight);

impl OrderedFloat {
    pub fn new(value: Weight) -> Self {
        Self(value)
    }
    pub fn value(&self) -> Weight {
        self.0
    }
    pub fn is_number(&self) -> bool {
        self.0.is_finite()
    }
}

impl Zero for OrderedFloat {
    fn zero() -> Self {
        Self::new(0.)
    }
    fn is_zero(&self) -> bool {
        self.0.abs() <= EPS
    }
}

impl std::ops::Add for OrderedFloat {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for OrderedFloat {}
impl Ord for OrderedFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
impl PartialOrd for OrderedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for OrderedFloat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Weight> for OrderedFloat {
    fn from(value: Weight) -> Self {
        Self::new(value)
    }
}
