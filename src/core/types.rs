use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::primitives::{datetime_key, decimal_key};
use crate::error::BarViewResult;

/// Measured pixel size of the drawing container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One observation on the key axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyedPoint<V> {
    pub key: f64,
    pub value: V,
}

impl<V> KeyedPoint<V> {
    #[must_use]
    pub fn new(key: f64, value: V) -> Self {
        Self { key, value }
    }

    /// Keys a point by a UTC timestamp expressed in unix seconds.
    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>, value: V) -> Self {
        Self {
            key: datetime_key(time),
            value,
        }
    }

    pub fn from_decimal_key(key: Decimal, value: V) -> BarViewResult<Self> {
        Ok(Self {
            key: decimal_key(key)?,
            value,
        })
    }
}

/// Raw input entry: a single point or a group of points.
///
/// Deserializes untagged from `{"key": .., "value": ..}` or an array of
/// such objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEntry<V> {
    Point(KeyedPoint<V>),
    Group(Vec<KeyedPoint<V>>),
}

impl<V> RawEntry<V> {
    /// Number of points carried by this entry.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Point(_) => 1,
            Self::Group(points) => points.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> impl Iterator<Item = &KeyedPoint<V>> {
        let (single, group) = match self {
            Self::Point(point) => (Some(point), None),
            Self::Group(points) => (None, Some(points.iter())),
        };
        single.into_iter().chain(group.into_iter().flatten())
    }

    pub(crate) fn push_points_into(self, out: &mut Vec<KeyedPoint<V>>) {
        match self {
            Self::Point(point) => out.push(point),
            Self::Group(points) => out.extend(points),
        }
    }
}

impl<V> From<KeyedPoint<V>> for RawEntry<V> {
    fn from(point: KeyedPoint<V>) -> Self {
        Self::Point(point)
    }
}

impl<V> From<Vec<KeyedPoint<V>>> for RawEntry<V> {
    fn from(points: Vec<KeyedPoint<V>>) -> Self {
        Self::Group(points)
    }
}

/// Points sharing one key, in first-seen order. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bucket<V> {
    points: SmallVec<[KeyedPoint<V>; 1]>,
}

impl<V> Bucket<V> {
    #[must_use]
    pub fn new(first: KeyedPoint<V>) -> Self {
        Self {
            points: smallvec![first],
        }
    }

    /// Representative key, taken from the first point.
    #[must_use]
    pub fn key(&self) -> f64 {
        self.points[0].key
    }

    /// Number of points at this key.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn points(&self) -> &[KeyedPoint<V>] {
        &self.points
    }

    #[must_use]
    pub fn first(&self) -> &KeyedPoint<V> {
        &self.points[0]
    }

    pub(crate) fn push(&mut self, point: KeyedPoint<V>) {
        self.points.push(point);
    }

    /// Converts back into the raw input shape: a bare point for depth 1.
    #[must_use]
    pub fn into_raw_entry(self) -> RawEntry<V> {
        let mut points = self.points.into_vec();
        if points.len() == 1 {
            if let Some(point) = points.pop() {
                return RawEntry::Point(point);
            }
        }
        RawEntry::Group(points)
    }
}
