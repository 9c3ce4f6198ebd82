//! Serde support for the sequence types.
//!
//! Every sequence serializes as a plain sequence of its elements in
//! iteration order. Ordered sequences and priority queues sort on the way
//! back in, so input order does not matter for them.

use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{OrderedSequence, PriorityQueue, RandomAccessSequence};

/// Upper bound on the capacity reserved from an untrusted size hint.
const MAX_PREALLOCATE: usize = 4096;

struct SequenceVisitor<C, T> {
    marker: PhantomData<(C, T)>,
}

impl<C, T> SequenceVisitor<C, T> {
    const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<'de, C, T> Visitor<'de> for SequenceVisitor<C, T>
where
    C: FromIterator<T>,
    T: Deserialize<'de>,
{
    type Value = C;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
    where
        S: SeqAccess<'de>,
    {
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(elements.into_iter().collect())
    }
}

fn serialize_elements<'a, S, T, I>(serializer: S, length: Option<usize>, elements: I) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seq = serializer.serialize_seq(length)?;
    for element in elements {
        seq.serialize_element(element)?;
    }
    seq.end()
}

impl<A: Serialize> Serialize for RandomAccessSequence<A> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_elements(serializer, Some(self.len()), self)
    }
}

impl<'de, A: Deserialize<'de>> Deserialize<'de> for RandomAccessSequence<A> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SequenceVisitor::<Self, A>::new())
    }
}

impl<K: Ord + Clone + Serialize> Serialize for OrderedSequence<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_elements(serializer, None, self)
    }
}

impl<'de, K: Ord + Clone + Deserialize<'de>> Deserialize<'de> for OrderedSequence<K> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SequenceVisitor::<Self, K>::new())
    }
}

impl<K: Ord + Clone + Serialize> Serialize for PriorityQueue<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_elements(serializer, None, self)
    }
}

impl<'de, K: Ord + Clone + Deserialize<'de>> Deserialize<'de> for PriorityQueue<K> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SequenceVisitor::<Self, K>::new())
    }
}
