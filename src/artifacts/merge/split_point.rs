//! History graph queries
//!
//! ## Algorithm Overview
//!
//! All queries walk parent links through a loader closure, so the finder
//! works against the object database or an in-memory graph alike.
//!
//! - `ancestors_of(x)` is a breadth-first walk over both parent edges starting
//!   at (and including) `x`. Each commit is enqueued at most once, first parent
//!   before second parent.
//! - `is_ancestor(c, x)` only follows first parents from `x` down to the root.
//! - `split_point(a, b)` is the first commit of `ancestors_of(b)`, in BFS order
//!   from `b`, that is also an ancestor of `a`.
//!
//! ## Known Imprecision
//!
//! The BFS-first match is not always a lowest common ancestor. In the history
//!
//! ```text
//! R <- A1 <- A2
//!  ^     ^
//!  |     +-- B1 <-+
//!  +--------------+- Bm   (Bm = merge of B1 and R)
//! ```
//!
//! `split_point(A2, Bm)` is `R`, because `R` is one hop from `Bm` while `A1`
//! is two. Merges still behave sensibly; the base is simply older than needed.

use crate::artifacts::objects::commit::Parents;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

pub struct SplitPointFinder<F>
where
    F: Fn(&ObjectId) -> anyhow::Result<Parents>,
{
    parents_of: F,
}

impl<F> SplitPointFinder<F>
where
    F: Fn(&ObjectId) -> anyhow::Result<Parents>,
{
    pub fn new(parents_of: F) -> Self {
        SplitPointFinder { parents_of }
    }

    /// Every commit reachable from `oid`, including itself, in BFS order
    pub fn ancestors_of(&self, oid: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        let mut seen = HashSet::from([oid.clone()]);
        let mut queue = VecDeque::from([oid.clone()]);
        let mut ancestors = Vec::new();

        while let Some(current) = queue.pop_front() {
            for parent in (self.parents_of)(&current)?.iter() {
                if seen.insert(parent.clone()) {
                    queue.push_back(parent.clone());
                }
            }
            ancestors.push(current);
        }

        Ok(ancestors)
    }

    /// Whether `candidate` lies on the first-parent chain from `of` to the root
    pub fn is_ancestor(&self, candidate: &ObjectId, of: &ObjectId) -> anyhow::Result<bool> {
        let mut current = Some(of.clone());

        while let Some(oid) = current {
            if &oid == candidate {
                return Ok(true);
            }
            current = (self.parents_of)(&oid)?.first().cloned();
        }

        Ok(false)
    }

    pub fn split_point(&self, a: &ObjectId, b: &ObjectId) -> anyhow::Result<ObjectId> {
        let ancestors_of_a = self.ancestors_of(a)?.into_iter().collect::<HashSet<_>>();

        let split_point = self
            .ancestors_of(b)?
            .into_iter()
            .find(|oid| ancestors_of_a.contains(oid))
            .ok_or_else(|| anyhow::anyhow!("commits {a} and {b} share no history"))?;
        tracing::debug!(%a, %b, split = %split_point, "found split point");

        Ok(split_point)
    }
}
