//! Per-file merge policy
//!
//! | relative to split                          | resolution          |
//! |--------------------------------------------|---------------------|
//! | same in current and other (incl. both gone)| keep current        |
//! | unchanged in current, changed in other     | take other / remove |
//! | unchanged in other, changed in current     | keep current        |
//! | changed differently in both                | conflict            |

use crate::artifacts::objects::commit::FilesMapping;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    KeepCurrent,
    TakeOther(ObjectId),
    /// Other side deleted a file current left alone
    Remove,
    Conflict {
        current: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

impl Resolution {
    pub fn resolve(
        split: Option<&ObjectId>,
        current: Option<&ObjectId>,
        other: Option<&ObjectId>,
    ) -> Self {
        if current == other || split == other {
            Resolution::KeepCurrent
        } else if split == current {
            match other {
                Some(oid) => Resolution::TakeOther(oid.clone()),
                None => Resolution::Remove,
            }
        } else {
            Resolution::Conflict {
                current: current.cloned(),
                other: other.cloned(),
            }
        }
    }

    /// Resolutions for every file of the three snapshots that needs action
    ///
    /// Files resolved as [`Resolution::KeepCurrent`] are left out.
    pub fn plan(
        split: &FilesMapping,
        current: &FilesMapping,
        other: &FilesMapping,
    ) -> BTreeMap<String, Resolution> {
        let names = split
            .keys()
            .chain(current.keys())
            .chain(other.keys())
            .collect::<BTreeSet<_>>();

        names
            .into_iter()
            .filter_map(|name| {
                let resolution =
                    Self::resolve(split.get(name), current.get(name), other.get(name));
                tracing::trace!(name, ?resolution, "resolved");

                (resolution != Resolution::KeepCurrent).then(|| (name.clone(), resolution))
            })
            .collect()
    }
}
