use std::fmt::Display;

use ahash::{HashSet, HashSetExt};
use indexmap::IndexSet;
use itertools::Itertools;

use super::PlanError;
use crate::statement::{Constraint, Item};

/// A finished ordering: every declared item exactly once, each predecessor
/// before its destination.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Itinerary {
    stops: IndexSet<Item>,
}

impl PartialEq for Itinerary {
    fn eq(&self, other: &Self) -> bool {
        self.stops.iter().eq(other.stops.iter())
    }
}

impl Eq for Itinerary {}

impl Itinerary {
    pub(crate) fn from_ordered(stops: IndexSet<Item>) -> Self {
        Itinerary { stops }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Item> {
        self.stops.iter()
    }

    pub fn position(&self, item: &str) -> Option<usize> {
        self.stops.get_index_of(item)
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.stops.get_index(index)
    }

    pub fn to_vec(&self) -> Vec<Item> {
        self.stops.iter().cloned().collect()
    }

    pub fn into_vec(self) -> Vec<Item> {
        self.stops.into_iter().collect()
    }

    /// Checks this ordering against `constraints`, independently of how it
    /// was produced.
    ///
    /// Fails if a constraint is self-referential or declares an item twice, if
    /// the stops and the declared items differ, or if a predecessor does not
    /// come strictly before its destination.
    pub fn verify(&self, constraints: &[Constraint]) -> Result<(), PlanError> {
        let mut declared = HashSet::new();
        for constraint in constraints {
            let destination = &constraint.destination;
            if destination.as_str().is_empty() {
                return Err(PlanError::UnnamedDestination);
            }
            if constraint.anchor() == Some(destination) {
                return Err(PlanError::SelfDependency {
                    item: destination.clone(),
                });
            }
            if !declared.insert(destination) {
                return Err(PlanError::DuplicateDestination {
                    item: destination.clone(),
                });
            }
        }

        let undeclared: IndexSet<&Item> = self
            .stops
            .iter()
            .chain(constraints.iter().filter_map(Constraint::anchor))
            .filter(|item| !declared.contains(item))
            .collect();

        if !undeclared.is_empty() || self.len() != declared.len() {
            return Err(PlanError::IncompleteOrdering {
                planned: self.len(),
                declared: declared.len(),
                undeclared: undeclared.into_iter().cloned().collect(),
            });
        }

        for constraint in constraints {
            let Some(predecessor) = constraint.anchor() else {
                continue;
            };
            if let (Some(p), Some(d)) = (
                self.position(predecessor.as_str()),
                self.position(constraint.destination.as_str()),
            ) {
                if p > d {
                    return Err(PlanError::Cycle {
                        destination: constraint.destination.clone(),
                        predecessor: predecessor.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Repeated items keep their first position.
impl FromIterator<Item> for Itinerary {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Itinerary {
            stops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Itinerary {
    type Item = Item;
    type IntoIter = indexmap::set::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Itinerary {
    type Item = &'a Item;
    type IntoIter = indexmap::set::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.iter()
    }
}

impl Display for Itinerary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.stops.iter().join(", "))
    }
}
