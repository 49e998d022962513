//! # Incremental Ordering
//!
//! The [`Planner`] builds one ordered sequence from a stream of
//! [`Constraint`]s, one constraint at a time. After every call to
//! [`Planner::insert`] each predecessor already placed sits strictly before its
//! destination, so later insertions can rely on the positions they see.
//!
//! ## Insertion cases
//!
//! For a constraint `destination => predecessor`:
//!
//! | predecessor placed | destination placed | effect |
//! |---|---|---|
//! | no  | no  | append predecessor, then destination |
//! | no  | yes | insert predecessor right before destination |
//! | yes | no  | insert destination right after predecessor |
//! | yes | yes | nothing, unless predecessor sits after destination: [`PlanError::Cycle`] |
//!
//! Items declared without a predecessor, and never referenced by another
//! constraint, are *unanchored*. [`Planner::finish`] appends them in the order
//! they were first seen and then checks that the sequence holds exactly the
//! declared items.
//!
//! ```rust
//! use itinerary::planner::plan_statements;
//!
//! let itinerary = plan_statements(["x => z", "y => z", "z => v", "h =>", "v => h"]).unwrap();
//! assert_eq!(itinerary.to_string(), "[h, v, z, y, x]");
//! ```

use ahash::{HashSet, HashSetExt};
use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::statement::{Constraint, Item, StatementSyntax};

pub mod error;
pub use error::PlanError;

pub mod itinerary;
pub use itinerary::Itinerary;

/// The state of one ordering pass.
#[derive(Debug)]
pub struct Planner {
    travel: IndexSet<Item>,
    declared: HashSet<Item>,
    unanchored: IndexSet<Item>,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

impl Planner {
    pub fn new() -> Self {
        Planner {
            travel: IndexSet::new(),
            declared: HashSet::new(),
            unanchored: IndexSet::new(),
        }
    }

    /// Items placed so far, in order. Unanchored items are not part of it until
    /// [`Planner::finish`].
    pub fn sequence(&self) -> impl Iterator<Item = &Item> {
        self.travel.iter()
    }

    pub fn position(&self, item: &str) -> Option<usize> {
        self.travel.get_index_of(item)
    }

    pub fn is_declared(&self, item: &str) -> bool {
        self.declared.contains(item)
    }

    pub fn is_unanchored(&self, item: &str) -> bool {
        self.unanchored.contains(item)
    }

    pub fn n_declared(&self) -> usize {
        self.declared.len()
    }

    /// Processes one constraint. On error the planner must be discarded.
    ///
    /// A predecessor with an empty name counts as absent.
    pub fn insert(&mut self, constraint: Constraint) -> Result<(), PlanError> {
        let predecessor = constraint.anchor().cloned();
        let destination = constraint.destination;
        self.validate(&destination, predecessor.as_ref())?;

        match predecessor {
            Some(predecessor) => self.insert_dependency(&destination, predecessor)?,
            None => {
                if !self.travel.contains(&destination) {
                    trace!(%destination, "unanchored");
                    self.unanchored.insert(destination.clone());
                }
            }
        }

        self.declared.insert(destination);
        Ok(())
    }

    fn validate(&self, destination: &Item, predecessor: Option<&Item>) -> Result<(), PlanError> {
        if destination.as_str().is_empty() {
            return Err(PlanError::UnnamedDestination);
        }
        if predecessor == Some(destination) {
            return Err(PlanError::SelfDependency {
                item: destination.clone(),
            });
        }
        if self.declared.contains(destination) {
            return Err(PlanError::DuplicateDestination {
                item: destination.clone(),
            });
        }
        Ok(())
    }

    fn insert_dependency(
        &mut self,
        destination: &Item,
        predecessor: Item,
    ) -> Result<(), PlanError> {
        match (
            self.travel.get_index_of(&predecessor),
            self.travel.get_index_of(destination),
        ) {
            (None, None) => {
                debug!(%destination, %predecessor, "appending pair");
                self.travel.insert(predecessor.clone());
                self.travel.insert(destination.clone());
            }
            (None, Some(d)) => {
                debug!(%destination, %predecessor, at = d, "placing predecessor");
                self.travel.shift_insert(d, predecessor.clone());
            }
            (Some(p), None) => {
                debug!(%destination, %predecessor, at = p + 1, "placing destination");
                self.travel.shift_insert(p + 1, destination.clone());
            }
            (Some(p), Some(d)) => {
                if p > d {
                    debug!(%destination, %predecessor, p, d, "order contradiction");
                    return Err(PlanError::Cycle {
                        destination: destination.clone(),
                        predecessor,
                    });
                }
                trace!(%destination, %predecessor, "already ordered");
            }
        }

        if self.unanchored.shift_remove(destination) {
            trace!(%destination, "anchored");
        }
        if self.unanchored.shift_remove(&predecessor) {
            trace!(%predecessor, "anchored");
        }
        Ok(())
    }

    /// Appends the unanchored items and checks that every placed item was
    /// declared.
    pub fn finish(self) -> Result<Itinerary, PlanError> {
        let Planner {
            mut travel,
            declared,
            unanchored,
        } = self;

        debug!(
            placed = travel.len(),
            unanchored = unanchored.len(),
            "finishing"
        );
        travel.extend(unanchored);

        if travel.len() != declared.len() {
            let undeclared = travel
                .iter()
                .filter(|item| !declared.contains(*item))
                .cloned()
                .collect();
            return Err(PlanError::IncompleteOrdering {
                planned: travel.len(),
                declared: declared.len(),
                undeclared,
            });
        }

        Ok(Itinerary::from_ordered(travel))
    }
}

/// Runs a full ordering pass over already parsed constraints.
pub fn plan<I>(constraints: I) -> Result<Itinerary, PlanError>
where
    I: IntoIterator<Item = Constraint>,
{
    let mut planner = Planner::new();
    for constraint in constraints {
        planner.insert(constraint)?;
    }
    planner.finish()
}

/// Parses and orders statements written with the default `=>` separator.
pub fn plan_statements<I>(lines: I) -> Result<Itinerary, PlanError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    StatementSyntax::default().plan(lines)
}

impl StatementSyntax {
    /// Every line is parsed before the first one is ordered, so a malformed
    /// line is reported even if an earlier constraint is contradictory.
    pub fn plan<I>(&self, lines: I) -> Result<Itinerary, PlanError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let constraints = self.parse_all(lines)?;
        plan(constraints)
    }
}

#[cfg(test)]
mod tests;
