use itertools::Itertools;
use thiserror::Error;

use crate::statement::{Item, StatementError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error(transparent)]
    Statement(#[from] StatementError),

    #[error("A travel destination needs a non-empty name")]
    UnnamedDestination,

    #[error("The travel destination and the predecessor are the same for {item}")]
    SelfDependency { item: Item },

    #[error("Destination {item} is duplicated in the input")]
    DuplicateDestination { item: Item },

    #[error("Circle in the plan: {predecessor} is already placed after {destination}")]
    Cycle { destination: Item, predecessor: Item },

    #[error(
        "No valid travel can be created from the dependencies: {planned} planned for {declared} declared, undeclared: [{}]",
        .undeclared.iter().join(", ")
    )]
    IncompleteOrdering {
        planned: usize,
        declared: usize,
        undeclared: Vec<Item>,
    },
}
