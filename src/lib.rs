//! # Itinerary
//!
//! Itinerary orders a set of named items from pairwise precedence statements
//! such as `x => z` ("z comes before x") or `h =>` ("h appears somewhere").
//! The ordering is built incrementally, one statement at a time, and the first
//! malformed, self-referential, duplicated, contradictory or dangling statement
//! aborts the whole computation.
//!
//! ```rust
//! use itinerary::{plan_statements, PlanError};
//!
//! let order = plan_statements(["b => a", "a =>", "c =>"]).unwrap();
//! assert_eq!(order.to_string(), "[a, b, c]");
//!
//! let err = plan_statements(["a => b", "b => a"]).unwrap_err();
//! assert!(matches!(err, PlanError::Cycle { .. }));
//! ```

pub mod planner;
pub mod statement;

pub use planner::{plan, plan_statements, Itinerary, PlanError, Planner};
pub use statement::{Constraint, Item, StatementError, StatementSyntax};
