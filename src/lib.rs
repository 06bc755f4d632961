//! decitree: a three-question decision tree that recommends a service.
//!
//! Layers follow the dependency direction domain → application →
//! infrastructure → cli. The [`domain::DecisionTreeEngine`] is the whole
//! state machine; everything else schedules, configures or renders it.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
