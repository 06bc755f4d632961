//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (Clock, Prompter)
//! but are themselves concrete structs, not traits.

mod route;
mod session;

pub use route::RouteService;
pub use session::{Presenter, SessionService, SessionView};
