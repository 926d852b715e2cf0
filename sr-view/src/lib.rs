//! View state for the Safety Router front end.
//!
//! Everything the user sees is derived from a [`ViewState`]. State only
//! changes through [`ViewState::update`], which takes a [`Msg`] and returns
//! the [`Effect`]s (network calls, map and chart redraws) the runtime must
//! perform once the new state is committed.

pub mod msg;
pub mod rows;
pub mod state;

pub use msg::{Effect, Msg, RequestId};
pub use rows::SummaryRow;
pub use state::{ClusterView, DetailView, RouteView, ViewState};
