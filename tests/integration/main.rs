//! Integration tests against the public crate API.

mod match_flow;
mod state_transitions;
