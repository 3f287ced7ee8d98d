//! Unidirectional data flow for the dashboard.
//!
//! ```text
//! key press / API result ──→ Intent ──→ Reducer ──→ State ──→ draw
//!        ↑                                                     │
//!        └─────────────────────────────────────────────────────┘
//! ```

/// View state. Rebuilt by value on every transition, compared whole in tests.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Something that happened: a key press, or a response from the worker.
pub trait Intent: Send + 'static {}

/// The only place state transitions happen.
///
/// `reduce` is pure. Requests to the API are issued by the caller after
/// the transition, never from here.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
