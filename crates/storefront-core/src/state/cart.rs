//! # Cart Slice
//!
//! Holds the cart badge count. Item rows and totals live in the cart
//! view; this slice only tracks how many items the server last reported.
//!
//! ## Count Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  fetch ok ──────────► SetCount(items.len())   authoritative             │
//! │                                                                         │
//! │  delete ok ─────────► Decrement               local delta, then refetch │
//! │                                                                         │
//! │  clear ok ──────────► Reset                   local delta, then refetch │
//! │                                                                         │
//! │  update ok ─────────► (nothing)               refetch only              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Local deltas are always followed by a refetch, which overwrites them.

use serde::{Deserialize, Serialize};

/// The Cart slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    /// Number of distinct items in the server cart. Never negative.
    pub count: usize,
}

/// Events accepted by the Cart slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    SetCount(usize),
    Decrement,
    Reset,
}

/// Applies one event. Pure: same input, same output.
pub fn reduce(state: &CartState, event: &CartEvent) -> CartState {
    match *event {
        CartEvent::SetCount(count) => CartState { count },
        CartEvent::Decrement => CartState {
            count: state.count.saturating_sub(1),
        },
        CartEvent::Reset => CartState::default(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_count_overwrites() {
        let state = CartState { count: 7 };
        assert_eq!(reduce(&state, &CartEvent::SetCount(3)).count, 3);
        assert_eq!(reduce(&state, &CartEvent::SetCount(0)).count, 0);
    }

    #[test]
    fn test_decrement_saturates_at_zero() {
        assert_eq!(reduce(&CartState { count: 2 }, &CartEvent::Decrement).count, 1);
        assert_eq!(reduce(&CartState { count: 0 }, &CartEvent::Decrement).count, 0);
    }

    #[test]
    fn test_reset_returns_default() {
        assert_eq!(reduce(&CartState { count: 9 }, &CartEvent::Reset), CartState::default());
    }
}
