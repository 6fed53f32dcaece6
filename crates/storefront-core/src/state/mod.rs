//! # State Slices
//!
//! The client state is split into independent slices, each with its own
//! event type and a pure reducer `(state, event) -> state`.
//!
//! ```text
//! storefront_core::state/
//! ├── mod.rs      ◄─── Slice exports
//! ├── user.rs     ◄─── UserState, UserEvent, reduce()
//! └── cart.rs     ◄─── CartState, CartEvent, reduce()
//! ```
//!
//! Reducers never perform I/O, never read clocks and never log. The store
//! in `storefront-client` is the only place that calls them.

pub mod cart;
pub mod user;

pub use cart::{CartEvent, CartState};
pub use user::{UserEvent, UserPhase, UserState};
