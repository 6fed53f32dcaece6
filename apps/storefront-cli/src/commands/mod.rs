//! # CLI Commands
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── signup.rs   ◄─── Account creation
//! ├── cart.rs     ◄─── Cart show / delete / clear / update
//! ├── users.rs    ◄─── Admin user table
//! ├── catalog.rs  ◄─── Collections and product upload
//! └── config.rs   ◄─── Config file inspection
//! ```
//!
//! Each command builds the flow it needs from the shared `Storefront`,
//! runs one operation and prints the resulting view.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod signup;
pub mod users;
