//! # backoffice
//!
//! Client-side core for the café back-office: navigation model, supplier
//! catalog state, the supplier order-template editor, and the typed REST
//! client for the back-office store.
//!
//! ARCHITECTURE
//! ============
//! `state` holds plain owned models a UI layer binds to. `net` is the only
//! module that talks HTTP, and it does so behind the `CatalogStore` and
//! `TemplateStore` traits so every state transition can be driven by a fake
//! in tests.

pub mod auth;
pub mod config;
pub mod nav;
pub mod net;
pub mod state;
