//! Application state models.
//!
//! DESIGN
//! ======
//! Each view owns one plain model. Models never share mutable data; values
//! cross between them by clone, e.g. a saved template seeding an order draft.

pub mod catalog;
pub mod editor;
pub mod order;
pub mod seq;
pub mod template;
