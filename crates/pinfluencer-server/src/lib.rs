//! # Pinfluencer Server
//!
//! Controllers, per-route sequences and the dispatcher of the Pinfluencer
//! API.
//!
//! - [`bootstrap`] registers the collaborators, hooks and controllers of one
//!   deployment in a [`Container`](pinfluencer_core::Container)
//! - [`routes`] loads the route key to sequence table
//! - [`sequences`] builds the step list of every route behaviour
//! - [`Dispatcher`] runs an inbound event through its route and renders
//!   the response
//!
//! ## Example
//!
//! ```rust,ignore
//! use pinfluencer_server::{bootstrap, Collaborators, Dispatcher};
//!
//! let container = bootstrap(&collaborators, "https://images.example.com");
//! let dispatcher = Dispatcher::new(&container)?;
//! let response = dispatcher.dispatch(event);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod controllers;
pub mod dispatcher;
pub mod routes;
pub mod sequences;

pub use bootstrap::{bootstrap, Collaborators, ResourceHookGroups};
pub use dispatcher::{Dispatcher, DispatcherError};
pub use routes::{RouteTable, RouteTableError};
pub use sequences::{SequenceKind, SequenceParts};
