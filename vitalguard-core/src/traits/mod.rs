//! Collaborator Interfaces
//!
//! The core never performs I/O. Everything it needs from the outside world,
//! and everything it hands back, goes through the narrow traits defined here:
//!
//! - [`directory`] - Patient metadata lookup (date of birth)
//! - [`sink`] - Alert delivery
//! - [`TimeSource`] - Wall clock for timestamps and ages
//!
//! ## Design Philosophy
//!
//! Each trait has exactly one required method. Closures implement them
//! directly, so tests and small integrations need no adapter types:
//!
//! ```rust
//! use std::cell::RefCell;
//! use vitalguard_core::{AlertEvent, traits::AlertSink};
//!
//! let delivered = RefCell::new(Vec::new());
//! let sink = |alert: AlertEvent| delivered.borrow_mut().push(alert);
//! sink.deliver(AlertEvent::emergency("p-1", &[], None, 0));
//! assert_eq!(delivered.borrow().len(), 1);
//! ```
//!
//! Async counterparts for network-backed collaborators live in the
//! `vitalguard-connectors` crate.

pub mod directory;
pub mod sink;

pub use directory::PatientDirectory;
pub use sink::{AlertSink, DiscardSink};

pub use crate::time::TimeSource;
