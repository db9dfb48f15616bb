//! Desktop session bus backends.
//!
//! This module provides the concrete
//! [`SessionBus`](crate::traits::SessionBus) implementation, powered by
//! zbus.  Nothing outside this module should reference D-Bus directly.

pub mod dbus;
