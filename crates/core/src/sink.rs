// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery surface seam.
//!
//! The engine never talks to a network or rendering transport directly; it
//! drives an opaque sink supplied by the host. Opening the surface and
//! delivering a batch are both fire-and-forget — the outcome of an open is
//! reported back to the controller by host glue as a loaded/failed signal,
//! and no timeout is ever applied to a send.

/// An externally supplied delivery transport.
pub trait DeliverySink {
    /// Begins loading the delivery surface (e.g. navigating a hidden
    /// tracking page). The host reports completion via
    /// [`TransportController::surface_loaded`](crate::controller::TransportController::surface_loaded)
    /// or [`surface_failed`](crate::controller::TransportController::surface_failed).
    fn open(&mut self);

    /// Returns the remote policy document once the surface has loaded.
    /// `None` (or a blank document) means defaults apply.
    fn fetch_policy(&mut self) -> Option<String>;

    /// Delivers one concatenated batch, fire-and-forget. A failed send is
    /// lost; there is no completion signal and no retry.
    fn send(&mut self, batch: &str);
}

impl<S: DeliverySink + ?Sized> DeliverySink for &mut S {
    fn open(&mut self) {
        (**self).open()
    }

    fn fetch_policy(&mut self) -> Option<String> {
        (**self).fetch_policy()
    }

    fn send(&mut self, batch: &str) {
        (**self).send(batch)
    }
}
