// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The failure modes of the carving engine.
//!
//! Nothing in here is recoverable by the engine itself: an error is
//! returned the moment a precondition fails, and the carver that
//! returned it is left exactly as it was before the call.

use failure::Fail;

/// Everything the carving engine can reject.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum Error {
    /// The caller asked for something the engine can't provide: a target
    /// larger than the image, a zero dimension, a seam that doesn't fit
    /// the grid.
    #[fail(display = "invalid argument: {}", reason)]
    InvalidArgument { reason: String },

    /// The image is already one pixel wide (or tall) on the axis being
    /// carved.  `shrink` validates its targets up front, so seeing this
    /// from a shrink means a precondition check is broken.
    #[fail(display = "invalid operation: {}", reason)]
    InvalidOperation { reason: String },
}

impl Error {
    pub(crate) fn invalid_argument<R: Into<String>>(reason: R) -> Self {
        Error::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_operation<R: Into<String>>(reason: R) -> Self {
        Error::InvalidOperation {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
