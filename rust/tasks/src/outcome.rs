// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Workflow outcomes.
//!
//! A workflow that runs to completion reports what it created. Input
//! that fails a validation gate is a rejection with a reason, not an
//! error; cancelling a pick ends the workflow silently.

use plankit_host::ElementId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The workflow created these elements.
    Created(Vec<ElementId>),
    /// Input failed a validation gate.
    Rejected(String),
    /// The user cancelled an interactive pick.
    Cancelled,
}

impl TaskOutcome {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// Ids of created elements, empty for rejection or cancellation.
    pub fn created_ids(&self) -> &[ElementId] {
        match self {
            Self::Created(ids) => ids,
            _ => &[],
        }
    }
}
