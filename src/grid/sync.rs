// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use crate::view::{MapView, ViewKey, ViewState};

/// Registry of views that share one center/zoom.
///
/// The group does not own views; it holds their keys and the last broadcast state. Views are
/// handed in by their owner at broadcast time and only registered keys are touched.
#[derive(Debug, Clone, PartialEq)]
pub struct SynchronizationGroup {
    members: BTreeSet<ViewKey>,
    current: ViewState,
}

impl SynchronizationGroup {
    pub fn new(initial: ViewState) -> Self {
        Self { members: BTreeSet::new(), current: initial }
    }

    /// State every member was last set to; new members start here.
    pub fn current(&self) -> ViewState {
        self.current
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, key: ViewKey) -> bool {
        self.members.contains(&key)
    }

    pub fn register(&mut self, key: ViewKey) -> bool {
        self.members.insert(key)
    }

    pub fn deregister(&mut self, key: ViewKey) -> bool {
        self.members.remove(&key)
    }

    /// Sets `state` on every registered view among `views`. Returns how many were updated.
    pub fn broadcast<'v, V>(
        &mut self,
        state: ViewState,
        views: impl IntoIterator<Item = (ViewKey, &'v mut V)>,
    ) -> usize
    where
        V: MapView + ?Sized + 'v,
    {
        self.current = state;
        let mut applied = 0;
        for (key, view) in views {
            if self.members.contains(&key) {
                view.set_view(state.center, state.zoom);
                applied += 1;
            }
        }
        applied
    }
}
