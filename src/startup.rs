// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Page startup sequencing.
//!
//! The loading overlay stays up until the content injector reports that the page content is in
//! place. Only then is the side menu wired and the overlay hidden.

use std::fmt;

use tokio::sync::oneshot;
use tracing::{info, warn};

/// Page furniture outside the grid.
pub trait PageChrome {
    fn show_loading_overlay(&mut self);

    fn hide_loading_overlay(&mut self);

    fn setup_side_menu(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    /// The injector went away without reporting completion.
    InjectionAbandoned,
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InjectionAbandoned => f.write_str("content injection ended without signaling"),
        }
    }
}

impl std::error::Error for StartupError {}

/// Held by the content injector; consumed once the content is in place.
#[derive(Debug)]
pub struct ContentInjected(oneshot::Sender<()>);

impl ContentInjected {
    pub fn signal(self) {
        // The waiting side may already be gone; nothing is left to notify then.
        let _ = self.0.send(());
    }
}

/// Held by startup; resolves once the injector has signaled.
#[derive(Debug)]
pub struct ContentReady(oneshot::Receiver<()>);

impl ContentReady {
    pub async fn wait(self) -> Result<(), StartupError> {
        self.0.await.map_err(|_| StartupError::InjectionAbandoned)
    }
}

pub fn content_ready_channel() -> (ContentInjected, ContentReady) {
    let (tx, rx) = oneshot::channel();
    (ContentInjected(tx), ContentReady(rx))
}

/// Shows the overlay, waits for content, then wires the side menu and hides the overlay.
///
/// On failure the overlay is left visible.
pub async fn finish_startup<C>(chrome: &mut C, ready: ContentReady) -> Result<(), StartupError>
where
    C: PageChrome + ?Sized,
{
    chrome.show_loading_overlay();
    if let Err(err) = ready.wait().await {
        warn!(error = %err, "startup aborted");
        return Err(err);
    }

    chrome.setup_side_menu();
    chrome.hide_loading_overlay();
    info!("startup complete");
    Ok(())
}
