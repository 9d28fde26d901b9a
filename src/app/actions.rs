//! Actions representing side effects to be executed by the driver.
//!
//! This module defines the [`Action`] type, the imperative commands produced by
//! the event handler after processing user input or worker responses. Actions
//! bridge pure state transformations and effectful operations such as
//! background fetches or audio playback, which the core never performs itself.
//!
//! # Example
//!
//! ```rust
//! use game_library::app::{Action, SoundCue};
//! use game_library::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_catalog()),
//!     Action::PlaySound { cue: SoundCue::CaseOpen, volume: 0.3 },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;
use std::fmt;

/// Volume used for case and cover sounds.
pub const CASE_SOUND_VOLUME: f32 = 0.3;

/// Volume used for manual page flips.
pub const PAGE_FLIP_VOLUME: f32 = 1.0;

/// Sound the presentation layer should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    CaseOpen,
    CaseClose,
    CoverFlip,
    PageFlip,
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CaseOpen => "case-open",
            Self::CaseClose => "case-close",
            Self::CoverFlip => "cover-flip",
            Self::PageFlip => "page-flip",
        };
        f.write_str(name)
    }
}

/// Commands representing side effects to be executed by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Posts a message to the background worker thread.
    ///
    /// Used for catalog and release fetches and for asset probes, so the
    /// event loop never blocks on I/O.
    PostToWorker(WorkerMessage),

    /// Asks the audio collaborator to play a cue.
    PlaySound {
        cue: SoundCue,
        /// Playback volume in `0.0..=1.0`.
        volume: f32,
    },

    /// Stops the driver loop.
    Quit,
}

impl Action {
    /// Sound action at the volume the cue is always played at.
    #[must_use]
    pub const fn sound(cue: SoundCue) -> Self {
        let volume = match cue {
            SoundCue::PageFlip => PAGE_FLIP_VOLUME,
            SoundCue::CaseOpen | SoundCue::CaseClose | SoundCue::CoverFlip => CASE_SOUND_VOLUME,
        };
        Self::PlaySound { cue, volume }
    }
}
