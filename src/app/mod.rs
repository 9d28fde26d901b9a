//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! driver (main.rs) and the catalog/table/selection/worker layers. It
//! implements the event-driven architecture behind the viewer.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: View mode state machine and presentation flags
//! - [`state`]: Central application state container and view model computation
//! - [`store`]: Observable owner of the state
//!
//! # Example
//!
//! ```rust
//! use game_library::app::{handle_event, AppState, Event};
//! use game_library::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), 10);
//! let (_render, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(!actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;
pub mod store;

pub use actions::{Action, SoundCue};
pub use handler::{handle_event, Event};
pub use modes::{ViewMode, ViewState};
pub use state::{AppState, LoadingState};
pub use store::{Store, SubscriptionId};
