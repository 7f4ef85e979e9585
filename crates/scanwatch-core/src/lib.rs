/// ScanWatch Core: progress derivation, validation, and service access.
///
/// This crate contains all business logic with zero terminal dependencies.
/// It is designed to be reusable across different frontends (CLI, TUI, GUI).
///
/// # Modules
///
/// - [`model`]: Scan records as exchanged with the backend.
/// - [`progress`]: Pure percentage/phase derivation and display animation.
/// - [`display`]: Status-to-visual lookup and progress geometry.
/// - [`forms`]: Scan-creation forms and their validation.
/// - [`client`]: Blocking REST client for the scanning service.
/// - [`watcher`]: Background polling with progress events.
/// - [`export`]: CSV export of scan lists.
pub mod client;
pub mod display;
pub mod export;
pub mod forms;
pub mod model;
pub mod progress;
pub mod watcher;

pub use model::{ScanDetails, ScanStatus, ScanStatusSnapshot};
pub use progress::{derive_progress, ProgressResult};
