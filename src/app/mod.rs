// Application layer - Use case interactors

pub mod add_interactor;
pub mod clip_interactor;
pub mod container;
pub mod validate_interactor;

// Re-export interactors
pub use add_interactor::AddInteractor;
pub use clip_interactor::ClipInteractor;
pub use container::{AppContainer, DefaultAppContainer};
pub use validate_interactor::ValidateInteractor;
