pub use handle::Handle;
pub use state::{DragDropResponse, DragDropUi, DragSession, DropPosition, ItemVisuals};

mod handle;
mod state;
pub mod utils;
