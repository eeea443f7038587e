//! Menu bot: a hard-coded navigation menu served as reply keyboards.

mod menu_handler;
mod tree;

pub use menu_handler::{MenuHandler, UNKNOWN_TEXT_HINT};
pub use tree::{MenuNode, MenuTree, BACK_PREFIX, MAIN_MENU_LABEL};
