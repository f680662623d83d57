pub mod input;
pub mod output;

pub use input::{InputError, ToolEvent};
pub use output::{HookDecision, HookExit, HookResult};
