pub mod post_tool;
pub mod pre_tool;
pub mod session_start;
pub mod user_prompt;
