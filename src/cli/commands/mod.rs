//! CLI command implementations

pub mod create;
pub mod screenshots;
pub mod selenium;
pub mod webdriver;

pub use create::execute as create;
pub use screenshots::execute as screenshots;
pub use screenshots::execute_noinstall as screenshots_noinstall;
pub use selenium::execute as selenium;
pub use webdriver::execute as webdriver;
