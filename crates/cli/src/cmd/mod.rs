mod apply;
mod init;
mod plan;

pub use apply::cmd_apply;
pub use init::cmd_init;
pub use plan::cmd_plan;
