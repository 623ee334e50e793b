pub mod implementor;
pub mod package;
pub mod record;
pub mod sidebar;
pub mod source;

pub use implementor::*;
pub use package::*;
pub use record::*;
pub use sidebar::*;
pub use source::*;
