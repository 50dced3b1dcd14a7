mod core;
mod eigen;
pub use self::eigen::*;
mod svec;
pub use self::svec::*;
