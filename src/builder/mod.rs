//! Build-tool integration: variable emission and the driver seam.

pub mod cmake;
pub mod driver;
pub mod toolchain;

pub use cmake::CMakeDriver;
pub use driver::BuildDriver;
pub use toolchain::BuildVars;
