pub mod constant;
pub mod endpoints;
pub mod fixtures;
pub mod setup;

pub use setup::TestSetup;

pub mod prelude {
    pub use crate::{constant::*, endpoints, fixtures, TestSetup};
}
