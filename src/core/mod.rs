pub mod logging;
pub mod quest;
pub mod viewer;
