pub mod dispatch;
pub mod drivers;
pub mod error;
pub mod matching;
pub mod network;
pub mod pricing;
pub mod requests;
pub mod roster;
pub mod routing;
pub mod scenario;
