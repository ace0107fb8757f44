pub mod trail;
pub mod projection;
pub mod headless;
