mod account;
mod closet;
pub mod dispatch;
mod lookbook;
mod planner;
mod render;
mod status;
mod styling;
