pub mod accounts;
pub mod laundry;
pub mod lookbook;
pub mod planner;
pub mod profile;
pub mod providers;
pub mod stylist;
pub mod wardrobe;
