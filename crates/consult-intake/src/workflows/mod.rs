pub mod activity;
pub mod admin;
pub mod consultations;
