pub mod add;
pub mod browse;
pub mod clear;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;
