pub mod account;
pub mod answer;
pub mod survey;
