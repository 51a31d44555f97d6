pub mod build;
pub mod run;
