pub mod build_check;
