pub mod floored;
