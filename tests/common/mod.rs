#![allow(dead_code)]

pub mod point_clouds;
