// Trust score aggregation.

pub mod trust;
