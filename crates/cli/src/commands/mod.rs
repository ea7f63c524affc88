pub(crate) mod gauges;
pub(crate) mod serve;
