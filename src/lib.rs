mod codec;
mod config;
mod consts;
mod partition;
mod prelude;
mod range;
mod strategy;
mod types;

#[cfg(test)]
mod test_utils;

pub use codec::{CodecError, DateCodec};
pub use config::{ConfigError, PartitionConfig, PartitionRule, Scene};
pub use consts::*;
pub use partition::{
    CalcError, DatePartitioner, HalfMonthPartitioner, MonthPartitioner, PartitionFunction, PartitionKind,
};
pub use range::RangeError;
pub use strategy::{HalfMonth, Month, PartitionStrategy};
pub use types::{BucketIndex, DateValue};
