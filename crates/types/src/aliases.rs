pub type B256 = alloy_primitives::B256;
pub type Address = alloy_primitives::Address;

/// Index of a validator in the beacon state registry.
pub type ValidatorIndex = u64;
