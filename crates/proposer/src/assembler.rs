use bluewater_types::{
    aliases::B256,
    constants::LOCAL_BUILDER_VALUE,
    header::{ExecutionPayloadHeaderEpbs, HeaderRequest},
    payload::ExecutionData,
};

/// Assemble the header for a locally built payload.
///
/// The proposer is its own builder: `builder_index` is the proposer and the bid `value` is
/// always zero.
pub fn assemble(
    request: &HeaderRequest,
    parent_root: B256,
    execution_data: &ExecutionData,
    commitments_root: B256,
) -> ExecutionPayloadHeaderEpbs {
    ExecutionPayloadHeaderEpbs {
        parent_block_hash: execution_data.parent_hash,
        parent_block_root: parent_root,
        block_hash: execution_data.block_hash,
        gas_limit: execution_data.gas_limit,
        builder_index: request.proposer_index,
        slot: request.slot.as_u64(),
        value: LOCAL_BUILDER_VALUE,
        blob_kzg_commitments_root: commitments_root,
    }
}
