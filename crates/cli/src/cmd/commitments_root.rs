use bluewater_types::{aliases::B256, commitments::kzg_commitments_root, kzg::KzgCommitment};
use clap::Parser;
use color_eyre::eyre;
use tracing::info;

#[derive(Parser, Clone, Debug, Default, PartialEq)]
pub struct CommitmentsRootCmd {
    /// Hex-encoded 48-byte KZG commitments, in blobs bundle order
    #[arg(value_name = "COMMITMENT")]
    pub commitments: Vec<KzgCommitment>,
}

impl CommitmentsRootCmd {
    pub fn run(&self) -> eyre::Result<B256> {
        let root = kzg_commitments_root(&self.commitments)?;
        info!(count = self.commitments.len(), %root, "Computed blob KZG commitments root");
        Ok(root)
    }
}
