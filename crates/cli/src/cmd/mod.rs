pub mod commitments_root;
pub mod init;
pub mod local_header;
