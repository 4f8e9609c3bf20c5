pub mod axfr;
pub mod domain_tree;
pub mod master_file;
pub mod zone;

pub use axfr::ZoneAxfrIter;
pub use zone::{FindResult, Zone};
