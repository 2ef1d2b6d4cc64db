pub mod tenant_directory;

pub use tenant_directory::{DirectoryError, TenantDirectory, TenantResolver};
