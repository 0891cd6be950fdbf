pub(crate) mod import;
pub(crate) mod maintenance;
pub(crate) mod query;
pub(crate) mod serve;
