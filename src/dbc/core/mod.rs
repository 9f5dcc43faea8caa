pub(crate) mod bo_;
pub(crate) mod sg_;
