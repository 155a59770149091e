use crate::error::CommonError;

pub type Result<T> = std::result::Result<T, CommonError>;
